use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Routes served alongside the relay; the relay cannot be mounted on them.
pub const RESERVED_PATHS: &[&str] = &["/", "/health"];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub mail: MailConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub relay_path: String,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    Smtp,
    Log,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmtpSecurity {
    /// Implicit TLS, usually port 465.
    Tls,
    Starttls,
    /// Plaintext without authentication. Only for local mail catchers.
    None,
}

/// Mail account settings. Credentials and mailboxes have no defaults and
/// must come from `config.toml` or `APP_MAIL__*` variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    pub transport: TransportKind,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub security: SmtpSecurity,
    pub username: String,
    pub password: String,
    pub sender: String,
    pub recipient: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub permissive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub request_tracing: bool,
}

/// The part of [`MailConfig`] that composition needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailboxConfig {
    pub sender: String,
    pub recipient: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            relay_path: "/api/send-email".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            transport: TransportKind::Smtp,
            smtp_host: String::new(),
            smtp_port: 465,
            security: SmtpSecurity::Tls,
            username: String::new(),
            password: String::new(),
            sender: String::new(),
            recipient: String::new(),
            timeout_seconds: 20,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
            permissive: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            request_tracing: true,
        }
    }
}

impl MailConfig {
    pub fn mailboxes(&self) -> MailboxConfig {
        MailboxConfig {
            sender: self.sender.clone(),
            recipient: self.recipient.clone(),
        }
    }

    pub fn requires_credentials(&self) -> bool {
        self.transport == TransportKind::Smtp && self.security != SmtpSecurity::None
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sender.trim().is_empty() {
            return Err(ConfigError::Message(
                "mail.sender must be configured".to_string(),
            ));
        }

        if self.recipient.trim().is_empty() {
            return Err(ConfigError::Message(
                "mail.recipient must be configured".to_string(),
            ));
        }

        if self.transport == TransportKind::Log {
            return Ok(());
        }

        if self.smtp_host.trim().is_empty() {
            return Err(ConfigError::Message(
                "mail.smtp_host must be configured".to_string(),
            ));
        }

        if self.smtp_port == 0 {
            return Err(ConfigError::Message("mail.smtp_port cannot be 0".to_string()));
        }

        if self.requires_credentials()
            && (self.username.is_empty() || self.password.is_empty())
        {
            return Err(ConfigError::Message(
                "mail.username and mail.password must be configured".to_string(),
            ));
        }

        Ok(())
    }
}

impl AppConfig {
    /// Defaults, then `./config.toml` when present, then `APP_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        let default_file = Path::new("config.toml");
        if default_file.exists() {
            Self::load_from(Some(default_file))
        } else {
            Self::load_from(None)
        }
    }

    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        if !self.server.relay_path.starts_with('/') {
            return Err(ConfigError::Message(
                "server.relay_path must start with '/'".to_string(),
            ));
        }

        let relay_path = match self.server.relay_path.trim_end_matches('/') {
            "" => "/",
            path => path,
        };
        if RESERVED_PATHS.contains(&relay_path) {
            return Err(ConfigError::Message(format!(
                "server.relay_path '{}' collides with a built-in route",
                self.server.relay_path
            )));
        }

        if self.server.request_timeout_seconds == 0 {
            return Err(ConfigError::Message(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        self.mail.validate()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn smtp_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.mail.smtp_host = "smtp.example.com".to_string();
        config.mail.username = "relay@example.com".to_string();
        config.mail.password = "secret".to_string();
        config.mail.sender = "Safari Bookings <relay@example.com>".to_string();
        config.mail.recipient = "bookings@example.com".to_string();
        config
    }

    #[test]
    fn test_default_config_requires_mail_settings() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.relay_path, "/api/send-email");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        assert!(smtp_config().validate().is_ok());

        let mut config = smtp_config();
        config.server.port = 0;
        assert!(config.validate().is_err());

        config = smtp_config();
        config.mail.password = String::new();
        assert!(config.validate().is_err());

        config = smtp_config();
        config.mail.recipient = "  ".to_string();
        assert!(config.validate().is_err());

        config = smtp_config();
        config.server.relay_path = "api/send-email".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_relay_path_cannot_shadow_builtin_routes() {
        for path in ["/", "/health", "/health/", "//"] {
            let mut config = smtp_config();
            config.server.relay_path = path.to_string();
            assert!(config.validate().is_err(), "{path} should be rejected");
        }

        let mut config = smtp_config();
        config.server.relay_path = "/api/health-check".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_credentials_optional_without_auth() {
        let mut config = smtp_config();
        config.mail.security = SmtpSecurity::None;
        config.mail.username = String::new();
        config.mail.password = String::new();
        assert!(config.validate().is_ok());

        let mut config = AppConfig::default();
        config.mail.transport = TransportKind::Log;
        config.mail.sender = "relay@example.com".to_string();
        config.mail.recipient = "bookings@example.com".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bind_address() {
        let mut config = AppConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");

        config.server.host = "0.0.0.0".to_string();
        config.server.port = 8080;
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
[server]
port = 8088

[mail]
transport = "log"
sender = "relay@example.com"
recipient = "bookings@example.com"
"#
        )
        .unwrap();

        let config = AppConfig::load_from(Some(file.path())).expect("config should load");
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.mail.transport, TransportKind::Log);
        assert_eq!(config.mail.recipient, "bookings@example.com");
    }

    #[test]
    fn test_load_fails_fast_without_mailboxes() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "[server]\nport = 8089\n").unwrap();

        assert!(AppConfig::load_from(Some(file.path())).is_err());
    }
}
