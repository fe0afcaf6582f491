//! Application configuration

pub mod settings;

pub use settings::{
    AppConfig, CorsConfig, LoggingConfig, MailConfig, MailboxConfig, ServerConfig, SmtpSecurity,
    TransportKind,
};
