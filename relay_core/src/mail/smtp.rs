//! SMTP delivery through lettre

use super::{MailError, MailTransport, OutgoingEmail};
use crate::config::{MailConfig, SmtpSecurity};
use async_trait::async_trait;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::time::Duration;
use tracing::{info, warn};

/// Sends through one preconfigured account. Sender and recipient are parsed
/// once so that a bad address fails at startup instead of per request.
pub struct SmtpTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    recipient: Mailbox,
}

impl SmtpTransport {
    pub fn from_config(config: &MailConfig) -> Result<Self, MailError> {
        let sender = parse_mailbox(&config.sender)?;
        let recipient = parse_mailbox(&config.recipient)?;

        let builder = match config.security {
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
                .map_err(|e| MailError::Build(e.to_string()))?,
            SmtpSecurity::Starttls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
                    .map_err(|e| MailError::Build(e.to_string()))?
            }
            SmtpSecurity::None => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
            }
        };

        let mut builder = builder
            .port(config.smtp_port)
            .timeout(Some(Duration::from_secs(config.timeout_seconds)));

        if config.requires_credentials() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        info!(
            "SMTP transport configured for {}:{} ({:?})",
            config.smtp_host, config.smtp_port, config.security
        );

        Ok(Self {
            mailer: builder.build(),
            sender,
            recipient,
        })
    }

    fn build_message(&self, email: &OutgoingEmail) -> Result<Message, MailError> {
        let mut builder = Message::builder()
            .from(self.sender.clone())
            .to(self.recipient.clone())
            .subject(email.subject.as_str());

        // The relay does not validate submitter addresses, so an unparsable
        // one is dropped from the headers rather than failing the send.
        match email.reply_to.parse::<Mailbox>() {
            Ok(reply_to) => builder = builder.reply_to(reply_to),
            Err(e) => warn!("Omitting unparsable reply-to '{}': {}", email.reply_to, e),
        }

        builder
            .multipart(MultiPart::alternative_plain_html(
                email.text_body.clone(),
                email.html_body.clone(),
            ))
            .map_err(|e| MailError::Build(e.to_string()))
    }
}

#[async_trait]
impl MailTransport for SmtpTransport {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let message = self.build_message(email)?;
        self.mailer
            .send(message)
            .await
            .map_err(|e| MailError::Send(e.to_string()))?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .parse::<Mailbox>()
        .map_err(|e| MailError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransportKind;

    fn config() -> MailConfig {
        MailConfig {
            transport: TransportKind::Smtp,
            smtp_host: "localhost".to_string(),
            smtp_port: 2525,
            security: SmtpSecurity::None,
            username: String::new(),
            password: String::new(),
            sender: "Safari Bookings <relay@example.com>".to_string(),
            recipient: "bookings@example.com".to_string(),
            timeout_seconds: 5,
        }
    }

    fn email(reply_to: &str) -> OutgoingEmail {
        OutgoingEmail {
            from: "Safari Bookings <relay@example.com>".to_string(),
            to: "bookings@example.com".to_string(),
            reply_to: reply_to.to_string(),
            subject: "New Safari Inquiry: booking".to_string(),
            text_body: "Name: Jane\n".to_string(),
            html_body: "<p>Name: Jane</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn test_invalid_sender_fails_at_construction() {
        let mut config = config();
        config.sender = "not an address".to_string();
        assert!(matches!(
            SmtpTransport::from_config(&config),
            Err(MailError::InvalidAddress { .. })
        ));
    }

    #[tokio::test]
    async fn test_message_carries_reply_to_and_both_parts() {
        let transport = SmtpTransport::from_config(&config()).unwrap();
        let message = transport.build_message(&email("jane@example.com")).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("Reply-To: jane@example.com"));
        assert!(raw.contains("Subject: New Safari Inquiry: booking"));
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("text/html"));
    }

    #[tokio::test]
    async fn test_unparsable_reply_to_is_omitted() {
        let transport = SmtpTransport::from_config(&config()).unwrap();
        let message = transport.build_message(&email("not-an-email")).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(!raw.contains("Reply-To"));
    }
}
