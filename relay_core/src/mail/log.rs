//! Transport that writes composed emails to the log instead of sending them

use super::{MailError, MailTransport, OutgoingEmail};
use async_trait::async_trait;
use tracing::info;

#[derive(Debug, Clone, Copy, Default)]
pub struct LogTransport;

#[async_trait]
impl MailTransport for LogTransport {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        info!(
            from = %email.from,
            to = %email.to,
            reply_to = %email.reply_to,
            subject = %email.subject,
            "mail delivery disabled, logging message instead:\n{}",
            email.text_body
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
