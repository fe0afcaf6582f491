//! In-memory transport that records every message handed to it

use super::{MailError, MailTransport, OutgoingEmail};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct MemoryTransport {
    sent: Arc<RwLock<Vec<OutgoingEmail>>>,
    failure: Arc<RwLock<Option<String>>>,
    attempts: Arc<RwLock<usize>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose every send fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        let transport = Self::default();
        transport.fail_with(Some(reason.into()));
        transport
    }

    pub fn fail_with(&self, reason: Option<String>) {
        *self.failure.write() = reason;
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.read().clone()
    }

    pub fn last_sent(&self) -> Option<OutgoingEmail> {
        self.sent.read().last().cloned()
    }

    /// Number of send calls, successful or not.
    pub fn attempts(&self) -> usize {
        *self.attempts.read()
    }
}

#[async_trait]
impl MailTransport for MemoryTransport {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        *self.attempts.write() += 1;

        if let Some(reason) = self.failure.read().clone() {
            return Err(MailError::Send(reason));
        }

        self.sent.write().push(email.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> OutgoingEmail {
        OutgoingEmail {
            from: "relay@example.com".to_string(),
            to: "bookings@example.com".to_string(),
            reply_to: "jane@example.com".to_string(),
            subject: "New Safari Inquiry: No Subject".to_string(),
            text_body: "hello".to_string(),
            html_body: "hello".to_string(),
        }
    }

    #[tokio::test]
    async fn test_records_sent_messages() {
        let transport = MemoryTransport::new();
        transport.send(&email()).await.unwrap();

        assert_eq!(transport.attempts(), 1);
        assert_eq!(transport.sent().len(), 1);
        assert_eq!(transport.last_sent().unwrap().reply_to, "jane@example.com");
    }

    #[tokio::test]
    async fn test_failing_transport_counts_attempts() {
        let transport = MemoryTransport::failing("mailbox unavailable");
        let err = transport.send(&email()).await.unwrap_err();

        assert_eq!(err.to_string(), "mailbox unavailable");
        assert_eq!(transport.attempts(), 1);
        assert!(transport.sent().is_empty());

        transport.fail_with(None);
        assert!(transport.send(&email()).await.is_ok());
    }
}
