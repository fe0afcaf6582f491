//! Outbound email: composition and the transports that deliver it

pub mod compose;
pub mod log;
pub mod memory;
pub mod smtp;

pub use compose::{compose, escape_html};
pub use log::LogTransport;
pub use memory::MemoryTransport;
pub use smtp::SmtpTransport;

use crate::config::{MailConfig, TransportKind};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// A fully composed message, independent of any mail library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    /// The submitter's address exactly as received. It is never validated:
    /// the SMTP transport leaves the `Reply-To` header out when this does not
    /// parse as a mailbox, and the message is still sent.
    pub reply_to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

#[derive(Error, Debug)]
pub enum MailError {
    #[error("invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("{0}")]
    Send(String),
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;

    fn name(&self) -> &'static str;
}

pub type SharedTransport = Arc<dyn MailTransport>;

/// Builds the transport selected by `mail.transport`.
pub fn transport_from_config(config: &MailConfig) -> Result<SharedTransport, MailError> {
    match config.transport {
        TransportKind::Smtp => Ok(Arc::new(SmtpTransport::from_config(config)?)),
        TransportKind::Log => Ok(Arc::new(LogTransport)),
    }
}
