//! The transient inquiry payload shared by the relay and the form collector

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const MISSING_FIELDS_MESSAGE: &str = "Please provide name, email, and message";
pub const DEFAULT_SUBJECT: &str = "No Subject";

/// One submission as it travels over the wire. Every field is optional at
/// the serde level so that an absent field is reported by [`Inquiry::validate`]
/// with the fixed validation message rather than as a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Inquiry {
    #[validate(required, length(min = 1))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[validate(required, length(min = 1))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    #[validate(required, length(min = 1))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// An inquiry whose required fields are known to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInquiry {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

impl Inquiry {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            subject,
            message: Some(message.into()),
        }
    }

    pub fn validate_required(self) -> Result<ValidatedInquiry> {
        if let Err(errors) = self.validate() {
            tracing::debug!("Inquiry rejected: {}", errors);
            return Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
        }

        match (self.name, self.email, self.message) {
            (Some(name), Some(email), Some(message)) => Ok(ValidatedInquiry {
                name,
                email,
                subject: self.subject,
                message,
            }),
            _ => Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string())),
        }
    }
}

impl ValidatedInquiry {
    pub fn subject_or_default(&self) -> &str {
        match self.subject.as_deref() {
            Some(subject) if !subject.is_empty() => subject,
            _ => DEFAULT_SUBJECT,
        }
    }
}
