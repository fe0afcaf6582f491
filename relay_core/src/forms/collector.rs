//! Per-instance form state and the submit path

use super::{
    analytics::{ConversionTracker, GENERIC_CONVERSION_LABEL},
    client::RelayClient,
    config::{FormConfig, FormField, FormKind, Presentation},
};
use crate::models::Inquiry;
use std::collections::HashMap;
use std::time::Instant;
use thiserror::Error;
use tracing::{error, info};

const SUCCESS_MESSAGE: &str =
    "Thank you! Your inquiry has been sent. We will get back to you shortly.";
const ERROR_MESSAGE: &str =
    "Sorry, something went wrong while sending your inquiry. Please try again.";
const SUBMITTING_MESSAGE: &str = "Sending...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Submitting,
    Success,
    Error,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("missing required fields: {}", join_labels(.0))]
    MissingFields(Vec<FormField>),
}

fn join_labels(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One form instance. Instances share nothing; each owns its values and
/// status.
#[derive(Debug, Clone)]
pub struct FormCollector {
    config: FormConfig,
    values: HashMap<FormField, String>,
    status: FormStatus,
    open: bool,
    close_deadline: Option<Instant>,
    successes: u64,
}

impl FormCollector {
    pub fn new(config: FormConfig) -> Self {
        let values = initial_values(&config);
        let open = matches!(config.presentation, Presentation::Inline);
        Self {
            config,
            values,
            status: FormStatus::Idle,
            open,
            close_deadline: None,
            successes: 0,
        }
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    /// The submit control is disabled while a request is in flight.
    pub fn is_submitting(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn close_deadline(&self) -> Option<Instant> {
        self.close_deadline
    }

    pub fn successes(&self) -> u64 {
        self.successes
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn value(&self, field: FormField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn is_pristine(&self) -> bool {
        self.values == initial_values(&self.config)
    }

    /// Required fields that are still empty. The relay rejects an empty
    /// message, so `Message` is reported as well whenever nothing would be
    /// sent in its place, even if this form does not mark it required.
    pub fn missing_required(&self) -> Vec<FormField> {
        let mut missing: Vec<FormField> = self
            .config
            .required
            .iter()
            .copied()
            .filter(|field| self.value(*field).is_empty())
            .collect();

        if self.relay_message().is_empty() && !missing.contains(&FormField::Message) {
            missing.push(FormField::Message);
        }

        missing
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        if let Presentation::Modal { .. } = self.config.presentation {
            self.open = false;
            self.status = FormStatus::Idle;
            self.close_deadline = None;
        }
    }

    /// Applies a pending auto-close. Returns true when the modal closed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.close_deadline {
            Some(deadline) if now >= deadline => {
                self.close();
                true
            }
            _ => false,
        }
    }

    pub fn status_message(&self) -> Option<&'static str> {
        match self.status {
            FormStatus::Idle => None,
            FormStatus::Submitting => Some(SUBMITTING_MESSAGE),
            FormStatus::Success => Some(SUCCESS_MESSAGE),
            FormStatus::Error => Some(ERROR_MESSAGE),
        }
    }

    pub fn conversion_label(&self) -> String {
        let package = self.value(FormField::Package);
        if package.is_empty() {
            GENERIC_CONVERSION_LABEL.to_string()
        } else {
            package.to_string()
        }
    }

    /// Builds the wire payload. Booking forms fold their structured fields
    /// into `message`, since the relay only knows name, email, subject and
    /// message.
    pub fn to_inquiry(&self) -> Inquiry {
        let subject = match self.value(FormField::Subject) {
            "" => match self.config.kind {
                FormKind::Contact => None,
                FormKind::Booking => Some(match self.value(FormField::Package) {
                    "" => "Booking Request".to_string(),
                    package => format!("Booking Request: {}", package),
                }),
            },
            subject => Some(subject.to_string()),
        };

        let message = self.relay_message();

        Inquiry::new(
            self.value(FormField::Name),
            self.value(FormField::Email),
            subject,
            message,
        )
    }

    fn relay_message(&self) -> String {
        match self.config.kind {
            FormKind::Contact => self.value(FormField::Message).to_string(),
            FormKind::Booking => self.booking_message(),
        }
    }

    fn booking_message(&self) -> String {
        let mut lines: Vec<String> = [
            FormField::Phone,
            FormField::TravelDate,
            FormField::Guests,
            FormField::Package,
        ]
        .into_iter()
        .filter(|field| self.config.shows(*field))
        .filter_map(|field| match self.value(field) {
            "" => None,
            value => Some(format!("{}: {}", field.label(), value)),
        })
        .collect();

        let notes = self.value(FormField::Message);
        if !notes.is_empty() {
            if !lines.is_empty() {
                lines.push(String::new());
            }
            lines.push("Message:".to_string());
            lines.push(notes.to_string());
        }

        lines.join("\n")
    }

    /// One submission attempt. Missing required fields stop it before any
    /// request is made; transport failures end in [`FormStatus::Error`] and
    /// are never returned to the caller.
    pub async fn submit(
        &mut self,
        client: &dyn RelayClient,
        tracker: &dyn ConversionTracker,
    ) -> Result<FormStatus, FormError> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(FormError::MissingFields(missing));
        }

        let inquiry = self.to_inquiry();
        let label = self.conversion_label();
        self.status = FormStatus::Submitting;

        match client.post_inquiry(&inquiry).await {
            Ok(()) => {
                info!(label = %label, "Form submitted");
                self.status = FormStatus::Success;
                self.successes += 1;
                self.values = initial_values(&self.config);
                tracker.track_conversion(&label);

                if let Presentation::Modal { auto_close } = self.config.presentation {
                    self.close_deadline = Some(Instant::now() + auto_close);
                }
            }
            Err(e) => {
                error!("Form submission failed: {}", e);
                self.status = FormStatus::Error;
            }
        }

        Ok(self.status)
    }
}

fn initial_values(config: &FormConfig) -> HashMap<FormField, String> {
    let mut values: HashMap<FormField, String> = config
        .fields
        .iter()
        .map(|field| (*field, String::new()))
        .collect();
    if let Some(package) = &config.package {
        values.insert(FormField::Package, package.clone());
    }
    values
}
