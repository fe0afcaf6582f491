//! Client-side form collector: one parameterized form for contact and booking
//! submissions, posting inquiries to the relay.

pub mod analytics;
pub mod client;
pub mod collector;
pub mod config;

pub use analytics::{ConversionTracker, NoopTracker, TracingTracker, GENERIC_CONVERSION_LABEL};
pub use client::{HttpRelayClient, RelayClient, SubmitError};
pub use collector::{FormCollector, FormError, FormStatus};
pub use config::{FormConfig, FormField, FormKind, Presentation, DEFAULT_AUTO_CLOSE};
