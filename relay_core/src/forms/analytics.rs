//! Conversion tracking hook fired after successful submissions

use tracing::info;

pub const GENERIC_CONVERSION_LABEL: &str = "General Inquiry";

pub trait ConversionTracker: Send + Sync {
    fn track_conversion(&self, label: &str);
}

/// Used when no analytics integration is present on the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracker;

impl ConversionTracker for NoopTracker {
    fn track_conversion(&self, _label: &str) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTracker;

impl ConversionTracker for TracingTracker {
    fn track_conversion(&self, label: &str) {
        info!(label, "conversion");
    }
}
