pub mod inquiry;
pub mod request;

pub use inquiry::{Inquiry, ValidatedInquiry, DEFAULT_SUBJECT, MISSING_FIELDS_MESSAGE};
pub use request::RelayResponse;
