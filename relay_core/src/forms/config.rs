//! Form configuration: which fields a form shows, which are required, and how
//! it is presented

use std::fmt;
use std::time::Duration;

/// Delay before a booking modal closes itself after a successful submission.
pub const DEFAULT_AUTO_CLOSE: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Subject,
    TravelDate,
    Guests,
    Package,
    Message,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Phone => "Phone",
            FormField::Subject => "Subject",
            FormField::TravelDate => "Travel Date",
            FormField::Guests => "Guests",
            FormField::Package => "Package",
            FormField::Message => "Message",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Contact,
    Booking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Stays in its success state until the visitor navigates away.
    Inline,
    /// Closes itself a fixed delay after a successful submission.
    Modal { auto_close: Duration },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub required: Vec<FormField>,
    pub package: Option<String>,
    pub presentation: Presentation,
}

impl FormConfig {
    /// The general contact form on the contact page.
    pub fn contact() -> Self {
        Self {
            kind: FormKind::Contact,
            fields: vec![
                FormField::Name,
                FormField::Email,
                FormField::Subject,
                FormField::Message,
            ],
            required: vec![FormField::Name, FormField::Email, FormField::Message],
            package: None,
            presentation: Presentation::Inline,
        }
    }

    /// The quick booking modal. Use [`FormConfig::with_package`] for the
    /// per-package variants.
    pub fn booking() -> Self {
        Self {
            kind: FormKind::Booking,
            fields: vec![
                FormField::Name,
                FormField::Email,
                FormField::Phone,
                FormField::TravelDate,
                FormField::Guests,
                FormField::Package,
                FormField::Message,
            ],
            required: vec![FormField::Name, FormField::Email, FormField::TravelDate],
            package: None,
            presentation: Presentation::Modal {
                auto_close: DEFAULT_AUTO_CLOSE,
            },
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        if !self.fields.contains(&FormField::Package) {
            self.fields.push(FormField::Package);
        }
        self
    }

    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FormField>) -> Self {
        self.fields = fields.into_iter().collect();
        self.required.retain(|field| self.fields.contains(field));
        self
    }

    pub fn require(mut self, field: FormField) -> Self {
        if !self.fields.contains(&field) {
            self.fields.push(field);
        }
        if !self.required.contains(&field) {
            self.required.push(field);
        }
        self
    }

    pub fn inline(mut self) -> Self {
        self.presentation = Presentation::Inline;
        self
    }

    pub fn modal(mut self, auto_close: Duration) -> Self {
        self.presentation = Presentation::Modal { auto_close };
        self
    }

    pub fn shows(&self, field: FormField) -> bool {
        self.fields.contains(&field)
    }

    pub fn is_required(&self, field: FormField) -> bool {
        self.required.contains(&field)
    }
}
