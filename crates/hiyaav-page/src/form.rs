//! Contact form state.
//!
//! Submission is local only: the payload is logged, an acknowledgment is
//! shown, and after a fixed delay the fields and the acknowledgment clear
//! together.

use std::fmt;

use serde::Serialize;

use crate::error::FormError;

/// Services offered in the form's select box.
pub const SERVICE_OPTIONS: [&str; 7] = [
    "Hair Styling",
    "Color Transformation",
    "Skin Treatments",
    "Makeup Artistry",
    "Nail Care",
    "Wellness Therapies",
    "Other",
];

pub const ACKNOWLEDGMENT: &str = "Thank you for your message! We'll get back to you shortly.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    Email,
    Phone,
    Service,
    Message,
}

impl FormField {
    pub const REQUIRED: [FormField; 4] = [Self::Name, Self::Email, Self::Phone, Self::Service];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Service => "service",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
}

impl ContactFields {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Service => &self.service,
            FormField::Message => &self.message,
        }
    }

    fn slot(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::Service => &mut self.service,
            FormField::Message => &mut self.message,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// An accepted submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub fields: ContactFields,
    pub submitted_at_ms: f64,
    /// When the form will clear.
    pub reset_at_ms: f64,
}

#[derive(Debug)]
pub struct ContactForm {
    fields: ContactFields,
    reset_after_ms: f64,
    pending: Option<Submission>,
}

impl ContactForm {
    pub fn new(reset_after_ms: f64) -> Self {
        Self {
            fields: ContactFields::default(),
            reset_after_ms: reset_after_ms.max(0.0),
            pending: None,
        }
    }

    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        *self.fields.slot(field) = value.into();
    }

    /// The acknowledgment text while a submission is being acknowledged.
    pub fn acknowledgment(&self) -> Option<&'static str> {
        self.pending.as_ref().map(|_| ACKNOWLEDGMENT)
    }

    pub fn is_submitted(&self) -> bool {
        self.pending.is_some()
    }

    pub fn validate(&self) -> Result<(), FormError> {
        for field in FormField::REQUIRED {
            if self.fields.get(field).trim().is_empty() {
                return Err(FormError::MissingField(field));
            }
        }
        if !SERVICE_OPTIONS.contains(&self.fields.service.as_str()) {
            return Err(FormError::UnknownService(self.fields.service.clone()));
        }
        Ok(())
    }

    pub fn submit(&mut self, now_ms: f64) -> Result<Submission, FormError> {
        if self.pending.is_some() {
            return Err(FormError::AlreadySubmitted);
        }
        self.validate()?;

        let submission = Submission {
            fields: self.fields.clone(),
            submitted_at_ms: now_ms,
            reset_at_ms: now_ms + self.reset_after_ms,
        };
        tracing::info!(
            name = %submission.fields.name,
            email = %submission.fields.email,
            phone = %submission.fields.phone,
            service = %submission.fields.service,
            message = %submission.fields.message,
            "contact form submitted"
        );
        self.pending = Some(submission.clone());
        Ok(submission)
    }

    /// Clear fields and acknowledgment once the reset time is reached.
    /// Returns `true` on the tick that resets.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|s| now_ms >= s.reset_at_ms);
        if due {
            self.fields = ContactFields::default();
            self.pending = None;
            tracing::debug!("contact form reset");
        }
        due
    }

    /// Drop the fields and any pending acknowledgment without waiting for
    /// the reset deadline. Returns `true` if a submission was pending.
    pub fn discard(&mut self) -> bool {
        self.fields = ContactFields::default();
        self.pending.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new(3000.0);
        form.set_field(FormField::Name, "Ava Patel");
        form.set_field(FormField::Email, "ava@example.com");
        form.set_field(FormField::Phone, "555-0100");
        form.set_field(FormField::Service, "Nail Care");
        form
    }

    #[test]
    fn test_submit_then_reset_at_deadline() {
        let mut form = filled();
        form.set_field(FormField::Message, "Saturday please");
        let submission = form.submit(1000.0).unwrap();
        assert_eq!(submission.reset_at_ms, 4000.0);
        assert_eq!(form.acknowledgment(), Some(ACKNOWLEDGMENT));

        assert!(!form.tick(3999.0));
        assert_eq!(form.fields().name, "Ava Patel");
        assert!(form.is_submitted());

        assert!(form.tick(4000.0));
        assert!(form.fields().is_empty());
        assert_eq!(form.acknowledgment(), None);
    }

    #[test]
    fn test_missing_required_field() {
        let mut form = filled();
        form.set_field(FormField::Phone, "  ");
        assert_eq!(
            form.submit(0.0),
            Err(FormError::MissingField(FormField::Phone))
        );
        assert!(!form.is_submitted());
    }

    #[test]
    fn test_message_is_optional() {
        let mut form = filled();
        assert!(form.submit(0.0).is_ok());
    }

    #[test]
    fn test_unknown_service() {
        let mut form = filled();
        form.set_field(FormField::Service, "Tattoos");
        assert_eq!(
            form.submit(0.0),
            Err(FormError::UnknownService("Tattoos".to_string()))
        );
    }

    #[test]
    fn test_discard_cancels_pending_reset() {
        let mut form = filled();
        form.submit(500.0).unwrap();
        assert!(form.discard());
        assert!(form.fields().is_empty());
        assert!(!form.tick(10_000.0));
        assert!(!form.discard());
    }

    #[test]
    fn test_double_submit_rejected() {
        let mut form = filled();
        form.submit(0.0).unwrap();
        assert_eq!(form.submit(10.0), Err(FormError::AlreadySubmitted));
    }
}
