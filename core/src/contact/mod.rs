//! Contact form state
//!
//! Field values and inline errors live in [`ContactForm`]. A submit runs in
//! three steps so the frontend never holds a borrow across an await:
//!
//! 1. [`ContactForm::begin_submit`] validates every field and locks the form
//! 2. the caller awaits a [`ContactTransport`]
//! 3. [`ContactForm::finish_submit`] unlocks, resets on success and arms the
//!    success banner

mod error;
mod transport;
mod validation;

pub use error::{SendError, SubmitError};
pub use transport::{ContactTransport, SimulatedTransport};
pub use validation::{ErrorMap, FieldError, FormField, validate_field};

use serde::Serialize;

use crate::overlay::{CloseTrigger, Overlay};

/// Text of the alert shown when the transport fails
pub const FAILURE_ALERT: &str = "There was an error sending your message. Please try again.";

/// Text of the success banner
pub const SUCCESS_MESSAGE: &str = "Thank you for your message! I'll get back to you soon.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Subject => &self.subject,
            FormField::Message => &self.message,
        }
    }

    fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Subject => &mut self.subject,
            FormField::Message => &mut self.message,
        }
    }

    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Sending,
    Succeeded,
    Failed,
}

/// Identifies one showing of the success banner. A hide timer only hides the
/// banner it was armed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent { banner: BannerTicket },
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    values: ContactMessage,
    errors: ErrorMap,
    phase: SubmitPhase,
    banner: Overlay<BannerTicket>,
    banners_shown: u64,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &ContactMessage {
        &self.values
    }

    pub fn value(&self, field: FormField) -> &str {
        self.values.value(field)
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn error_message(&self, field: FormField) -> Option<&'static str> {
        self.errors.message(field)
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    /// Typing replaces the value and clears that field's error.
    pub fn on_input(&mut self, field: FormField, value: impl Into<String>) {
        *self.values.value_mut(field) = value.into();
        self.errors.clear(field);
    }

    /// Leaving a field validates only that field.
    pub fn on_blur(&mut self, field: FormField) -> bool {
        let result = validate_field(field, self.values.value(field));
        let ok = result.is_ok();
        self.errors.apply(field, result);
        ok
    }

    /// Validate every field, replacing all previous errors.
    pub fn validate_all(&mut self) -> bool {
        self.errors.clear_all();
        for &field in FormField::all() {
            let result = validate_field(field, self.values.value(field));
            self.errors.apply(field, result);
        }
        self.errors.is_empty()
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmitPhase::Sending
    }

    /// The submit control is disabled while a send is in flight.
    pub fn submit_disabled(&self) -> bool {
        self.is_submitting()
    }

    /// Validate and lock the form. Returns the trimmed message to send.
    pub fn begin_submit(&mut self) -> Result<ContactMessage, SubmitError> {
        if self.is_submitting() {
            tracing::warn!("submit ignored, previous submission still in flight");
            return Err(SubmitError::InFlight);
        }
        if !self.validate_all() {
            let invalid = self.errors.len();
            tracing::debug!(invalid, "contact form rejected");
            return Err(SubmitError::Invalid { invalid });
        }
        self.phase = SubmitPhase::Sending;
        Ok(self.values.trimmed())
    }

    /// Unlock after the transport resolved.
    ///
    /// Success resets every field and shows the banner; failure keeps the
    /// input so the visitor can retry.
    pub fn finish_submit(&mut self, result: Result<(), SendError>) -> SubmitOutcome {
        match result {
            Ok(()) => {
                self.phase = SubmitPhase::Succeeded;
                self.values = ContactMessage::default();
                self.errors.clear_all();
                self.banners_shown += 1;
                let ticket = BannerTicket(self.banners_shown);
                self.banner.open(ticket);
                tracing::info!("contact message sent");
                SubmitOutcome::Sent { banner: ticket }
            }
            Err(err) => {
                self.phase = SubmitPhase::Failed;
                tracing::error!(error = %err, "contact submission failed");
                SubmitOutcome::Failed
            }
        }
    }

    pub fn success_visible(&self) -> bool {
        self.banner.is_open()
    }

    /// Hide the banner armed with `ticket`. Stale tickets are ignored.
    pub fn hide_success(&mut self, ticket: BannerTicket) -> bool {
        if self.banner.payload() != Some(&ticket) {
            return false;
        }
        self.banner.close(CloseTrigger::Timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        form.on_input(FormField::Name, "Ada Lovelace");
        form.on_input(FormField::Email, "ada@example.com");
        form.on_input(FormField::Subject, "Collaboration");
        form.on_input(FormField::Message, "  Would love to work together.  ");
        form
    }

    #[test]
    fn all_invalid_fields_block_submission() {
        let mut form = ContactForm::new();
        form.on_input(FormField::Name, "A");
        form.on_input(FormField::Email, "not-an-email");
        form.on_input(FormField::Subject, "hi");
        form.on_input(FormField::Message, "short");

        assert_eq!(form.begin_submit(), Err(SubmitError::Invalid { invalid: 4 }));
        assert_eq!(form.phase(), SubmitPhase::Idle);
        for &field in FormField::all() {
            assert!(form.error_message(field).is_some(), "{field:?} should be flagged");
        }
    }

    #[test]
    fn typing_clears_only_that_fields_error() {
        let mut form = ContactForm::new();
        form.validate_all();
        assert_eq!(form.errors().len(), 4);

        form.on_input(FormField::Email, "x");
        assert!(form.error_message(FormField::Email).is_none());
        assert!(form.error_message(FormField::Name).is_some());
    }

    #[test]
    fn blur_validates_a_single_field() {
        let mut form = ContactForm::new();
        form.on_input(FormField::Subject, "hey");
        assert!(!form.on_blur(FormField::Subject));
        assert_eq!(form.errors().len(), 1);
        assert_eq!(
            form.error_message(FormField::Subject),
            Some("Subject must be at least 5 characters")
        );
    }

    #[test]
    fn second_submit_rejected_while_in_flight() {
        let mut form = filled();
        let message = form.begin_submit().unwrap();
        assert_eq!(message.message, "Would love to work together.");
        assert!(form.submit_disabled());
        assert_eq!(form.begin_submit(), Err(SubmitError::InFlight));
    }

    #[test]
    fn failure_keeps_input_and_unlocks() {
        let mut form = filled();
        form.begin_submit().unwrap();
        let outcome = form.finish_submit(Err(SendError::Unreachable));

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert!(!form.submit_disabled());
        assert_eq!(form.value(FormField::Name), "Ada Lovelace");
        assert!(!form.success_visible());
    }

    #[test]
    fn stale_banner_ticket_does_not_hide_newer_banner() {
        let mut form = filled();
        form.begin_submit().unwrap();
        let SubmitOutcome::Sent { banner: first } = form.finish_submit(Ok(())) else {
            panic!("expected success");
        };

        let mut refill = filled();
        std::mem::swap(&mut form.values, &mut refill.values);
        form.begin_submit().unwrap();
        let SubmitOutcome::Sent { banner: second } = form.finish_submit(Ok(())) else {
            panic!("expected success");
        };

        assert!(!form.hide_success(first));
        assert!(form.success_visible());
        assert!(form.hide_success(second));
        assert!(!form.success_visible());
    }

    #[tokio::test]
    async fn simulated_send_runs_disabled_loading_success_enabled() {
        let transport = SimulatedTransport::new(20, |ms| {
            tokio::time::sleep(Duration::from_millis(u64::from(ms)))
        });
        let mut form = filled();

        let message = form.begin_submit().unwrap();
        assert!(form.submit_disabled());
        assert_eq!(form.phase(), SubmitPhase::Sending);

        let result = transport.send(&message).await;
        let outcome = form.finish_submit(result);

        let SubmitOutcome::Sent { banner } = outcome else {
            panic!("simulated transport always succeeds");
        };
        assert!(!form.submit_disabled());
        assert!(form.success_visible());
        assert_eq!(form.values(), &ContactMessage::default());

        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(form.hide_success(banner));
        assert!(!form.success_visible());
    }
}
