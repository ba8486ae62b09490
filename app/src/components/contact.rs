//! Contact section: details plus the validated message form

use dioxus::prelude::*;
use folio_core::contact::{FAILURE_ALERT, SUCCESS_MESSAGE, SubmitError};
use folio_core::{ContactTransport, FormField, MountPoint, SimulatedTransport, SubmitOutcome};
use folio_types::SectionId;
use gloo_timers::future::TimeoutFuture;

use super::section::SectionShell;
use crate::dom;
use crate::site::{PageSite, use_site};

/// Send the validated form, then show the banner or the failure alert.
fn submit(mut site: Signal<PageSite>) {
    let (message, delay, banner_ms) = {
        let mut site = site.write();
        let settings = site.config().contact.clone();
        match site.contact_mut().begin_submit() {
            Ok(message) => (message, settings.submit_delay, settings.success_banner),
            Err(SubmitError::Invalid { invalid }) => {
                tracing::debug!(invalid, "contact form has invalid fields");
                return;
            }
            Err(SubmitError::InFlight) => return,
        }
    };

    spawn(async move {
        let transport = SimulatedTransport::new(delay, TimeoutFuture::new);
        let result = transport.send(&message).await;
        let outcome = site.write().contact_mut().finish_submit(result);

        match outcome {
            SubmitOutcome::Sent { banner } => {
                TimeoutFuture::new(banner_ms).await;
                site.write().contact_mut().hide_success(banner);
            }
            SubmitOutcome::Failed => dom::alert(FAILURE_ALERT),
        }
    });
}

#[component]
fn Field(field: FormField, multiline: bool) -> Element {
    let mut site = use_site();
    let (value, error) = {
        let site = site.read();
        let form = site.contact();
        (form.value(field).to_string(), form.error_message(field))
    };
    let input_class = if error.is_some() { "form-input invalid" } else { "form-input" };
    let label = field.label();
    let key = field.key();

    rsx! {
        div { class: "form-group",
            label { r#for: "{key}", "{label}" }
            if multiline {
                textarea {
                    id: "{key}",
                    name: "{key}",
                    class: "{input_class}",
                    rows: "5",
                    value: "{value}",
                    oninput: move |e| site.write().contact_mut().on_input(field, e.value()),
                    onblur: move |_| {
                        site.write().contact_mut().on_blur(field);
                    },
                }
            } else {
                input {
                    id: "{key}",
                    name: "{key}",
                    r#type: if field == FormField::Email { "email" } else { "text" },
                    class: "{input_class}",
                    value: "{value}",
                    oninput: move |e| site.write().contact_mut().on_input(field, e.value()),
                    onblur: move |_| {
                        site.write().contact_mut().on_blur(field);
                    },
                }
            }
            p {
                id: MountPoint::FieldError(field).id(),
                class: if error.is_some() { "field-error" } else { "field-error hidden" },
                role: "alert",
                "{error.unwrap_or_default()}"
            }
        }
    }
}

#[component]
pub fn Contact() -> Element {
    let site = use_site();
    let (personal, submitting, success) = {
        let site = site.read();
        (
            site.portfolio().personal.clone(),
            site.contact().is_submitting(),
            site.contact().success_visible(),
        )
    };

    rsx! {
        SectionShell { section: SectionId::Contact, subtitle: "Have a project in mind? Let's talk.",
            div { class: "contact-grid",
                div { class: "contact-info",
                    h3 { "Get in touch" }
                    p { "I'm always open to new opportunities and interesting projects." }
                    ul { class: "contact-list",
                        li {
                            i { class: "fa-solid fa-envelope" }
                            a { href: "mailto:{personal.email}", " {personal.email}" }
                        }
                        if !personal.phone.is_empty() {
                            li {
                                i { class: "fa-solid fa-phone" }
                                " {personal.phone}"
                            }
                        }
                        if !personal.location.is_empty() {
                            li {
                                i { class: "fa-solid fa-location-dot" }
                                " {personal.location}"
                            }
                        }
                    }
                }

                form {
                    id: MountPoint::ContactForm.id(),
                    class: "contact-form",
                    novalidate: true,
                    onsubmit: move |e| {
                        e.prevent_default();
                        submit(site);
                    },
                    Field { field: FormField::Name, multiline: false }
                    Field { field: FormField::Email, multiline: false }
                    Field { field: FormField::Subject, multiline: false }
                    Field { field: FormField::Message, multiline: true }

                    button {
                        id: MountPoint::SubmitButton.id(),
                        r#type: "submit",
                        class: "btn btn-primary",
                        disabled: submitting,
                        if submitting {
                            i { class: "fa-solid fa-spinner fa-spin" }
                            " Sending..."
                        } else {
                            i { class: "fa-solid fa-paper-plane" }
                            " Send message"
                        }
                    }

                    if success {
                        div { id: MountPoint::SuccessMessage.id(), class: "success-message", role: "status",
                            i { class: "fa-solid fa-circle-check" }
                            " {SUCCESS_MESSAGE}"
                        }
                    }
                }
            }
        }
    }
}
