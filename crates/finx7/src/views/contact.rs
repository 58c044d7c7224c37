//! Contact page: company details and a message form relayed to a third-party form service.
use std::sync::LazyLock;

use log::{error, info};
use maud::{Markup, html};
use regex::Regex;
use serde::Deserialize;

use crate::errors::FormError;
use crate::options::SiteOptions;
use crate::routing::Route;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").unwrap());

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Per-field validation messages. A field without a message is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub message: Option<&'static str>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }
}

impl ContactForm {
    /// Checks every field. Surrounding whitespace does not count as input.
    pub fn validate(&self) -> FormErrors {
        let email = self.email.trim();

        FormErrors {
            name: self.name.trim().is_empty().then_some("Name is required"),
            email: if email.is_empty() {
                Some("Email is required")
            } else if !EMAIL.is_match(email) {
                Some("Email is invalid")
            } else {
                None
            },
            message: self
                .message
                .trim()
                .is_empty()
                .then_some("Message cannot be empty"),
        }
    }
}

/// Delivers a validated form somewhere a human will read it.
pub trait FormRelay: Send + Sync {
    fn submit(&self, form: &ContactForm) -> Result<(), FormError>;
}

/// Posts forms to a FormSubmit-style endpoint, which forwards them by email.
pub struct FormSubmitRelay {
    agent: ureq::Agent,
    endpoint: String,
}

impl FormSubmitRelay {
    pub fn new(options: &SiteOptions) -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
            endpoint: options.form_endpoint.clone(),
        }
    }
}

impl FormRelay for FormSubmitRelay {
    fn submit(&self, form: &ContactForm) -> Result<(), FormError> {
        self.agent
            .post(&self.endpoint)
            .send_form([
                ("name", form.name.trim()),
                ("email", form.email.trim()),
                ("message", form.message.trim()),
                ("_captcha", "false"),
            ])
            .map_err(|err| match err {
                ureq::Error::StatusCode(status) => FormError::Status { status },
                source => FormError::Request { source },
            })?;

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Editing,
    Sent,
    Failed,
}

/// The form's fields, their validation messages and the outcome of the last submission.
#[derive(Debug, Default)]
pub struct ContactView {
    form: ContactForm,
    errors: FormErrors,
    status: SubmitStatus,
}

impl ContactView {
    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    /// Validates `form` and, if it is valid, hands it to `relay`.
    ///
    /// The form is cleared once relayed. Otherwise it is kept so the visitor can fix it or try again.
    pub fn submit(&mut self, relay: &dyn FormRelay, form: ContactForm) -> SubmitStatus {
        self.errors = form.validate();
        self.form = form;

        if !self.errors.is_empty() {
            self.status = SubmitStatus::Editing;
            return self.status;
        }

        self.status = match relay.submit(&self.form) {
            Ok(()) => {
                info!("Contact form relayed for {}", self.form.email.trim());
                self.form = ContactForm::default();
                SubmitStatus::Sent
            }
            Err(err) => {
                error!("Failed to relay contact form: {}", err);
                SubmitStatus::Failed
            }
        };
        self.status
    }

    pub fn render(&self) -> Markup {
        html! {
            section."bg-gray-900"."py-20"."px-6" id="contactus" {
                div."max-w-6xl"."mx-auto".grid."md:grid-cols-2"."gap-12" {
                    (contact_details())
                    (self.render_form())
                }
            }
        }
    }

    fn render_form(&self) -> Markup {
        html! {
            form."bg-gray-800".rounded-xl."p-8".flex.flex-col."gap-4" method="post" action=(Route::ContactUs.url()) novalidate {
                @match self.status {
                    SubmitStatus::Sent => {
                        p."text-green-400" role="status" data-notice="sent" { "Thanks! Your message has been sent." }
                    }
                    SubmitStatus::Failed => {
                        p."text-red-400" role="alert" data-notice="failed" {
                            "Your message could not be sent. Please try again later."
                        }
                    }
                    SubmitStatus::Editing => {}
                }
                (field("name", "Name", "text", &self.form.name, self.errors.name))
                (field("email", "Email", "email", &self.form.email, self.errors.email))
                label."text-gray-300" for="message" { "Message" }
                textarea."bg-gray-700".text-white.rounded-lg."p-3" id="message" name="message" rows="5" {
                    (self.form.message)
                }
                @if let Some(error) = self.errors.message {
                    p."text-red-400".text-sm data-error="message" { (error) }
                }
                button."bg-orange-300"."hover:bg-orange-200".text-white.font-semibold."py-3".rounded-lg type="submit" {
                    "Send Message"
                }
            }
        }
    }
}

fn field(name: &str, label: &str, kind: &str, value: &str, error: Option<&str>) -> Markup {
    html! {
        label."text-gray-300" for=(name) { (label) }
        input."bg-gray-700".text-white.rounded-lg."p-3" id=(name) type=(kind) name=(name) value=(value);
        @if let Some(error) = error {
            p."text-red-400".text-sm data-error=(name) { (error) }
        }
    }
}

fn contact_details() -> Markup {
    html! {
        div {
            h2."text-4xl".font-bold."text-orange-300"."mb-6" { "Get in Touch" }
            p."text-gray-300"."mb-8" {
                "Have a question about your finances? Send us a message and an advisor will get back to you."
            }
            ul."space-y-4"."text-gray-300" {
                li { span.font-semibold { "Email: " } a href="mailto:info@example.com" { "info@example.com" } }
                li { span.font-semibold { "Phone: " } a href="tel:+1234567890" { "+1 234 567 890" } }
                li { span.font-semibold { "Address: " } "New York, NY" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<ContactForm>>,
        reject: bool,
    }

    impl FormRelay for Recorder {
        fn submit(&self, form: &ContactForm) -> Result<(), FormError> {
            if self.reject {
                return Err(FormError::Status { status: 500 });
            }
            self.sent.lock().unwrap().push(form.clone());
            Ok(())
        }
    }

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    #[test]
    fn empty_form_reports_every_field() {
        let errors = ContactForm::default().validate();
        assert_eq!(errors.name, Some("Name is required"));
        assert_eq!(errors.email, Some("Email is required"));
        assert_eq!(errors.message, Some("Message cannot be empty"));
    }

    #[test]
    fn whitespace_is_not_input() {
        let errors = form("  ", " ", "\n").validate();
        assert_eq!(errors.name, Some("Name is required"));
        assert_eq!(errors.email, Some("Email is required"));
        assert_eq!(errors.message, Some("Message cannot be empty"));
    }

    #[test]
    fn email_needs_a_domain() {
        assert_eq!(form("Ann", "ann", "Hi").validate().email, Some("Email is invalid"));
        assert_eq!(form("Ann", "ann@host", "Hi").validate().email, Some("Email is invalid"));
        assert!(form("Ann", "ann@host.io", "Hi").validate().is_empty());
    }

    #[test]
    fn invalid_form_is_not_relayed() {
        let relay = Recorder::default();
        let mut view = ContactView::default();

        assert_eq!(view.submit(&relay, form("Ann", "nope", "Hi")), SubmitStatus::Editing);
        assert!(relay.sent.lock().unwrap().is_empty());
        assert_eq!(view.form().email, "nope");

        let html = view.render().into_string();
        assert!(html.contains(r#"data-error="email">Email is invalid<"#));
        assert!(html.contains(r#"value="nope""#));
    }

    #[test]
    fn relayed_form_is_cleared() {
        let relay = Recorder::default();
        let mut view = ContactView::default();

        assert_eq!(view.submit(&relay, form("Ann", "ann@host.io", "Hi")), SubmitStatus::Sent);
        assert_eq!(relay.sent.lock().unwrap().len(), 1);
        assert_eq!(view.form(), &ContactForm::default());
        assert!(view.render().into_string().contains(r#"data-notice="sent""#));
    }

    #[test]
    fn section_anchor_matches_the_contact_route() {
        let html = ContactView::default().render().into_string();
        assert!(html.contains(r#"id="contactus""#));
    }

    #[test]
    fn rejected_form_is_kept() {
        let relay = Recorder {
            reject: true,
            ..Default::default()
        };
        let mut view = ContactView::default();

        assert_eq!(view.submit(&relay, form("Ann", "ann@host.io", "Hi")), SubmitStatus::Failed);
        assert_eq!(view.form().name, "Ann");
        assert!(view.render().into_string().contains(r#"data-notice="failed""#));
    }
}
