//! Contact form: builds a Gmail compose link the desktop browser can open.

use crate::http::{build_url, FetchError};

pub const GMAIL_COMPOSE_URL: &str = "https://mail.google.com/mail/";

/// Contents of the contact form as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    /// `Website contact from {name}`, or "Someone" when the name is blank.
    pub fn subject(&self) -> String {
        let name = self.name.trim();
        let name = if name.is_empty() { "Someone" } else { name };
        format!("Website contact from {name}")
    }

    pub fn body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\n\n{}",
            self.name.trim(),
            self.email.trim(),
            self.message.trim()
        )
    }

    /// Gmail compose URL addressed to `recipient`, fields URL-encoded.
    pub fn compose_url(&self, recipient: &str) -> Result<String, FetchError> {
        let subject = self.subject();
        let body = self.body();
        build_url(
            GMAIL_COMPOSE_URL,
            &[
                ("view", "cm"),
                ("fs", "1"),
                ("to", recipient),
                ("su", subject.as_str()),
                ("body", body.as_str()),
            ],
        )
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
