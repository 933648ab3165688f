//! Transactional email through SendGrid's v3 mail API.

use serde_json::{json, Value};
use tracing::info;

use crate::api::Transport;
use crate::auth::{Gateway, Provider};
use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.sendgrid.com/v3";

/// An HTML email to one or more recipients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html_content: String,
}

impl Mail {
    /// The `/mail/send` request body.
    pub fn to_json(&self) -> Result<Value> {
        if self.to.is_empty() {
            return Err(Error::NoRecipients);
        }
        let to: Vec<Value> = self.to.iter().map(|email| json!({ "email": email })).collect();
        Ok(json!({
            "personalizations": [{ "to": to }],
            "from": { "email": self.from },
            "subject": self.subject,
            "content": [{ "type": "text/html", "value": self.html_content }],
        }))
    }
}

pub struct SendGrid<'a, T> {
    gateway: &'a Gateway<T>,
    base_url: String,
}

impl<'a, T: Transport> SendGrid<'a, T> {
    pub fn new(gateway: &'a Gateway<T>) -> Self {
        Self::with_base_url(gateway, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(gateway: &'a Gateway<T>, base_url: impl Into<String>) -> Self {
        SendGrid {
            gateway,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn send_mail(&self, mail: &Mail) -> Result<()> {
        let body = mail.to_json()?;
        let url = format!("{}/mail/send", self.base_url);
        self.gateway.post(Provider::SendGrid, &url, &body)?;
        info!(recipients = mail.to.len(), subject = %mail.subject, "email sent");
        Ok(())
    }
}
