//! Email delivery through the Mailgun messages API.

use std::fmt;

use async_trait::async_trait;

use crate::Notifier;
use crate::error::{Error, Result, check_response};

/// Production API root, including the version segment.
pub const DEFAULT_API_BASE: &str = "https://api.mailgun.net/v3";

/// Subject line of every menu email.
pub const DEFAULT_SUBJECT: &str = "Lunch Menu";

/// Mailgun client bound to one sending domain.
#[derive(Clone)]
pub struct Mailgun {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    domain: String,
    from: String,
    subject: String,
}

impl Mailgun {
    /// Creates a client sending as `lunchmenu@<domain>`. Fails on a blank
    /// key or domain.
    pub fn new(
        client: reqwest::Client,
        api_key: impl Into<String>,
        domain: impl Into<String>,
    ) -> Result<Self> {
        let api_key = api_key.into();
        let domain = domain.into().trim().to_string();
        if api_key.trim().is_empty() {
            return Err(Error::config("Mailgun API key is empty"));
        }
        if domain.is_empty() {
            return Err(Error::config("Mailgun domain is empty"));
        }

        Ok(Self {
            client,
            api_base: DEFAULT_API_BASE.to_string(),
            from: format!("lunchmenu@{domain}"),
            api_key,
            domain,
            subject: DEFAULT_SUBJECT.to_string(),
        })
    }

    /// Overrides the API root (used to point at a mock server).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Overrides the sender address; `None` or blank keeps the default.
    pub fn with_from(mut self, from: Option<String>) -> Self {
        if let Some(from) = from.filter(|f| !f.trim().is_empty()) {
            self.from = from;
        }
        self
    }

    /// Overrides the subject line.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Sender address used for every message.
    pub fn from_address(&self) -> &str {
        &self.from
    }

    /// `<api_base>/<domain>/messages`
    pub fn messages_url(&self) -> String {
        format!("{}/{}/messages", self.api_base, self.domain)
    }

    /// Sends `text` to a single address.
    pub async fn send_email(&self, to: &str, text: &str) -> Result<()> {
        let form = [
            ("from", self.from.as_str()),
            ("to", to),
            ("subject", self.subject.as_str()),
            ("text", text),
        ];

        tracing::info!(to = %to, domain = %self.domain, "Sending email");
        let response = self
            .client
            .post(self.messages_url())
            .basic_auth("api", Some(&self.api_key))
            .form(&form)
            .send()
            .await?;

        check_response("mailgun", response).await
    }
}

impl fmt::Debug for Mailgun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mailgun")
            .field("api_base", &self.api_base)
            .field("api_key", &"<redacted>")
            .field("domain", &self.domain)
            .field("from", &self.from)
            .field("subject", &self.subject)
            .finish()
    }
}

#[async_trait]
impl Notifier for Mailgun {
    fn channel(&self) -> &'static str {
        "email"
    }

    async fn notify(&self, recipient: &str, text: &str) -> Result<()> {
        self.send_email(recipient, text).await
    }
}
