//! Fan-out of one composed message to every configured destination.

use std::sync::Arc;

use crate::Notifier;
use crate::error::Error;

/// A destination that could not be reached.
#[derive(Debug)]
pub struct Failure {
    /// Channel name (`telegram`, `email`).
    pub channel: &'static str,
    /// Chat id or email address.
    pub recipient: String,
    /// What went wrong.
    pub error: Error,
}

/// Outcome of [`Dispatcher::dispatch`].
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Messages accepted by their service.
    pub delivered: usize,
    /// Destinations suppressed by a skip flag or without a recipient.
    pub skipped: usize,
    /// Destinations that failed.
    pub failures: Vec<Failure>,
}

impl DispatchReport {
    /// True when no destination failed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Adds the counts and failures of `other` to `self`.
    pub fn merge(&mut self, other: DispatchReport) {
        self.delivered += other.delivered;
        self.skipped += other.skipped;
        self.failures.extend(other.failures);
    }
}

/// Sends to Telegram first, then to every email recipient in order.
///
/// A failure is recorded and delivery moves on to the next destination.
#[derive(Default, Clone)]
pub struct Dispatcher {
    telegram: Option<Arc<dyn Notifier>>,
    default_chat_id: Option<String>,
    email: Option<Arc<dyn Notifier>>,
    recipients: Vec<String>,
    skip_telegram: bool,
    skip_email: bool,
}

impl Dispatcher {
    /// A dispatcher with no destinations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables Telegram delivery; `default_chat_id` is used when a school
    /// has no chat id of its own.
    pub fn with_telegram(
        mut self,
        notifier: Arc<dyn Notifier>,
        default_chat_id: Option<String>,
    ) -> Self {
        self.telegram = Some(notifier);
        self.default_chat_id = default_chat_id.filter(|id| !id.trim().is_empty());
        self
    }

    /// Enables email delivery to `recipients`.
    pub fn with_email(mut self, notifier: Arc<dyn Notifier>, recipients: Vec<String>) -> Self {
        self.email = Some(notifier);
        self.recipients = recipients;
        self
    }

    /// Suppresses Telegram delivery.
    pub fn skip_telegram(mut self, skip: bool) -> Self {
        self.skip_telegram = skip;
        self
    }

    /// Suppresses email delivery.
    pub fn skip_email(mut self, skip: bool) -> Self {
        self.skip_email = skip;
        self
    }

    /// True when at least one destination would receive a message.
    pub fn has_destinations(&self) -> bool {
        let telegram = self.telegram.is_some() && !self.skip_telegram;
        let email = self.email.is_some() && !self.skip_email && !self.recipients.is_empty();
        telegram || email
    }

    /// Delivers `text`, using `chat_id` in place of the default chat id when
    /// given.
    pub async fn dispatch(&self, chat_id: Option<&str>, text: &str) -> DispatchReport {
        let mut report = DispatchReport::default();

        if let Some(telegram) = &self.telegram {
            if self.skip_telegram {
                tracing::info!("Skipping Telegram");
                report.skipped += 1;
            } else {
                match chat_id.or(self.default_chat_id.as_deref()) {
                    Some(chat_id) => deliver(telegram.as_ref(), chat_id, text, &mut report).await,
                    None => {
                        tracing::warn!("No Telegram chat id configured");
                        report.skipped += 1;
                    }
                }
            }
        }

        if let Some(email) = &self.email {
            if self.skip_email {
                tracing::info!(recipients = self.recipients.len(), "Skipping email");
                report.skipped += self.recipients.len();
            } else {
                for recipient in &self.recipients {
                    deliver(email.as_ref(), recipient, text, &mut report).await;
                }
            }
        }

        report
    }
}

async fn deliver(notifier: &dyn Notifier, recipient: &str, text: &str, report: &mut DispatchReport) {
    match notifier.notify(recipient, text).await {
        Ok(()) => report.delivered += 1,
        Err(error) => {
            tracing::error!(
                channel = notifier.channel(),
                recipient = %recipient,
                error = %error,
                "Delivery failed"
            );
            report.failures.push(Failure {
                channel: notifier.channel(),
                recipient: recipient.to_string(),
                error,
            });
        }
    }
}
