//! Message delivery for Lunchline.
//!
//! [`TelegramBot`] and [`Mailgun`] implement [`Notifier`]; a [`Dispatcher`]
//! sends one composed message to every configured destination and collects
//! the outcome in a [`DispatchReport`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod dispatch;
pub mod error;
pub mod mailgun;
pub mod telegram;

use async_trait::async_trait;

pub use dispatch::{DispatchReport, Dispatcher, Failure};
pub use error::{Error, Result};
pub use mailgun::Mailgun;
pub use telegram::TelegramBot;

/// A delivery channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Channel name for logs and failure reports.
    fn channel(&self) -> &'static str;

    /// Sends `text` to `recipient` (a chat id or an email address).
    async fn notify(&self, recipient: &str, text: &str) -> Result<()>;
}
