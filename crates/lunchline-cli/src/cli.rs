//! Command-line arguments.
//!
//! Every flag can also be set through its environment variable, so the
//! binary runs unchanged from cron, a container or a CI schedule.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches, Parser};
use lunchline_core::calendar::DEFAULT_TIMEZONE;

/// Default roster file.
pub const DEFAULT_CONFIG: &str = "lunchline.toml";

/// Send today's school lunch menu to Telegram and email.
#[derive(Parser, Debug, Clone)]
#[command(name = "lunchline", version)]
#[command(about = "Send the day's school lunch menu to Telegram and email", long_about = None)]
pub struct Args {
    /// School roster file (TOML)
    #[arg(short, long, env = "LUNCHLINE_CONFIG", default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Timezone that decides what "today" is
    #[arg(long, env = "LUNCHLINE_TZ", default_value = DEFAULT_TIMEZONE)]
    pub timezone: String,

    /// Explicit target date (YYYY-MM-DD); the day offset is ignored when set
    #[arg(long, env = "LUNCHLINE_DATE")]
    pub date: Option<String>,

    /// Days after today to send the menu for (1 = tomorrow)
    #[arg(long, env = "LUNCHLINE_DAY_OFFSET", default_value_t = 0, allow_negative_numbers = true)]
    pub day_offset: i64,

    /// Telegram bot token
    #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true)]
    pub telegram_token: Option<String>,

    /// Chat id for schools without their own
    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    pub telegram_chat_id: Option<String>,

    /// Telegram parse mode (only Markdown is supported)
    #[arg(long, env = "TELEGRAM_PARSE_MODE")]
    pub telegram_parse_mode: Option<String>,

    /// Mailgun API key
    #[arg(long, env = "MAILGUN_API_KEY", hide_env_values = true)]
    pub mailgun_api_key: Option<String>,

    /// Mailgun sending domain
    #[arg(long, env = "MAILGUN_DOMAIN")]
    pub mailgun_domain: Option<String>,

    /// Sender address [default: lunchmenu@<mailgun domain>]
    #[arg(long, env = "EMAIL_FROM")]
    pub email_from: Option<String>,

    /// Comma-separated email recipients
    #[arg(long, env = "EMAIL_ADDRESSES", value_delimiter = ',')]
    pub email_addresses: Vec<String>,

    /// Comma-separated school keys to skip
    #[arg(long, env = "LUNCHLINE_SKIP", value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Do not send to Telegram
    #[arg(long, env = "SKIP_TELEGRAM")]
    pub skip_telegram: bool,

    /// Do not send email
    #[arg(long, env = "SKIP_EMAIL")]
    pub skip_email: bool,

    /// Print messages instead of sending them
    #[arg(long, env = "LUNCHLINE_DRY_RUN")]
    pub dry_run: bool,

    /// Emit logs as JSON lines
    #[arg(long, env = "LUNCHLINE_LOG_JSON")]
    pub log_json: bool,

    /// Bot API host override
    #[arg(long, env = "TELEGRAM_API_BASE", hide = true)]
    pub telegram_api_base: Option<String>,

    /// Mailgun API root override
    #[arg(long, env = "MAILGUN_API_BASE", hide = true)]
    pub mailgun_api_base: Option<String>,
}

impl Args {
    /// Parses `itr` without reading any environment variable.
    pub fn try_parse_args_only<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command()
            .mut_args(|arg| arg.env(None))
            .try_get_matches_from(itr)?;
        Self::from_arg_matches(&matches)
    }
}

/// Trims entries and drops blanks from a comma-split list.
pub fn clean_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
