//! One run: pick the date, then fetch, compose and deliver per school.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use lunchline_core::{MessageComposer, calendar};
use lunchline_notify::{DispatchReport, Dispatcher, Mailgun, TelegramBot};
use lunchline_sources::{DailyMenuApi, MenuSource, WeatherApi, WeeklyMenuApi};

use crate::config::{RunConfig, School, SourceConfig};

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Target date.
    pub date: NaiveDate,
    /// The date fell on a weekend and nothing was fetched.
    pub weekend: bool,
    /// Schools whose message was delivered (or printed in a dry run).
    pub sent: usize,
    /// Schools skipped by configuration.
    pub skipped: usize,
    /// Schools with no menu for the date.
    pub empty: usize,
}

impl RunSummary {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            weekend: false,
            sent: 0,
            skipped: 0,
            empty: 0,
        }
    }
}

/// Resolves the target date and runs the pipeline for it.
pub async fn run(config: &RunConfig) -> Result<RunSummary> {
    let date = config.date.resolve()?;
    run_for_date(config, date).await
}

/// Runs the pipeline for `date`.
///
/// Weekends return before any network call. Delivery failures do not stop
/// the remaining deliveries but fail the run once everything was attempted.
pub async fn run_for_date(config: &RunConfig, date: NaiveDate) -> Result<RunSummary> {
    let mut summary = RunSummary::new(date);
    tracing::info!(date = %date, "Processing date");

    if calendar::is_weekend(date) {
        tracing::info!(date = %date, "Skipping weekend");
        summary.weekend = true;
        return Ok(summary);
    }

    let mut active = Vec::new();
    for school in &config.schools {
        if school.skip {
            tracing::info!(school = %school.name, "Skipping school");
            summary.skipped += 1;
        } else {
            active.push(school);
        }
    }
    if active.is_empty() {
        tracing::info!("Every school is skipped");
        return Ok(summary);
    }

    let client = lunchline_sources::build_client()?;
    let dispatcher = if config.dry_run {
        Dispatcher::new()
    } else {
        build_dispatcher(config, &client)?
    };
    if !config.dry_run && !dispatcher.has_destinations() {
        tracing::warn!("No delivery destinations configured");
    }

    let with_heading = config.schools.len() > 1;
    let mut weather: Option<Option<String>> = None;
    let mut report = DispatchReport::default();

    for school in active {
        let source = menu_source(school, &client);
        tracing::info!(school = %school.name, kind = source.kind(), "Fetching menu");
        let menu = source
            .fetch_menu(date)
            .await
            .with_context(|| format!("fetching menu for {}", school.name))?;

        if menu.is_empty() {
            tracing::info!(school = %school.name, date = %date, "No menu found");
            summary.empty += 1;
            continue;
        }

        if weather.is_none() {
            weather = Some(fetch_weather(config, &client, date).await);
        }

        let mut composer = MessageComposer::new(date)
            .with_weather(weather.clone().flatten())
            .with_markdown(config.markdown());
        if with_heading {
            composer = composer.with_school(school.name.as_str());
        }
        let Some(message) = composer.compose(&menu) else {
            summary.empty += 1;
            continue;
        };

        if config.dry_run {
            println!("{message}");
        } else {
            report.merge(
                dispatcher
                    .dispatch(school.telegram_chat_id.as_deref(), &message)
                    .await,
            );
        }
        summary.sent += 1;
    }

    if !report.is_success() {
        let failed: Vec<String> = report
            .failures
            .iter()
            .map(|f| format!("{} {}: {}", f.channel, f.recipient, f.error))
            .collect();
        anyhow::bail!(
            "{} of {} deliveries failed: {}",
            report.failures.len(),
            report.failures.len() + report.delivered,
            failed.join("; ")
        );
    }

    tracing::info!(delivered = report.delivered, skipped = report.skipped, "Deliveries complete");
    Ok(summary)
}

fn menu_source(school: &School, client: &reqwest::Client) -> Box<dyn MenuSource> {
    match &school.source {
        SourceConfig::Weekly {
            host,
            school,
            menu_type,
        } => {
            let mut api = WeeklyMenuApi::new(client.clone(), host, school.as_str());
            if let Some(menu_type) = menu_type {
                api = api.with_menu_type(menu_type.as_str());
            }
            Box::new(api)
        }
        SourceConfig::Daily {
            school_id,
            serving_line,
            meal_key,
            grade,
            base_url,
        } => {
            let mut api =
                DailyMenuApi::new(client.clone(), school_id.as_str()).with_grade(grade.clone());
            if let Some(serving_line) = serving_line {
                api = api.with_serving_line(serving_line.as_str());
            }
            if let Some(meal_key) = meal_key {
                api = api.with_meal_key(meal_key.as_str());
            }
            if let Some(base_url) = base_url {
                api = api.with_base_url(base_url.as_str());
            }
            Box::new(api)
        }
    }
}

fn build_dispatcher(config: &RunConfig, client: &reqwest::Client) -> Result<Dispatcher> {
    let mut dispatcher = Dispatcher::new()
        .skip_telegram(config.skip_telegram)
        .skip_email(config.skip_email);

    match &config.telegram {
        Some(settings) => {
            let mut bot = TelegramBot::new(client.clone(), settings.token.as_str())?
                .with_parse_mode(settings.parse_mode.clone());
            if let Some(api_base) = &settings.api_base {
                bot = bot.with_api_base(api_base.as_str());
            }
            dispatcher = dispatcher.with_telegram(Arc::new(bot), settings.default_chat_id.clone());
        }
        None => tracing::debug!("TELEGRAM_TOKEN not set, Telegram disabled"),
    }

    match &config.email {
        Some(settings) => {
            let mut mailgun = Mailgun::new(
                client.clone(),
                settings.api_key.as_str(),
                settings.domain.as_str(),
            )?
            .with_from(settings.from.clone());
            if let Some(api_base) = &settings.api_base {
                mailgun = mailgun.with_api_base(api_base.as_str());
            }
            tracing::debug!(from = mailgun.from_address(), "Email enabled");
            dispatcher = dispatcher.with_email(Arc::new(mailgun), settings.recipients.clone());
        }
        None => tracing::debug!("No email recipients, email disabled"),
    }

    Ok(dispatcher)
}

/// Forecast text for `date`; failures only warn.
async fn fetch_weather(
    config: &RunConfig,
    client: &reqwest::Client,
    date: NaiveDate,
) -> Option<String> {
    let settings = config.weather.as_ref()?;
    let mut api = WeatherApi::new(client.clone(), settings.location.as_str());
    if let Some(base_url) = &settings.base_url {
        api = api.with_base_url(base_url.as_str());
    }

    match api.forecast(date).await {
        Ok(forecast) => forecast,
        Err(e) => {
            tracing::warn!(error = %e, "Weather unavailable");
            None
        }
    }
}
