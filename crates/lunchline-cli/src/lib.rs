//! Lunchline runner.
//!
//! Resolves [`cli::Args`] and the school roster into a [`RunConfig`], then
//! fetches, composes and delivers one message per school with [`run`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod logging;
pub mod run;

pub use cli::Args;
pub use config::{Roster, RunConfig, School, SourceConfig};
pub use run::{RunSummary, run};
