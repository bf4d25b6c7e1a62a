#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Lunchline Core Library
//!
//! Menu model, API-specific transforms and message rendering for the
//! Lunchline notifier. Nothing in this crate touches the network.
//!
//! ```text
//! weekly API JSON ──► weekly::WeekMenu ──► weekly::transform ──┐
//!                                                              ├─► Menu ──► MessageComposer ──► text
//! daily API JSON  ──────────────────────► daily::transform ────┘
//! ```

pub mod calendar;
pub mod daily;
pub mod error;
pub mod menu;
pub mod message;
pub mod weekly;

// Re-exports for convenience
pub use error::{Error, Result};
pub use menu::{FlatMenu, Menu, Section, SectionedMenu};
pub use message::MessageComposer;
pub use weekly::WeekMenu;

mod proptests;
