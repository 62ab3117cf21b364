//! Live scores from the Swiss Ice Hockey Federation (SIHF) statistics feed.
//!
//! The provider's positional JSON is normalized into [`models::GameSummary`]
//! and [`models::GameEvent`] values and merged into a [`models::Gameday`]
//! that only reports what actually changed between polls.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod tables;
pub mod workers;
