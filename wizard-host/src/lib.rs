//! The host side of the Wizard scorekeeper: save files, commentary, and
//! provider configuration around the [`wizard`] engine.

pub mod config;
pub mod errors;
pub mod narrator;
pub mod snapshot;
pub mod store;

pub use config::{NarratorConfig, Provider};
pub use errors::{NarratorError, SnapshotError};
pub use narrator::{game_summary, round_roasts, Narrator, ROAST_FALLBACK};
pub use snapshot::Snapshot;
pub use store::{SaveDir, SaveSummary};
