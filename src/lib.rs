//! gametime-utils library root.
//! Two independent helpers for game-client integration plugins: a per-game
//! play-time tracker with on-disk persistence, and a key/value settings-file
//! reader with typed option declarations. They share an error type and
//! nothing else.

pub mod config;
pub mod errors;
pub mod tracker;
pub mod utils;

pub use config::{ConfigOptions, OptionSpec, OptionValue};
pub use errors::{AppError, AppResult};
pub use tracker::{GameTimeRecord, PlayTimeTracker};
