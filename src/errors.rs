//! Unified library error type.
//! Both utilities (tracker, config) return AppError so plugin code deals with
//! a single error surface. Every variant is recoverable; the library never
//! terminates the host process.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Tracker errors
    // ---------------------------
    #[error("no active session for game '{0}'")]
    SessionNotActive(String),

    #[error("failed to read play-time cache: {0}")]
    PersistenceRead(String),

    #[error("failed to write play-time cache: {0}")]
    PersistenceWrite(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid option '{0}': default value is not in the allowed list")]
    InvalidOption(String),
}

pub type AppResult<T> = Result<T, AppError>;
