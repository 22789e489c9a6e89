//! Error types
//!
//! Nothing here is fatal to the process. The worst gameplay outcome is a
//! normal game over, which is a phase, not an error.

use std::path::PathBuf;

use thiserror::Error;

use crate::session::Phase;

/// Failure to produce a playable word pool
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read wordlist {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown wordlist: {0}")]
    UnknownCatalog(String),

    #[error("wordlist {catalog} has no words between {min} and {max} letters")]
    EmptyPool {
        catalog: String,
        min: usize,
        max: usize,
    },
}

/// Failure to read or write persisted progress
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by the run state machine
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("cannot {action} while {phase:?}")]
    InvalidTransition { phase: Phase, action: &'static str },
}
