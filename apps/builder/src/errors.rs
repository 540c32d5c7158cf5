#![allow(dead_code)]

use thiserror::Error;

use crate::export::ExportError;
use crate::models::ModelError;

/// Application-level error type.
///
/// Remote store operations do not appear here: they return uniform outcome
/// values (`SaveOutcome` etc.) instead of erroring, so status can be rendered
/// without exception handling. `Persistence` exists for the cases where a
/// store failure must abort a larger operation (e.g. a CLI load).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ModelError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
