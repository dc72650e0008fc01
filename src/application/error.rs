use thiserror::Error;

use crate::domain::{SpendingId, SummaryError, ValidationError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid spending: {0}")]
    Validation(#[from] ValidationError),

    #[error("Spending not found: {0}")]
    SpendingNotFound(SpendingId),

    #[error("Summary failed: {0}")]
    Summary(#[from] SummaryError),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}
