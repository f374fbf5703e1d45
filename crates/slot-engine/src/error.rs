//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid wall-clock time: {0}")]
    InvalidHour(String),

    #[error("Slot duration must be positive, got {0}")]
    InvalidDuration(u32),
}

pub type Result<T> = std::result::Result<T, SlotError>;
