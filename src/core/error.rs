//! Error types for the scan pipeline
//!
//! Missing market data is never an error here: unavailable ATM pairs,
//! missing DTE brackets and zero-price contracts surface as `Option::None`
//! and degrade to neutral defaults downstream. `ScanError` is reserved for
//! input that is invalid as a whole.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unusable chain: {0}")]
    UnusableChain(String),

    #[error("Data error: {0}")]
    Data(String),
}

pub type ScanResult<T> = Result<T, ScanError>;

impl ScanError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn unusable_chain(msg: impl Into<String>) -> Self {
        Self::UnusableChain(msg.into())
    }

    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }
}
