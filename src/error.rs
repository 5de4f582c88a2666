use thiserror::Error;

use crate::core::ChartAxis;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid size template: {0}")]
    InvalidTemplate(String),

    #[error("invalid grid address `{address}`: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("axis `{axis}` has no leaves")]
    EmptyDomain { axis: ChartAxis },

    #[error("cannot render - too many rows (row_count: {row_count}, limit: {limit})")]
    TooManyRows { row_count: usize, limit: usize },
}

impl ChartError {
    pub(crate) fn invalid_address(address: &str, reason: impl Into<String>) -> Self {
        Self::InvalidAddress {
            address: address.to_owned(),
            reason: reason.into(),
        }
    }
}
