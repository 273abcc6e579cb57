//! @ai:module:intent Define error types for the collection pipeline
//! @ai:module:layer domain
//! @ai:module:public_api CollectError, Result
//! @ai:module:stateless true

use thiserror::Error;

/// @ai:intent Errors that end a collection rather than skipping a single run
#[derive(Error, Debug)]
pub enum CollectError {
    /// No run produced a row.
    #[error("no data collected from any run")]
    NoData,

    #[error("invalid run pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error(transparent)]
    Parse(#[from] simstats_parser::Error),
}

pub type Result<T> = std::result::Result<T, CollectError>;
