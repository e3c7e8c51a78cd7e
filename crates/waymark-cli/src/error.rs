use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] waymark_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("{0}")]
    Store(String),
    #[error("City name cannot be empty")]
    EmptyCityName,
    #[error("Country cannot be empty")]
    EmptyCountry,
    #[error("Invalid city id: {0}")]
    InvalidCityId(String),
    #[error("Invalid visit date: {0}")]
    InvalidDate(String),
    #[error("Not a flag emoji or two-letter country code: {0}")]
    InvalidEmoji(String),
    #[error("No city is selected after the lookup")]
    CityUnavailable,
    #[error(
        "Store URL is not configured. Pass --store-url or set WAYMARK_STORE_URL in the environment."
    )]
    StoreNotConfigured,
}
