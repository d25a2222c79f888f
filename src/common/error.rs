use thiserror::Error;

use crate::common::constants::MC_USD_COLUMN;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No exchange rate found for currency: {0}")]
    MissingRate(String),

    #[error("Exchange rate for {currency} must be positive and finite, got {rate}")]
    InvalidRate { currency: String, rate: f64 },

    #[error("Unexpected table layout: {0}")]
    RowLayout(String),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error("Extraction produced no bank records")]
    NoRecords,
}

/// The two ways a frame can be unfit for conversion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    #[error(
        "Something went wrong. Please check that the following columns exist in your dataframe: {column} ."
    )]
    MissingColumn { column: String },

    #[error("Something went wrong. Please check the data types of the columns in your dataframe.")]
    WrongType { column: String, row: usize },
}

impl TransformError {
    pub fn missing_usd_column() -> Self {
        TransformError::MissingColumn {
            column: MC_USD_COLUMN.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
