//! Error types for the Seaport listing pipeline.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Listing price is zero, negative, or vanishes after conversion to base units.
    #[error("Invalid price: {message}")]
    InvalidPrice { message: String },

    /// Fee rules or listing settings that cannot produce a valid order.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Token standard the protocol cannot list through this flow.
    #[error("Unsupported asset: {standard}")]
    UnsupportedAsset { standard: String },

    #[error("Signing error: {message}")]
    Signing { message: String },

    /// Malformed hex, salt or numeric input handed over by a collaborator.
    #[error("Encoding error: {message}")]
    Encoding { message: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] config::ConfigError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("API error: {message}")]
    Api { message: String, status: Option<u16> },

    #[error("RPC error: {message}")]
    Rpc { message: String },
}

impl Error {
    pub(crate) fn invalid_price(message: impl Into<String>) -> Self {
        Error::InvalidPrice {
            message: message.into(),
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    pub(crate) fn encoding(message: impl Into<String>) -> Self {
        Error::Encoding {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
