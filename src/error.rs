//! Error handling for the NexCRM admin client

use std::fmt;
use thiserror::Error;

/// Unified error type for the NexCRM admin client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend answered with a non-success status
    #[error("{message}")]
    Api {
        /// HTTP status code
        status: u16,

        /// Message taken from the response body, or a generic one
        message: String,
    },

    /// The session cookie is missing or no longer valid
    #[error("Not authenticated")]
    Unauthenticated,

    /// The current user may not perform the action
    #[error("{0}")]
    AccessDenied(String),

    /// There is nothing to export
    #[error("{0}")]
    NoData(String),

    /// An import file could not be read as JSON
    #[error("Invalid import file: {0}")]
    InvalidImport(String),

    /// CSV shaping or saving failed
    #[error("Export error: {0}")]
    Export(#[from] nexcrm_export::ExportError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new access denied error
    pub fn access_denied<T: fmt::Display>(msg: T) -> Self {
        Error::AccessDenied(msg.to_string())
    }

    /// Create a new empty-export error
    pub fn no_data<T: fmt::Display>(msg: T) -> Self {
        Error::NoData(msg.to_string())
    }

    /// Create a new invalid import error
    pub fn invalid_import<T: fmt::Display>(msg: T) -> Self {
        Error::InvalidImport(msg.to_string())
    }

    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// HTTP status attached to the error, if the backend produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Unauthenticated => Some(401),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
