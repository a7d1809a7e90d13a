//! Tabular export for NexCRM records
//!
//! Turns a slice of flat (or near-flat) records into CSV text given an ordered
//! list of column names, and writes the result to disk.
//!
//! ```
//! use serde_json::json;
//!
//! let records = vec![json!({ "id": "1", "name": "A,B" })];
//! let csv = nexcrm_export::to_csv(&["id", "name"], &records).unwrap();
//! assert_eq!(csv, "id,name\n1,\"A,B\"");
//! ```

mod csv;
mod download;

use thiserror::Error;

pub use csv::{sanitize, sanitize_value, to_csv};
pub use download::save_csv;

/// Errors raised while shaping or saving an export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Record {index} is not an object")]
    NotAnObject { index: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to save {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ExportError>;
