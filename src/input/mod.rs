//! One-shot loading of the two evaluation inputs.
//!
//! Loading is eager and fail-fast: the first malformed record aborts
//! the whole load with an error naming the file and the offending
//! element. Nothing is computed before both inputs parse cleanly.

pub mod ground_truth;
pub mod ocr_csv;

pub use ground_truth::load_ground_truth;
pub use ocr_csv::load_ocr_results;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("input file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("{path}: missing required column `{column}`")]
    MissingColumn {
        path: PathBuf,
        column: &'static str,
    },

    #[error("{path}: row {row}: field `{field}` is not a valid number: `{value}`")]
    InvalidNumber {
        path: PathBuf,
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("{path}: {detail}")]
    InvalidStructure { path: PathBuf, detail: String },

    #[error("{path}: failed to read CSV")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path}: failed to parse JSON")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path}: failed to read file")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
