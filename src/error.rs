//! Error type shared by every stage of the crate.
//!
//! Only *fatal* conditions are errors: a missing column, an input that yields no
//! usable data, or an unusable argument. Row-level problems (unparseable repeat
//! counts, empty locus numbers, ids without a leading integer) are skipped and
//! logged by the stage that meets them.
use std::path::PathBuf;

use thiserror::Error;

/// A type alias for `Result<T, ssrname::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors raised while loading, naming, rewriting or filtering tables.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from a table header.
    #[error("{table} missing columns: {missing:?}; have: {available:?}")]
    MissingColumns {
        table: &'static str,
        missing: Vec<String>,
        available: Vec<String>,
    },

    /// The comparison table produced no usable records.
    #[error("no rows loaded from comparison table {}", path.display())]
    EmptyComparison { path: PathBuf },

    /// The primer table has no lines at all, not even a header.
    #[error("primer table {} appears empty", path.display())]
    EmptyPrimerTable { path: PathBuf },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
