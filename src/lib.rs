#![forbid(unsafe_code)]
//! # ssrname
//!
//! Stable, human-readable names for microsatellite (SSR) loci found by SSRMMD, and a
//! filter that trims SSRMMD `.compare` tables down to primer-design candidates.
//!
//! ## Naming
//! Every primer row whose `id` starts with the same integer belongs to one locus. The
//! locus is looked up in the `.compare` table by `number` and named
//! `MOTIF(min-max).n`, where `min`/`max` are the smaller/larger repeat counts of the
//! two genomes and `n` numbers the loci sharing that `MOTIF(min-max)` in order of
//! first appearance. Loci missing from the `.compare` table are named `NA`.
//!
//! The name is inserted as a `microsatellite_name` column right after `id`; all other
//! columns and the row order are untouched.
//!
//! ## Examples
//! ```rust
//! use std::path::Path;
//! use ssrname::{assign_names, ComparisonIndex, PrimerTable, Table};
//!
//! let compare = "number\tfasta1_motif\tfasta2_motif\tfasta1_repeat_number\tfasta2_repeat_number\n\
//!                66\tAC\tAC\t7\t4\n";
//! let primers = "id\tforward_primer\n66.1\tGATC\n66.2\tGGCA\n67.1\tTTAG\n";
//!
//! let compare = Table::from_reader(compare.as_bytes()).unwrap();
//! let index = ComparisonIndex::from_table(&compare, Path::new("input.compare")).unwrap();
//! let primers = Table::from_reader_keep_blank(primers.as_bytes()).unwrap();
//! let primers = PrimerTable::new(primers, Path::new("primers.tsv")).unwrap();
//! let named = primers.with_names(&assign_names(primers.ids(), &index));
//!
//! assert_eq!(named.header, ["id", "microsatellite_name", "forward_primer"]);
//! assert_eq!(named.rows[1], ["66.2", "AC(4-7).1", "GGCA"]);
//! assert_eq!(named.rows[2][1], "NA");
//! ```

pub mod compare;
pub mod error;
pub mod extension;
pub mod filter;
pub mod locus;
pub mod naming;
pub mod pipeline;
pub mod rewrite;
pub mod tsv;

pub use compare::{ComparisonIndex, ComparisonRecord};
pub use error::{Error, Result};
pub use filter::{FilterConfig, FilterSummary};
pub use locus::{BaseName, CanonicalName};
pub use naming::{assign_names, LocusNames, LocusReport};
pub use pipeline::{run_naming, NameConfig, NameSummary};
pub use rewrite::PrimerTable;
pub use tsv::Table;

/// Crate version string (from `CARGO_PKG_VERSION`).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
