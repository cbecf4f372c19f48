//! Filter an SSRMMD `.compare` table down to loci worth designing primers for.
//!
//! The output keeps the input header and every kept row as read, with short rows
//! padded to the header width. A row is
//! kept only if it passes every check of [`FilterConfig::check`]; the first failing
//! check is recorded as its [`Rejection`].
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

use bio::alphabets::dna;
use log::info;

use crate::compare::parse_count;
use crate::error::{Error, Result};
use crate::tsv::{field, pad_row, Table};

/// The full `.compare` schema the filter insists on.
pub const COMPARE_COLUMNS: [&str; 20] = [
    "number",
    "fasta1_id", "fasta1_motif", "fasta1_repeat_number", "fasta1_start", "fasta1_end",
    "fasta2_id", "fasta2_motif", "fasta2_repeat_number", "fasta2_start", "fasta2_end",
    "fasta1_left_fs", "fasta1_left_fs_length",
    "fasta2_left_distance(LD)", "fasta2_left_identity(NW)",
    "fasta1_right_fs", "fasta1_right_fs_length",
    "fasta2_right_distance(LD)", "fasta2_right_identity(NW)",
    "polymorphism",
];

/// Why a row was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rejection {
    NotPolymorphic,
    MissingMotif,
    MotifMismatch,
    AmbiguousBase,
    MotifLength,
    BadRepeatCount,
    TooFewRepeats,
    AtOnly,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rejection::NotPolymorphic => "not polymorphic",
            Rejection::MissingMotif => "missing motif",
            Rejection::MotifMismatch => "motifs differ between genomes",
            Rejection::AmbiguousBase => "motif has non-ACGT bases",
            Rejection::MotifLength => "motif length not allowed",
            Rejection::BadRepeatCount => "repeat count not an integer",
            Rejection::TooFewRepeats => "too few repeats",
            Rejection::AtOnly => "AT-only motif",
        };
        f.write_str(s)
    }
}

/// Thresholds for [`filter_table`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterConfig {
    pub allowed_motif_lengths: BTreeSet<usize>,
    /// Minimum repeat count required in both genomes.
    pub min_repeats: i64,
    pub keep_at_only: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            allowed_motif_lengths: BTreeSet::from([2, 3, 4]),
            min_repeats: 5,
            keep_at_only: false,
        }
    }
}

/// Parse a comma-separated list of motif lengths such as `"2,3,4"`.
///
/// Blank entries are ignored.
pub fn parse_lengths(s: &str) -> Result<BTreeSet<usize>> {
    let mut out = BTreeSet::new();
    for tok in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let n = tok.parse().map_err(|_| {
            Error::InvalidArgument(format!("non-integer in allowed motif lengths: {tok:?}"))
        })?;
        out.insert(n);
    }
    Ok(out)
}

/// Motif made only of A and T.
pub fn is_at_only(motif: &str) -> bool {
    motif.bytes().all(|b| matches!(b.to_ascii_uppercase(), b'A' | b'T'))
}

/// Motif made only of unambiguous bases.
pub fn is_valid_dna(motif: &str) -> bool {
    dna::alphabet().is_word(motif.as_bytes())
}

/// Column positions used by the checks.
struct Columns {
    polymorphism: usize,
    motif1: usize,
    motif2: usize,
    rep1: usize,
    rep2: usize,
}

impl FilterConfig {
    fn check(&self, row: &[String], c: &Columns) -> std::result::Result<(), Rejection> {
        if !field(row, c.polymorphism).trim().eq_ignore_ascii_case("yes") {
            return Err(Rejection::NotPolymorphic);
        }
        let m1 = field(row, c.motif1).trim().to_uppercase();
        let m2 = field(row, c.motif2).trim().to_uppercase();
        if m1.is_empty() || m2.is_empty() {
            return Err(Rejection::MissingMotif);
        }
        if m1 != m2 {
            return Err(Rejection::MotifMismatch);
        }
        if !is_valid_dna(&m1) {
            return Err(Rejection::AmbiguousBase);
        }
        if !self.allowed_motif_lengths.contains(&m1.len()) {
            return Err(Rejection::MotifLength);
        }
        let (Some(r1), Some(r2)) = (parse_count(field(row, c.rep1)), parse_count(field(row, c.rep2))) else {
            return Err(Rejection::BadRepeatCount);
        };
        if r1 < self.min_repeats || r2 < self.min_repeats {
            return Err(Rejection::TooFewRepeats);
        }
        if !self.keep_at_only && is_at_only(&m1) {
            return Err(Rejection::AtOnly);
        }
        Ok(())
    }
}

/// Tallies from one filter run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSummary {
    pub total: usize,
    pub kept: usize,
    pub rejected: BTreeMap<Rejection, usize>,
}

/// Keep the rows of `table` that pass `config`; the header is carried unchanged.
pub fn filter_table(table: &Table, config: &FilterConfig) -> Result<(Table, FilterSummary)> {
    table.require_columns("comparison table", &COMPARE_COLUMNS)?;
    let idx = table.require_columns(
        "comparison table",
        &["polymorphism", "fasta1_motif", "fasta2_motif", "fasta1_repeat_number", "fasta2_repeat_number"],
    )?;
    let cols = Columns { polymorphism: idx[0], motif1: idx[1], motif2: idx[2], rep1: idx[3], rep2: idx[4] };

    let mut summary = FilterSummary::default();
    let mut kept = Table { header: table.header.clone(), rows: Vec::new() };
    for row in &table.rows {
        summary.total += 1;
        match config.check(row, &cols) {
            Ok(()) => {
                let mut row = row.clone();
                pad_row(&mut row, table.header.len());
                kept.rows.push(row);
            }
            Err(why) => *summary.rejected.entry(why).or_insert(0) += 1,
        }
    }
    summary.kept = kept.rows.len();
    Ok((kept, summary))
}

/// `X.compare` -> `X.filtered.compare`; anything else gets `.filtered.compare` appended.
pub fn default_output(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let out = match name.strip_suffix(".compare") {
        Some(stem) if !stem.is_empty() => format!("{stem}.filtered.compare"),
        _ => format!("{name}.filtered.compare"),
    };
    input.with_file_name(out)
}

/// Filter the `.compare` file at `input` and write the kept rows to `output`.
///
/// The input is read and validated before `output` is created.
pub fn run_filter(input: &Path, output: &Path, config: &FilterConfig) -> Result<FilterSummary> {
    let table = Table::from_path(input)?;
    let (kept, summary) = filter_table(&table, config)?;
    kept.write_path(output)?;
    for (why, n) in &summary.rejected {
        info!("Rejected {n} rows: {why}");
    }
    Ok(summary)
}
