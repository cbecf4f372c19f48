//! The comparison index: per-locus repeat facts from an SSRMMD `.compare` table.
//!
//! Columns are located by name, so their order in the file is irrelevant. Each usable
//! row becomes a [`ComparisonRecord`] keyed by its `number` column.
//!
//! Rows are skipped, not rejected, when `number` is blank or either repeat count is
//! not an integer. A repeated `number` replaces the earlier record.
use std::collections::HashMap;
use std::path::Path;

use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::locus::BaseName;
use crate::tsv::{field, Table};

/// Columns the index needs from a `.compare` table.
pub const INDEX_COLUMNS: [&str; 5] = [
    "number",
    "fasta1_motif",
    "fasta2_motif",
    "fasta1_repeat_number",
    "fasta2_repeat_number",
];

/// Repeat facts for one locus across the two compared genomes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComparisonRecord {
    /// Upper-cased motif; genome 1's unless that one is empty.
    pub motif: String,
    /// Smaller of the two repeat counts.
    pub repeat_min: i64,
    /// Larger of the two repeat counts.
    pub repeat_max: i64,
}

impl ComparisonRecord {
    /// Build a record from the raw motif and repeat-count fields of one row.
    ///
    /// Returns `None` when either repeat count does not parse.
    pub fn from_fields(motif1: &str, motif2: &str, rep1: &str, rep2: &str) -> Option<ComparisonRecord> {
        let m1 = motif1.trim().to_uppercase();
        let motif = if m1.is_empty() { motif2.trim().to_uppercase() } else { m1 };
        let rep1 = parse_count(rep1)?;
        let rep2 = parse_count(rep2)?;
        Some(ComparisonRecord {
            motif,
            repeat_min: rep1.min(rep2),
            repeat_max: rep1.max(rep2),
        })
    }

    /// `MOTIF(min-max)` for this record.
    pub fn base_name(&self) -> BaseName {
        BaseName::repeat(&self.motif, self.repeat_min, self.repeat_max)
    }
}

/// Parse a repeat count with surrounding whitespace allowed.
pub fn parse_count(s: &str) -> Option<i64> {
    s.trim().parse().ok()
}

/// Row tallies from building a [`ComparisonIndex`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub rows: usize,
    pub blank_number: usize,
    pub bad_repeat_count: usize,
    /// Rows whose `number` replaced an earlier record.
    pub overwritten: usize,
}

/// Mapping from locus number to [`ComparisonRecord`].
#[derive(Clone, Debug, Default)]
pub struct ComparisonIndex {
    records: HashMap<String, ComparisonRecord>,
    stats: LoadStats,
}

impl ComparisonIndex {
    /// Load the index from a `.compare` file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ComparisonIndex> {
        let table = Table::from_path(path.as_ref())?;
        let index = ComparisonIndex::from_table(&table, path.as_ref())?;
        info!(
            "Loaded {} comparison records from {}",
            index.len(),
            path.as_ref().display()
        );
        Ok(index)
    }

    /// Build the index from an already-read table; `origin` names it in errors.
    ///
    /// Fails if a required column is missing or no row is usable.
    pub fn from_table(table: &Table, origin: &Path) -> Result<ComparisonIndex> {
        let cols = table.require_columns("comparison table", &INDEX_COLUMNS)?;
        let (number, motif1, motif2, rep1, rep2) = (cols[0], cols[1], cols[2], cols[3], cols[4]);

        let mut index = ComparisonIndex::default();
        for row in &table.rows {
            index.stats.rows += 1;
            let num = field(row, number).trim();
            if num.is_empty() {
                index.stats.blank_number += 1;
                continue;
            }
            let Some(record) = ComparisonRecord::from_fields(
                field(row, motif1),
                field(row, motif2),
                field(row, rep1),
                field(row, rep2),
            ) else {
                debug!(
                    "Skipping comparison row {num}: repeat counts {:?}/{:?} are not integers",
                    field(row, rep1),
                    field(row, rep2)
                );
                index.stats.bad_repeat_count += 1;
                continue;
            };
            if index.records.insert(num.to_string(), record).is_some() {
                index.stats.overwritten += 1;
            }
        }

        if index.records.is_empty() {
            return Err(Error::EmptyComparison { path: origin.to_path_buf() });
        }
        if index.stats.overwritten > 0 {
            warn!(
                "{} comparison rows repeated an earlier number; the last occurrence was kept",
                index.stats.overwritten
            );
        }
        Ok(index)
    }

    pub fn get(&self, number: &str) -> Option<&ComparisonRecord> {
        self.records.get(number)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "number\tfasta1_motif\tfasta2_motif\tfasta1_repeat_number\tfasta2_repeat_number\n";

    fn index(body: &str) -> Result<ComparisonIndex> {
        let t = Table::from_reader(format!("{HEADER}{body}").as_bytes())?;
        ComparisonIndex::from_table(&t, Path::new("input.compare"))
    }

    #[test]
    fn reversed_repeat_counts_give_same_range() {
        let idx = index("66\tac\tac\t4\t7\n67\tAC\tAC\t7\t4\n").unwrap();
        assert_eq!(idx.get("66").unwrap().base_name(), idx.get("67").unwrap().base_name());
        assert_eq!(idx.get("67").unwrap().base_name().to_string(), "AC(4-7)");
    }

    #[test]
    fn equal_repeat_counts() {
        let idx = index("1\tAG\tAG\t6\t6\n").unwrap();
        let r = idx.get("1").unwrap();
        assert_eq!((r.repeat_min, r.repeat_max), (6, 6));
    }

    #[test]
    fn falls_back_to_second_motif() {
        let idx = index("5\t  \tgata\t5\t9\n").unwrap();
        assert_eq!(idx.get("5").unwrap().motif, "GATA");
    }

    #[test]
    fn skips_blank_numbers_and_bad_counts() {
        let idx = index(" \tAC\tAC\t4\t7\n2\tAC\tAC\tfive\t7\n3\tAC\tAC\t4\t\n4\tAT\tAT\t 8 \t9\n").unwrap();
        assert_eq!(idx.len(), 1);
        assert!(idx.get("4").is_some());
        assert_eq!(idx.stats().blank_number, 1);
        assert_eq!(idx.stats().bad_repeat_count, 2);
    }

    #[test]
    fn number_is_trimmed() {
        let idx = index(" 66 \tAC\tAC\t4\t7\n").unwrap();
        assert!(idx.get("66").is_some());
    }

    #[test]
    fn last_duplicate_wins() {
        let idx = index("9\tAC\tAC\t4\t7\n9\tTTG\tTTG\t5\t5\n").unwrap();
        assert_eq!(idx.len(), 1);
        assert_eq!(idx.get("9").unwrap().motif, "TTG");
        assert_eq!(idx.stats().overwritten, 1);
    }

    #[test]
    fn empty_index_is_fatal() {
        match index("1\tAC\tAC\tx\ty\n") {
            Err(err @ Error::EmptyComparison { .. }) => {
                assert_eq!(err.to_string(), "no rows loaded from comparison table input.compare");
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(index(""), Err(Error::EmptyComparison { .. })));
    }

    #[test]
    fn missing_column_is_fatal() {
        let t = Table::from_reader("number\tfasta1_motif\n1\tAC\n".as_bytes()).unwrap();
        match ComparisonIndex::from_table(&t, Path::new("input.compare")) {
            Err(Error::MissingColumns { missing, .. }) => {
                assert_eq!(missing, vec!["fasta2_motif", "fasta1_repeat_number", "fasta2_repeat_number"]);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn column_order_is_irrelevant() {
        let src = "fasta2_repeat_number\tnumber\tfasta2_motif\tfasta1_repeat_number\tfasta1_motif\n7\t66\tAC\t4\tAC\n";
        let t = Table::from_reader(src.as_bytes()).unwrap();
        let idx = ComparisonIndex::from_table(&t, Path::new("input.compare")).unwrap();
        assert_eq!(idx.get("66").unwrap().base_name().to_string(), "AC(4-7)");
    }
}
