//! Insert the `microsatellite_name` column into a primer table.
//!
//! The new column goes immediately after `id`. Every row keeps its position and all
//! of its other fields; rows shorter than the header are padded with empty fields
//! first, so the inserted name always lands under its header. A blank line in the
//! input is an empty row: it is padded like any short row and named `NA`.
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::naming::LocusNames;
use crate::tsv::{pad_row, Table};

/// Name of the inserted column.
pub const NAME_COLUMN: &str = "microsatellite_name";
/// Column holding the raw primer id.
pub const ID_COLUMN: &str = "id";
/// Column that must be present for the table to count as a primer table.
pub const FORWARD_PRIMER_COLUMN: &str = "forward_primer";

/// A validated primer table with its rows padded to the header width.
#[derive(Clone, Debug)]
pub struct PrimerTable {
    table: Table,
    id_idx: usize,
}

impl PrimerTable {
    /// Read and validate the primer table at `path`, keeping blank lines as rows.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<PrimerTable> {
        let path = path.as_ref();
        PrimerTable::new(Table::from_path_keep_blank(path)?, path)
    }

    /// Validate `table` as a primer table; `origin` names it in errors.
    ///
    /// Fails if the source was empty, or if the header lacks `id` or `forward_primer`.
    pub fn new(mut table: Table, origin: &Path) -> Result<PrimerTable> {
        if table.is_blank() {
            return Err(Error::EmptyPrimerTable { path: origin.to_path_buf() });
        }
        let id_idx = table.require_columns("primer table", &[ID_COLUMN])?[0];
        table.require_columns("primer table", &[FORWARD_PRIMER_COLUMN])?;

        let width = table.header.len();
        let mut padded = 0usize;
        for row in table.rows.iter_mut() {
            if row.len() < width {
                pad_row(row, width);
                padded += 1;
            }
        }
        if padded > 0 {
            debug!("Padded {padded} short primer rows to {width} fields");
        }
        Ok(PrimerTable { table, id_idx })
    }

    /// Raw `id` values in row order, trimmed.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.table.rows.iter().map(move |row| row[self.id_idx].trim())
    }

    pub fn header(&self) -> &[String] {
        &self.table.header
    }

    pub fn len(&self) -> usize {
        self.table.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.rows.is_empty()
    }

    /// Build the output table with the name column inserted after `id`.
    pub fn with_names(&self, names: &LocusNames) -> Table {
        let at = self.id_idx + 1;
        let header = insert_at(&self.table.header, at, NAME_COLUMN.to_string());
        let rows = self
            .table
            .rows
            .iter()
            .map(|row| {
                let name = names.name_for_id(row[self.id_idx].trim());
                insert_at(row, at, name.to_string())
            })
            .collect();
        Table { header, rows }
    }
}

fn insert_at(fields: &[String], at: usize, value: String) -> Vec<String> {
    let mut out = Vec::with_capacity(fields.len() + 1);
    out.extend_from_slice(&fields[..at]);
    out.push(value);
    out.extend_from_slice(&fields[at..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::ComparisonIndex;
    use crate::naming::assign_names;

    const COMPARE: &str = "number\tfasta1_motif\tfasta2_motif\tfasta1_repeat_number\tfasta2_repeat_number\n\
                           66\tAC\tAC\t4\t7\n68\tAC\tAC\t7\t4\n";

    fn primer_table(src: &str) -> Result<PrimerTable> {
        PrimerTable::new(Table::from_reader_keep_blank(src.as_bytes())?, Path::new("primers.tsv"))
    }

    fn named(src: &str) -> Table {
        let compare = Table::from_reader(COMPARE.as_bytes()).unwrap();
        let index = ComparisonIndex::from_table(&compare, Path::new("input.compare")).unwrap();
        let primers = primer_table(src).unwrap();
        let names = assign_names(primers.ids(), &index);
        primers.with_names(&names)
    }

    #[test]
    fn inserts_column_right_after_id() {
        let out = named("seq\tid\tforward_primer\treverse_primer\nchr1\t66.1\tAAA\tTTT\n");
        assert_eq!(out.header, vec!["seq", "id", NAME_COLUMN, "forward_primer", "reverse_primer"]);
        assert_eq!(out.rows[0], vec!["chr1", "66.1", "AC(4-7).1", "AAA", "TTT"]);
    }

    #[test]
    fn rows_keep_order_count_and_fields() {
        let src = "id\tforward_primer\tproduct\n66.1\tA\t100\n67.1\tC\t120\n68.1\tG\t90\n66.2\tT\t101\n";
        let input = Table::from_reader(src.as_bytes()).unwrap();
        let out = named(src);
        assert_eq!(out.rows.len(), input.rows.len());
        for (before, after) in input.rows.iter().zip(&out.rows) {
            assert_eq!(after.len(), before.len() + 1);
            assert_eq!(after[0], before[0]);
            assert_eq!(&after[2..], &before[1..]);
        }
        let names: Vec<&str> = out.rows.iter().map(|r| r[1].as_str()).collect();
        assert_eq!(names, vec!["AC(4-7).1", "NA", "AC(4-7).2", "AC(4-7).1"]);
    }

    #[test]
    fn short_rows_are_padded_before_insertion() {
        let out = named("id\tforward_primer\tproduct\n66.1\n");
        assert_eq!(out.rows[0], vec!["66.1", "AC(4-7).1", "", ""]);
    }

    #[test]
    fn blank_lines_become_na_rows() {
        let out = named("id\tforward_primer\n66.1\tA\n\n66.2\tC\n");
        assert_eq!(out.rows.len(), 3);
        assert_eq!(out.rows[0], vec!["66.1", "AC(4-7).1", "A"]);
        assert_eq!(out.rows[1], vec!["", "NA", ""]);
        assert_eq!(out.rows[2], vec!["66.2", "AC(4-7).1", "C"]);
    }

    #[test]
    fn unparseable_ids_pass_through_as_na() {
        let out = named("id\tforward_primer\n\tAAA\nprimer-x\tCCC\n");
        assert_eq!(out.rows[0], vec!["", "NA", "AAA"]);
        assert_eq!(out.rows[1], vec!["primer-x", "NA", "CCC"]);
    }

    #[test]
    fn header_only_table_gives_header_only_output() {
        let out = named("id\tforward_primer\n");
        assert_eq!(out.header, vec!["id", NAME_COLUMN, "forward_primer"]);
        assert!(out.rows.is_empty());
    }

    #[test]
    fn schema_and_empty_errors() {
        match primer_table("") {
            Err(err @ Error::EmptyPrimerTable { .. }) => {
                assert_eq!(err.to_string(), "primer table primers.tsv appears empty");
            }
            other => panic!("unexpected: {other:?}"),
        }
        match primer_table("name\tforward_primer\nx\ty\n") {
            Err(Error::MissingColumns { missing, .. }) => assert_eq!(missing, vec!["id"]),
            other => panic!("unexpected: {other:?}"),
        }
        match primer_table("id\treverse_primer\n1.1\tA\n") {
            Err(Error::MissingColumns { missing, available, .. }) => {
                assert_eq!(missing, vec!["forward_primer"]);
                assert_eq!(available, vec!["id", "reverse_primer"]);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
