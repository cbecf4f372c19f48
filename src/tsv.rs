//! Tab-delimited tables on top of the `csv` crate.
//!
//! Tables are read whole into memory: the first non-blank line is the header and
//! every following line is a row of owned strings. [`Table::from_reader`] drops
//! blank lines; [`Table::from_reader_keep_blank`] keeps them as empty rows. Quoting is disabled in both
//! directions so a field is carried from input to output byte-for-byte; rows may be
//! shorter or longer than the header.
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use csv::{QuoteStyle, Terminator};

use crate::error::{Error, Result};

/// An in-memory tab-delimited table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    /// Column names, in file order. Empty if the input had no lines.
    pub header: Vec<String>,
    /// Data rows, in file order.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Read a table from a file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Table> {
        Table::from_reader(BufReader::new(File::open(path)?))
    }

    /// Read a table from any byte source. Blank lines are dropped.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Table> {
        let mut reader = tsv_reader(rdr);
        let mut records = reader.records();
        let header: Vec<String> = match records.next() {
            Some(record) => record?.iter().map(str::to_string).collect(),
            None => return Ok(Table::default()),
        };
        let mut rows: Vec<Vec<String>> = Vec::new();
        for record in records {
            rows.push(record?.iter().map(str::to_string).collect());
        }
        Ok(Table { header, rows })
    }

    /// Read a table from a file, keeping blank lines after the header as empty rows.
    pub fn from_path_keep_blank<P: AsRef<Path>>(path: P) -> Result<Table> {
        Table::from_reader_keep_blank(BufReader::new(File::open(path)?))
    }

    /// Read a table, keeping every blank line after the header as an empty row.
    ///
    /// The csv reader skips blank lines, so records are paired back up with the raw
    /// lines: with quoting off, each non-blank line is exactly one record.
    pub fn from_reader_keep_blank<R: Read>(mut rdr: R) -> Result<Table> {
        let mut bytes = Vec::new();
        rdr.read_to_end(&mut bytes)?;

        let mut reader = tsv_reader(bytes.as_slice());
        let mut records = reader.records();
        let mut table = Table::default();
        let mut in_body = false;
        for line in lines(&bytes) {
            if line.is_empty() {
                if in_body {
                    table.rows.push(Vec::new());
                }
                continue;
            }
            let Some(record) = records.next() else { break };
            let fields: Vec<String> = record?.iter().map(str::to_string).collect();
            if in_body {
                table.rows.push(fields);
            } else {
                table.header = fields;
                in_body = true;
            }
        }
        Ok(table)
    }

    /// `true` when the source had neither a header nor rows.
    pub fn is_blank(&self) -> bool {
        self.header.is_empty() && self.rows.is_empty()
    }

    /// Position of a named column in the header.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Resolve every name in `required` to its column index, failing with the full
    /// list of missing names if any is absent.
    pub fn require_columns(&self, table: &'static str, required: &[&str]) -> Result<Vec<usize>> {
        let missing: Vec<String> = required
            .iter()
            .filter(|name| self.column(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingColumns {
                table,
                missing,
                available: self.header.clone(),
            });
        }
        Ok(required.iter().filter_map(|name| self.column(name)).collect())
    }

    /// Write header and rows as tab-delimited text with `\n` line endings.
    pub fn write_to<W: Write>(&self, w: W) -> Result<()> {
        let mut writer = writer_from(w);
        if !self.header.is_empty() {
            writer.write_record(&self.header)?;
        }
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Create `path` and write the table into it.
    pub fn write_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.write_to(BufWriter::new(File::create(path)?))
    }
}

fn tsv_reader<R: Read>(rdr: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(rdr)
}

/// Lines of `bytes` without their `\n` / `\r\n` terminators.
fn lines(bytes: &[u8]) -> impl Iterator<Item = &[u8]> + '_ {
    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    body.split(|&b| b == b'\n').map(|l| l.strip_suffix(b"\r").unwrap_or(l))
}

/// Build a tab-delimited writer that never quotes.
pub fn writer_from<W: Write>(w: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(w)
}

/// Field `idx` of `row`, or `""` when the row is too short.
#[inline]
pub fn field(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

/// Right-pad `row` with empty strings until it is at least `width` fields long.
pub fn pad_row(row: &mut Vec<String>, width: usize) {
    if row.len() < width {
        row.resize(width, String::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_header_and_ragged_rows() {
        let t = Table::from_reader("id\tforward_primer\tx\n1.1\tACGT\n2.1\n".as_bytes()).unwrap();
        assert_eq!(t.header, vec!["id", "forward_primer", "x"]);
        assert_eq!(t.rows.len(), 2);
        assert_eq!(t.rows[1], vec!["2.1"]);
        assert_eq!(field(&t.rows[1], 2), "");
    }

    #[test]
    fn blank_lines_kept_as_empty_rows_on_request() {
        let src = "id\tforward_primer\n66.1\tA\n\n66.2\tC\n\n\n67.1\tG\n\n";
        let dropped = Table::from_reader(src.as_bytes()).unwrap();
        assert_eq!(dropped.rows.len(), 3);

        let kept = Table::from_reader_keep_blank(src.as_bytes()).unwrap();
        let widths: Vec<usize> = kept.rows.iter().map(Vec::len).collect();
        assert_eq!(widths, vec![2, 0, 2, 0, 0, 2, 0]);
        assert_eq!(kept.rows[2], vec!["66.2", "C"]);
    }

    #[test]
    fn keep_blank_handles_crlf_and_missing_final_newline() {
        let kept = Table::from_reader_keep_blank("id\r\n1.1\r\n\r\n2.1".as_bytes()).unwrap();
        assert_eq!(kept.header, vec!["id"]);
        assert_eq!(kept.rows, vec![vec!["1.1".to_string()], vec![], vec!["2.1".to_string()]]);
    }

    #[test]
    fn empty_source_is_blank() {
        let t = Table::from_reader("".as_bytes()).unwrap();
        assert!(t.is_blank());
    }

    #[test]
    fn quotes_are_kept_verbatim() {
        let src = "id\tnote\n1.1\t\"a b\"\n";
        let t = Table::from_reader(src.as_bytes()).unwrap();
        assert_eq!(t.rows[0][1], "\"a b\"");
        let mut out = Vec::new();
        t.write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), src);
    }

    #[test]
    fn require_columns_reports_missing_and_available() {
        let t = Table::from_reader("a\tb\n".as_bytes()).unwrap();
        match t.require_columns("test table", &["a", "c", "d"]) {
            Err(Error::MissingColumns { missing, available, .. }) => {
                assert_eq!(missing, vec!["c", "d"]);
                assert_eq!(available, vec!["a", "b"]);
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(t.require_columns("test table", &["b", "a"]).unwrap(), vec![1, 0]);
    }

    #[test]
    fn pad_row_only_grows() {
        let mut short = vec!["x".to_string()];
        pad_row(&mut short, 3);
        assert_eq!(short, vec!["x", "", ""]);
        let mut long = vec!["a".to_string(), "b".to_string()];
        pad_row(&mut long, 1);
        assert_eq!(long.len(), 2);
    }
}
