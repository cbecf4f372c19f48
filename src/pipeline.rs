//! End-to-end naming run: load, assign, rewrite, write.
//!
//! Both inputs are read and validated before the output file is created, so a fatal
//! error never leaves a partial output behind.
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::compare::ComparisonIndex;
use crate::error::Result;
use crate::naming::{assign_names, LocusReport};
use crate::rewrite::PrimerTable;

/// Suffix appended to the primer table's file name for the default output.
pub const NAMED_SUFFIX: &str = ".named.tsv";

/// How many unmatched locus keys the debug log lists.
const UNMATCHED_PREVIEW: usize = 20;

/// Inputs and output of a naming run.
#[derive(Clone, Debug)]
pub struct NameConfig {
    pub primers: PathBuf,
    pub compare: PathBuf,
    pub output: Option<PathBuf>,
}

impl NameConfig {
    /// The explicit output, or `<primers>.named.tsv` beside the primer table.
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(p) => p.clone(),
            None => default_output(&self.primers),
        }
    }
}

/// `<dir>/<name>.named.tsv` for a primer table at `<dir>/<name>`.
pub fn default_output(primers: &Path) -> PathBuf {
    let name = primers
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    primers.with_file_name(format!("{name}{NAMED_SUFFIX}"))
}

/// The first `limit` keys joined with `, `, followed by `…` if any were left out.
fn preview(keys: &[String], limit: usize) -> String {
    let mut out = keys.iter().take(limit).map(String::as_str).collect::<Vec<_>>().join(", ");
    if keys.len() > limit {
        out.push_str(", …");
    }
    out
}

/// What a naming run did.
#[derive(Clone, Debug)]
pub struct NameSummary {
    pub output: PathBuf,
    pub rows: usize,
    pub loci: usize,
    /// Locus keys with no comparison record, in first-seen order.
    pub unmatched: Vec<String>,
    pub report: Vec<LocusReport>,
}

/// Name every locus in `config.primers` and write the named table.
pub fn run_naming(config: &NameConfig) -> Result<NameSummary> {
    let output = config.output_path();

    let index = ComparisonIndex::from_path(&config.compare)?;
    let primers = PrimerTable::from_path(&config.primers)?;
    info!("Read {} primer rows from {}", primers.len(), config.primers.display());

    let names = assign_names(primers.ids(), &index);
    info!("Discovered {} loci", names.loci().len());
    let unmatched: Vec<String> = names.unmatched().into_iter().map(str::to_string).collect();
    if !unmatched.is_empty() {
        warn!("{} loci had no match in the comparison table -> name=NA", unmatched.len());
        debug!("Unmatched loci: {}", preview(&unmatched, UNMATCHED_PREVIEW));
    }

    let named = primers.with_names(&names);
    named.write_path(&output)?;
    info!("Wrote {}", output.display());

    Ok(NameSummary {
        output,
        rows: named.rows.len(),
        loci: names.loci().len(),
        unmatched,
        report: names.report(),
    })
}
