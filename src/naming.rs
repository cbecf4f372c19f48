//! Locus name assignment.
//!
//! Naming runs in two passes over the primer ids, in input order:
//!
//! 1. **Discovery** ([`discover_loci`]): each locus key is recorded the first time it
//!    is seen, and its [`BaseName`] is resolved against the [`ComparisonIndex`] right
//!    away. Later rows of a known locus only add to its row count.
//! 2. **Disambiguation** ([`disambiguate`]): walking the loci in first-seen order, a
//!    counter per base name hands out `.1`, `.2`, ... Unmatched loci become `NA` and
//!    never touch a counter.
//!
//! The result, [`LocusNames`], maps every locus key to exactly one [`CanonicalName`],
//! so all rows of one locus share one name however many rows it has.
//!
//! # Examples
//! ```
//! use std::path::Path;
//! use ssrname::compare::ComparisonIndex;
//! use ssrname::naming::assign_names;
//! use ssrname::tsv::Table;
//!
//! let compare = "number\tfasta1_motif\tfasta2_motif\tfasta1_repeat_number\tfasta2_repeat_number\n\
//!                66\tAC\tAC\t4\t7\n68\tAC\tAC\t7\t4\n";
//! let table = Table::from_reader(compare.as_bytes()).unwrap();
//! let index = ComparisonIndex::from_table(&table, Path::new("input.compare")).unwrap();
//! let names = assign_names(["66.1", "67.1", "68.1", "66.2"], &index);
//! assert_eq!(names.name_for_id("66.2").to_string(), "AC(4-7).1");
//! assert_eq!(names.name_for_id("67.1").to_string(), "NA");
//! assert_eq!(names.name_for_id("68.1").to_string(), "AC(4-7).2");
//! ```
use std::collections::HashMap;

use crate::compare::ComparisonIndex;
use crate::locus::{locus_key, BaseName, CanonicalName};

/// A locus as first seen in the primer table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscoveredLocus {
    pub key: String,
    pub base: BaseName,
    /// Number of primer rows carrying this key.
    pub rows: usize,
}

/// Pass 1: distinct locus keys in first-seen order with their base names.
///
/// Ids without a leading integer are ignored here.
pub fn discover_loci<'a, I>(ids: I, index: &ComparisonIndex) -> Vec<DiscoveredLocus>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut loci: Vec<DiscoveredLocus> = Vec::new();
    let mut position: HashMap<&'a str, usize> = HashMap::new();
    for id in ids {
        let Some(key) = locus_key(id) else { continue };
        if let Some(&i) = position.get(key) {
            loci[i].rows += 1;
            continue;
        }
        let base = match index.get(key) {
            Some(record) => record.base_name(),
            None => BaseName::Unmatched,
        };
        position.insert(key, loci.len());
        loci.push(DiscoveredLocus { key: key.to_string(), base, rows: 1 });
    }
    loci
}

/// One line of the per-locus naming report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocusReport {
    pub locus: String,
    pub base_name: String,
    pub canonical_name: String,
    pub rows: usize,
}

/// Canonical names for every discovered locus.
#[derive(Clone, Debug, Default)]
pub struct LocusNames {
    loci: Vec<DiscoveredLocus>,
    names: HashMap<String, CanonicalName>,
}

/// Pass 2: turn base names into canonical names.
pub fn disambiguate(loci: Vec<DiscoveredLocus>) -> LocusNames {
    let mut names = HashMap::with_capacity(loci.len());
    {
        let mut counters: HashMap<&str, usize> = HashMap::new();
        for locus in &loci {
            let name = match &locus.base {
                BaseName::Unmatched => CanonicalName::Unmatched,
                BaseName::Repeat(base) => {
                    let counter = counters.entry(base.as_str()).or_insert(0);
                    *counter += 1;
                    CanonicalName::Indexed { base: base.clone(), index: *counter }
                }
            };
            names.insert(locus.key.clone(), name);
        }
    }
    LocusNames { loci, names }
}

/// Run both passes over `ids`.
pub fn assign_names<'a, I>(ids: I, index: &ComparisonIndex) -> LocusNames
where
    I: IntoIterator<Item = &'a str>,
{
    disambiguate(discover_loci(ids, index))
}

impl LocusNames {
    /// Canonical name for a locus key, if the key was discovered.
    pub fn get(&self, key: &str) -> Option<&CanonicalName> {
        self.names.get(key)
    }

    /// Canonical name for a raw primer id; `NA` when the id has no locus key.
    pub fn name_for_id(&self, raw_id: &str) -> &CanonicalName {
        locus_key(raw_id)
            .and_then(|key| self.names.get(key))
            .unwrap_or(&CanonicalName::Unmatched)
    }

    /// Discovered loci in first-seen order.
    pub fn loci(&self) -> &[DiscoveredLocus] {
        &self.loci
    }

    /// Keys of loci with no comparison record, in first-seen order.
    pub fn unmatched(&self) -> Vec<&str> {
        self.loci
            .iter()
            .filter(|l| l.base.is_unmatched())
            .map(|l| l.key.as_str())
            .collect()
    }

    pub fn report(&self) -> Vec<LocusReport> {
        self.loci
            .iter()
            .map(|l| LocusReport {
                locus: l.key.clone(),
                base_name: l.base.to_string(),
                canonical_name: self.names[&l.key].to_string(),
                rows: l.rows,
            })
            .collect()
    }
}
