//! Locus keys and the two kinds of locus name.
//!
//! A primer-table `id` such as `"66.1.2"` belongs to locus `66`: the key is the run of
//! leading decimal digits after any leading whitespace. A locus found in the
//! comparison index gets a [`BaseName`] of the form `MOTIF(min-max)`; the final
//! [`CanonicalName`] appends a 1-based disambiguation index, or is the `NA` sentinel.
use core::fmt;

/// Sentinel written for loci without a comparison record.
pub const NA: &str = "NA";

/// Extract the locus key from a raw primer id.
///
/// Returns `None` when `raw_id` has no leading digits.
///
/// # Examples
/// ```
/// use ssrname::locus::locus_key;
/// assert_eq!(locus_key("66.1.2"), Some("66"));
/// assert_eq!(locus_key("  7.3"), Some("7"));
/// assert_eq!(locus_key("x66"), None);
/// ```
pub fn locus_key(raw_id: &str) -> Option<&str> {
    let s = raw_id.trim_start();
    let end = s.bytes().take_while(u8::is_ascii_digit).count();
    if end == 0 { None } else { Some(&s[..end]) }
}

/// The shared, pre-disambiguation name of a locus.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum BaseName {
    /// `MOTIF(min-max)` built from a comparison record.
    Repeat(String),
    /// The locus key had no comparison record.
    Unmatched,
}

impl BaseName {
    /// Build `MOTIF(min-max)`.
    pub fn repeat(motif: &str, repeat_min: i64, repeat_max: i64) -> BaseName {
        BaseName::Repeat(format!("{motif}({repeat_min}-{repeat_max})"))
    }

    pub fn is_unmatched(&self) -> bool {
        matches!(self, BaseName::Unmatched)
    }
}

impl fmt::Display for BaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseName::Repeat(s) => f.write_str(s),
            BaseName::Unmatched => f.write_str(NA),
        }
    }
}

/// The final per-locus name written to the output table.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CanonicalName {
    /// `BASE.index`, where `index` counts loci sharing `base` from 1.
    Indexed { base: String, index: usize },
    /// `NA`; never carries an index.
    Unmatched,
}

impl CanonicalName {
    pub fn is_unmatched(&self) -> bool {
        matches!(self, CanonicalName::Unmatched)
    }
}

impl fmt::Display for CanonicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalName::Indexed { base, index } => write!(f, "{base}.{index}"),
            CanonicalName::Unmatched => f.write_str(NA),
        }
    }
}
