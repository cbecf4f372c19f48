//! Give a file a `.tsv` extension by copying or renaming it. Content is unchanged.
use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

use crate::error::Result;

/// Copy or move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transfer {
    Copy,
    Rename,
}

/// `output` itself if it already ends in `.tsv` (any case), else `output` + `.tsv`.
pub fn tsv_path(output: &Path) -> PathBuf {
    let is_tsv = output
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("tsv"));
    if is_tsv {
        return output.to_path_buf();
    }
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    output.with_file_name(format!("{name}.tsv"))
}

/// Place `input` at `output` with a `.tsv` extension, returning the final path.
pub fn force_tsv(input: &Path, output: &Path, transfer: Transfer) -> Result<PathBuf> {
    let dst = tsv_path(output);
    if dst != output {
        warn!("Output does not end with .tsv; writing {}", dst.display());
    }
    if let Some(parent) = dst.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    match transfer {
        Transfer::Copy => {
            fs::copy(input, &dst)?;
        }
        Transfer::Rename => fs::rename(input, &dst)?,
    }
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_tsv_when_missing() {
        assert_eq!(tsv_path(Path::new("out/primers")), PathBuf::from("out/primers.tsv"));
        assert_eq!(tsv_path(Path::new("out/primers.txt")), PathBuf::from("out/primers.txt.tsv"));
        assert_eq!(tsv_path(Path::new("out/primers.TSV")), PathBuf::from("out/primers.TSV"));
    }

    #[test]
    fn copy_keeps_source_and_rename_moves_it() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("A_welshii_Primers");
        fs::write(&src, "id\tforward_primer\n").unwrap();

        let copied = force_tsv(&src, &dir.path().join("nested/copy"), Transfer::Copy).unwrap();
        assert_eq!(copied, dir.path().join("nested/copy.tsv"));
        assert!(src.exists());
        assert_eq!(fs::read_to_string(&copied).unwrap(), "id\tforward_primer\n");

        let moved = force_tsv(&src, &dir.path().join("moved.tsv"), Transfer::Rename).unwrap();
        assert!(!src.exists());
        assert!(moved.exists());
    }
}
