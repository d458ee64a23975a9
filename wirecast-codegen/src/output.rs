//! All-or-nothing writing of generated units.

use crate::error::CodegenError;
use crate::generator::GeneratedUnit;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

const STAGING_SUFFIX: &str = "tmp";

/// Writes a batch of units into one directory.
///
/// Every unit is first written next to its target as `<file>.tmp`; targets
/// are only replaced once all units are staged. A unit whose target already
/// holds the same source is left untouched so its modification time does
/// not trigger rebuilds.
#[derive(Debug, Clone)]
pub struct UnitWriter {
    dir: PathBuf,
}

impl UnitWriter {
    /// Creates a writer targeting `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes all units, or none of them.
    ///
    /// # Returns
    /// The target path of every unit, in input order.
    ///
    /// # Errors
    /// Returns `CodegenError::Generation` for duplicate file names and
    /// `CodegenError::Io` if staging or renaming fails. Staged files are
    /// removed before the error is returned.
    pub fn write_all(&self, units: &[GeneratedUnit]) -> Result<Vec<PathBuf>, CodegenError> {
        let mut names = HashSet::new();
        for unit in units {
            if !names.insert(unit.file_name.as_str()) {
                return Err(CodegenError::generation(format!(
                    "two units would be written to `{}`",
                    unit.file_name
                )));
            }
        }

        fs::create_dir_all(&self.dir)?;

        let mut staged = Vec::new();
        let mut targets = Vec::with_capacity(units.len());
        for unit in units {
            let target = self.dir.join(&unit.file_name);
            targets.push(target.clone());

            if fs::read_to_string(&target).is_ok_and(|existing| existing == unit.source) {
                tracing::debug!(path = %target.display(), "unit unchanged");
                continue;
            }

            let staging = staging_path(&target);
            if let Err(e) = fs::write(&staging, &unit.source) {
                discard(&staged);
                let _ = fs::remove_file(&staging);
                return Err(e.into());
            }
            staged.push((staging, target));
        }

        for (i, (staging, target)) in staged.iter().enumerate() {
            if let Err(e) = fs::rename(staging, target) {
                discard(&staged[i..]);
                return Err(e.into());
            }
            tracing::info!(path = %target.display(), "wrote generated unit");
        }

        Ok(targets)
    }
}

fn staging_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_owned();
    name.push(".");
    name.push(STAGING_SUFFIX);
    PathBuf::from(name)
}

fn discard(staged: &[(PathBuf, PathBuf)]) {
    for (staging, _) in staged {
        if let Err(e) = fs::remove_file(staging) {
            tracing::warn!(path = %staging.display(), error = %e, "failed to remove staged unit");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(file_name: &str, source: &str) -> GeneratedUnit {
        GeneratedUnit {
            name: file_name.trim_end_matches(".rs").to_string(),
            file_name: file_name.to_string(),
            source: source.to_string(),
        }
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .expect("Failed to read dir")
            .map(|e| e.expect("Failed to read entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_write_all() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let writer = UnitWriter::new(dir.path().join("gen"));

        let paths = writer
            .write_all(&[unit("a.rs", "// a\n"), unit("b.rs", "// b\n")])
            .expect("Failed to write");

        assert_eq!(paths.len(), 2);
        assert_eq!(fs::read_to_string(&paths[0]).expect("Failed to read"), "// a\n");
        assert_eq!(entries(writer.dir()), vec!["a.rs", "b.rs"]);
    }

    #[test]
    fn test_overwrite_existing() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let writer = UnitWriter::new(dir.path());
        fs::write(dir.path().join("a.rs"), "old").expect("Failed to seed");

        writer
            .write_all(&[unit("a.rs", "new")])
            .expect("Failed to write");
        assert_eq!(
            fs::read_to_string(dir.path().join("a.rs")).expect("Failed to read"),
            "new"
        );
        assert_eq!(entries(dir.path()), vec!["a.rs"]);
    }

    #[test]
    fn test_failure_leaves_nothing_behind() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        // A directory where the second unit must be staged makes staging fail.
        fs::create_dir(dir.path().join("b.rs.tmp")).expect("Failed to seed");

        let writer = UnitWriter::new(dir.path());
        let result = writer.write_all(&[unit("a.rs", "// a\n"), unit("b.rs", "// b\n")]);

        assert!(matches!(result, Err(CodegenError::Io(_))));
        assert_eq!(entries(dir.path()), vec!["b.rs.tmp"]);
    }

    #[test]
    fn test_duplicate_file_names() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let writer = UnitWriter::new(dir.path());

        let result = writer.write_all(&[unit("a.rs", "1"), unit("a.rs", "2")]);
        assert!(matches!(result, Err(CodegenError::Generation { .. })));
        assert!(entries(dir.path()).is_empty());
    }
}
