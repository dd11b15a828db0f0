//! The JSON documents behind the file providers
//!
//! Each provider owns one [`DataFile`]. Saving serializes the whole document
//! in memory first, writes it to a hidden sibling (`.expenses.json.tmp`),
//! syncs it and renames it over the target, so the data file on disk is
//! always either the previous document or the new one.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::error::{SpendboardError, SpendboardResult};

/// One provider-owned JSON file, named `kind` in error messages
#[derive(Debug, Clone)]
pub struct DataFile {
    path: PathBuf,
    kind: &'static str,
}

impl DataFile {
    pub fn new(path: PathBuf, kind: &'static str) -> Self {
        Self { path, kind }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored document, `None` if nothing has been saved yet. A file that
    /// is present but empty counts as never saved.
    pub fn load_optional<T: DeserializeOwned>(&self) -> SpendboardResult<Option<T>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(file = self.kind, "no data file yet");
                return Ok(None);
            }
            Err(e) => return Err(self.failure("read", e)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice(&bytes).map(Some).map_err(|e| {
            SpendboardError::Provider(format!(
                "The {} file {} is damaged (line {}, column {}): {}",
                self.kind,
                self.path.display(),
                e.line(),
                e.column(),
                e
            ))
        })
    }

    /// The stored document, or `T::default()` before the first save
    pub fn load<T: DeserializeOwned + Default>(&self) -> SpendboardResult<T> {
        Ok(self.load_optional()?.unwrap_or_default())
    }

    /// Replace the stored document
    pub fn save<T: Serialize>(&self, document: &T) -> SpendboardResult<()> {
        let mut bytes = serde_json::to_vec_pretty(document).map_err(|e| {
            SpendboardError::Provider(format!("Failed to encode the {} file: {}", self.kind, e))
        })?;
        bytes.push(b'\n');

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| self.failure("create the directory for", e))?;
        }

        let staging = self.staging_path();
        let written = fs::File::create(&staging).and_then(|mut file| {
            file.write_all(&bytes)?;
            file.sync_all()
        });
        if let Err(e) = written.and_then(|()| fs::rename(&staging, &self.path)) {
            let _ = fs::remove_file(&staging);
            return Err(self.failure("write", e));
        }

        debug!(file = self.kind, bytes = bytes.len(), "saved data file");
        Ok(())
    }

    // Same directory as the target so the rename never crosses filesystems
    fn staging_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.kind.to_string());
        self.path.with_file_name(format!(".{}.tmp", name))
    }

    fn failure(&self, action: &str, e: io::Error) -> SpendboardError {
        SpendboardError::Provider(format!(
            "Failed to {} the {} file {}: {}",
            action,
            self.kind,
            self.path.display(),
            e
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, Category, Money};
    use tempfile::TempDir;

    fn budget_file(dir: &TempDir) -> DataFile {
        DataFile::new(dir.path().join("data").join("budgets.json"), "budget")
    }

    #[test]
    fn test_missing_and_blank_files_are_unsaved() {
        let temp_dir = TempDir::new().unwrap();
        let file = budget_file(&temp_dir);
        assert!(file.load_optional::<Budget>().unwrap().is_none());

        fs::create_dir_all(file.path().parent().unwrap()).unwrap();
        fs::write(file.path(), "  \n").unwrap();
        assert!(file.load_optional::<Budget>().unwrap().is_none());
        assert_eq!(file.load::<Vec<u32>>().unwrap(), Vec::<u32>::new());
    }

    #[test]
    fn test_save_creates_directory_and_leaves_no_staging_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = budget_file(&temp_dir);
        let budget = Budget::new().with_limit(Category::Food, Money::from_units(120));

        file.save(&budget).unwrap();

        assert_eq!(file.load_optional::<Budget>().unwrap(), Some(budget));
        assert!(!temp_dir.path().join("data").join(".budgets.json.tmp").exists());
    }

    #[test]
    fn test_damaged_file_names_kind_and_position() {
        let temp_dir = TempDir::new().unwrap();
        let file = budget_file(&temp_dir);
        fs::create_dir_all(file.path().parent().unwrap()).unwrap();
        fs::write(file.path(), "{\n  \"limits\": oops\n}").unwrap();

        let err = file.load_optional::<Budget>().unwrap_err();
        assert!(err.is_provider());
        let message = err.to_string();
        assert!(message.contains("budget file"), "{}", message);
        assert!(message.contains("line 2"), "{}", message);
    }

    #[test]
    fn test_failed_save_keeps_previous_document() {
        let temp_dir = TempDir::new().unwrap();
        let file = budget_file(&temp_dir);
        let first = Budget::starter();
        file.save(&first).unwrap();

        // A directory where the staging file should go makes the write fail
        fs::create_dir(temp_dir.path().join("data").join(".budgets.json.tmp")).unwrap();
        let err = file.save(&Budget::new()).unwrap_err();
        assert!(err.is_provider());
        assert_eq!(file.load_optional::<Budget>().unwrap(), Some(first));
    }
}
