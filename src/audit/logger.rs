//! The mutation history behind `spendboard history`
//!
//! `audit.log` holds one JSON [`AuditEntry`] per line. An append is a single
//! `write_all` of the whole line, so a crash can at worst leave one torn line
//! at the end. Reading skips such lines and counts them, and the next append
//! starts on a fresh line.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{SpendboardError, SpendboardResult};

use super::entry::{AuditEntry, EntityType};

/// Appends to and reads back the expense and budget history
pub struct AuditLogger {
    log_path: PathBuf,
}

/// Everything read back from the log
#[derive(Debug, Default)]
pub struct History {
    /// Parsed entries, oldest first
    pub entries: Vec<AuditEntry>,
    /// Lines that were not valid entries
    pub skipped: usize,
}

impl History {
    /// The last `count` entries, optionally only those about one kind of
    /// record, oldest first
    pub fn recent(&self, count: usize, only: Option<EntityType>) -> Vec<&AuditEntry> {
        let mut picked: Vec<&AuditEntry> = self
            .entries
            .iter()
            .rev()
            .filter(|e| only.map_or(true, |kind| e.entity_type == kind))
            .take(count)
            .collect();
        picked.reverse();
        picked
    }

    /// Every entry about the expense shown as `expense_id`
    pub fn for_expense(&self, expense_id: &str) -> Vec<&AuditEntry> {
        self.entries
            .iter()
            .filter(|e| e.entity_type == EntityType::Expense && e.entity_id == expense_id)
            .collect()
    }
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry as a single line
    pub fn log(&self, entry: &AuditEntry) -> SpendboardResult<()> {
        let mut line = serde_json::to_string(entry)
            .map_err(|e| SpendboardError::Json(format!("Failed to serialize audit entry: {}", e)))?;
        line.push('\n');

        if let Some(dir) = self.log_path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| SpendboardError::Io(format!("Failed to create {}: {}", dir.display(), e)))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| SpendboardError::Io(format!("Failed to open audit log: {}", e)))?;
        if ends_mid_line(&mut file)
            .map_err(|e| SpendboardError::Io(format!("Failed to inspect audit log: {}", e)))?
        {
            line.insert(0, '\n');
        }
        file.write_all(line.as_bytes())
            .map_err(|e| SpendboardError::Io(format!("Failed to append audit entry: {}", e)))?;

        debug!(
            operation = %entry.operation,
            entity = %entry.entity_type,
            id = %entry.entity_id,
            "recorded change"
        );
        Ok(())
    }

    /// Read the whole log; a missing file is an empty history
    pub fn history(&self) -> SpendboardResult<History> {
        let contents = match fs::read_to_string(&self.log_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(History::default()),
            Err(e) => {
                return Err(SpendboardError::Io(format!("Failed to read audit log: {}", e)));
            }
        };

        let mut history = History::default();
        for (index, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<AuditEntry>(line) {
                Ok(entry) => history.entries.push(entry),
                Err(e) => {
                    warn!(line = index + 1, error = %e, "skipping unreadable audit line");
                    history.skipped += 1;
                }
            }
        }
        Ok(history)
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}

/// Whether the last append was cut off before its newline
fn ends_mid_line(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn added(id: &str) -> AuditEntry {
        AuditEntry::create(EntityType::Expense, id, None, &json!({"amount": 3550}))
    }

    fn budget_replaced() -> AuditEntry {
        AuditEntry::replace(
            EntityType::Budget,
            "budget",
            &json!({"monthly_limit": null}),
            &json!({"monthly_limit": 100000}),
            Some("monthly limit: none -> $1000.00".into()),
        )
    }

    #[test]
    fn test_missing_log_is_empty_history() {
        let (logger, _temp) = logger();
        let history = logger.history().unwrap();
        assert!(history.entries.is_empty());
        assert_eq!(history.skipped, 0);
        assert!(history.recent(5, None).is_empty());
    }

    #[test]
    fn test_recent_keeps_order_and_filters_by_kind() {
        let (logger, _temp) = logger();
        logger.log(&added("exp-1")).unwrap();
        logger.log(&budget_replaced()).unwrap();
        logger.log(&added("exp-2")).unwrap();
        logger.log(&added("exp-3")).unwrap();

        let history = logger.history().unwrap();
        let ids = |entries: Vec<&AuditEntry>| -> Vec<String> {
            entries.iter().map(|e| e.entity_id.clone()).collect()
        };
        assert_eq!(ids(history.recent(2, None)), vec!["exp-2", "exp-3"]);
        assert_eq!(ids(history.recent(2, Some(EntityType::Expense))), vec!["exp-2", "exp-3"]);
        assert_eq!(ids(history.recent(10, Some(EntityType::Budget))), vec!["budget"]);
        assert_eq!(history.recent(10, None).len(), 4);
    }

    #[test]
    fn test_for_expense() {
        let (logger, _temp) = logger();
        logger.log(&added("exp-1")).unwrap();
        logger.log(&added("exp-2")).unwrap();
        logger
            .log(&AuditEntry::delete(EntityType::Expense, "exp-1", None, &json!({})))
            .unwrap();

        let history = logger.history().unwrap();
        let trail = history.for_expense("exp-1");
        assert_eq!(trail.len(), 2);
        assert_eq!(trail[1].operation, crate::audit::Operation::Delete);
    }

    #[test]
    fn test_torn_line_is_skipped() {
        let (logger, _temp) = logger();
        logger.log(&added("exp-1")).unwrap();
        let mut file = OpenOptions::new().append(true).open(logger.path()).unwrap();
        file.write_all(b"{\"timestamp\":\"2024-12-0").unwrap();
        drop(file);

        let history = logger.history().unwrap();
        assert_eq!(history.entries.len(), 1);
        assert_eq!(history.skipped, 1);

        // The next append starts a fresh line instead of extending the torn one
        logger.log(&added("exp-2")).unwrap();
        let history = logger.history().unwrap();
        assert_eq!(history.entries.len(), 2);
        assert_eq!(history.skipped, 1);
    }

    #[test]
    fn test_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("nested").join("audit.log"));
        logger.log(&added("exp-1")).unwrap();
        assert_eq!(logger.history().unwrap().entries.len(), 1);
    }
}
