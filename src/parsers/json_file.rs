//! JSON exports of the backend's tables on disk

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::RecordSource;
use crate::types::{EntryTallyError, Result, Table};

/// A `data_entries` export file
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for JsonFileSource {
    fn name(&self) -> &str {
        "json-file"
    }

    fn fetch(&self) -> Result<Value> {
        let content = fs::read_to_string(&self.path)?;
        serde_json::from_str(&content)
            .map_err(|e| EntryTallyError::Parse(format!("{}: {}", self.path.display(), e)))
    }
}

/// Read a single table export (entry, columns, rows)
pub fn read_table(path: &Path) -> Result<Table> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| EntryTallyError::Parse(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::EntryQuery;
    use tempfile::TempDir;

    #[test]
    fn test_fixture_entries() {
        let source = JsonFileSource::new("tests/fixtures/entries.json");
        let records = source.load(&EntryQuery::default()).unwrap();
        assert!(!records.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = JsonFileSource::new("tests/fixtures/nonexistent.json");
        let err = source.fetch().unwrap_err();
        assert!(matches!(err, EntryTallyError::Io(_)));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.json");
        fs::write(&path, "[{ \"id\": ").unwrap();

        let err = JsonFileSource::new(&path).fetch().unwrap_err();
        assert!(matches!(err, EntryTallyError::Parse(_)));
    }

    #[test]
    fn test_read_table_fixture() {
        let table = read_table(Path::new("tests/fixtures/table.json")).unwrap();
        assert_eq!(table.entry.name, "Kirana");
        assert_eq!(table.columns.len(), 4);
        assert_eq!(table.rows.len(), 3);
    }
}
