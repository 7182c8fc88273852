use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use tessera_core::error::AppError;
use tessera_core::table::TableStore;
use tracing::debug;

/// A spreadsheet stored as a CSV file.
///
/// The whole file is loaded on open. Each [`TableStore::write_cell`] updates
/// the in-memory grid and rewrites the file atomically: the grid goes to a
/// sibling `.tmp` file which is then renamed over the original.
///
/// Rows may have different lengths.
///
/// # Examples
///
/// ```no_run
/// use tessera_core::TableStore;
/// use tessera_sheet::CsvSheet;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut sheet = CsvSheet::open("datasets.csv")?;
/// let rows = sheet.read_all()?;
/// println!("{} rows", rows.len());
/// sheet.write_cell(1, 0, "renamed")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CsvSheet {
    path: PathBuf,
    rows: Vec<Vec<String>>,
}

impl CsvSheet {
    /// Loads the CSV file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::SheetError` if the file cannot be opened or is not
    /// valid CSV.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref().to_path_buf();

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&path)
            .map_err(|e| sheet_error(&path, e))?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| sheet_error(&path, e))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        debug!("Loaded {} rows from {}", rows.len(), path.display());
        Ok(Self { path, rows })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), AppError> {
        let mut tmp = OsString::from(self.path.as_os_str());
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let mut writer = WriterBuilder::new()
            .flexible(true)
            .from_path(&tmp)
            .map_err(|e| sheet_error(&tmp, e))?;
        for row in &self.rows {
            writer
                .write_record(row)
                .map_err(|e| sheet_error(&tmp, e))?;
        }
        writer
            .flush()
            .map_err(|e| sheet_error(&tmp, e))?;
        drop(writer);

        fs::rename(&tmp, &self.path).map_err(|e| sheet_error(&self.path, e))
    }
}

impl TableStore for CsvSheet {
    fn read_all(&self) -> Result<Vec<Vec<String>>, AppError> {
        Ok(self.rows.clone())
    }

    fn write_cell(&mut self, row: usize, col: usize, value: &str) -> Result<(), AppError> {
        let cells = self.rows.get_mut(row).ok_or_else(|| {
            AppError::SheetError(format!(
                "{}: row {} does not exist",
                self.path.display(),
                row + 1
            ))
        })?;
        let previous = cells.clone();
        if cells.len() <= col {
            cells.resize(col + 1, String::new());
        }
        cells[col] = value.to_string();

        // A write that never reached disk must not ride along with a later one.
        self.persist().inspect_err(|_| self.rows[row] = previous)
    }
}

fn sheet_error(path: &Path, err: impl std::fmt::Display) -> AppError {
    AppError::SheetError(format!("{}: {}", path.display(), err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn sheet_with(content: &str) -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("datasets.csv");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_open_reads_header_and_rows() {
        let (_dir, path) = sheet_with("name,title\nrain_fall,Rainfall\nair,\"Air, quality\"\n");
        let sheet = CsvSheet::open(&path).unwrap();
        let rows = sheet.read_all().unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["name", "title"]);
        assert_eq!(rows[2], vec!["air", "Air, quality"]);
    }

    #[test]
    fn test_open_accepts_ragged_rows() {
        let (_dir, path) = sheet_with("a,b,c\nonly-one\n");
        let rows = CsvSheet::open(&path).unwrap().read_all().unwrap();
        assert_eq!(rows[1], vec!["only-one"]);
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CsvSheet::open(dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, AppError::SheetError(msg) if msg.contains("nope.csv")));
    }

    #[test]
    fn test_write_cell_persists_to_disk() {
        let (_dir, path) = sheet_with("name,notes\nold_name,\"multi\nline\"\n");
        let mut sheet = CsvSheet::open(&path).unwrap();

        sheet.write_cell(1, 0, "new-name-123").unwrap();
        assert_eq!(sheet.read_all().unwrap()[1][0], "new-name-123");

        let reopened = CsvSheet::open(&path).unwrap().read_all().unwrap();
        assert_eq!(reopened[1], vec!["new-name-123", "multi\nline"]);
        assert_eq!(reopened[0], vec!["name", "notes"]);

        let mut tmp = OsString::from(path.as_os_str());
        tmp.push(".tmp");
        assert!(!PathBuf::from(tmp).exists());
    }

    #[test]
    fn test_write_cell_pads_short_row() {
        let (_dir, path) = sheet_with("a,b,c\nx\n");
        let mut sheet = CsvSheet::open(&path).unwrap();
        sheet.write_cell(1, 2, "z").unwrap();

        let reopened = CsvSheet::open(&path).unwrap().read_all().unwrap();
        assert_eq!(reopened[1], vec!["x", "", "z"]);
    }

    #[test]
    fn test_failed_persist_leaves_row_untouched() {
        let (_dir, path) = sheet_with("name\nfirst\nsecond\n");
        let mut sheet = CsvSheet::open(&path).unwrap();

        // A directory in the temp file's place makes the rewrite fail.
        let mut tmp = OsString::from(path.as_os_str());
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::create_dir(&tmp).unwrap();

        assert!(sheet.write_cell(1, 0, "never-posted").is_err());
        assert_eq!(sheet.read_all().unwrap()[1], vec!["first"]);

        fs::remove_dir(&tmp).unwrap();
        sheet.write_cell(2, 0, "posted").unwrap();

        let on_disk = fs::read_to_string(&path).unwrap();
        assert_eq!(on_disk, "name\nfirst\nposted\n");
    }

    #[test]
    fn test_write_cell_missing_row() {
        let (_dir, path) = sheet_with("a\n");
        let mut sheet = CsvSheet::open(&path).unwrap();
        assert!(sheet.write_cell(5, 0, "x").is_err());
    }
}
