//! Access to the source sheet.

use crate::error::AppError;

/// A grid of string cells addressed by 0-based row and column.
///
/// The processor reads the whole grid once, then writes single cells back as
/// it goes. Implementations must make a written cell visible to later reads.
pub trait TableStore {
    /// Returns every row of the table, header included.
    fn read_all(&self) -> Result<Vec<Vec<String>>, AppError>;

    /// Overwrites one cell.
    fn write_cell(&mut self, row: usize, col: usize, value: &str) -> Result<(), AppError>;
}

/// In-memory table, used for previews and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryTable {
    rows: Vec<Vec<String>>,
}

impl MemoryTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

impl TableStore for MemoryTable {
    fn read_all(&self) -> Result<Vec<Vec<String>>, AppError> {
        Ok(self.rows.clone())
    }

    fn write_cell(&mut self, row: usize, col: usize, value: &str) -> Result<(), AppError> {
        let cells = self
            .rows
            .get_mut(row)
            .ok_or_else(|| AppError::SheetError(format!("row {} does not exist", row + 1)))?;
        if cells.len() <= col {
            cells.resize(col + 1, String::new());
        }
        cells[col] = value.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_is_visible_to_read() {
        let mut table = MemoryTable::new(vec![vec!["name".into()], vec!["old".into()]]);
        table.write_cell(1, 0, "new").unwrap();
        assert_eq!(table.read_all().unwrap()[1][0], "new");
    }

    #[test]
    fn test_write_pads_short_rows() {
        let mut table = MemoryTable::new(vec![vec!["a".into()]]);
        table.write_cell(0, 2, "c").unwrap();
        assert_eq!(table.rows()[0], vec!["a", "", "c"]);
    }

    #[test]
    fn test_write_missing_row_fails() {
        let mut table = MemoryTable::default();
        let err = table.write_cell(3, 0, "x").unwrap_err();
        assert!(matches!(err, AppError::SheetError(_)));
    }
}
