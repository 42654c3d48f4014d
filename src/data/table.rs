use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use super::error::DataError;

// ---------------------------------------------------------------------------
// Table – a CSV file held as rows of text cells
// ---------------------------------------------------------------------------

/// A parsed CSV table with a header row.
///
/// Headers and cells are whitespace-trimmed. Rows may be shorter than the
/// header, and a cell past the end of a short row reads as empty. A row with
/// more cells than the header is rejected.
#[derive(Debug, Clone)]
pub struct Table {
    /// Source name used in error messages (usually the file name).
    name: String,
    headers: Vec<String>,
    rows: Vec<csv::StringRecord>,
}

impl Table {
    pub fn from_path(path: &Path) -> Result<Self, DataError> {
        let file = std::fs::File::open(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self::from_reader(&name, file).map_err(|e| match e {
            DataError::Csv { source, .. } => DataError::Csv {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn from_reader<R: Read>(name: &str, reader: R) -> Result<Self, DataError> {
        let csv_err = |source| DataError::Csv {
            path: name.into(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .map_err(csv_err)?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let rows = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(csv_err)?;

        if let Some((row, record)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() > headers.len())
        {
            return Err(DataError::MalformedResource {
                resource: name.to_string(),
                detail: format!(
                    "row {row} has {} cells but the header has {}",
                    record.len(),
                    headers.len()
                ),
            });
        }

        Ok(Table {
            name: name.to_string(),
            headers,
            rows,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first column named any of `names`.
    pub fn column_index(&self, names: &[&str]) -> Result<usize, DataError> {
        names
            .iter()
            .find_map(|name| self.headers.iter().position(|h| h == name))
            .ok_or_else(|| DataError::MissingColumn {
                table: self.name.clone(),
                column: names.first().copied().unwrap_or_default().to_string(),
            })
    }

    /// Text of one cell; empty when the row is too short.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or("")
    }

    /// Every row's cell in a column, parsed as `T`. Empty cells are errors.
    pub fn parse_column<T: FromStr>(&self, names: &[&str]) -> Result<Vec<T>, DataError> {
        let col = self.column_index(names)?;
        (0..self.rows.len())
            .map(|row| self.parse_cell(row, col))
            .collect()
    }

    /// Parse one cell as `T`.
    pub fn parse_cell<T: FromStr>(&self, row: usize, col: usize) -> Result<T, DataError> {
        let text = self.cell(row, col);
        text.parse::<T>().map_err(|_| DataError::Parse {
            table: self.name.clone(),
            row,
            column: self.headers.get(col).cloned().unwrap_or_default(),
            value: text.to_string(),
        })
    }

    /// Numeric series stored in a column.
    ///
    /// The first empty cell ends the series, so a column that stops early in
    /// a ragged file comes back shorter than its neighbours. A value below an
    /// empty cell is a gap and fails as a malformed resource.
    pub fn series(&self, name: &str) -> Result<Vec<f64>, DataError> {
        let col = self.column_index(&[name])?;
        let end = (0..self.rows.len())
            .position(|row| self.cell(row, col).is_empty())
            .unwrap_or(self.rows.len());

        let resumed = (end..self.rows.len()).find(|&row| !self.cell(row, col).is_empty());
        if let Some(row) = resumed {
            return Err(DataError::MalformedResource {
                resource: self.name.clone(),
                detail: format!(
                    "column '{name}' is empty at row {end} but has a value at row {row}"
                ),
            });
        }

        (0..end).map(|row| self.parse_cell(row, col)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(text: &str) -> Table {
        Table::from_reader("test.csv", text.as_bytes()).unwrap()
    }

    #[test]
    fn headers_are_trimmed() {
        let t = table("Subject ID,Age ,BMI\nS01, 24 ,22.5\n");
        assert_eq!(t.headers(), &["Subject ID", "Age", "BMI"]);
        assert_eq!(t.parse_column::<u32>(&["Age"]).unwrap(), vec![24]);
    }

    #[test]
    fn column_aliases() {
        let t = table("Subject,Experment\n1,8\n");
        assert_eq!(t.column_index(&["Experiment", "Experment"]).unwrap(), 1);
        match t.column_index(&["session"]) {
            Err(DataError::MissingColumn { table, column }) => {
                assert_eq!(table, "test.csv");
                assert_eq!(column, "session");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn ragged_series_is_shorter() {
        let t = table("P4,Cz\n1.0,2.0\n3.0\n");
        assert_eq!(t.series("P4").unwrap(), vec![1.0, 3.0]);
        assert_eq!(t.series("Cz").unwrap(), vec![2.0]);
        assert_eq!(t.cell(1, 1), "");
    }

    #[test]
    fn gap_inside_a_column_is_malformed() {
        let t = table("P4,Cz\n1.0,2.0\n,4.0\n5.0,6.0\n");
        match t.series("P4") {
            Err(DataError::MalformedResource { resource, detail }) => {
                assert_eq!(resource, "test.csv");
                assert!(detail.contains("'P4'"));
                assert!(detail.contains("row 1"));
                assert!(detail.contains("row 2"));
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(t.series("Cz").unwrap(), vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn trailing_empty_cells_end_the_series() {
        let t = table("P4,Cz\n1.0,2.0\n,3.0\n,4.0\n");
        assert_eq!(t.series("P4").unwrap(), vec![1.0]);
    }

    #[test]
    fn row_longer_than_header_is_rejected() {
        let err = Table::from_reader("test.csv", "P4,Cz\n1.0,2.0\n3.0,4.0,5.0\n".as_bytes())
            .unwrap_err();
        match err {
            DataError::MalformedResource { resource, detail } => {
                assert_eq!(resource, "test.csv");
                assert!(detail.contains("row 1 has 3 cells"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn parse_error_reports_location() {
        let t = table("P4\n1.0\nabc\n");
        match t.series("P4") {
            Err(DataError::Parse { row, column, value, .. }) => {
                assert_eq!(row, 1);
                assert_eq!(column, "P4");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn from_path_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Table::from_path(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }
}
