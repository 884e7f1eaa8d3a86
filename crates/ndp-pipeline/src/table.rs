// In-Memory Tabular Data
//
// A small dynamic table: the header row plus each data row as a Vec of
// cell strings. Cells whose trimmed content is empty are treated as
// missing values by the stages operating on the table.

use crate::{PipelineError, Result};
use std::io::{Read, Write};
use std::path::Path;

/// A tabular dataset loaded from or destined for a delimited file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Column names, from the header row of the file
    pub headers: Vec<String>,
    /// Each data row, one cell string per column
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given header
    pub fn new(headers: Vec<String>) -> Self {
        Table {
            headers,
            rows: Vec::new(),
        }
    }

    /// Read a comma-delimited table with a header row from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = rdr.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Table { headers, rows })
    }

    /// Read a comma-delimited table from a file path
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            std::io::Error::new(e.kind(), format!("{}: {}", path.display(), e))
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Write the table as comma-delimited text, header row first
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new().from_writer(writer);

        wtr.write_record(&self.headers)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;

        Ok(())
    }

    /// Write the table to a file path, overwriting any existing file
    pub fn to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = std::fs::File::create(path).map_err(|e| {
            std::io::Error::new(e.kind(), format!("{}: {}", path.display(), e))
        })?;
        self.to_writer(std::io::BufWriter::new(file))
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact header name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Rename a column; returns false when the column is absent
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        match self.column_index(from) {
            Some(i) => {
                self.headers[i] = to.to_string();
                true
            },
            None => false,
        }
    }

    /// Remove a column and its cells; returns false when absent
    pub fn drop_column(&mut self, name: &str) -> bool {
        match self.column_index(name) {
            Some(i) => {
                self.headers.remove(i);
                for row in &mut self.rows {
                    if i < row.len() {
                        row.remove(i);
                    }
                }
                true
            },
            None => false,
        }
    }

    /// Project the table onto the given columns, in the given order.
    /// Fails listing any requested columns that are absent.
    pub fn select(&self, columns: &[String]) -> Result<Table> {
        let mut indices = Vec::with_capacity(columns.len());
        let mut missing = Vec::new();

        for name in columns {
            match self.column_index(name) {
                Some(i) => indices.push(i),
                None => missing.push(name.clone()),
            }
        }

        if !missing.is_empty() {
            return Err(PipelineError::SchemaMismatch(missing));
        }

        let rows = self
            .rows
            .iter()
            .map(|row| {
                indices
                    .iter()
                    .map(|&i| row.get(i).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();

        Ok(Table {
            headers: columns.to_vec(),
            rows,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table {
            headers: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            rows: vec![
                vec!["1".to_string(), "2".to_string(), "3".to_string()],
                vec!["4".to_string(), "5".to_string(), "6".to_string()],
            ],
        }
    }

    #[test]
    fn test_from_reader() {
        let data = "a,b\n1,2\n3,4\n";
        let table = Table::from_reader(data.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1], vec!["3", "4"]);
    }

    #[test]
    fn test_round_trip_preserves_quoting() {
        let data = "name,genres\nShow A,\"Drama, Thriller\"\n";
        let table = Table::from_reader(data.as_bytes()).unwrap();
        assert_eq!(table.rows[0][1], "Drama, Thriller");

        let mut out = Vec::new();
        table.to_writer(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), data);
    }

    #[test]
    fn test_rename_column() {
        let mut table = sample();
        assert!(table.rename_column("b", "B"));
        assert!(!table.rename_column("nope", "x"));
        assert_eq!(table.headers, vec!["a", "B", "c"]);
    }

    #[test]
    fn test_drop_column() {
        let mut table = sample();
        assert!(table.drop_column("b"));
        assert_eq!(table.headers, vec!["a", "c"]);
        assert_eq!(table.rows[0], vec!["1", "3"]);

        assert!(!table.drop_column("b"));
    }

    #[test]
    fn test_select_reorders() {
        let table = sample();
        let projected = table.select(&["c".to_string(), "a".to_string()]).unwrap();
        assert_eq!(projected.headers, vec!["c", "a"]);
        assert_eq!(projected.rows[0], vec!["3", "1"]);
        assert_eq!(projected.rows[1], vec!["6", "4"]);
    }

    #[test]
    fn test_select_missing_column() {
        let table = sample();
        let err = table
            .select(&["a".to_string(), "zz".to_string()])
            .unwrap_err();
        match err {
            PipelineError::SchemaMismatch(missing) => assert_eq!(missing, vec!["zz"]),
            other => panic!("unexpected error: {other}"),
        }
    }
}
