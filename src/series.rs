//! Tabular series input.
//!
//! A table is a comma-separated file whose first row names the columns. The first column
//! holds the x-values (usually years) and every other column is a series sampled at them:
//!
//! ```text
//! year,population,internet
//! 1994,192000000,
//! 1995,195000000,0.05
//! 1998,203000000,0.26
//! ```
//!
//! An empty cell means the series has no sample at that x. That is how gaps appear.
use std::{
    io::{BufRead, BufReader},
    path::Path,
};

use crate::{
    error::{Error, Result},
    value::Value,
};

/// A set of series sharing one x column.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<T: Value = f64> {
    x_label: String,
    columns: Vec<String>,
    rows: Vec<(T, Vec<Option<T>>)>,
}
impl<T: Value> Table<T> {
    /// Reads a table from comma-separated text.
    ///
    /// Blank lines and lines starting with `#` are ignored. Rows may be shorter than the
    /// header, in which case the missing trailing cells are treated as empty.
    ///
    /// # Errors
    /// - [`Error::Csv`] if the header has fewer than two columns, a row has more cells than
    ///   the header, an x cell is empty, or a cell is not a number.
    /// - [`Error::Io`] if the reader fails.
    ///
    /// # Example
    /// ```
    /// # use gapfit::series::Table;
    /// let csv = "year,sales\n2001,10\n2002,\n2003,14\n";
    /// let table = Table::<f64>::read_csv(csv.as_bytes()).unwrap();
    /// assert_eq!(table.column("sales"), Some(vec![(2001.0, 10.0), (2003.0, 14.0)]));
    /// ```
    pub fn read_csv(reader: impl BufRead) -> Result<Self> {
        let mut header: Option<(String, Vec<String>)> = None;
        let mut rows = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut cells = line.split(',').map(str::trim);
            if header.is_none() {
                let x_label = cells.next().unwrap_or_default().to_string();
                let columns: Vec<String> = cells.map(str::to_string).collect();
                if columns.is_empty() {
                    return Err(Error::Csv {
                        line: line_no,
                        message: "expected an x column followed by at least one series".into(),
                    });
                }
                header = Some((x_label, columns));
                continue;
            }
            let width = header.as_ref().map_or(0, |(_, columns)| columns.len());

            let x = match cells.next() {
                Some(cell) if !cell.is_empty() => parse_cell(cell, line_no)?,
                _ => {
                    return Err(Error::Csv {
                        line: line_no,
                        message: "missing x value".into(),
                    })
                }
            };

            let values = cells
                .map(|cell| match cell {
                    "" => Ok(None),
                    cell => parse_cell(cell, line_no).map(Some),
                })
                .collect::<Result<Vec<_>>>()?;
            if values.len() > width {
                return Err(Error::Csv {
                    line: line_no,
                    message: format!("expected at most {width} values, found {}", values.len()),
                });
            }

            rows.push((x, values));
        }

        let (x_label, columns) = header.ok_or(Error::NoData)?;
        log::debug!(
            "read {} rows of {} series keyed by {x_label}",
            rows.len(),
            columns.len()
        );

        Ok(Self {
            x_label,
            columns,
            rows,
        })
    }

    /// Reads a table from a file.
    ///
    /// # Errors
    /// See [`Table::read_csv`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::read_csv(BufReader::new(file))
    }

    /// Name of the x column.
    #[must_use]
    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    /// Names of the series columns, in file order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the `(x, y)` samples of a series, skipping rows where it is empty.
    ///
    /// Returns `None` if there is no column with that name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<Vec<(T, T)>> {
        let index = self.columns.iter().position(|c| c == name)?;
        let samples = self
            .rows
            .iter()
            .filter_map(|(x, values)| {
                values
                    .get(index)
                    .copied()
                    .flatten()
                    .map(|y| (*x, y))
            })
            .collect();
        Some(samples)
    }
}

fn parse_cell<T: Value>(cell: &str, line: usize) -> Result<T> {
    let value: f64 = cell.parse().map_err(|_| Error::Csv {
        line,
        message: format!("`{cell}` is not a number"),
    })?;
    T::try_cast(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = "\
# indonesia
year,population,internet
1994,192000000,
1995,195000000,0.05

1998,203000000,0.26
1999,,0.45
";

    #[test]
    fn test_read_csv() {
        let table = Table::<f64>::read_csv(DATA.as_bytes()).unwrap();
        assert_eq!(table.x_label(), "year");
        assert_eq!(table.columns(), &["population", "internet"]);
        assert_eq!(table.len(), 4);
        assert!(!table.is_empty());

        assert_eq!(
            table.column("population").unwrap(),
            vec![(1994.0, 192e6), (1995.0, 195e6), (1998.0, 203e6)]
        );
        assert_eq!(
            table.column("internet").unwrap(),
            vec![(1995.0, 0.05), (1998.0, 0.26), (1999.0, 0.45)]
        );
        assert_eq!(table.column("gdp"), None);
    }

    #[test]
    fn test_short_rows() {
        let table = Table::<f64>::read_csv("x,a,b\n1,2\n2,3,4\n".as_bytes()).unwrap();
        assert_eq!(table.column("a").unwrap().len(), 2);
        assert_eq!(table.column("b").unwrap(), vec![(2.0, 4.0)]);
    }

    #[test]
    fn test_bad_number() {
        let err = Table::<f64>::read_csv("x,y\n1,2\n2,abc\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Csv { line: 3, .. }));
    }

    #[test]
    fn test_malformed() {
        let err = Table::<f64>::read_csv("x\n1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Csv { line: 1, .. }));

        let err = Table::<f64>::read_csv("x,y\n1,2,3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Csv { line: 2, .. }));

        let err = Table::<f64>::read_csv("x,y\n,2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Csv { line: 2, .. }));

        let err = Table::<f64>::read_csv("".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::NoData));
    }
}
