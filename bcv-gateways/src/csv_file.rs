use bcv_core::{
    entities::{ColumnRange, SheetRow},
    gateways::spreadsheet::{AppendSummary, Error, SpreadsheetGateway, ValueInputOption},
};
use std::{
    fs::{File, OpenOptions},
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

/// A local stand-in for the spreadsheet, e.g. for dry runs.
///
/// Every record is a whole sheet row starting at column `A`.
#[derive(Debug, Clone)]
pub struct CsvFileSheet {
    path: PathBuf,
}

impl CsvFileSheet {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_rows(&self) -> io::Result<Vec<Vec<String>>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(err) => return Err(err),
        };
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);
        reader
            .records()
            .map(|r| {
                r.map(|r| r.iter().map(ToString::to_string).collect())
                    .map_err(io::Error::other)
            })
            .collect()
    }
}

impl SpreadsheetGateway for CsvFileSheet {
    fn get_values(&self, range: ColumnRange) -> Result<Vec<Vec<String>>, Error> {
        let rows = self
            .read_rows()?
            .into_iter()
            .map(|row| {
                let mut cells: Vec<_> = row
                    .into_iter()
                    .skip(range.first())
                    .take(range.width())
                    .collect();
                while cells.last().is_some_and(String::is_empty) {
                    cells.pop();
                }
                cells
            })
            .collect();
        Ok(rows)
    }

    fn append_values(
        &self,
        _: ColumnRange,
        _: ValueInputOption,
        rows: &[SheetRow],
    ) -> Result<AppendSummary, Error> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(file);
        for row in rows {
            writer
                .write_record(row.iter().map(ToString::to_string))
                .map_err(io::Error::other)?;
        }
        writer.flush()?;
        log::debug!("{} rows written to {}", rows.len(), self.path.display());
        Ok(AppendSummary {
            updated_rows: rows.len(),
            updated_cells: rows.iter().map(Vec::len).sum(),
        })
    }
}
