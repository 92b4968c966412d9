use bcv_entities::sheet::{ColumnRange, SheetRow};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Spreadsheet authentication failed: {0}")]
    Authentication(String),
    #[error("Spreadsheet request failed: {0}")]
    Request(String),
    #[error("Unexpected spreadsheet response: {0}")]
    Response(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// How appended values are interpreted by the spreadsheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueInputOption {
    Raw,
    #[default]
    UserEntered,
}

impl ValueInputOption {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "RAW",
            Self::UserEntered => "USER_ENTERED",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppendSummary {
    pub updated_rows: usize,
    pub updated_cells: usize,
}

pub trait SpreadsheetGateway {
    /// Formatted cell values of the given columns, row by row.
    /// Trailing empty cells of a row may be missing.
    fn get_values(&self, range: ColumnRange) -> Result<Vec<Vec<String>>, Error>;

    /// Append rows below the table found within `range`.
    /// Like Google Sheets, rows start at the first column of that table,
    /// which may lie left of `range`.
    fn append_values(
        &self,
        range: ColumnRange,
        input_option: ValueInputOption,
        rows: &[SheetRow],
    ) -> Result<AppendSummary, Error>;
}
