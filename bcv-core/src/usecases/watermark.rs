use super::prelude::*;

const DATE_COLUMN_HEADER: &str = "Date";

/// The latest trip date found in a spreadsheet column.
///
/// Only the first cell of every row is considered.
/// The header and blank cells are ignored, every other cell must be a date.
pub fn last_processed_date(cells: &[Vec<String>]) -> Result<Option<TripDate>> {
    let mut latest = None;
    for (idx, row) in cells.iter().enumerate() {
        let Some(cell) = row.first().map(|c| c.trim()) else {
            continue;
        };
        if cell.is_empty() || cell == DATE_COLUMN_HEADER {
            continue;
        }
        let date = cell
            .parse::<TripDate>()
            .map_err(|_| Error::InvalidDateCell {
                row: idx + 1,
                value: cell.to_string(),
            })?;
        latest = latest.max(Some(date));
    }
    Ok(latest)
}

pub fn read_watermark<S>(sheet: &S, date_column: ColumnRange) -> Result<Option<TripDate>>
where
    S: SpreadsheetGateway,
{
    let cells = sheet.get_values(date_column)?;
    log::debug!("{} rows retrieved from column {date_column}", cells.len());
    last_processed_date(&cells)
}
