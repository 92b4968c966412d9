use super::*;

pub fn last_processed_date<S>(sheet: &S, date_column: ColumnRange) -> Result<Option<TripDate>>
where
    S: spreadsheet::SpreadsheetGateway,
{
    let watermark = usecases::read_watermark(sheet, date_column).map_err(|err| {
        error!("Failed to read the last processed date: {err}");
        err
    })?;
    match watermark {
        Some(date) => debug!("Last processed trip date: {date}"),
        None => info!("No trip has been recorded yet"),
    }
    Ok(watermark)
}
