use super::{prelude::*, resolve_distance::*};

/// Columns of an appended row, in sheet order.
pub const SHEET_COLUMNS: [&str; 9] = [
    "Trip",
    "Complex",
    "Origin country",
    "Origin address",
    "Destination country",
    "Destination address",
    "Distance (km)",
    "Mode",
    "Date",
];

/// Render an enriched trip as a spreadsheet row.
///
/// The first cell stays blank for the trip label that is filled in by hand.
pub fn sheet_row(trip: &TripRecord, resolution: &DistanceResolution) -> SheetRow {
    let complex = if resolution.is_complex() { 1 } else { 0 };
    vec![
        CellValue::blank(),
        CellValue::Integer(complex),
        CellValue::Text(trip.origin_country.clone()),
        CellValue::Text(trip.origin_address.clone()),
        CellValue::Text(trip.dest_country.clone()),
        CellValue::Text(trip.dest_address.clone()),
        CellValue::Number(resolution.sheet_distance_km()),
        CellValue::Text(trip.mode.to_string()),
        CellValue::Text(trip.date.to_string()),
    ]
}

pub fn append_rows<S>(
    sheet: &S,
    range: ColumnRange,
    input_option: ValueInputOption,
    rows: &[SheetRow],
) -> Result<AppendSummary>
where
    S: SpreadsheetGateway,
{
    let summary = sheet.append_values(range, input_option, rows)?;
    log::info!("{} cells appended.", summary.updated_cells);
    Ok(summary)
}
