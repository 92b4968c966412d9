use super::*;
use bcv_core::usecases::{default_geodesic_modes, DistanceResolver};
use spreadsheet::{AppendSummary, SpreadsheetGateway, ValueInputOption};

#[derive(Debug, Clone)]
pub struct SyncSettings {
    /// Column holding the trip dates of recorded rows.
    pub date_column: ColumnRange,
    pub append_range: ColumnRange,
    pub value_input_option: ValueInputOption,
    pub geodesic_modes: Vec<TravelMode>,
    /// Resolve distances but leave the spreadsheet untouched.
    pub dry_run: bool,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            date_column: ColumnRange::single(8),
            append_range: ColumnRange::spanning(2, 8),
            value_input_option: ValueInputOption::UserEntered,
            geodesic_modes: default_geodesic_modes(),
            dry_run: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct SyncReport {
    pub watermark: Option<TripDate>,
    /// Submissions returned by the forms backend.
    pub submitted: usize,
    /// Submissions with a trip date after the watermark.
    pub new_trips: usize,
    pub unresolved: usize,
    pub rows: Vec<SheetRow>,
    /// `None` if nothing has been appended.
    pub appended: Option<AppendSummary>,
}

/// Append all trips that are newer than the latest recorded one.
///
/// Trips whose distance cannot be resolved are still appended,
/// flagged as complex.
pub fn sync_new_trips<S, F, G, R, P>(
    sheet: &S,
    forms: &F,
    geocoder: &G,
    router: &R,
    pacer: &P,
    settings: &SyncSettings,
) -> Result<SyncReport>
where
    S: SpreadsheetGateway,
    F: submissions::SubmissionsGateway,
    G: geocode::GeoCodingGateway,
    R: route::RoutingGateway,
    P: Pacer,
{
    let watermark = watermark::last_processed_date(sheet, settings.date_column)?;
    let usecases::NewTrips { submitted, trips } = usecases::fetch_new_trips(forms, watermark)
        .map_err(|err| {
            error!("Failed to fetch new trips: {err}");
            err
        })?;
    let mut report = SyncReport {
        watermark,
        submitted,
        new_trips: trips.len(),
        ..Default::default()
    };
    if trips.is_empty() {
        info!("No new data");
        return Ok(report);
    }

    let resolver = DistanceResolver::new(geocoder, router, pacer, &settings.geodesic_modes);
    for trip in &trips {
        let resolution = resolver.resolve(trip);
        if resolution.is_complex() {
            report.unresolved += 1;
        }
        report.rows.push(usecases::sheet_row(trip, &resolution));
    }
    if report.unresolved > 0 {
        warn!(
            "{} of {} trips need to be measured by hand",
            report.unresolved, report.new_trips
        );
    }

    if settings.dry_run {
        info!("Dry run: {} rows not appended", report.rows.len());
        return Ok(report);
    }
    let summary = usecases::append_rows(
        sheet,
        settings.append_range,
        settings.value_input_option,
        &report.rows,
    )
    .map_err(|err| {
        error!("Failed to append {} rows: {err}", report.rows.len());
        err
    })?;
    info!("Appended {} rows", report.rows.len());
    report.appended = Some(summary);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::prelude::*;

    fn settings() -> SyncSettings {
        SyncSettings::default()
    }

    #[test]
    fn append_only_trips_after_the_watermark() {
        let fixture = Fixture::new(vec![
            trip("Rua X", "Rua Y", TravelMode::Bus, "2024-03-04"),
            trip("Rua X", "Rua Y", TravelMode::Bus, "2024-03-05"),
            trip("Rua X", "Rua Y", TravelMode::SpeedBoat, "2024-03-06"),
        ]);
        let report = fixture.sync(&settings()).unwrap();

        assert_eq!(Some("2024-03-04".parse().unwrap()), report.watermark);
        assert_eq!(3, report.submitted);
        assert_eq!(2, report.new_trips);
        assert_eq!(0, report.unresolved);
        assert_eq!(Some(2), report.appended.map(|s| s.updated_rows));
        assert_eq!(
            vec![Some("2024-03-04".parse().unwrap())],
            *fixture.forms.requests.borrow()
        );

        let rows = fixture.sheet.rows.borrow();
        assert_eq!(4, rows.len());
        assert_eq!("2024-03-05", rows[2][8]);
        assert_eq!("Bus", rows[2][7]);
        assert_eq!("2024-03-06", rows[3][8]);
        assert_eq!("SpeedBoat", rows[3][7]);
    }

    #[test]
    fn do_not_append_twice() {
        let fixture = Fixture::new(vec![trip("Rua X", "Rua Y", TravelMode::Bus, "2024-03-05")]);
        fixture.sync(&settings()).unwrap();
        let report = fixture.sync(&settings()).unwrap();
        assert_eq!(Some("2024-03-05".parse().unwrap()), report.watermark);
        assert_eq!(0, report.new_trips);
        assert!(report.appended.is_none());
        assert_eq!(3, fixture.sheet.rows.borrow().len());
    }

    #[test]
    fn unresolved_trips_are_flagged_complex() {
        let mut fixture = Fixture::new(vec![
            trip("Rua X", "Nowhere", TravelMode::Bus, "2024-03-05"),
            trip("Rua X", "Rua Y", TravelMode::Minibus, "2024-03-05"),
        ]);
        fixture.router = MockRouter::failing();
        let report = fixture.sync(&settings()).unwrap();
        assert_eq!(2, report.unresolved);

        let rows = fixture.sheet.rows.borrow();
        for row in &rows[2..] {
            assert_eq!("1", row[1]);
            assert_eq!("0", row[6]);
        }
    }

    #[test]
    fn one_bad_row_does_not_stop_the_batch() {
        let fixture = Fixture::new(vec![
            trip("Nowhere", "Rua Y", TravelMode::Bus, "2024-03-05"),
            trip("Rua X", "Rua Y", TravelMode::Bus, "2024-03-06"),
        ]);
        let report = fixture.sync(&settings()).unwrap();
        assert_eq!(1, report.unresolved);
        let rows = fixture.sheet.rows.borrow();
        assert_eq!("1", rows[2][1]);
        assert_eq!("0", rows[3][1]);
        assert_eq!("2.75", rows[3][6]);
    }

    #[test]
    fn dry_run_leaves_the_sheet_alone() {
        let fixture = Fixture::new(vec![trip("Rua X", "Rua Y", TravelMode::Bus, "2024-03-05")]);
        let settings = SyncSettings {
            dry_run: true,
            ..settings()
        };
        let report = fixture.sync(&settings).unwrap();
        assert_eq!(1, report.rows.len());
        assert!(report.appended.is_none());
        assert_eq!(2, fixture.sheet.rows.borrow().len());
    }

    #[test]
    fn nothing_new() {
        let fixture = Fixture::new(vec![trip("Rua X", "Rua Y", TravelMode::Bus, "2024-03-01")]);
        let report = fixture.sync(&settings()).unwrap();
        assert_eq!(0, report.new_trips);
        assert!(report.rows.is_empty());
        assert_eq!(0, fixture.pacer.pauses.get());
    }

    #[test]
    fn empty_sheet_takes_every_trip() {
        let fixture = Fixture::with_sheet(
            MockSheet::default(),
            vec![trip("Rua X", "Rua Y", TravelMode::Bus, "2020-01-01")],
        );
        let report = fixture.sync(&settings()).unwrap();
        assert_eq!(None, report.watermark);
        assert_eq!(1, report.new_trips);
        assert_eq!(vec![None], *fixture.forms.requests.borrow());
    }

    #[test]
    fn stop_on_a_date_cell_that_is_not_a_date() {
        let sheet = MockSheet::with_rows(vec![
            vec!["", "", "", "", "", "", "", "", "Date"],
            vec!["T1", "0", "Brazil", "Rua X", "Brazil", "Rua Y", "2.75", "Bus", "3/4/2024"],
        ]);
        let fixture = Fixture::with_sheet(
            sheet,
            vec![
                trip("Rua X", "Rua Y", TravelMode::Bus, "2024-03-04"),
                trip("Rua X", "Rua Y", TravelMode::Bus, "2024-03-05"),
            ],
        );
        let err = fixture.sync(&settings()).unwrap_err();
        assert!(matches!(err, AppError::InvalidDateCell { row: 2, .. }));
        assert!(fixture.forms.requests.borrow().is_empty());
        assert_eq!(2, fixture.sheet.rows.borrow().len());
    }

    #[test]
    fn spreadsheet_errors_are_returned() {
        let fixture = Fixture::with_sheet(MockSheet::broken(), vec![]);
        let err = fixture.sync(&settings()).unwrap_err();
        assert!(matches!(err, AppError::Spreadsheet(_)));
        assert!(fixture.forms.requests.borrow().is_empty());
    }
}
