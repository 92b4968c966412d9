pub mod prelude {
    pub use super::*;
    pub use crate::error::AppError;
    pub use bcv_entities::builders::*;
}

use crate::{prelude::*, *};
use bcv_entities::builders::Builder;
use std::cell::{Cell, RefCell};

pub const RUA_X: GeoPoint = GeoPoint::from_lng_lat(-48.5044, -1.4558);
pub const RUA_Y: GeoPoint = GeoPoint::from_lng_lat(-48.4902, -1.4400);

pub fn trip(from: &str, to: &str, mode: TravelMode, date: &str) -> TripRecord {
    TripRecord::build()
        .origin("Brazil", from)
        .destination("Brazil", to)
        .mode(mode)
        .date(date)
        .finish()
}

#[derive(Default)]
pub struct MockGeocoder {
    places: Vec<(String, GeoPoint)>,
}

impl MockGeocoder {
    pub fn with(mut self, query: &str, pos: GeoPoint) -> Self {
        self.places.push((query.to_string(), pos));
        self
    }
}

impl geocode::GeoCodingGateway for MockGeocoder {
    fn resolve_address_lng_lat(
        &self,
        query: &str,
    ) -> std::result::Result<Option<GeoPoint>, geocode::GeocodingError> {
        Ok(self
            .places
            .iter()
            .find(|(q, _)| q == query)
            .map(|(_, pos)| *pos))
    }
}

pub struct MockRouter(Option<Distance>);

impl MockRouter {
    pub fn returning(distance: Distance) -> Self {
        Self(Some(distance))
    }

    pub fn failing() -> Self {
        Self(None)
    }
}

impl route::RoutingGateway for MockRouter {
    fn route_distance(
        &self,
        _: GeoPoint,
        _: GeoPoint,
        _: route::RoutingProfile,
    ) -> std::result::Result<Distance, route::RoutingError> {
        self.0.ok_or(route::RoutingError::NoRoute)
    }
}

#[derive(Default)]
pub struct MockPacer {
    pub pauses: Cell<usize>,
}

impl Pacer for MockPacer {
    fn pause(&self) {
        self.pauses.set(self.pauses.get() + 1);
    }
}

pub struct MockForms {
    trips: Vec<TripRecord>,
    pub requests: RefCell<Vec<Option<TripDate>>>,
}

impl submissions::SubmissionsGateway for MockForms {
    fn submitted_trips(
        &self,
        submitted_after: Option<TripDate>,
    ) -> std::result::Result<Vec<TripRecord>, submissions::Error> {
        self.requests.borrow_mut().push(submitted_after);
        Ok(self.trips.clone())
    }
}

/// An in-memory sheet whose rows start at column `A`.
#[derive(Default)]
pub struct MockSheet {
    broken: bool,
    pub rows: RefCell<Vec<Vec<String>>>,
}

impl MockSheet {
    pub fn with_rows(rows: Vec<Vec<&str>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|r| r.into_iter().map(ToString::to_string).collect())
            .collect();
        Self {
            broken: false,
            rows: RefCell::new(rows),
        }
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Default::default()
        }
    }
}

impl spreadsheet::SpreadsheetGateway for MockSheet {
    fn get_values(
        &self,
        range: ColumnRange,
    ) -> std::result::Result<Vec<Vec<String>>, spreadsheet::Error> {
        if self.broken {
            return Err(spreadsheet::Error::Request("503 Service Unavailable".into()));
        }
        Ok(self
            .rows
            .borrow()
            .iter()
            .map(|row| {
                row.iter()
                    .skip(range.first())
                    .take(range.width())
                    .cloned()
                    .collect()
            })
            .collect())
    }

    fn append_values(
        &self,
        _: ColumnRange,
        _: spreadsheet::ValueInputOption,
        rows: &[SheetRow],
    ) -> std::result::Result<spreadsheet::AppendSummary, spreadsheet::Error> {
        if self.broken {
            return Err(spreadsheet::Error::Request("503 Service Unavailable".into()));
        }
        let mut sheet = self.rows.borrow_mut();
        for row in rows {
            sheet.push(row.iter().map(ToString::to_string).collect());
        }
        Ok(spreadsheet::AppendSummary {
            updated_rows: rows.len(),
            updated_cells: rows.iter().map(Vec::len).sum(),
        })
    }
}

pub struct Fixture {
    pub sheet: MockSheet,
    pub forms: MockForms,
    pub geocoder: MockGeocoder,
    pub router: MockRouter,
    pub pacer: MockPacer,
}

impl Fixture {
    /// A sheet with a header and one trip recorded on 2024-03-04.
    pub fn new(trips: Vec<TripRecord>) -> Self {
        let sheet = MockSheet::with_rows(vec![
            vec![
                "Trip",
                "Complex",
                "Origin country",
                "Origin address",
                "Destination country",
                "Destination address",
                "Distance (km)",
                "Mode",
                "Date",
            ],
            vec![
                "T1", "0", "Brazil", "Rua X", "Brazil", "Rua Y", "2.75", "Bus", "2024-03-04",
            ],
        ]);
        Self::with_sheet(sheet, trips)
    }

    pub fn with_sheet(sheet: MockSheet, trips: Vec<TripRecord>) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self {
            sheet,
            forms: MockForms {
                trips,
                requests: Default::default(),
            },
            geocoder: MockGeocoder::default()
                .with("Brazil, Rua X", RUA_X)
                .with("Brazil, Rua Y", RUA_Y),
            router: MockRouter::returning(Distance::from_meters(2_750.0)),
            pacer: MockPacer::default(),
        }
    }

    pub fn sync(&self, settings: &SyncSettings) -> Result<SyncReport> {
        sync_new_trips(
            &self.sheet,
            &self.forms,
            &self.geocoder,
            &self.router,
            &self.pacer,
            settings,
        )
    }
}
