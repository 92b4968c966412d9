//! Test doubles for the gateways.

use super::prelude::*;
use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
};

type GeocodingFailure = Box<dyn Fn(&str) -> GeocodingError>;

#[derive(Default)]
pub struct MockGeocoder {
    places: HashMap<String, GeoPoint>,
    failure: Option<GeocodingFailure>,
    pub queries: RefCell<Vec<String>>,
}

impl MockGeocoder {
    pub fn with(mut self, query: &str, pos: GeoPoint) -> Self {
        self.places.insert(query.to_string(), pos);
        self
    }

    pub fn failing_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> GeocodingError + 'static,
    {
        self.failure = Some(Box::new(f));
        self
    }
}

impl GeoCodingGateway for MockGeocoder {
    fn resolve_address_lng_lat(&self, query: &str) -> Result<Option<GeoPoint>, GeocodingError> {
        self.queries.borrow_mut().push(query.to_string());
        if let Some(f) = &self.failure {
            return Err(f(query));
        }
        Ok(self.places.get(query).copied())
    }
}

pub struct MockRouter {
    distance: Option<Distance>,
    pub requests: RefCell<Vec<(GeoPoint, GeoPoint, RoutingProfile)>>,
}

impl MockRouter {
    pub fn returning(distance: Distance) -> Self {
        Self {
            distance: Some(distance),
            requests: Default::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            distance: None,
            requests: Default::default(),
        }
    }
}

impl RoutingGateway for MockRouter {
    fn route_distance(
        &self,
        from: GeoPoint,
        to: GeoPoint,
        profile: RoutingProfile,
    ) -> Result<Distance, RoutingError> {
        self.requests.borrow_mut().push((from, to, profile));
        self.distance.ok_or_else(|| RoutingError::Api {
            status: 404,
            message: "Could not find routable point within a radius of 350.0 meters".into(),
        })
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

impl MockForms {
    pub fn new(trips: Vec<TripRecord>) -> Self {
        Self {
            trips,
            requests: Default::default(),
        }
    }
}

impl SubmissionsGateway for MockForms {
    fn submitted_trips(
        &self,
        submitted_after: Option<TripDate>,
    ) -> std::result::Result<Vec<TripRecord>, crate::gateways::submissions::Error> {
        self.requests.borrow_mut().push(submitted_after);
        Ok(self.trips.clone())
    }
}

/// An in-memory sheet whose rows start at column `A`.
#[derive(Default)]
pub struct MockSheet {
    pub rows: RefCell<Vec<Vec<String>>>,
    pub requested_ranges: RefCell<Vec<String>>,
}

impl MockSheet {
    pub fn with_rows(rows: Vec<Vec<&str>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|r| r.into_iter().map(ToString::to_string).collect())
            .collect();
        Self {
            rows: RefCell::new(rows),
            requested_ranges: Default::default(),
        }
    }
}

impl SpreadsheetGateway for MockSheet {
    fn get_values(
        &self,
        range: ColumnRange,
    ) -> std::result::Result<Vec<Vec<String>>, crate::gateways::spreadsheet::Error> {
        self.requested_ranges.borrow_mut().push(range.to_string());
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
        range: ColumnRange,
        _: ValueInputOption,
        rows: &[SheetRow],
    ) -> std::result::Result<AppendSummary, crate::gateways::spreadsheet::Error> {
        self.requested_ranges.borrow_mut().push(range.to_string());
        let mut sheet = self.rows.borrow_mut();
        for row in rows {
            sheet.push(row.iter().map(ToString::to_string).collect());
        }
        Ok(AppendSummary {
            updated_rows: rows.len(),
            updated_cells: rows.iter().map(Vec::len).sum(),
        })
    }
}
