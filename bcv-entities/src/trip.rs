use crate::{date::*, mode::*};

/// One survey submission describing a single-leg journey.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRecord {
    pub origin_country  : String,
    pub origin_address  : String,
    pub dest_country    : String,
    pub dest_address    : String,
    pub mode            : TravelMode,
    pub date            : TripDate,
}

fn geocoding_query(country: &str, address: &str) -> String {
    format!("{country}, {address}")
}

impl TripRecord {
    /// The free-text query used to geocode the origin.
    pub fn origin_query(&self) -> String {
        geocoding_query(&self.origin_country, &self.origin_address)
    }

    /// The free-text query used to geocode the destination.
    pub fn destination_query(&self) -> String {
        geocoding_query(&self.dest_country, &self.dest_address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::*;

    #[test]
    fn queries_start_with_the_country() {
        let trip = TripRecord::build()
            .origin("Brazil", "Rua X")
            .destination("Peru", "Av. Y 12")
            .finish();
        assert_eq!("Brazil, Rua X", trip.origin_query());
        assert_eq!("Peru, Av. Y 12", trip.destination_query());
    }
}
