pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::trip_builder::*;

pub mod trip_builder {

    use super::*;
    use crate::{date::*, mode::*, trip::*};

    #[derive(Debug)]
    pub struct TripBuild {
        trip: TripRecord,
    }

    impl TripBuild {
        pub fn origin(mut self, country: &str, address: &str) -> Self {
            self.trip.origin_country = country.into();
            self.trip.origin_address = address.into();
            self
        }
        pub fn destination(mut self, country: &str, address: &str) -> Self {
            self.trip.dest_country = country.into();
            self.trip.dest_address = address.into();
            self
        }
        pub fn mode(mut self, mode: TravelMode) -> Self {
            self.trip.mode = mode;
            self
        }
        pub fn date(mut self, date: &str) -> Self {
            self.trip.date = date.parse().unwrap();
            self
        }
        pub fn finish(self) -> TripRecord {
            self.trip
        }
    }

    impl Builder for TripRecord {
        type Build = TripBuild;
        fn build() -> TripBuild {
            TripBuild {
                trip: TripRecord {
                    origin_country: "".into(),
                    origin_address: "".into(),
                    dest_country: "".into(),
                    dest_address: "".into(),
                    mode: TravelMode::Bus,
                    date: "2024-01-01".parse::<TripDate>().unwrap(),
                },
            }
        }
    }
}
