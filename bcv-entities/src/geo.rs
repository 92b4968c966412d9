use std::fmt;

/// A position on the WGS84 ellipsoid as returned by a geocoder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    lng: f64,
    lat: f64,
}

impl GeoPoint {
    pub const fn from_lng_lat(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    pub fn try_from_lng_lat(lng: f64, lat: f64) -> Option<Self> {
        let pt = Self::from_lng_lat(lng, lat);
        pt.is_valid().then_some(pt)
    }

    pub const fn lng(self) -> f64 {
        self.lng
    }

    pub const fn lat(self) -> f64 {
        self.lat
    }

    pub fn to_lng_lat(self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    pub fn is_valid(self) -> bool {
        (-180.0..=180.0).contains(&self.lng) && (-90.0..=90.0).contains(&self.lat)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Distance(f64);

impl Distance {
    pub const fn from_meters(meters: f64) -> Self {
        Self(meters)
    }

    pub fn from_km(km: f64) -> Self {
        Self(km * 1_000.0)
    }

    pub const fn to_meters(self) -> f64 {
        self.0
    }

    pub fn to_km(self) -> f64 {
        self.0 / 1_000.0
    }

    pub fn is_valid(self) -> bool {
        self.0 >= 0.0 && self.0.is_finite()
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{:.3} km", self.to_km())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_points() {
        assert!(GeoPoint::try_from_lng_lat(-48.5, -1.45).is_some());
        assert!(GeoPoint::try_from_lng_lat(180.0, 90.0).is_some());
        assert!(GeoPoint::try_from_lng_lat(180.000001, 0.0).is_none());
        assert!(GeoPoint::try_from_lng_lat(0.0, -90.000001).is_none());
        assert!(GeoPoint::try_from_lng_lat(f64::NAN, 0.0).is_none());
    }

    #[test]
    fn lng_lat_order() {
        let pt = GeoPoint::from_lng_lat(-48.5, -1.45);
        assert_eq!([-48.5, -1.45], pt.to_lng_lat());
        assert_eq!("-1.45,-48.5", pt.to_string());
    }

    #[test]
    fn meters_to_km() {
        assert_eq!(2.5, Distance::from_meters(2_500.0).to_km());
        assert_eq!(1_500.0, Distance::from_km(1.5).to_meters());
        assert!(!Distance::from_meters(-1.0).is_valid());
        assert!(!Distance::from_meters(f64::INFINITY).is_valid());
        assert!(Distance::default().is_valid());
    }
}
