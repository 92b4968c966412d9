use bcv_entities::geo::{Distance, GeoPoint};
use geo::{GeodesicDistance, Point};

/// Shortest distance between two points on the WGS84 ellipsoid.
pub fn geodesic_distance(from: GeoPoint, to: GeoPoint) -> Distance {
    let from = Point::new(from.lng(), from.lat());
    let to = Point::new(to.lng(), to.lat());
    Distance::from_meters(from.geodesic_distance(&to))
}
