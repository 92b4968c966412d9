use super::*;
use bcv_core::usecases::{DistanceResolution, DistanceResolver};

pub fn resolve_trip<G, R, P>(
    geocoder: &G,
    router: &R,
    pacer: &P,
    geodesic_modes: &[TravelMode],
    trip: &TripRecord,
) -> DistanceResolution
where
    G: geocode::GeoCodingGateway,
    R: route::RoutingGateway,
    P: Pacer,
{
    DistanceResolver::new(geocoder, router, pacer, geodesic_modes).resolve(trip)
}
