use super::prelude::*;
use crate::util::geodesic::geodesic_distance;

/// Why no distance could be computed for a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedReason {
    OriginNotFound,
    DestinationNotFound,
    GeocoderUnavailable,
    GeocoderTimedOut,
    RoutingFailed,
}

impl From<&GeocodingError> for UnresolvedReason {
    fn from(from: &GeocodingError) -> Self {
        match from {
            GeocodingError::Unavailable(_) => Self::GeocoderUnavailable,
            GeocodingError::TimedOut(_) => Self::GeocoderTimedOut,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceMethod {
    Routed(RoutingProfile),
    Geodesic,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistanceResolution {
    Computed {
        distance: Distance,
        method: DistanceMethod,
    },
    Unresolved(UnresolvedReason),
}

impl DistanceResolution {
    pub fn distance_km(&self) -> Option<f64> {
        match self {
            Self::Computed { distance, .. } => Some(distance.to_km()),
            Self::Unresolved(_) => None,
        }
    }

    /// The value recorded in the spreadsheet where `0` stands for
    /// "could not be computed".
    pub fn sheet_distance_km(&self) -> f64 {
        self.distance_km().unwrap_or_default()
    }

    /// Trips without a computed distance have to be measured by hand.
    pub fn is_complex(&self) -> bool {
        matches!(self, Self::Unresolved(_))
    }
}

/// The routing profile used for a travel mode.
pub fn routing_profile(mode: &TravelMode) -> RoutingProfile {
    match mode {
        TravelMode::Bus | TravelMode::Minibus => RoutingProfile::DrivingCar,
        TravelMode::SpeedBoat => RoutingProfile::FootWalking,
        _ => RoutingProfile::DrivingCar,
    }
}

/// Travel modes that are measured as the crow flies.
pub fn default_geodesic_modes() -> Vec<TravelMode> {
    vec![TravelMode::SpeedBoat, TravelMode::Lancha]
}

pub struct DistanceResolver<'a, G, R, P> {
    geocoder: &'a G,
    router: &'a R,
    pacer: &'a P,
    geodesic_modes: &'a [TravelMode],
}

impl<'a, G, R, P> DistanceResolver<'a, G, R, P>
where
    G: GeoCodingGateway,
    R: RoutingGateway,
    P: Pacer,
{
    pub fn new(geocoder: &'a G, router: &'a R, pacer: &'a P, geodesic_modes: &'a [TravelMode]) -> Self {
        Self {
            geocoder,
            router,
            pacer,
            geodesic_modes,
        }
    }

    fn geocode(&self, country: &str, address: &str) -> Result<Option<GeoPoint>, GeocodingError> {
        if country.trim().is_empty() && address.trim().is_empty() {
            return Ok(None);
        }
        let query = format!("{country}, {address}");
        self.pacer.pause();
        let pos = self.geocoder.resolve_address_lng_lat(&query)?;
        match pos {
            Some(pos) => log::debug!("Resolved address location '{query}': {pos}"),
            None => log::debug!("No location found for address '{query}'"),
        }
        Ok(pos)
    }

    fn locate(&self, trip: &TripRecord) -> Result<(GeoPoint, GeoPoint), UnresolvedReason> {
        let origin = self
            .geocode(&trip.origin_country, &trip.origin_address)
            .map_err(|err| {
                log::warn!("Failed to geocode origin '{}': {err}", trip.origin_query());
                UnresolvedReason::from(&err)
            })?;
        let destination = self
            .geocode(&trip.dest_country, &trip.dest_address)
            .map_err(|err| {
                log::warn!(
                    "Failed to geocode destination '{}': {err}",
                    trip.destination_query()
                );
                UnresolvedReason::from(&err)
            })?;
        match (origin, destination) {
            (Some(origin), Some(destination)) => Ok((origin, destination)),
            (None, _) => Err(UnresolvedReason::OriginNotFound),
            (_, None) => Err(UnresolvedReason::DestinationNotFound),
        }
    }

    /// Distance of a single trip leg. Never fails: every geocoding
    /// or routing problem ends up as [`DistanceResolution::Unresolved`].
    pub fn resolve(&self, trip: &TripRecord) -> DistanceResolution {
        log::info!("{} {}", trip.origin_address, trip.dest_address);
        let (origin, destination) = match self.locate(trip) {
            Ok(points) => points,
            Err(reason) => {
                log::warn!(
                    "Unable to locate trip '{}' -> '{}': {reason:?}",
                    trip.origin_query(),
                    trip.destination_query()
                );
                return DistanceResolution::Unresolved(reason);
            }
        };
        if self.geodesic_modes.contains(&trip.mode) {
            return DistanceResolution::Computed {
                distance: geodesic_distance(origin, destination),
                method: DistanceMethod::Geodesic,
            };
        }
        let profile = routing_profile(&trip.mode);
        match self.router.route_distance(origin, destination, profile) {
            Ok(distance) if distance.is_valid() => DistanceResolution::Computed {
                distance,
                method: DistanceMethod::Routed(profile),
            },
            Ok(distance) => {
                log::warn!("Routing returned an invalid distance: {distance}");
                DistanceResolution::Unresolved(UnresolvedReason::RoutingFailed)
            }
            Err(err) => {
                log::warn!(
                    "Failed to route '{}' -> '{}' ({profile}): {err}",
                    trip.origin_query(),
                    trip.destination_query()
                );
                DistanceResolution::Unresolved(UnresolvedReason::RoutingFailed)
            }
        }
    }
}
