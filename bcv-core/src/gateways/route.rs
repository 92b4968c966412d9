use bcv_entities::geo::{Distance, GeoPoint};
use std::fmt;
use thiserror::Error;

/// Travel-mode preset of the routing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoutingProfile {
    DrivingCar,
    FootWalking,
}

impl RoutingProfile {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DrivingCar => "driving-car",
            Self::FootWalking => "foot-walking",
        }
    }
}

impl fmt::Display for RoutingProfile {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum RoutingError {
    /// The service rejected the request, e.g. no routable point nearby.
    #[error("Routing API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Routing quota exceeded")]
    OverQueryLimit,
    #[error("Routing server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("Routing service unavailable: {0}")]
    Unavailable(String),
    #[error("No route found")]
    NoRoute,
}

pub trait RoutingGateway {
    fn route_distance(
        &self,
        from: GeoPoint,
        to: GeoPoint,
        profile: RoutingProfile,
    ) -> Result<Distance, RoutingError>;
}
