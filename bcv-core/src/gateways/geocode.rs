use bcv_entities::geo::GeoPoint;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("Geocoding service unavailable: {0}")]
    Unavailable(String),
    #[error("Geocoding request timed out: {0}")]
    TimedOut(String),
}

pub trait GeoCodingGateway {
    /// Resolve a free-text address. `Ok(None)` means the service
    /// answered but found no match.
    fn resolve_address_lng_lat(&self, query: &str) -> Result<Option<GeoPoint>, GeocodingError>;
}
