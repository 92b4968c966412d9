use ::geocoding::{Forward, GeocodingError as ProviderError, Opencage, Point};
use bcv_core::{
    entities::GeoPoint,
    gateways::geocode::{GeoCodingGateway, GeocodingError},
};

/// Adapts a forward geocoding provider of the `geocoding` crate.
pub struct ForwardGeocoder<F> {
    provider: F,
    name: &'static str,
}

pub type OpenCage = ForwardGeocoder<Opencage<'static>>;

impl OpenCage {
    pub fn new(api_key: String) -> Self {
        Self {
            provider: Opencage::new(api_key),
            name: "OpenCage",
        }
    }
}

impl<F> std::fmt::Debug for ForwardGeocoder<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForwardGeocoder")
            .field("name", &self.name)
            .finish()
    }
}

fn first_valid_point(points: &[Point<f64>]) -> Option<GeoPoint> {
    let point = points.first()?;
    let pos = GeoPoint::try_from_lng_lat(point.x(), point.y());
    if pos.is_none() {
        log::warn!("Ignoring invalid location {point:?}");
    }
    pos
}

fn map_error(provider: &str, query: &str, err: ProviderError) -> GeocodingError {
    let msg = format!("{provider} failed to resolve '{query}': {err}");
    match err {
        ProviderError::Request(ref err) if err.is_timeout() => GeocodingError::TimedOut(msg),
        _ => GeocodingError::Unavailable(msg),
    }
}

impl<F> GeoCodingGateway for ForwardGeocoder<F>
where
    F: Forward<f64>,
{
    fn resolve_address_lng_lat(&self, query: &str) -> Result<Option<GeoPoint>, GeocodingError> {
        let points = self
            .provider
            .forward(query)
            .map_err(|err| map_error(self.name, query, err))?;
        Ok(first_valid_point(&points))
    }
}
