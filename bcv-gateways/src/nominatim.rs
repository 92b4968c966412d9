use anyhow::Result;
use bcv_core::{
    entities::GeoPoint,
    gateways::geocode::{GeoCodingGateway, GeocodingError},
};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://nominatim.openstreetmap.org";

/// Search API of a Nominatim server.
///
/// Requests identify the application with [`crate::USER_AGENT`]
/// as required by the OSM Nominatim usage policy.
#[derive(Debug, Clone)]
pub struct Nominatim {
    client: Client,
    api_url: String,
}

impl Nominatim {
    pub fn try_new(api_url: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let client = crate::http_client(timeout)?;
        let api_url = api_url
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Ok(Self { client, api_url })
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.api_url)
    }
}

#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

fn parse_search(body: &str) -> Result<Option<GeoPoint>, GeocodingError> {
    let places: Vec<Place> = serde_json::from_str(body).map_err(|err| {
        GeocodingError::Unavailable(format!("Invalid Nominatim response: {err}"))
    })?;
    let Some(place) = places.first() else {
        return Ok(None);
    };
    let (Ok(lat), Ok(lng)) = (place.lat.parse::<f64>(), place.lon.parse::<f64>()) else {
        log::warn!("Ignoring unparsable location {place:?}");
        return Ok(None);
    };
    let pos = GeoPoint::try_from_lng_lat(lng, lat);
    if pos.is_none() {
        log::warn!("Ignoring invalid location {place:?}");
    }
    Ok(pos)
}

fn request_error(query: &str, err: reqwest::Error) -> GeocodingError {
    let msg = format!("Nominatim failed to resolve '{query}': {err}");
    if err.is_timeout() {
        GeocodingError::TimedOut(msg)
    } else {
        GeocodingError::Unavailable(msg)
    }
}

impl GeoCodingGateway for Nominatim {
    fn resolve_address_lng_lat(&self, query: &str) -> Result<Option<GeoPoint>, GeocodingError> {
        let response = self
            .client
            .get(self.search_url())
            .query(&[("q", query), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .map_err(|err| request_error(query, err))?;
        let status = response.status();
        let text = response.text().map_err(|err| request_error(query, err))?;
        if !status.is_success() {
            return Err(GeocodingError::Unavailable(format!(
                "Nominatim failed to resolve '{query}': {status}"
            )));
        }
        parse_search(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_the_first_place() {
        let body = r#"[
            {"place_id": 1, "lat": "-1.4558", "lon": "-48.5044", "display_name": "Rua X"},
            {"place_id": 2, "lat": "48.85", "lon": "2.35", "display_name": "Paris"}
        ]"#;
        assert_eq!(
            Some(GeoPoint::from_lng_lat(-48.5044, -1.4558)),
            parse_search(body).unwrap()
        );
    }

    #[test]
    fn nothing_found() {
        assert_eq!(None, parse_search("[]").unwrap());
    }

    #[test]
    fn invalid_location() {
        let body = r#"[{"lat": "95.0", "lon": "0.0"}]"#;
        assert_eq!(None, parse_search(body).unwrap());
        let body = r#"[{"lat": "n/a", "lon": "0.0"}]"#;
        assert_eq!(None, parse_search(body).unwrap());
    }

    #[test]
    fn unexpected_response() {
        assert!(matches!(
            parse_search(r#"{"error": "Unable to geocode"}"#),
            Err(GeocodingError::Unavailable(_))
        ));
    }

    #[test]
    fn trim_custom_api_url() {
        let gw = Nominatim::try_new(Some("http://localhost:8080/".into()), None).unwrap();
        assert_eq!("http://localhost:8080/search", gw.search_url());
        let gw = Nominatim::try_new(None, None).unwrap();
        assert_eq!("https://nominatim.openstreetmap.org/search", gw.search_url());
    }

    #[test]
    fn identify_the_application() {
        assert!(crate::USER_AGENT.starts_with("bilancarbonevoyage"));
    }
}
