use anyhow::Result;
use bcv_core::{
    entities::{Distance, GeoPoint},
    gateways::route::{RoutingError, RoutingGateway, RoutingProfile},
};
use reqwest::{blocking::Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.openrouteservice.org";

/// Routing with the directions API of openrouteservice.org.
#[derive(Debug, Clone)]
pub struct OpenRouteService {
    client: Client,
    api_key: String,
    api_base_url: String,
}

impl OpenRouteService {
    pub fn try_new(
        api_key: String,
        api_base_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let client = crate::http_client(timeout)?;
        let api_base_url = api_base_url
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            client,
            api_key,
            api_base_url,
        })
    }

    fn directions_url(&self, profile: RoutingProfile) -> String {
        format!("{}/v2/directions/{profile}/json", self.api_base_url)
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
struct Route {
    summary: Summary,
}

#[derive(Debug, Deserialize)]
struct Summary {
    // Missing for zero-length routes
    #[serde(default)]
    distance: f64,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Coded { code: Option<i64>, message: String },
    Plain(String),
}

fn parse_directions(body: &str) -> Result<Distance, RoutingError> {
    let response: DirectionsResponse = serde_json::from_str(body)
        .map_err(|err| RoutingError::Unavailable(format!("Invalid directions response: {err}")))?;
    let route = response.routes.first().ok_or(RoutingError::NoRoute)?;
    Ok(Distance::from_meters(route.summary.distance))
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse {
            error: ErrorDetail::Coded { code, message },
        }) => match code {
            Some(code) => format!("{message} (code {code})"),
            None => message,
        },
        Ok(ErrorResponse {
            error: ErrorDetail::Plain(message),
        }) => message,
        Err(_) => body.to_string(),
    }
}

fn routing_error(status: StatusCode, body: &str) -> RoutingError {
    let message = error_message(body);
    if status == StatusCode::TOO_MANY_REQUESTS {
        RoutingError::OverQueryLimit
    } else if status.is_server_error() {
        RoutingError::Server {
            status: status.as_u16(),
            message,
        }
    } else {
        RoutingError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

impl RoutingGateway for OpenRouteService {
    fn route_distance(
        &self,
        from: GeoPoint,
        to: GeoPoint,
        profile: RoutingProfile,
    ) -> Result<Distance, RoutingError> {
        let body = serde_json::json!({
            "coordinates": [from.to_lng_lat(), to.to_lng_lat()],
        });
        let response = self
            .client
            .post(self.directions_url(profile))
            .header("Authorization", &self.api_key)
            .json(&body)
            .send()
            .map_err(|err| RoutingError::Unavailable(err.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .map_err(|err| RoutingError::Unavailable(err.to_string()))?;
        if !status.is_success() {
            return Err(routing_error(status, &text));
        }
        let distance = parse_directions(&text)?;
        log::debug!("Routed {from} -> {to} ({profile}): {distance}");
        Ok(distance)
    }
}
