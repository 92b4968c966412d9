use anyhow::{Context, Result};
use bcv_core::{
    entities::{TravelMode, TripDate, TripRecord},
    gateways::submissions::{Error, SubmissionsGateway},
};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::{fs, path::Path, time::Duration};

/// Connection settings in the format of a pyodk `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct CentralConfig {
    pub central: Central,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Central {
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub default_project_id: Option<u32>,
}

impl CentralConfig {
    pub fn try_load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Unable to read ODK Central config {}", path.display()))?;
        let cfg = toml::from_str(&content)
            .with_context(|| format!("Invalid ODK Central config {}", path.display()))?;
        Ok(cfg)
    }
}

/// Reads trip submissions of a form from an ODK Central server.
#[derive(Debug, Clone)]
pub struct OdkCentral {
    client: Client,
    central: Central,
    project_id: u32,
    form_id: String,
}

impl OdkCentral {
    pub fn try_new(
        config: CentralConfig,
        project_id: Option<u32>,
        form_id: String,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let CentralConfig { mut central } = config;
        let project_id = project_id
            .or(central.default_project_id)
            .context("Missing ODK Central project id")?;
        central.base_url = central.base_url.trim_end_matches('/').to_string();
        let client = crate::http_client(timeout)?;
        Ok(Self {
            client,
            central,
            project_id,
            form_id,
        })
    }

    fn submissions_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/forms/{}.svc/Submissions",
            self.central.base_url, self.project_id, self.form_id
        )
    }

    fn session_token(&self) -> Result<String, Error> {
        #[derive(Deserialize)]
        struct Session {
            token: String,
        }
        let url = format!("{}/v1/sessions", self.central.base_url);
        let body = serde_json::json!({
            "email": self.central.username,
            "password": self.central.password,
        });
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .map_err(|err| Error::Authentication(err.to_string()))?;
        if !response.status().is_success() {
            return Err(Error::Authentication(format!(
                "ODK Central login as {} failed: {}",
                self.central.username,
                response.status()
            )));
        }
        let session: Session = response
            .json()
            .map_err(|err| Error::Authentication(err.to_string()))?;
        Ok(session.token)
    }
}

fn submission_date_filter(after: TripDate) -> String {
    format!("__system/submissionDate gt {after}")
}

#[derive(Debug, Deserialize)]
struct SubmissionTable {
    value: Vec<Submission>,
}

#[derive(Debug, Deserialize)]
struct Submission {
    #[serde(rename = "__id")]
    id: Option<String>,
    orig_country: Option<String>,
    origin_adress: Option<String>,
    dest_country: Option<String>,
    dest_adress: Option<String>,
    mode: Option<String>,
    date: Option<String>,
}

impl Submission {
    fn into_trip(self) -> Option<TripRecord> {
        let Self {
            id,
            orig_country,
            origin_adress,
            dest_country,
            dest_adress,
            mode,
            date,
        } = self;
        let id = id.unwrap_or_default();
        let date = match date.as_deref().map(str::parse::<TripDate>) {
            Some(Ok(date)) => date,
            Some(Err(err)) => {
                log::warn!("Skipping submission {id}: {err}");
                return None;
            }
            None => {
                log::warn!("Skipping submission {id} without trip date");
                return None;
            }
        };
        let mode = TravelMode::from_choice(mode.as_deref().unwrap_or_default());
        Some(TripRecord {
            origin_country: orig_country.unwrap_or_default(),
            origin_address: origin_adress.unwrap_or_default(),
            dest_country: dest_country.unwrap_or_default(),
            dest_address: dest_adress.unwrap_or_default(),
            mode,
            date,
        })
    }
}

fn parse_submissions(body: &str) -> Result<Vec<TripRecord>, Error> {
    let table: SubmissionTable =
        serde_json::from_str(body).map_err(|err| Error::Response(err.to_string()))?;
    Ok(table
        .value
        .into_iter()
        .filter_map(Submission::into_trip)
        .collect())
}

impl SubmissionsGateway for OdkCentral {
    fn submitted_trips(&self, submitted_after: Option<TripDate>) -> Result<Vec<TripRecord>, Error> {
        let token = self.session_token()?;
        let mut request = self.client.get(self.submissions_url()).bearer_auth(token);
        if let Some(after) = submitted_after {
            request = request.query(&[("$filter", submission_date_filter(after))]);
        }
        let response = request
            .send()
            .map_err(|err| Error::Request(err.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|err| Error::Request(err.to_string()))?;
        if !status.is_success() {
            return Err(Error::Request(format!("{status}: {body}")));
        }
        let trips = parse_submissions(&body)?;
        log::info!("{} submissions fetched from form {}", trips.len(), self.form_id);
        Ok(trips)
    }
}
