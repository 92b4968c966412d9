use anyhow::{Context, Result};
use bcv_core::{
    entities::{CellValue, ColumnRange, SheetRow},
    gateways::spreadsheet::{AppendSummary, Error, SpreadsheetGateway, ValueInputOption},
};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::{blocking::Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{cell::RefCell, fs, path::Path, time::Duration};
use time::OffsetDateTime;

pub const DEFAULT_API_BASE_URL: &str = "https://sheets.googleapis.com";

const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
// Renew tokens a bit before they actually expire
const EXPIRY_MARGIN_SECS: i64 = 60;

/// The relevant fields of a service account key file.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    pub token_uri: String,
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountKey {
    pub fn try_load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Unable to read service account key {}", path.display()))?;
        let key = serde_json::from_str(&json)
            .with_context(|| format!("Invalid service account key {}", path.display()))?;
        Ok(key)
    }
}

#[derive(Debug, Clone)]
pub enum Credentials {
    /// A token issued elsewhere, e.g. by `gcloud auth print-access-token`.
    AccessToken(String),
    ServiceAccount(ServiceAccountKey),
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: i64,
}

fn signed_assertion(key: &ServiceAccountKey, now: i64) -> Result<String, Error> {
    let claims = Claims {
        iss: &key.client_email,
        scope: SPREADSHEETS_SCOPE,
        aud: &key.token_uri,
        iat: now,
        exp: now + ASSERTION_LIFETIME_SECS,
    };
    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|err| Error::Authentication(format!("Invalid private key: {err}")))?;
    jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
        .map_err(|err| Error::Authentication(err.to_string()))
}

/// Values API of Google Sheets (v4).
#[derive(Debug)]
pub struct GoogleSheets {
    client: Client,
    api_base_url: String,
    spreadsheet_id: String,
    credentials: Credentials,
    token: RefCell<Option<CachedToken>>,
}

impl GoogleSheets {
    pub fn try_new(
        spreadsheet_id: String,
        credentials: Credentials,
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
            api_base_url,
            spreadsheet_id,
            credentials,
            token: RefCell::new(None),
        })
    }

    fn values_url(&self, range: ColumnRange) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{range}",
            self.api_base_url, self.spreadsheet_id
        )
    }

    fn access_token(&self) -> Result<String, Error> {
        let key = match &self.credentials {
            Credentials::AccessToken(token) => return Ok(token.clone()),
            Credentials::ServiceAccount(key) => key,
        };
        let now = OffsetDateTime::now_utc().unix_timestamp();
        if let Some(cached) = &*self.token.borrow() {
            if cached.expires_at > now + EXPIRY_MARGIN_SECS {
                return Ok(cached.token.clone());
            }
        }
        log::debug!("Requesting access token for {}", key.client_email);
        let assertion = signed_assertion(key, now)?;
        let response = self
            .client
            .post(&key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .map_err(|err| Error::Authentication(err.to_string()))?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(Error::Authentication(format!("{status}: {body}")));
        }
        let TokenResponse {
            access_token,
            expires_in,
        } = response
            .json()
            .map_err(|err| Error::Authentication(err.to_string()))?;
        *self.token.borrow_mut() = Some(CachedToken {
            token: access_token.clone(),
            expires_at: now + expires_in,
        });
        Ok(access_token)
    }

    fn read_response(response: reqwest::blocking::Response) -> Result<String, Error> {
        let status = response.status();
        let body = response
            .text()
            .map_err(|err| Error::Request(err.to_string()))?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(api_error(status, &body))
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

fn api_error(status: StatusCode, body: &str) -> Error {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|r| r.error.message)
        .unwrap_or_else(|_| body.to_string());
    let message = format!("{status}: {message}");
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Authentication(message),
        _ => Error::Request(message),
    }
}

fn cell_to_json(cell: &CellValue) -> Value {
    match cell {
        CellValue::Text(s) => Value::String(s.clone()),
        CellValue::Integer(i) => Value::from(*i),
        CellValue::Number(n) => Value::from(*n),
    }
}

fn json_to_cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

fn parse_value_range(body: &str) -> Result<Vec<Vec<String>>, Error> {
    let range: ValueRange =
        serde_json::from_str(body).map_err(|err| Error::Response(err.to_string()))?;
    Ok(range
        .values
        .iter()
        .map(|row| row.iter().map(json_to_cell_text).collect())
        .collect())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendResponse {
    updates: Updates,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Updates {
    #[serde(default)]
    updated_rows: usize,
    #[serde(default)]
    updated_cells: usize,
}

fn parse_append_response(body: &str) -> Result<AppendSummary, Error> {
    let AppendResponse { updates } =
        serde_json::from_str(body).map_err(|err| Error::Response(err.to_string()))?;
    Ok(AppendSummary {
        updated_rows: updates.updated_rows,
        updated_cells: updates.updated_cells,
    })
}

impl SpreadsheetGateway for GoogleSheets {
    fn get_values(&self, range: ColumnRange) -> Result<Vec<Vec<String>>, Error> {
        let token = self.access_token()?;
        let response = self
            .client
            .get(self.values_url(range))
            .bearer_auth(token)
            .send()
            .map_err(|err| Error::Request(err.to_string()))?;
        let rows = parse_value_range(&Self::read_response(response)?)?;
        log::info!("{} rows retrieved", rows.len());
        Ok(rows)
    }

    fn append_values(
        &self,
        range: ColumnRange,
        input_option: ValueInputOption,
        rows: &[SheetRow],
    ) -> Result<AppendSummary, Error> {
        let token = self.access_token()?;
        let values: Vec<Vec<Value>> = rows
            .iter()
            .map(|row| row.iter().map(cell_to_json).collect())
            .collect();
        let url = format!("{}:append", self.values_url(range));
        let response = self
            .client
            .post(url)
            .query(&[("valueInputOption", input_option.as_str())])
            .bearer_auth(token)
            .json(&serde_json::json!({ "values": values }))
            .send()
            .map_err(|err| Error::Request(err.to_string()))?;
        parse_append_response(&Self::read_response(response)?)
    }
}
