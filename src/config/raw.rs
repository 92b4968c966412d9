use duration_str::{deserialize_duration, deserialize_option_duration};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

const DEFAULT_CONFIG_FILE: &str = include_str!("bilan-voyage.default.toml");

const ENV_NAME_SPREADSHEET_ID: &str = "SPREADSHEET_ID";
const ENV_NAME_PYODK_CONFIG_FILE: &str = "PYODK_CONFIG_FILE";
const ENV_NAME_ORS_KEY: &str = "ORS_KEY";
const ENV_NAME_OPENCAGE_API_KEY: &str = "OPENCAGE_API_KEY";
const ENV_NAME_GOOGLE_CREDENTIALS: &str = "GOOGLE_APPLICATION_CREDENTIALS";

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub spreadsheet: Option<Spreadsheet>,
    pub forms: Option<Forms>,
    pub geocoding: Option<Geocoding>,
    pub routing: Option<Routing>,
    pub gateway: Option<Gateway>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg: Self = toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration");
        cfg
    }
}

impl Config {
    /// Let environment variables take precedence over the file.
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(id) = var(ENV_NAME_SPREADSHEET_ID) {
            self.spreadsheet.get_or_insert_with(Default::default).id = Some(id);
        }
        let gateway = self.gateway.get_or_insert_with(Default::default);
        if let Some(file) = var(ENV_NAME_PYODK_CONFIG_FILE) {
            gateway
                .odk_central
                .get_or_insert_with(Default::default)
                .config_file = Some(file.into());
        }
        if let Some(key) = var(ENV_NAME_ORS_KEY) {
            gateway
                .openrouteservice
                .get_or_insert_with(Default::default)
                .api_key = Some(key);
        }
        if let Some(key) = var(ENV_NAME_OPENCAGE_API_KEY) {
            gateway.opencage.get_or_insert_with(Default::default).api_key = Some(key);
        }
        if let Some(file) = var(ENV_NAME_GOOGLE_CREDENTIALS) {
            gateway
                .google_sheets
                .get_or_insert_with(Default::default)
                .credentials_file = Some(file.into());
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Spreadsheet {
    pub gateway: SpreadsheetGateway,
    pub id: Option<String>,
    pub date_range: String,
    pub append_range: String,
    pub value_input_option: ValueInputOption,
}

impl Default for Spreadsheet {
    fn default() -> Self {
        Config::default()
            .spreadsheet
            .expect("Spreadsheet configuration")
    }
}

#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpreadsheetGateway {
    GoogleSheets,
    CsvFile,
}

#[derive(Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueInputOption {
    Raw,
    UserEntered,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Forms {
    pub form_id: String,
    pub project_id: Option<u32>,
}

impl Default for Forms {
    fn default() -> Self {
        Config::default().forms.expect("Forms configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Geocoding {
    pub gateway: GeocodingGateway,
    #[serde(deserialize_with = "deserialize_duration")]
    pub delay: Duration,
}

impl Default for Geocoding {
    fn default() -> Self {
        Config::default().geocoding.expect("Geocoding configuration")
    }
}

#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeocodingGateway {
    Nominatim,
    Opencage,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Routing {
    pub geodesic_modes: Vec<String>,
}

impl Default for Routing {
    fn default() -> Self {
        Config::default().routing.expect("Routing configuration")
    }
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Gateway {
    pub nominatim: Option<Nominatim>,
    pub opencage: Option<OpenCage>,
    pub openrouteservice: Option<OpenRouteService>,
    pub odk_central: Option<OdkCentral>,
    pub google_sheets: Option<GoogleSheets>,
    pub csv_file: Option<CsvFile>,
}

impl Default for Gateway {
    fn default() -> Self {
        Config::default().gateway.expect("Gateway configuration")
    }
}

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Nominatim {
    pub api_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub timeout: Option<Duration>,
}

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OpenCage {
    pub api_key: Option<String>,
}

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OpenRouteService {
    pub api_key: Option<String>,
    pub api_base_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub timeout: Option<Duration>,
}

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OdkCentral {
    pub config_file: Option<PathBuf>,
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub timeout: Option<Duration>,
}

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GoogleSheets {
    pub credentials_file: Option<PathBuf>,
    pub access_token: Option<String>,
    pub api_base_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub timeout: Option<Duration>,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CsvFile {
    pub path: PathBuf,
}
