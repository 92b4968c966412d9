use anyhow::{anyhow, Context, Result};
use bcv_core::{
    entities::{ColumnRange, TravelMode},
    gateways::spreadsheet::ValueInputOption,
};
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "bilan-voyage.toml";

pub struct Config {
    pub spreadsheet: Spreadsheet,
    pub forms: Forms,
    pub geocoding: Geocoding,
    pub routing: Routing,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::debug!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let mut raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)
                .with_context(|| format!("Invalid configuration {}", file_path.display()))?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        raw_config.apply_env(|name| env::var(name).ok());
        Self::try_from(raw_config)
    }
}

pub struct Spreadsheet {
    pub gateway: SpreadsheetGateway,
    pub date_column: ColumnRange,
    pub append_range: ColumnRange,
    pub value_input_option: ValueInputOption,
}

pub enum SpreadsheetGateway {
    GoogleSheets {
        spreadsheet_id: Option<String>,
        credentials: Option<GoogleCredentials>,
        api_base_url: Option<String>,
        timeout: Option<Duration>,
    },
    /// For local testing purposes
    CsvFile { path: PathBuf },
}

pub enum GoogleCredentials {
    AccessToken(String),
    ServiceAccountKeyFile(PathBuf),
}

pub struct Forms {
    pub form_id: String,
    pub project_id: Option<u32>,
    /// pyodk-style file with the server and login
    pub config_file: Option<PathBuf>,
    pub timeout: Option<Duration>,
}

pub struct Geocoding {
    pub gateway: GeocodingGateway,
    pub delay: Duration,
}

pub enum GeocodingGateway {
    Nominatim {
        api_url: Option<String>,
        timeout: Option<Duration>,
    },
    OpenCage { api_key: String },
}

pub struct Routing {
    pub api_key: Option<String>,
    pub api_base_url: Option<String>,
    pub timeout: Option<Duration>,
    pub geodesic_modes: Vec<TravelMode>,
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            spreadsheet,
            forms,
            geocoding,
            routing,
            gateway,
        } = from;
        let gateway = gateway.unwrap_or_default();

        let raw::Spreadsheet {
            gateway: sheet_gw_name,
            id,
            date_range,
            append_range,
            value_input_option,
        } = spreadsheet.unwrap_or_default();

        let date_column: ColumnRange = date_range.parse()?;
        if date_column.width() != 1 {
            return Err(anyhow!("Date range '{date_range}' must be a single column"));
        }
        let append_range = append_range.parse()?;
        let value_input_option = match value_input_option {
            raw::ValueInputOption::Raw => ValueInputOption::Raw,
            raw::ValueInputOption::UserEntered => ValueInputOption::UserEntered,
        };

        let sheet_gw_toml_name = toml_name(&sheet_gw_name);
        let sheet_gateway = match sheet_gw_name {
            raw::SpreadsheetGateway::GoogleSheets => {
                let raw::GoogleSheets {
                    credentials_file,
                    access_token,
                    api_base_url,
                    timeout,
                } = gateway.google_sheets.clone().unwrap_or_default();
                let credentials = access_token
                    .map(GoogleCredentials::AccessToken)
                    .or_else(|| credentials_file.map(GoogleCredentials::ServiceAccountKeyFile));
                log::debug!("Use Google Sheets gateway");
                SpreadsheetGateway::GoogleSheets {
                    spreadsheet_id: id,
                    credentials,
                    api_base_url,
                    timeout,
                }
            }
            raw::SpreadsheetGateway::CsvFile => {
                let raw::CsvFile { path } = gateway.csv_file.clone().ok_or_else(|| {
                    anyhow!("Missing '{sheet_gw_toml_name}' gateway configuration")
                })?;
                log::info!("Use CSV file spreadsheet gateway ({})", path.display());
                SpreadsheetGateway::CsvFile { path }
            }
        };
        let spreadsheet = Spreadsheet {
            gateway: sheet_gateway,
            date_column,
            append_range,
            value_input_option,
        };

        let raw::Forms {
            form_id,
            project_id,
        } = forms.unwrap_or_default();
        if form_id.trim().is_empty() {
            return Err(anyhow!("No form id defined"));
        }
        let raw::OdkCentral {
            config_file,
            timeout,
        } = gateway.odk_central.clone().unwrap_or_default();
        let forms = Forms {
            form_id,
            project_id,
            config_file,
            timeout,
        };

        let raw::Geocoding {
            gateway: geo_gw_name,
            delay,
        } = geocoding.unwrap_or_default();
        let geo_gw_toml_name = toml_name(&geo_gw_name);
        let geo_gateway = match geo_gw_name {
            raw::GeocodingGateway::Nominatim => {
                let raw::Nominatim { api_url, timeout } =
                    gateway.nominatim.clone().unwrap_or_default();
                GeocodingGateway::Nominatim { api_url, timeout }
            }
            raw::GeocodingGateway::Opencage => {
                let api_key = gateway
                    .opencage
                    .clone()
                    .and_then(|oc| oc.api_key)
                    .ok_or_else(|| anyhow!("Missing '{geo_gw_toml_name}' API key"))?;
                GeocodingGateway::OpenCage { api_key }
            }
        };
        let geocoding = Geocoding {
            gateway: geo_gateway,
            delay,
        };

        let raw::Routing { geodesic_modes } = routing.unwrap_or_default();
        let geodesic_modes = geodesic_modes
            .iter()
            .map(|name| TravelMode::from_choice(name))
            .collect();
        let raw::OpenRouteService {
            api_key,
            api_base_url,
            timeout,
        } = gateway.openrouteservice.unwrap_or_default();
        let routing = Routing {
            api_key,
            api_base_url,
            timeout,
            geodesic_modes,
        };

        Ok(Self {
            spreadsheet,
            forms,
            geocoding,
            routing,
        })
    }
}

fn toml_name<T: serde::Serialize>(name: &T) -> String {
    toml::Value::try_from(name)
        .ok()
        .and_then(|v| v.as_str().map(ToString::to_string))
        .unwrap_or_default()
}
