use crate::config::{self, GoogleCredentials};
use anyhow::{anyhow, Result};
use bcv_core::{
    entities::{ColumnRange, GeoPoint, SheetRow},
    gateways::{
        geocode::{GeoCodingGateway, GeocodingError},
        spreadsheet::{self, AppendSummary, SpreadsheetGateway, ValueInputOption},
    },
};
use bcv_gateways::{
    csv_file::CsvFileSheet,
    geocoding::OpenCage,
    google_sheets::{Credentials, GoogleSheets, ServiceAccountKey},
    nominatim::Nominatim,
    odk_central::{CentralConfig, OdkCentral},
    openrouteservice::OpenRouteService,
};

pub fn spreadsheet_gateway(cfg: &config::Spreadsheet) -> Result<SheetGw> {
    match &cfg.gateway {
        config::SpreadsheetGateway::GoogleSheets {
            spreadsheet_id,
            credentials,
            api_base_url,
            timeout,
        } => {
            let spreadsheet_id = spreadsheet_id
                .clone()
                .ok_or_else(|| anyhow!("Missing spreadsheet id (SPREADSHEET_ID)"))?;
            let credentials = match credentials {
                Some(GoogleCredentials::AccessToken(token)) => {
                    Credentials::AccessToken(token.clone())
                }
                Some(GoogleCredentials::ServiceAccountKeyFile(path)) => {
                    Credentials::ServiceAccount(ServiceAccountKey::try_load(path)?)
                }
                None => {
                    return Err(anyhow!(
                        "Missing Google credentials (GOOGLE_APPLICATION_CREDENTIALS)"
                    ));
                }
            };
            let gw = GoogleSheets::try_new(
                spreadsheet_id,
                credentials,
                api_base_url.clone(),
                *timeout,
            )?;
            log::info!("Use Google Sheets gateway");
            Ok(SheetGw::new(gw))
        }
        config::SpreadsheetGateway::CsvFile { path } => {
            log::info!("Use CSV file gateway ({})", path.display());
            Ok(SheetGw::new(CsvFileSheet::new(path.clone())))
        }
    }
}

pub fn submissions_gateway(cfg: &config::Forms) -> Result<OdkCentral> {
    let config_file = cfg
        .config_file
        .as_ref()
        .ok_or_else(|| anyhow!("Missing ODK Central config file (PYODK_CONFIG_FILE)"))?;
    let central = CentralConfig::try_load(config_file)?;
    OdkCentral::try_new(central, cfg.project_id, cfg.form_id.clone(), cfg.timeout)
}

pub fn geocoding_gateway(cfg: &config::Geocoding) -> Result<GeocodingGw> {
    match &cfg.gateway {
        config::GeocodingGateway::Nominatim { api_url, timeout } => {
            log::info!("Use Nominatim geocoding gateway");
            let gw = Nominatim::try_new(api_url.clone(), *timeout)?;
            Ok(GeocodingGw::new(gw))
        }
        config::GeocodingGateway::OpenCage { api_key } => {
            log::info!("Use OpenCage geocoding gateway");
            Ok(GeocodingGw::new(OpenCage::new(api_key.clone())))
        }
    }
}

pub fn routing_gateway(cfg: &config::Routing) -> Result<OpenRouteService> {
    let api_key = cfg
        .api_key
        .clone()
        .ok_or_else(|| anyhow!("Missing openrouteservice API key (ORS_KEY)"))?;
    OpenRouteService::try_new(api_key, cfg.api_base_url.clone(), cfg.timeout)
}

pub struct SheetGw(Box<dyn SpreadsheetGateway>);

impl SheetGw {
    pub fn new<G>(gw: G) -> Self
    where
        G: SpreadsheetGateway + 'static,
    {
        Self(Box::new(gw))
    }
}

impl SpreadsheetGateway for SheetGw {
    fn get_values(&self, range: ColumnRange) -> Result<Vec<Vec<String>>, spreadsheet::Error> {
        self.0.get_values(range)
    }

    fn append_values(
        &self,
        range: ColumnRange,
        input_option: ValueInputOption,
        rows: &[SheetRow],
    ) -> Result<AppendSummary, spreadsheet::Error> {
        self.0.append_values(range, input_option, rows)
    }
}

pub struct GeocodingGw(Box<dyn GeoCodingGateway>);

impl GeocodingGw {
    pub fn new<G>(gw: G) -> Self
    where
        G: GeoCodingGateway + 'static,
    {
        Self(Box::new(gw))
    }
}

impl GeoCodingGateway for GeocodingGw {
    fn resolve_address_lng_lat(&self, query: &str) -> Result<Option<GeoPoint>, GeocodingError> {
        self.0.resolve_address_lng_lat(query)
    }
}

