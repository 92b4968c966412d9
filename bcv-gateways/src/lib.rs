//! Gateways to the external services the pipeline talks to.

pub mod csv_file;
pub mod geocoding;
pub mod google_sheets;
pub mod nominatim;
pub mod odk_central;
pub mod openrouteservice;

/// Sent with every request.
pub const USER_AGENT: &str = concat!("bilancarbonevoyage/", env!("CARGO_PKG_VERSION"));

fn http_client(timeout: Option<std::time::Duration>) -> reqwest::Result<reqwest::blocking::Client> {
    let mut builder = reqwest::blocking::Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}
