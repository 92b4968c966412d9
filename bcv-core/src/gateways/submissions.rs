use bcv_entities::{date::TripDate, trip::TripRecord};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Authentication failed: {0}")]
    Authentication(String),
    #[error("Failed to fetch submissions: {0}")]
    Request(String),
    #[error("Unexpected submissions response: {0}")]
    Response(String),
}

pub trait SubmissionsGateway {
    /// All trips submitted after the given day, or every trip if `None`.
    fn submitted_trips(&self, submitted_after: Option<TripDate>) -> Result<Vec<TripRecord>, Error>;
}
