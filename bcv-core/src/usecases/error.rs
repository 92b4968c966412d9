use crate::gateways::{spreadsheet, submissions};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Spreadsheet(#[from] spreadsheet::Error),
    #[error(transparent)]
    Submissions(#[from] submissions::Error),
    #[error("Row {row} of the date column holds '{value}' which is not a YYYY-MM-DD date")]
    InvalidDateCell { row: usize, value: String },
}
