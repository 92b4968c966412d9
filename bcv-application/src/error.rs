use bcv_core::{
    gateways::{spreadsheet, submissions},
    usecases,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Spreadsheet(#[from] spreadsheet::Error),
    #[error(transparent)]
    Submissions(#[from] submissions::Error),
    #[error("Row {row} of the date column holds '{value}' which is not a YYYY-MM-DD date")]
    InvalidDateCell { row: usize, value: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<usecases::Error> for AppError {
    fn from(err: usecases::Error) -> AppError {
        match err {
            usecases::Error::Spreadsheet(err) => Self::Spreadsheet(err),
            usecases::Error::Submissions(err) => Self::Submissions(err),
            usecases::Error::InvalidDateCell { row, value } => Self::InvalidDateCell { row, value },
        }
    }
}
