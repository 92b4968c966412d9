#[macro_use]
extern crate log;

mod resolve_trip;
mod sync_trips;
mod watermark;

pub mod prelude {
    pub use super::{resolve_trip::*, sync_trips::*, watermark::*};
}

pub mod error;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use bcv_core::{entities::*, gateways::*, usecases, util::pacing::Pacer};

#[cfg(test)]
pub(crate) mod tests;
