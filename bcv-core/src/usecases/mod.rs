mod error;
mod filter_trips;
mod resolve_distance;
mod sheet_row;
mod watermark;

#[cfg(test)]
pub mod tests;

pub use self::{
    error::Error, filter_trips::*, resolve_distance::*, sheet_row::*, watermark::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T, E = Error> = std::result::Result<T, E>;
    pub use crate::{
        entities::*,
        gateways::{geocode::*, route::*, spreadsheet::*, submissions::*},
        util::pacing::Pacer,
    };
}
