pub mod gateways;
pub mod usecases;
pub mod util;

pub mod entities {
    pub use bcv_entities::{date::*, geo::*, mode::*, sheet::*, trip::*};
}
