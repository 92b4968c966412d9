pub mod geocode;
pub mod route;
pub mod spreadsheet;
pub mod submissions;
