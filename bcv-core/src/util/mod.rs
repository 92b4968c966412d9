pub mod geodesic;
pub mod pacing;
