#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # bcv-entities
//!
//! Reusable, agnostic domain entities for enriching travel-survey submissions.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod date;
pub mod geo;
pub mod mode;
pub mod sheet;
pub mod trip;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
