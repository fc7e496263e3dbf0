//! Input helpers.
//!
//! - CSV ingest + validation and console line parsing (`ingest`)

pub mod ingest;

pub use ingest::*;
