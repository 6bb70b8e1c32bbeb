//! # cartX Ingest
//!
//! Ingestion layer for the cartX recommender.
//!
//! Reads the raw transaction-export CSV and produces the normalized
//! basket-record stream the core's build phase consumes: keys trimmed,
//! product names trimmed + lowercased, rows with a missing key or name
//! silently dropped (and counted).

pub mod error;
pub mod source;

pub use error::{Error, Result};
pub use source::CsvBasketSource;
