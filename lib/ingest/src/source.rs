use crate::error::{Error, Result};
use cartx_core::{normalize, BasketRecord};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

const TRANSACTION_ID: &str = "Transaction ID";
const PRODUCT_DESCRIPTION: &str = "Product Description";

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Transaction ID")]
    transaction_id: Option<String>,
    #[serde(rename = "Product Description")]
    description: Option<String>,
}

/// Loads basket-membership rows from the transaction-export CSV.
///
/// The export carries one row per product occurrence with at least a
/// `Transaction ID` and a `Product Description` column; any other columns
/// are ignored. Rows whose key or description is missing or empty after
/// trimming are dropped without error.
#[derive(Debug, Clone)]
pub struct CsvBasketSource {
    path: PathBuf,
}

impl CsvBasketSource {
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and normalize the full record stream, preserving file order so
    /// that catalog id assignment downstream stays reproducible.
    pub fn load(&self) -> Result<Vec<BasketRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)?;

        let headers = reader.headers()?.clone();
        for required in [TRANSACTION_ID, PRODUCT_DESCRIPTION] {
            if !headers.iter().any(|h| h == required) {
                return Err(Error::MissingColumn(required.to_string()));
            }
        }

        let mut records = Vec::new();
        let mut dropped = 0usize;
        for row in reader.deserialize::<RawRow>() {
            let row = row?;
            let key = row.transaction_id.as_deref().unwrap_or("").trim();
            let name = normalize(row.description.as_deref().unwrap_or(""));
            if key.is_empty() || name.is_empty() {
                dropped += 1;
                continue;
            }
            records.push(BasketRecord::new(key, name));
        }

        info!(
            path = %self.path.display(),
            rows = records.len(),
            dropped,
            "basket records loaded"
        );
        Ok(records)
    }
}
