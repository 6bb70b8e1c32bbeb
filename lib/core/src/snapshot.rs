use crate::catalog::{BasketRecord, Catalog};
use crate::embedding::EmbeddingIndex;
use crate::error::{Error, Result};
use crate::pairs::extract_pairs;
use crate::popularity::PopularityTable;
use crate::trainer::Trainer;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

/// Everything the serve phase reads, frozen in one offline build pass:
/// the product table, the popularity counts and the embedding index.
/// Nothing in here mutates after construction; concurrent queries share it
/// read-only.
#[derive(Debug)]
pub struct CatalogSnapshot {
    catalog: Catalog,
    popularity: PopularityTable,
    embeddings: EmbeddingIndex,
}

impl CatalogSnapshot {
    /// Run the build phase: catalog + popularity from the record stream,
    /// co-occurrence pairs to the trainer, trained matrix into the index.
    pub fn build(
        records: &[BasketRecord],
        trainer: &dyn Trainer,
        embedding_dim: usize,
    ) -> Result<Self> {
        let catalog = Catalog::from_records(records);
        let popularity = PopularityTable::from_records(records);
        let pairs = extract_pairs(records, &catalog);

        let matrix = trainer.train(&pairs, catalog.len(), embedding_dim)?;
        if matrix.len() != catalog.len() {
            return Err(Error::InvalidDimension {
                expected: catalog.len(),
                actual: matrix.len(),
            });
        }
        let embeddings = EmbeddingIndex::new(matrix, embedding_dim)?;

        info!(
            vocab_size = catalog.len(),
            pairs = pairs.len(),
            embedding_dim,
            "catalog snapshot built"
        );

        Ok(Self {
            catalog,
            popularity,
            embeddings,
        })
    }

    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[inline]
    #[must_use]
    pub fn popularity(&self) -> &PopularityTable {
        &self.popularity
    }

    #[inline]
    #[must_use]
    pub fn embeddings(&self) -> &EmbeddingIndex {
        &self.embeddings
    }
}

/// Shared handle to the current snapshot.
///
/// Readers clone the inner `Arc` and run against a frozen value with no
/// further locking; a rebuild installs an entirely new snapshot with
/// [`SnapshotHandle::swap`] and never touches one already visible to
/// in-flight reads.
#[derive(Debug)]
pub struct SnapshotHandle {
    inner: RwLock<Arc<CatalogSnapshot>>,
}

impl SnapshotHandle {
    #[must_use]
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self {
            inner: RwLock::new(Arc::new(snapshot)),
        }
    }

    #[inline]
    #[must_use]
    pub fn load(&self) -> Arc<CatalogSnapshot> {
        self.inner.read().clone()
    }

    pub fn swap(&self, snapshot: CatalogSnapshot) {
        let snapshot = Arc::new(snapshot);
        info!(
            vocab_size = snapshot.catalog().len(),
            "snapshot swapped in"
        );
        *self.inner.write() = snapshot;
    }
}
