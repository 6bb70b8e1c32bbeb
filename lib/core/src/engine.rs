use crate::catalog::{normalize, Product};
use crate::embedding::Neighbor;
use crate::error::{Error, Result};
use crate::resolver::CatalogResolver;
use crate::snapshot::{CatalogSnapshot, SnapshotHandle};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

/// A suggested add-on for one resolved variant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Addon {
    pub product: Product,
    pub score: f32,
}

/// One resolved catalog variant with its popularity and ranked add-ons
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantRecommendation {
    pub product: Product,
    pub popularity: u64,
    pub addons: Vec<Addon>,
}

/// Outcome of a recommendation query.
///
/// `NoMatch` means the query resolved to no catalog entry at all, which is
/// distinct from a recognized variant that happens to have no add-ons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RecommendationResult {
    NoMatch {
        query: String,
    },
    Matches {
        query: String,
        results: Vec<VariantRecommendation>,
    },
}

/// Orchestrates resolver, popularity table and embedding index over the
/// current snapshot into ranked responses.
pub struct RecommendationEngine {
    snapshot: SnapshotHandle,
    resolver: CatalogResolver,
}

impl RecommendationEngine {
    #[must_use]
    pub fn new(snapshot: CatalogSnapshot, resolver: CatalogResolver) -> Self {
        Self {
            snapshot: SnapshotHandle::new(snapshot),
            resolver,
        }
    }

    /// The snapshot currently being served
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.snapshot.load()
    }

    /// Atomically install a freshly built snapshot; in-flight queries keep
    /// reading the one they already loaded.
    pub fn swap_snapshot(&self, snapshot: CatalogSnapshot) {
        self.snapshot.swap(snapshot);
    }

    /// Resolve a free-text query and rank up to `top_k` add-ons per
    /// resolved variant.
    ///
    /// An empty query (after trimming) is rejected with
    /// [`Error::InvalidQuery`]. A query resolving to nothing returns
    /// [`RecommendationResult::NoMatch`]. Failures local to one variant
    /// degrade that variant instead of failing the response: a variant
    /// missing from the embedding index is an internal inconsistency that
    /// is logged and served with empty add-ons.
    pub fn recommend(&self, query: &str, top_k: usize) -> Result<RecommendationResult> {
        let query = normalize(query);
        if query.is_empty() {
            return Err(Error::InvalidQuery);
        }

        let snapshot = self.snapshot.load();
        let variants = self.resolver.resolve(snapshot.catalog(), &query);
        if variants.is_empty() {
            return Ok(RecommendationResult::NoMatch { query });
        }

        let results = variants
            .into_iter()
            .map(|product| {
                let popularity = snapshot.popularity().lookup(&product.name);
                let addons = match snapshot.embeddings().top_k_neighbors(product.id, top_k) {
                    Ok(neighbors) => self.to_addons(&snapshot, neighbors),
                    Err(e) => {
                        warn!(
                            product = %product.name,
                            error = %e,
                            "resolved variant missing from embedding index"
                        );
                        Vec::new()
                    }
                };
                VariantRecommendation {
                    product,
                    popularity,
                    addons,
                }
            })
            .collect();

        Ok(RecommendationResult::Matches { query, results })
    }

    fn to_addons(&self, snapshot: &CatalogSnapshot, neighbors: Vec<Neighbor>) -> Vec<Addon> {
        neighbors
            .into_iter()
            .filter_map(|n| {
                snapshot.catalog().product(n.id).map(|product| Addon {
                    product,
                    score: n.score,
                })
            })
            .collect()
    }
}
