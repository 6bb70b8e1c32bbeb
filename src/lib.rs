//! # cartX
//!
//! A basket-driven add-on recommender.
//!
//! cartX turns historical basket co-purchase data into product embeddings,
//! resolves free-text queries to canonical catalog entries, and ranks
//! companion products by embedding similarity and purchase popularity.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! cargo install cartx
//! cartx --products-csv products.csv --http-port 5050
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use cartx::prelude::*;
//!
//! let records = vec![
//!     BasketRecord::new("t1", "spinach"),
//!     BasketRecord::new("t1", "hummus"),
//!     BasketRecord::new("t2", "spinach"),
//!     BasketRecord::new("t2", "pita"),
//! ];
//!
//! let trainer = SgdTrainer::default();
//! let snapshot = CatalogSnapshot::build(&records, &trainer, 8).unwrap();
//! let engine = RecommendationEngine::new(snapshot, CatalogResolver::default());
//!
//! match engine.recommend("spinach", 5).unwrap() {
//!     RecommendationResult::Matches { results, .. } => {
//!         for variant in results {
//!             println!("{} ({}x)", variant.product.name, variant.popularity);
//!         }
//!     }
//!     RecommendationResult::NoMatch { query } => println!("no matches for '{query}'"),
//! }
//! ```
//!
//! ## Crate Structure
//!
//! cartX is composed of several crates:
//!
//! - [`cartx-core`](https://docs.rs/cartx-core) - Catalog, pair extraction, popularity, embeddings, resolver, engine
//! - [`cartx-ingest`](https://docs.rs/cartx-ingest) - CSV loading and basket record normalization
//! - [`cartx-api`](https://docs.rs/cartx-api) - REST API (predict, rebuild, health)

// Re-export core types
pub use cartx_core::{
    extract_pairs, normalize, sequence_ratio, Addon, BasketRecord, Catalog, CatalogResolver,
    CatalogSnapshot, EmbeddingIndex, Error, FixedTrainer, Neighbor, PopularityTable, Product,
    ProductId, RecommendationEngine, RecommendationResult, ResolverConfig, Result, SgdTrainer,
    SgdTrainerConfig, SnapshotHandle, Trainer, VariantRecommendation, Vector,
};

// Re-export ingestion
pub use cartx_ingest::CsvBasketSource;

// Re-export API
pub use cartx_api::{AppState, RestApi};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        extract_pairs, normalize, sequence_ratio, Addon, BasketRecord, Catalog, CatalogResolver,
        CatalogSnapshot, CsvBasketSource, EmbeddingIndex, Error, FixedTrainer, Neighbor,
        PopularityTable, Product, ProductId, RecommendationEngine, RecommendationResult,
        ResolverConfig, RestApi, Result, SgdTrainer, SgdTrainerConfig, SnapshotHandle, Trainer,
        VariantRecommendation, Vector,
    };
}
