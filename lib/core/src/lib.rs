//! # cartX Core
//!
//! Core library for the cartX add-on recommender.
//!
//! This crate provides the recommendation-serving pipeline:
//!
//! - [`Catalog`] - Deterministic product name/id table
//! - [`extract_pairs`] - Basket rows to co-occurrence training pairs
//! - [`PopularityTable`] - Membership-row counts per product
//! - [`EmbeddingIndex`] - Product embeddings with top-k similarity queries
//! - [`CatalogResolver`] - Free-text query to catalog variants
//! - [`RecommendationEngine`] - Resolver + popularity + neighbors per query
//!
//! ## Example
//!
//! ```rust
//! use cartx_core::{
//!     BasketRecord, CatalogResolver, CatalogSnapshot, RecommendationEngine, SgdTrainer,
//! };
//!
//! let records = vec![
//!     BasketRecord::new("t1", "spinach"),
//!     BasketRecord::new("t1", "hummus"),
//!     BasketRecord::new("t2", "spinach"),
//!     BasketRecord::new("t2", "pita"),
//! ];
//!
//! // Build phase: one immutable snapshot
//! let trainer = SgdTrainer::default();
//! let snapshot = CatalogSnapshot::build(&records, &trainer, 8).unwrap();
//!
//! // Serve phase: concurrent reads against the frozen snapshot
//! let engine = RecommendationEngine::new(snapshot, CatalogResolver::default());
//! let result = engine.recommend("spinach", 5).unwrap();
//! ```

pub mod catalog;
pub mod embedding;
pub mod engine;
pub mod error;
pub mod pairs;
pub mod popularity;
pub mod resolver;
pub mod snapshot;
pub mod trainer;
pub mod vector;

pub use catalog::{normalize, BasketRecord, Catalog, Product, ProductId};
pub use embedding::{EmbeddingIndex, Neighbor};
pub use engine::{Addon, RecommendationEngine, RecommendationResult, VariantRecommendation};
pub use error::{Error, Result};
pub use pairs::extract_pairs;
pub use popularity::PopularityTable;
pub use resolver::{sequence_ratio, CatalogResolver, ResolverConfig};
pub use snapshot::{CatalogSnapshot, SnapshotHandle};
pub use trainer::{FixedTrainer, SgdTrainer, SgdTrainerConfig, Trainer};
pub use vector::Vector;
