//! # cartX API
//!
//! REST surface for the cartX recommender.
//!
//! Exposes the query contract over actix-web: `POST /predict` for
//! recommendations, `POST /rebuild` to re-ingest and atomically swap in a
//! fresh snapshot, and `GET /healthz`.

pub mod rest;

pub use rest::{AppState, RestApi};
