//! sift-server: HTTP boundary for sift.
//!
//! Provides the REST API, request validation, pagination and metrics.
//! Query understanding and ranking live in `sift-core`.

/// REST API layer: Axum router, HTTP handlers, models, metrics.
pub mod api;
