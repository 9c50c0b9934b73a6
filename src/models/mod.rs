//! Domain models for InsightStream.
//!
//! # Core Concepts
//!
//! ## Prioritization
//!
//! - [`FeatureInput`]: A feature with its RICE inputs, as submitted for scoring.
//! - [`PrioritizationRequest`]: A validated batch of features plus the key metrics
//!   they are scored against. Immutable once submitted.
//! - [`PrioritizationResult`]: The scoring oracle's ordered answer. Replaced on
//!   every submission.
//!
//! ## Roadmap
//!
//! - [`RoadmapBoard`]: Four ordered [`Column`]s of [`RoadmapFeature`] cards.
//! - [`CardMove`]: One drag gesture, applied atomically to the board.
//!
//! ## Dashboard
//!
//! - [`DashboardSnapshot`]: Static sales figures for a region and category.

mod dashboard;
mod prioritization;
mod roadmap;

pub use dashboard::*;
pub use prioritization::*;
pub use roadmap::*;
