//! bubble-chart-rs: bubble-series layout engine.
//!
//! This crate computes bubble geometry (magnitude-to-radius mapping,
//! size-aware axis padding) and keeps it synchronized with viewport,
//! drilldown, and responsive-rule state. Drawing backends plug in behind
//! the [`render::Renderer`] seam.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};
