//! bump-chart-rs: layout, scale, marking and line-geometry core for bump charts.
//!
//! A bump chart draws one line per category across ordered periods, placing
//! each point by its rank. The crate turns a per-pass data snapshot into a
//! retained, layered shape set and turns pointer gestures into marking
//! commands for the host's data view.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{BumpChart, BumpChartConfig};
pub use error::{ChartError, ChartResult};
