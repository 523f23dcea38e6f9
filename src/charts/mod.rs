//! Chart projections.
//!
//! Derives chart-ready label/value/color structures from the merged
//! statistics view model.

pub mod projection;

pub use projection::{project, ChartColor, ChartKind, ChartProjection, DashboardCharts};
