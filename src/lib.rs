//! chart-layout: tick, scale and hover math for time-series dashboard charts.
//!
//! The crate computes everything a renderer needs to draw a line or grouped
//! bar chart over dated rows: x tick dates, the rounded y maximum, pixel
//! geometry, hover date spans and tooltip placement. Drawing is left to the
//! host.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod telemetry;

pub use api::{ChartConfig, ChartLayout};
pub use error::{ChartError, ChartResult};
