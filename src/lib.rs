//! racing-bars: deterministic racing bar chart animation engine.
//!
//! The crate turns a step-indexed dataset into continuous per-frame bar
//! geometry. Drawing, text shaping and video encoding stay with the host: the
//! engine hands out backend-agnostic frames and a single completion signal.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod render;
pub mod telemetry;

pub use api::{RaceChartConfig, RaceChartEngine};
pub use error::{RaceChartError, RaceResult};
