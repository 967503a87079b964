//! Host-facing engine facade and its configuration.

mod animation_controller;
mod engine;
mod engine_config;
mod engine_init;
mod engine_snapshot;
mod layout_helpers;
mod plugin_dispatch;
mod plugin_registry;
mod render_frame_builder;
mod validation;

pub use engine::RaceChartEngine;
pub use engine_config::{ColorAssignment, RaceChartConfig, ThemeColors};
pub use engine_snapshot::{EngineSnapshot, EntitySnapshot};
pub use render_frame_builder::{EntityFrame, RaceFrame};
