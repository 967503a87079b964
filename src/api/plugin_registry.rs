use tracing::debug;

use crate::error::{RaceChartError, RaceResult};
use crate::extensions::RacePlugin;
use crate::render::Renderer;

use super::RaceChartEngine;

impl<R: Renderer> RaceChartEngine<R> {
    /// Adds an observer for race events.
    ///
    /// Ids must be non-blank and unique. A plugin registered mid-race only
    /// sees events from the next tick onward.
    pub fn register_plugin(&mut self, plugin: Box<dyn RacePlugin>) -> RaceResult<()> {
        let id = plugin.id();
        if id.trim().is_empty() {
            return Err(RaceChartError::InvalidData(
                "plugin id must not be blank".to_owned(),
            ));
        }
        if self.plugin_position(id).is_some() {
            return Err(RaceChartError::InvalidData(format!(
                "plugin `{id}` is already registered"
            )));
        }

        debug!(
            plugin = id,
            step = self.current_step(),
            "registered race plugin"
        );
        self.plugins.push(plugin);
        Ok(())
    }

    /// Detaches a plugin and hands it back so hosts can read what it collected.
    pub fn unregister_plugin(&mut self, plugin_id: &str) -> Option<Box<dyn RacePlugin>> {
        let position = self.plugin_position(plugin_id)?;
        let plugin = self.plugins.remove(position);
        debug!(plugin = plugin_id, "unregistered race plugin");
        Some(plugin)
    }

    /// Registered plugin ids in dispatch order.
    pub fn plugin_ids(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(|plugin| plugin.id())
    }

    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    #[must_use]
    pub fn has_plugin(&self, plugin_id: &str) -> bool {
        self.plugin_position(plugin_id).is_some()
    }

    fn plugin_position(&self, plugin_id: &str) -> Option<usize> {
        self.plugins
            .iter()
            .position(|plugin| plugin.id() == plugin_id)
    }
}
