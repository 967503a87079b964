use serde::{Deserialize, Serialize};

use crate::core::{EntityId, LabelFormat, LabelGenerator, ValueLabel};
use crate::render::{
    Color, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::RaceChartEngine;

/// Per-entity output of one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityFrame {
    pub entity: EntityId,
    pub entity_key: String,
    pub name_label: String,
    pub rank: usize,
    pub rect: RectPrimitive,
    pub color: Color,
    pub label_text: String,
    pub label_visible: bool,
    /// Whether any part of the bar lies above the bottom edge of the viewport.
    pub on_screen: bool,
    /// Growth window of this bar is open at the current instant.
    pub active: bool,
    pub artwork_key: Option<String>,
}

/// Renderer-facing description of one frame, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceFrame {
    pub entities: Vec<EntityFrame>,
    pub current_step_label: String,
}

impl RaceFrame {
    /// Artwork of the bar currently growing, if it has any.
    #[must_use]
    pub fn active_artwork(&self) -> Option<&str> {
        self.entities
            .iter()
            .find(|entity| entity.active)
            .and_then(|entity| entity.artwork_key.as_deref())
    }
}

impl<R: Renderer> RaceChartEngine<R> {
    pub(super) fn label_format(&self) -> LabelFormat {
        LabelFormat {
            prefix: self.config.value_prefix.clone(),
            suffix: self.config.value_suffix.clone(),
            gap: self.config.value_label_gap,
            font_size_px: self.config.value_font_size_px,
        }
    }

    /// Value labels for the current frame, in display order.
    #[must_use]
    pub fn value_labels(&self) -> Vec<ValueLabel> {
        let format = self.label_format();
        let generator = LabelGenerator::new(&format, &self.renderer);
        generator
            .value_labels(self.scheduler.states(), self.scheduler.display_order())
            .collect()
    }

    /// Ordered entity geometry, colors and labels for the current frame.
    #[must_use]
    pub fn race_frame(&self) -> RaceFrame {
        let viewport_bottom = f64::from(self.config.viewport.height);
        let dataset = self.scheduler.dataset();
        let states = self.scheduler.states();
        let format = self.label_format();
        let generator = LabelGenerator::new(&format, &self.renderer);
        let active_entity = self.scheduler.active_entity();

        let entities = self
            .scheduler
            .display_order()
            .iter()
            .filter_map(|entity| {
                let state = states.get(entity.index())?;
                let meta = dataset.entity(*entity)?;
                let color = self.colors.get(entity.index()).copied()?;
                let label = generator.value_label(state);
                let geometry = state.geometry;
                Some(EntityFrame {
                    entity: *entity,
                    entity_key: meta.key.clone(),
                    name_label: meta.label.clone(),
                    rank: state.rank,
                    rect: RectPrimitive::new(
                        geometry.x,
                        geometry.y,
                        geometry.width,
                        geometry.height,
                        color,
                    ),
                    color,
                    label_text: label.text,
                    label_visible: label.visible,
                    on_screen: geometry.y < viewport_bottom,
                    active: active_entity == Some(*entity),
                    artwork_key: meta.artwork.clone(),
                })
            })
            .collect();

        RaceFrame {
            entities,
            current_step_label: self.scheduler.current_step_label().to_owned(),
        }
    }

    /// Materializes the current frame as draw primitives.
    ///
    /// Rects: background, header band, then the on-screen bars. Texts: the
    /// header title, then per bar its name and value labels, and finally the
    /// step label.
    #[must_use]
    pub fn build_render_frame(&self) -> RenderFrame {
        let viewport = self.config.viewport;
        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        let theme = self.config.theme;
        let name_right = self.bar_left() - self.config.text_bar_gap;

        let header_height = self.config.header_height.min(height);

        let mut frame = RenderFrame::new(viewport)
            .with_chrome_rect(RectPrimitive::new(0.0, 0.0, width, height, theme.background))
            .with_chrome_rect(RectPrimitive::new(0.0, 0.0, width, header_height, theme.header));
        if !self.config.header_text.is_empty() {
            frame = frame.with_text(TextPrimitive::new(
                self.config.header_text.clone(),
                width / 2.0,
                header_height / 2.0,
                self.config.header_font_size_px,
                theme.header_text,
                TextHAlign::Center,
            ));
        }

        let race = self.race_frame();
        for entity in race.entities.iter().filter(|entity| entity.on_screen) {
            let center_y = entity.rect.y + entity.rect.height / 2.0;
            frame = frame.with_bar_rect(entity.rect);
            if entity.rect.width > 0.0 && !entity.name_label.is_empty() {
                frame = frame.with_text(TextPrimitive::new(
                    entity.name_label.clone(),
                    name_right,
                    center_y,
                    self.config.name_font_size_px,
                    theme.text,
                    TextHAlign::Right,
                ));
            }
            if entity.label_visible {
                frame = frame.with_text(TextPrimitive::new(
                    entity.label_text.clone(),
                    entity.rect.x + entity.rect.width - self.config.value_label_gap,
                    center_y,
                    self.config.value_font_size_px,
                    Color::BLACK,
                    TextHAlign::Right,
                ));
            }
        }

        if !race.current_step_label.is_empty() {
            let margin = self.config.step_label_margin;
            frame = frame.with_text(TextPrimitive::new(
                race.current_step_label,
                (width - margin).max(0.0),
                (height - margin).max(0.0),
                self.config.step_label_font_size_px,
                theme.text,
                TextHAlign::Right,
            ));
        }

        frame
    }
}
