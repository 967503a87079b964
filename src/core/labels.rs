use serde::{Deserialize, Serialize};

use crate::core::{EntityAnimationState, EntityId};

/// Text measurement supplied by the rendering backend.
pub trait TextMeasurer {
    fn text_width_px(&self, text: &str, font_size_px: f64) -> f64;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn text_width_px(&self, text: &str, font_size_px: f64) -> f64 {
        (**self).text_width_px(text, font_size_px)
    }
}

/// Deterministic, backend-independent width estimate.
#[must_use]
pub fn estimate_text_width_px(text: &str, font_size_px: f64) -> f64 {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' => 0.34,
            '-' | '+' | '%' | '$' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}

/// Measurer for headless use when no font metrics are available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EstimatedTextMeasurer;

impl TextMeasurer for EstimatedTextMeasurer {
    fn text_width_px(&self, text: &str, font_size_px: f64) -> f64 {
        estimate_text_width_px(text, font_size_px)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelFormat {
    pub prefix: String,
    pub suffix: String,
    /// Space between the label's right edge and the bar's right edge.
    pub gap: f64,
    pub font_size_px: f64,
}

/// Value label for one bar in one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueLabel {
    pub entity: EntityId,
    pub text: String,
    pub raw_value: f64,
    pub display_value: f64,
    pub width_px: f64,
    /// Right edge of the label in pixels.
    pub right: f64,
    pub center_y: f64,
    pub visible: bool,
}

/// Builds value labels from the current bar states.
pub struct LabelGenerator<'a, M: TextMeasurer + ?Sized> {
    format: &'a LabelFormat,
    measurer: &'a M,
}

impl<'a, M: TextMeasurer + ?Sized> LabelGenerator<'a, M> {
    #[must_use]
    pub fn new(format: &'a LabelFormat, measurer: &'a M) -> Self {
        Self { format, measurer }
    }

    #[must_use]
    pub fn format_value(&self, raw_value: f64) -> (f64, String) {
        // `+ 0.0` folds a negative zero so it never prints as "-0".
        let display_value = raw_value.floor() + 0.0;
        let text = format!(
            "{}{display_value:.0}{}",
            self.format.prefix, self.format.suffix
        );
        (display_value, text)
    }

    #[must_use]
    pub fn value_label(&self, state: &EntityAnimationState) -> ValueLabel {
        let raw_value = state.current_value();
        let (display_value, text) = self.format_value(raw_value);
        let width_px = self.measurer.text_width_px(&text, self.format.font_size_px);
        let geometry = state.geometry;
        ValueLabel {
            entity: state.entity,
            raw_value,
            display_value,
            width_px,
            right: geometry.right() - self.format.gap,
            center_y: geometry.center_y(),
            visible: geometry.width > self.format.gap + width_px,
            text,
        }
    }

    /// Labels for `order`, computed lazily. The sequence is single-use and
    /// reflects the states at call time only.
    pub fn value_labels<'s>(
        &'s self,
        states: &'s [EntityAnimationState],
        order: &'s [EntityId],
    ) -> impl Iterator<Item = ValueLabel> + 's {
        order
            .iter()
            .filter_map(|entity| states.get(entity.index()))
            .map(|state| self.value_label(state))
    }
}

/// Strips `prefix`/`suffix` from a value label and parses the integer part.
#[must_use]
pub fn parse_value_label(text: &str, prefix: &str, suffix: &str) -> Option<i64> {
    text.strip_prefix(prefix)?.strip_suffix(suffix)?.parse().ok()
}
