use serde::{Deserialize, Serialize};

use crate::core::{ChoreographyMode, Viewport};
use crate::error::{RaceChartError, RaceResult};
use crate::render::{Color, default_palette};

/// How palette colors are bound to entities at seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorAssignment {
    /// Entity `i` in dataset order takes `palette[i % len]`.
    #[default]
    ByOriginalIndex,
    /// Entity at seeding rank `r` takes `palette[r % len]`.
    RankCyclic,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub background: Color,
    pub header: Color,
    pub text: Color,
    /// Color of the title drawn inside the header band.
    #[serde(default = "default_header_text_color")]
    pub header_text: Color,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            background: Color::rgb8(0x28, 0x28, 0x2e),
            header: Color::rgb8(0x6c, 0x56, 0x71),
            text: Color::WHITE,
            header_text: default_header_text_color(),
        }
    }
}

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load race
/// setups without inventing their own ad-hoc format. Every field except the
/// viewport has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceChartConfig {
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,
    /// Seconds of dwell per step in non-flat modes.
    #[serde(default = "default_step_duration")]
    pub step_duration: f64,
    /// Data units per second in flat modes.
    #[serde(default = "default_rate")]
    pub rate: f64,
    #[serde(default)]
    pub choreography_mode: ChoreographyMode,
    /// Pixels per data unit.
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Shrinks `scale` so the largest value fits between the margins.
    #[serde(default = "default_fit_scale_to_viewport")]
    pub fit_scale_to_viewport: bool,
    #[serde(default = "default_visible_count")]
    pub visible_count: usize,
    #[serde(default)]
    pub value_prefix: String,
    #[serde(default)]
    pub value_suffix: String,
    #[serde(default = "default_grace_duration")]
    pub grace_duration: f64,
    #[serde(default = "default_header_height")]
    pub header_height: f64,
    /// Title centered in the header band. Empty draws no title.
    #[serde(default)]
    pub header_text: String,
    #[serde(default = "default_header_font_size_px")]
    pub header_font_size_px: f64,
    #[serde(default = "default_bar_height")]
    pub bar_height: f64,
    /// Fixed gap between bars; split evenly from the free height when unset.
    #[serde(default)]
    pub gap_around_bars: Option<f64>,
    /// Minimum left edge of the bars. Widened to fit the longest name label.
    #[serde(default = "default_left_margin")]
    pub left_margin: f64,
    #[serde(default = "default_right_margin")]
    pub right_margin: f64,
    #[serde(default = "default_text_bar_gap")]
    pub text_bar_gap: f64,
    #[serde(default = "default_value_label_gap")]
    pub value_label_gap: f64,
    #[serde(default = "default_name_font_size_px")]
    pub name_font_size_px: f64,
    #[serde(default = "default_value_font_size_px")]
    pub value_font_size_px: f64,
    #[serde(default = "default_step_label_font_size_px")]
    pub step_label_font_size_px: f64,
    /// Distance of the step label's anchor from the bottom-right corner.
    #[serde(default = "default_step_label_margin")]
    pub step_label_margin: f64,
    #[serde(default)]
    pub color_assignment: ColorAssignment,
    #[serde(default = "default_palette")]
    pub palette: Vec<Color>,
    #[serde(default)]
    pub theme: ThemeColors,
    /// Frame rate used by `render_until_complete`.
    #[serde(default = "default_frames_per_second")]
    pub frames_per_second: f64,
}

impl Default for RaceChartConfig {
    fn default() -> Self {
        Self::new(default_viewport())
    }
}

impl RaceChartConfig {
    /// Creates a config with default timing and layout for `viewport`.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            step_duration: default_step_duration(),
            rate: default_rate(),
            choreography_mode: ChoreographyMode::default(),
            scale: default_scale(),
            fit_scale_to_viewport: default_fit_scale_to_viewport(),
            visible_count: default_visible_count(),
            value_prefix: String::new(),
            value_suffix: String::new(),
            grace_duration: default_grace_duration(),
            header_height: default_header_height(),
            header_text: String::new(),
            header_font_size_px: default_header_font_size_px(),
            bar_height: default_bar_height(),
            gap_around_bars: None,
            left_margin: default_left_margin(),
            right_margin: default_right_margin(),
            text_bar_gap: default_text_bar_gap(),
            value_label_gap: default_value_label_gap(),
            name_font_size_px: default_name_font_size_px(),
            value_font_size_px: default_value_font_size_px(),
            step_label_font_size_px: default_step_label_font_size_px(),
            step_label_margin: default_step_label_margin(),
            color_assignment: ColorAssignment::default(),
            palette: default_palette(),
            theme: ThemeColors::default(),
            frames_per_second: default_frames_per_second(),
        }
    }

    #[must_use]
    pub fn with_step_duration(mut self, step_duration: f64) -> Self {
        self.step_duration = step_duration;
        self
    }

    #[must_use]
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    #[must_use]
    pub fn with_choreography_mode(mut self, mode: ChoreographyMode) -> Self {
        self.choreography_mode = mode;
        self
    }

    /// Sets the pixel scale. Disable `fit_scale_to_viewport` to use it verbatim.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn with_fit_scale_to_viewport(mut self, enabled: bool) -> Self {
        self.fit_scale_to_viewport = enabled;
        self
    }

    #[must_use]
    pub fn with_visible_count(mut self, visible_count: usize) -> Self {
        self.visible_count = visible_count;
        self
    }

    #[must_use]
    pub fn with_value_affixes(
        mut self,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        self.value_prefix = prefix.into();
        self.value_suffix = suffix.into();
        self
    }

    #[must_use]
    pub fn with_grace_duration(mut self, grace_duration: f64) -> Self {
        self.grace_duration = grace_duration;
        self
    }

    /// Sets header height, bar height and an optional fixed gap.
    #[must_use]
    pub fn with_bar_layout(
        mut self,
        header_height: f64,
        bar_height: f64,
        gap_around_bars: Option<f64>,
    ) -> Self {
        self.header_height = header_height;
        self.bar_height = bar_height;
        self.gap_around_bars = gap_around_bars;
        self
    }

    #[must_use]
    pub fn with_header_text(mut self, header_text: impl Into<String>) -> Self {
        self.header_text = header_text.into();
        self
    }

    #[must_use]
    pub fn with_header_font_size_px(mut self, font_size_px: f64) -> Self {
        self.header_font_size_px = font_size_px;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, left_margin: f64, right_margin: f64) -> Self {
        self.left_margin = left_margin;
        self.right_margin = right_margin;
        self
    }

    #[must_use]
    pub fn with_color_assignment(mut self, assignment: ColorAssignment) -> Self {
        self.color_assignment = assignment;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    /// Parses the palette from hex strings such as `#f98284`.
    pub fn with_hex_palette<S: AsRef<str>>(mut self, palette: &[S]) -> RaceResult<Self> {
        self.palette = palette
            .iter()
            .map(|hex| Color::from_hex(hex.as_ref()))
            .collect::<RaceResult<_>>()?;
        Ok(self)
    }

    #[must_use]
    pub fn with_theme(mut self, theme: ThemeColors) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_frames_per_second(mut self, frames_per_second: f64) -> Self {
        self.frames_per_second = frames_per_second;
        self
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> RaceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes config from JSON.
    ///
    /// Unknown choreography modes are reported as configuration errors.
    pub fn from_json_str(input: &str) -> RaceResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| RaceChartError::Configuration(format!("failed to parse config: {e}")))
    }
}

fn default_viewport() -> Viewport {
    Viewport::new(1280, 720)
}

fn default_step_duration() -> f64 {
    1.0
}

fn default_rate() -> f64 {
    100.0
}

fn default_scale() -> f64 {
    1.0
}

fn default_fit_scale_to_viewport() -> bool {
    true
}

fn default_visible_count() -> usize {
    10
}

fn default_grace_duration() -> f64 {
    3.0
}

fn default_header_height() -> f64 {
    80.0
}

fn default_header_font_size_px() -> f64 {
    40.0
}

fn default_header_text_color() -> Color {
    Color::WHITE
}

fn default_bar_height() -> f64 {
    40.0
}

fn default_left_margin() -> f64 {
    200.0
}

fn default_right_margin() -> f64 {
    50.0
}

fn default_text_bar_gap() -> f64 {
    20.0
}

fn default_value_label_gap() -> f64 {
    10.0
}

fn default_name_font_size_px() -> f64 {
    24.0
}

fn default_value_font_size_px() -> f64 {
    20.0
}

fn default_step_label_font_size_px() -> f64 {
    48.0
}

fn default_step_label_margin() -> f64 {
    200.0
}

fn default_frames_per_second() -> f64 {
    60.0
}
