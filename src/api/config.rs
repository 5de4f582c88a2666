use serde::{Deserialize, Serialize};

use crate::core::{HexColor, LabelOrientation, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::DEFAULT_MARKING_THRESHOLD_PX;

/// Rows accepted by one render pass.
pub const DEFAULT_MAX_ROWS: usize = 100_000;

/// Host theming values consumed at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartStyle {
    #[serde(default = "default_font_color")]
    pub font_color: HexColor,
    #[serde(default = "default_tick_color")]
    pub tick_color: HexColor,
    #[serde(default = "default_axis_line_color")]
    pub axis_line_color: HexColor,
    #[serde(default = "default_background_color")]
    pub background_color: HexColor,
    /// Hover ring color; falls back to the font color so it adapts to light and dark themes.
    #[serde(default)]
    pub highlight_color: Option<HexColor>,
}

impl ChartStyle {
    #[must_use]
    pub fn highlight(self) -> HexColor {
        self.highlight_color.unwrap_or(self.font_color)
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            font_color: default_font_color(),
            tick_color: default_tick_color(),
            axis_line_color: default_axis_line_color(),
            background_color: default_background_color(),
            highlight_color: None,
        }
    }
}

/// Public chart bootstrap configuration.
///
/// Serializable so hosts can persist chart setup next to their own settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BumpChartConfig {
    pub viewport: Viewport,
    #[serde(default = "default_font_size_px")]
    pub font_size_px: f64,
    /// Marker diameter as a share of the smaller row/column pitch.
    #[serde(default = "default_relative_marker_size")]
    pub relative_marker_size: f64,
    /// Opacity of gradient stops.
    #[serde(default = "default_line_transparency")]
    pub line_transparency: f64,
    #[serde(default = "default_marker_to_line_ratio")]
    pub marker_to_line_ratio: f64,
    #[serde(default = "default_inner_margin_extra_px")]
    pub inner_margin_extra_px: f64,
    #[serde(default)]
    pub label_orientation: LabelOrientation,
    #[serde(default = "default_marking_threshold_px")]
    pub marking_threshold_px: f64,
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
    #[serde(default)]
    pub style: ChartStyle,
}

impl BumpChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            font_size_px: default_font_size_px(),
            relative_marker_size: default_relative_marker_size(),
            line_transparency: default_line_transparency(),
            marker_to_line_ratio: default_marker_to_line_ratio(),
            inner_margin_extra_px: default_inner_margin_extra_px(),
            label_orientation: LabelOrientation::default(),
            marking_threshold_px: default_marking_threshold_px(),
            max_rows: default_max_rows(),
            style: ChartStyle::default(),
        }
    }

    #[must_use]
    pub fn with_font_size(mut self, font_size_px: f64) -> Self {
        self.font_size_px = font_size_px;
        self
    }

    #[must_use]
    pub fn with_relative_marker_size(mut self, relative_marker_size: f64) -> Self {
        self.relative_marker_size = relative_marker_size;
        self
    }

    #[must_use]
    pub fn with_line_transparency(mut self, line_transparency: f64) -> Self {
        self.line_transparency = line_transparency;
        self
    }

    #[must_use]
    pub fn with_label_orientation(mut self, orientation: LabelOrientation) -> Self {
        self.label_orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_marking_threshold(mut self, threshold_px: f64) -> Self {
        self.marking_threshold_px = threshold_px;
        self
    }

    #[must_use]
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        if !self.relative_marker_size.is_finite() || self.relative_marker_size < 0.0 {
            return Err(ChartError::InvalidData(
                "relative marker size must be finite and >= 0".to_owned(),
            ));
        }
        if !(0.0..=1.0).contains(&self.line_transparency) {
            return Err(ChartError::InvalidData(
                "line transparency must be in [0, 1]".to_owned(),
            ));
        }
        if !self.marker_to_line_ratio.is_finite() || self.marker_to_line_ratio <= 0.0 {
            return Err(ChartError::InvalidData(
                "marker to line ratio must be finite and > 0".to_owned(),
            ));
        }
        if !self.inner_margin_extra_px.is_finite() || self.inner_margin_extra_px < 0.0 {
            return Err(ChartError::InvalidData(
                "inner margin must be finite and >= 0".to_owned(),
            ));
        }
        if !self.marking_threshold_px.is_finite() || self.marking_threshold_px < 0.0 {
            return Err(ChartError::InvalidData(
                "marking threshold must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_font_size_px() -> f64 {
    12.0
}

fn default_relative_marker_size() -> f64 {
    0.8
}

fn default_line_transparency() -> f64 {
    1.0
}

fn default_marker_to_line_ratio() -> f64 {
    4.0
}

fn default_inner_margin_extra_px() -> f64 {
    2.0
}

fn default_marking_threshold_px() -> f64 {
    DEFAULT_MARKING_THRESHOLD_PX
}

fn default_max_rows() -> usize {
    DEFAULT_MAX_ROWS
}

fn default_font_color() -> HexColor {
    HexColor::rgb(0x61, 0x64, 0x6b)
}

fn default_tick_color() -> HexColor {
    HexColor::rgb(0xbd, 0xbf, 0xc3)
}

fn default_axis_line_color() -> HexColor {
    HexColor::rgb(0xbd, 0xbf, 0xc3)
}

fn default_background_color() -> HexColor {
    HexColor::WHITE
}
