//! Per-cell color decisions.

use serde::{Deserialize, Serialize};

use heatmap_common::MetricFamily;

use crate::label::format_label;
use crate::scale::{Color, ColorScale, LIGHT_TEXT, NEUTRAL, NO_DATA};
use crate::style::ContrastRule;

/// How values are read against a scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Raw values, step lookup.
    Absolute,
    /// Signed differences, bracket lookup with zero drawn neutral.
    Differential,
}

/// What one cell looks like.
#[derive(Debug, Clone, PartialEq)]
pub struct CellStyle {
    pub fill: Color,
    pub text: Color,
    pub label: String,
}

/// Fill color of a present value.
///
/// In differential mode an exact zero is drawn [`NEUTRAL`], overriding the
/// color the bracket lookup found for it.
pub fn fill_color(value: f64, scale: &ColorScale, mode: RenderMode) -> Color {
    match mode {
        RenderMode::Absolute => scale.step_lookup(value),
        RenderMode::Differential => {
            let bracketed = scale.bracket_lookup(value);
            if value == 0.0 {
                NEUTRAL
            } else {
                bracketed
            }
        }
    }
}

/// Maps cell values to fill, text color and label for one rendering.
#[derive(Debug, Clone, Copy)]
pub struct ColorPolicy<'a> {
    scale: &'a ColorScale,
    family: MetricFamily,
    mode: RenderMode,
    contrast: ContrastRule,
}

impl<'a> ColorPolicy<'a> {
    pub fn new(
        scale: &'a ColorScale,
        family: MetricFamily,
        mode: RenderMode,
        contrast: ContrastRule,
    ) -> Self {
        Self {
            scale,
            family,
            mode,
            contrast,
        }
    }

    pub fn scale(&self) -> &ColorScale {
        self.scale
    }

    pub fn family(&self) -> MetricFamily {
        self.family
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn fill_for(&self, value: Option<f64>) -> Color {
        match value.filter(|v| !v.is_nan()) {
            Some(v) => fill_color(v, self.scale, self.mode),
            None => NO_DATA,
        }
    }

    /// Style of a cell. Absent and NaN values get the no-data fill and no label.
    pub fn color_for(&self, value: Option<f64>) -> CellStyle {
        match value.filter(|v| !v.is_nan()) {
            Some(v) => CellStyle {
                fill: fill_color(v, self.scale, self.mode),
                text: self.contrast.text_color(v, self.mode),
                label: format_label(v, self.family, self.mode),
            },
            None => CellStyle {
                fill: NO_DATA,
                text: LIGHT_TEXT,
                label: String::new(),
            },
        }
    }
}
