//! Style configuration: the scale table per [`ScaleId`] and the text contrast
//! rule per metric family.
//!
//! Built-in styles can be overridden from JSON:
//!
//! ```json
//! {
//!   "scales": {
//!     "precipitation": {
//!       "stops": [{ "value": 0.01, "color": "#e5f5e0" }, { "value": 1.0, "color": "#006d2c" }],
//!       "floor_color": "#ffffff"
//!     }
//!   },
//!   "contrast": {
//!     "temperature": { "absolute_light_above": 95 }
//!   }
//! }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use heatmap_common::MetricFamily;

use crate::palettes;
use crate::policy::{ColorPolicy, RenderMode};
use crate::scale::{Breakpoint, Color, ColorScale, ScaleError, DARK_TEXT, LIGHT_TEXT};

/// Identifier of a scale table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScaleId {
    Temperature,
    TemperatureDifference,
    Precipitation,
    PrecipitationDifference,
    Snowfall,
    SnowfallDifference,
    Wind,
    WindDifference,
}

impl ScaleId {
    pub const ALL: [ScaleId; 8] = [
        ScaleId::Temperature,
        ScaleId::TemperatureDifference,
        ScaleId::Precipitation,
        ScaleId::PrecipitationDifference,
        ScaleId::Snowfall,
        ScaleId::SnowfallDifference,
        ScaleId::Wind,
        ScaleId::WindDifference,
    ];

    /// Scale used for `family` values rendered in `mode`.
    pub fn for_family(family: MetricFamily, mode: RenderMode) -> Self {
        match (family, mode) {
            (MetricFamily::Temperature, RenderMode::Absolute) => ScaleId::Temperature,
            (MetricFamily::Temperature, RenderMode::Differential) => {
                ScaleId::TemperatureDifference
            }
            (MetricFamily::Precipitation, RenderMode::Absolute) => ScaleId::Precipitation,
            (MetricFamily::Precipitation, RenderMode::Differential) => {
                ScaleId::PrecipitationDifference
            }
            (MetricFamily::Snowfall, RenderMode::Absolute) => ScaleId::Snowfall,
            (MetricFamily::Snowfall, RenderMode::Differential) => ScaleId::SnowfallDifference,
            (MetricFamily::Wind, RenderMode::Absolute) => ScaleId::Wind,
            (MetricFamily::Wind, RenderMode::Differential) => ScaleId::WindDifference,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            ScaleId::Temperature => "temperature",
            ScaleId::TemperatureDifference => "temperature-difference",
            ScaleId::Precipitation => "precipitation",
            ScaleId::PrecipitationDifference => "precipitation-difference",
            ScaleId::Snowfall => "snowfall",
            ScaleId::SnowfallDifference => "snowfall-difference",
            ScaleId::Wind => "wind",
            ScaleId::WindDifference => "wind-difference",
        }
    }

    fn table(&self) -> &'static [(f64, Color)] {
        match self {
            ScaleId::Temperature => palettes::TEMPERATURE,
            ScaleId::TemperatureDifference => palettes::TEMPERATURE_DIFFERENCE,
            ScaleId::Precipitation => palettes::PRECIPITATION,
            ScaleId::PrecipitationDifference => palettes::PRECIPITATION_DIFFERENCE,
            ScaleId::Snowfall => palettes::SNOWFALL,
            ScaleId::SnowfallDifference => palettes::SNOWFALL_DIFFERENCE,
            ScaleId::Wind => palettes::WIND,
            ScaleId::WindDifference => palettes::WIND_DIFFERENCE,
        }
    }

    /// The built-in scale for this id.
    pub fn builtin(&self) -> ColorScale {
        ColorScale::from_table(self.id(), self.table())
    }
}

impl fmt::Display for ScaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// When labels switch to light text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContrastRule {
    /// Absolute mode: light text when the value is above this.
    pub absolute_light_above: f64,
    /// Differential mode: light text when the magnitude is above this.
    pub differential_light_beyond: f64,
}

impl ContrastRule {
    pub fn for_family(family: MetricFamily) -> Self {
        let absolute_light_above = match family {
            MetricFamily::Temperature => 100.0,
            MetricFamily::Precipitation => 1.0,
            MetricFamily::Snowfall => 6.0,
            MetricFamily::Wind => 30.0,
        };
        Self {
            absolute_light_above,
            differential_light_beyond: 20.0,
        }
    }

    pub fn text_color(&self, value: f64, mode: RenderMode) -> Color {
        let light = match mode {
            RenderMode::Absolute => value > self.absolute_light_above,
            RenderMode::Differential => value.abs() > self.differential_light_beyond,
        };
        if light {
            LIGHT_TEXT
        } else {
            DARK_TEXT
        }
    }
}

#[derive(Debug, Error)]
pub enum StyleError {
    #[error("Failed to read style file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid style JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Scale(#[from] ScaleError),
}

/// Style overrides loaded from JSON. Anything not named keeps its built-in value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    pub scales: HashMap<ScaleId, ScaleDefinition>,
    #[serde(default)]
    pub contrast: HashMap<MetricFamily, ContrastOverride>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaleDefinition {
    pub stops: Vec<Breakpoint>,
    pub floor_color: Option<Color>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContrastOverride {
    pub absolute_light_above: Option<f64>,
    pub differential_light_beyond: Option<f64>,
}

impl StyleConfig {
    pub fn from_json(json_str: &str) -> Result<Self, StyleError> {
        Ok(serde_json::from_str(json_str)?)
    }
}

/// Every scale and contrast rule a rendering may need.
#[derive(Debug, Clone)]
pub struct StyleSet {
    scales: HashMap<ScaleId, ColorScale>,
    contrast: HashMap<MetricFamily, ContrastRule>,
}

impl Default for StyleSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl StyleSet {
    pub fn builtin() -> Self {
        let scales = ScaleId::ALL.iter().map(|id| (*id, id.builtin())).collect();
        let contrast = [
            MetricFamily::Temperature,
            MetricFamily::Precipitation,
            MetricFamily::Snowfall,
            MetricFamily::Wind,
        ]
        .into_iter()
        .map(|family| (family, ContrastRule::for_family(family)))
        .collect();

        Self { scales, contrast }
    }

    /// Built-in styles with the overrides in `json_str` applied.
    pub fn from_json(json_str: &str) -> Result<Self, StyleError> {
        Self::builtin().with_overrides(&StyleConfig::from_json(json_str)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StyleError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| StyleError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Replace the scales and contrast thresholds named in `config`.
    pub fn with_overrides(mut self, config: &StyleConfig) -> Result<Self, StyleError> {
        for (id, definition) in &config.scales {
            let mut scale = ColorScale::new(id.id(), definition.stops.clone())?;
            if let Some(floor) = definition.floor_color {
                scale = scale.with_floor(floor);
            }
            debug!(scale = %id, stops = definition.stops.len(), "Overriding scale");
            self.scales.insert(*id, scale);
        }

        for (family, overrides) in &config.contrast {
            let rule = self
                .contrast
                .entry(*family)
                .or_insert_with(|| ContrastRule::for_family(*family));
            if let Some(v) = overrides.absolute_light_above {
                rule.absolute_light_above = v;
            }
            if let Some(v) = overrides.differential_light_beyond {
                rule.differential_light_beyond = v;
            }
        }

        Ok(self)
    }

    pub fn scale(&self, id: ScaleId) -> &ColorScale {
        // every id is populated by builtin() and overrides only replace
        &self.scales[&id]
    }

    pub fn contrast(&self, family: MetricFamily) -> ContrastRule {
        self.contrast
            .get(&family)
            .copied()
            .unwrap_or_else(|| ContrastRule::for_family(family))
    }

    /// Color policy for `family` values rendered in `mode`.
    pub fn policy(&self, family: MetricFamily, mode: RenderMode) -> ColorPolicy<'_> {
        ColorPolicy::new(
            self.scale(ScaleId::for_family(family, mode)),
            family,
            mode,
            self.contrast(family),
        )
    }
}
