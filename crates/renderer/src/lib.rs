//! Color mapping and calendar rendering.
//!
//! - [`scale`]: breakpoint tables with step and bracket lookups
//! - [`policy`]: per-cell fill, text color and label
//! - [`style`]: built-in scales, contrast rules and JSON overrides
//! - [`calendar_grid`]: the 12 x 31 raster and its PNG encoding

pub mod calendar_grid;
pub mod error;
pub mod label;
pub mod palettes;
pub mod png;
pub mod policy;
pub mod scale;
pub mod style;
pub mod text;

pub use calendar_grid::{render_calendar, CalendarImage, GridLayout, MAX_CELL_SIZE, MIN_CELL_SIZE};
pub use error::RenderError;
pub use label::format_label;
pub use png::encode_png;
pub use policy::{fill_color, CellStyle, ColorPolicy, RenderMode};
pub use scale::{Breakpoint, Color, ColorScale, ScaleError, DARK_TEXT, LIGHT_TEXT, NEUTRAL, NO_DATA};
pub use style::{ContrastOverride, ContrastRule, ScaleDefinition, ScaleId, StyleConfig, StyleError, StyleSet};
pub use text::LabelFont;
