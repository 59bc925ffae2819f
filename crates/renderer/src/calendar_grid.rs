//! Calendar grid rendering.
//!
//! One row per month (January on top), one column per day of month. Only
//! dates that exist in the reference year get a cell.

use std::collections::HashMap;

use chrono::NaiveDate;
use image::RgbaImage;
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use heatmap_common::calendar::{days_in_month, month_name, validate_reference_year};
use heatmap_common::AlignedCell;

use crate::error::RenderError;
use crate::png::encode_png;
use crate::policy::ColorPolicy;
use crate::scale::Color;
use crate::text::LabelFont;

const MONTHS: u32 = 12;
const DAY_COLUMNS: u32 = 31;
const BASE_CELL_SIZE: u32 = 40;

pub const MIN_CELL_SIZE: u32 = 4;
pub const MAX_CELL_SIZE: u32 = 200;
/// Largest width or height of a rendered calendar, in pixels.
pub const MAX_IMAGE_SIDE: u32 = 16_384;

/// Pixel geometry and decoration colors of a calendar image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub cell_size: u32,
    /// Background strip left between neighbouring cells.
    pub gap: u32,
    /// Room for month names.
    pub margin_left: u32,
    pub margin_right: u32,
    pub margin_top: u32,
    pub margin_bottom: u32,
    pub title_font_size: f32,
    pub label_font_size: f32,
    pub axis_font_size: f32,
    pub background: Color,
    pub axis_color: Color,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            cell_size: BASE_CELL_SIZE,
            gap: 1,
            margin_left: 110,
            margin_right: 20,
            margin_top: 16,
            margin_bottom: 20,
            title_font_size: 26.0,
            label_font_size: 15.0,
            axis_font_size: 14.0,
            background: Color::rgb(0, 0, 0),
            axis_color: Color::rgb(255, 255, 255),
        }
    }
}

impl GridLayout {
    /// Default layout scaled to `cell_size` pixels per cell, clamped to
    /// `MIN_CELL_SIZE..=MAX_CELL_SIZE`.
    pub fn with_cell_size(cell_size: u32) -> Self {
        let base = Self::default();
        let cell_size = cell_size.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE);
        let factor = cell_size as f32 / BASE_CELL_SIZE as f32;
        let px = |v: u32| ((v as f32 * factor).round() as u32).max(1);

        Self {
            cell_size,
            gap: base.gap,
            margin_left: px(base.margin_left),
            margin_right: px(base.margin_right),
            margin_top: px(base.margin_top),
            margin_bottom: px(base.margin_bottom),
            title_font_size: base.title_font_size * factor,
            label_font_size: base.label_font_size * factor,
            axis_font_size: base.axis_font_size * factor,
            ..base
        }
    }

    fn title_line_height(&self) -> u32 {
        (self.title_font_size * 1.3).ceil() as u32
    }

    fn day_header_height(&self) -> u32 {
        (self.axis_font_size * 1.8).ceil() as u32
    }
}

/// Resolved pixel positions for one title.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Geometry {
    grid_left: u32,
    grid_top: u32,
    cell: u32,
    gap: u32,
    width: u32,
    height: u32,
}

impl Geometry {
    /// Pixel positions for `layout`. Fails when the cell size is out of range
    /// or the image would exceed [`MAX_IMAGE_SIDE`].
    fn new(layout: &GridLayout, title_lines: u32) -> Result<Self, RenderError> {
        let cell = layout.cell_size;
        if !(MIN_CELL_SIZE..=MAX_CELL_SIZE).contains(&cell) {
            return Err(RenderError::InvalidLayout(format!(
                "cell size {} outside {}..={}",
                cell, MIN_CELL_SIZE, MAX_CELL_SIZE
            )));
        }

        let sum = |parts: &[u32]| parts.iter().try_fold(0u32, |acc, v| acc.checked_add(*v));
        let too_large = || {
            RenderError::InvalidLayout(format!("image larger than {} pixels", MAX_IMAGE_SIDE))
        };

        let title_height = title_lines
            .checked_mul(layout.title_line_height())
            .ok_or_else(too_large)?;
        let grid_left = layout.margin_left;
        let grid_top = sum(&[layout.margin_top, title_height, layout.day_header_height()])
            .ok_or_else(too_large)?;
        let width = sum(&[grid_left, DAY_COLUMNS * cell, layout.margin_right])
            .filter(|w| *w <= MAX_IMAGE_SIDE)
            .ok_or_else(too_large)?;
        let height = sum(&[grid_top, MONTHS * cell, layout.margin_bottom])
            .filter(|h| *h <= MAX_IMAGE_SIDE)
            .ok_or_else(too_large)?;

        Ok(Self {
            grid_left,
            grid_top,
            cell,
            gap: layout.gap.min(cell / 4),
            width,
            height,
        })
    }

    /// Filled area of a cell: the cell square minus the gap on its top and left.
    fn cell_rect(&self, month: u32, day: u32) -> Rect {
        let x = self.grid_left + (day - 1) * self.cell + self.gap;
        let y = self.grid_top + (month - 1) * self.cell + self.gap;
        let side = self.cell - self.gap;
        Rect::at(x as i32, y as i32).of_size(side, side)
    }

    fn cell_center(&self, month: u32, day: u32) -> (u32, u32) {
        let side = self.cell - self.gap;
        (
            self.grid_left + (day - 1) * self.cell + self.gap + side / 2,
            self.grid_top + (month - 1) * self.cell + self.gap + side / 2,
        )
    }
}

/// A rendered calendar and the title it was drawn with.
#[derive(Debug, Clone)]
pub struct CalendarImage {
    image: RgbaImage,
    title: String,
    year: i32,
    geometry: Geometry,
}

impl CalendarImage {
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Pixel at the center of the `(month, day)` cell, `None` for dates that
    /// do not exist in the rendered year.
    pub fn cell_center(&self, month: u32, day: u32) -> Option<(u32, u32)> {
        if !(1..=MONTHS).contains(&month) || day == 0 || day > days_in_month(self.year, month) {
            return None;
        }
        Some(self.geometry.cell_center(month, day))
    }

    /// Color one pixel inside the `(month, day)` cell, off the label.
    ///
    /// Samples near the cell's top-left corner so label glyphs never interfere.
    pub fn pixel_at_cell(&self, month: u32, day: u32) -> Option<Color> {
        self.cell_center(month, day)?;
        let rect = self.geometry.cell_rect(month, day);
        let inset = (rect.width() / 8).max(1);
        let p = self
            .image
            .get_pixel(rect.left() as u32 + inset, rect.top() as u32 + inset);
        Some(Color::new(p[0], p[1], p[2], p[3]))
    }

    pub fn to_png(&self) -> Result<Vec<u8>, RenderError> {
        encode_png(&self.image)
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

/// Render `cells` as a 12 x 31 calendar for `reference_year`.
///
/// Cells are matched by display date; the first cell for a date wins. Dates
/// without a cell, and cells without a value, get the no-data fill. Without a
/// font the grid is drawn without title, axes or labels.
#[instrument(skip_all, fields(year = reference_year, cells = cells.len()))]
pub fn render_calendar(
    cells: &[AlignedCell],
    reference_year: i32,
    policy: &ColorPolicy<'_>,
    title: &str,
    layout: &GridLayout,
    font: Option<&LabelFont>,
) -> Result<CalendarImage, RenderError> {
    validate_reference_year(reference_year)?;

    let mut values: HashMap<NaiveDate, Option<f64>> = HashMap::with_capacity(cells.len());
    for cell in cells {
        values.entry(cell.display_date).or_insert(cell.value);
    }
    if values.len() < cells.len() {
        debug!(duplicates = cells.len() - values.len(), "Ignoring duplicate cells");
    }

    let title_lines = if title.is_empty() { 0 } else { title.lines().count() as u32 };
    let geometry = Geometry::new(layout, title_lines)?;
    let mut img = RgbaImage::from_pixel(geometry.width, geometry.height, layout.background.to_rgba());

    if let Some(font) = font {
        draw_axes(&mut img, font, &geometry, layout, title);
    } else {
        warn!("Rendering calendar without a font; labels and axes are omitted");
    }

    let mut drawn = 0usize;
    let mut labeled = 0usize;
    for month in 1..=MONTHS {
        for day in 1..=days_in_month(reference_year, month) {
            let value = NaiveDate::from_ymd_opt(reference_year, month, day)
                .and_then(|date| values.get(&date).copied())
                .flatten();
            let style = policy.color_for(value);

            draw_filled_rect_mut(&mut img, geometry.cell_rect(month, day), style.fill.to_rgba());
            drawn += 1;

            if let Some(font) = font {
                if !style.label.is_empty() {
                    let (cx, cy) = geometry.cell_center(month, day);
                    font.draw_centered(
                        &mut img,
                        &style.label,
                        cx as i32,
                        cy as i32,
                        layout.label_font_size,
                        style.text,
                    );
                    labeled += 1;
                }
            }
        }
    }

    debug!(
        drawn,
        labeled,
        width = geometry.width,
        height = geometry.height,
        "Rendered calendar grid"
    );

    Ok(CalendarImage {
        image: img,
        title: title.to_string(),
        year: reference_year,
        geometry,
    })
}

fn draw_axes(
    img: &mut RgbaImage,
    font: &LabelFont,
    geometry: &Geometry,
    layout: &GridLayout,
    title: &str,
) {
    let line_height = layout.title_line_height();
    let center_x = (geometry.width / 2) as i32;
    for (i, line) in title.lines().enumerate() {
        let cy = layout.margin_top + i as u32 * line_height + line_height / 2;
        font.draw_centered(
            img,
            line,
            center_x,
            cy as i32,
            layout.title_font_size,
            layout.axis_color,
        );
    }

    let header_cy = geometry.grid_top - layout.day_header_height() / 2;
    for day in 1..=DAY_COLUMNS {
        let (cx, _) = geometry.cell_center(1, day);
        font.draw_centered(
            img,
            &day.to_string(),
            cx as i32,
            header_cy as i32,
            layout.axis_font_size,
            layout.axis_color,
        );
    }

    let right = geometry.grid_left as i32 - (layout.axis_font_size / 2.0) as i32;
    for month in 1..=MONTHS {
        let (_, cy) = geometry.cell_center(month, 1);
        font.draw_right_aligned(
            img,
            month_name(month),
            right,
            cy as i32,
            layout.axis_font_size,
            layout.axis_color,
        );
    }
}
