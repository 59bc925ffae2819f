//! Tests for calendar grid rendering.
//!
//! No font is bundled, so these render without labels. Cell fills are
//! checked through `CalendarImage::pixel_at_cell`.

use heatmap_common::{AlignedCell, HeatmapError, Metric, MetricFamily, SeriesKind};
use renderer::{
    render_calendar, Color, GridLayout, RenderError, RenderMode, StyleSet, NO_DATA,
};
use series::{align, build_series, AlignmentPolicy};
use test_utils::{date, station_year};

const BACKGROUND: Color = Color::rgb(40, 40, 40);

fn layout() -> GridLayout {
    GridLayout {
        background: BACKGROUND,
        ..GridLayout::with_cell_size(12)
    }
}

fn constant_cells(year: i32, value: f64) -> Vec<AlignedCell> {
    heatmap_common::calendar::dates_of_year(year)
        .map(|d| AlignedCell::new(d, Some(value)))
        .collect()
}

#[test]
fn test_leap_day_cell_only_in_leap_years() {
    let styles = StyleSet::builtin();
    let policy = styles.policy(MetricFamily::Temperature, RenderMode::Absolute);

    let leap = render_calendar(&constant_cells(2020, 60.0), 2020, &policy, "", &layout(), None)
        .unwrap();
    let common = render_calendar(&constant_cells(2021, 60.0), 2021, &policy, "", &layout(), None)
        .unwrap();

    assert!(leap.cell_center(2, 29).is_some());
    assert!(common.cell_center(2, 29).is_none());
    assert!(common.cell_center(4, 31).is_none());
    assert!(common.cell_center(12, 31).is_some());
}

#[test]
fn test_missing_dates_are_left_as_background() {
    let styles = StyleSet::builtin();
    let policy = styles.policy(MetricFamily::Temperature, RenderMode::Absolute);
    let img = render_calendar(&constant_cells(2021, 60.0), 2021, &policy, "", &layout(), None)
        .unwrap();

    // where Feb 29 would be in a leap year
    let (x, y) = img.cell_center(2, 28).unwrap();
    let p = img.image().get_pixel(x + 12, y);
    assert_eq!(Color::new(p[0], p[1], p[2], p[3]), BACKGROUND);
}

#[test]
fn test_cells_take_policy_fill() {
    let styles = StyleSet::builtin();
    let policy = styles.policy(MetricFamily::Temperature, RenderMode::Absolute);
    let cells = vec![
        AlignedCell::new(date(2021, 1, 1), Some(19.9)),
        AlignedCell::new(date(2021, 7, 4), Some(95.0)),
        AlignedCell::new(date(2021, 3, 1), None),
    ];

    let img = render_calendar(&cells, 2021, &policy, "Title\nSubtitle", &layout(), None).unwrap();

    assert_eq!(img.pixel_at_cell(1, 1), Some(policy.fill_for(Some(19.9))));
    assert_eq!(img.pixel_at_cell(7, 4), Some(policy.fill_for(Some(95.0))));
    assert_eq!(img.pixel_at_cell(3, 1), Some(NO_DATA));
    // no cell at all
    assert_eq!(img.pixel_at_cell(6, 15), Some(NO_DATA));
    assert_eq!(img.title(), "Title\nSubtitle");
}

#[test]
fn test_first_cell_for_a_date_wins() {
    let styles = StyleSet::builtin();
    let policy = styles.policy(MetricFamily::Temperature, RenderMode::Differential);
    let cells = vec![
        AlignedCell::new(date(2021, 5, 5), Some(-25.0)),
        AlignedCell::new(date(2021, 5, 5), Some(25.0)),
    ];

    let img = render_calendar(&cells, 2021, &policy, "", &layout(), None).unwrap();
    assert_eq!(img.pixel_at_cell(5, 5), Some(policy.fill_for(Some(-25.0))));
}

#[test]
fn test_title_adds_height() {
    let styles = StyleSet::builtin();
    let policy = styles.policy(MetricFamily::Wind, RenderMode::Absolute);
    let cells = constant_cells(2021, 10.0);

    let bare = render_calendar(&cells, 2021, &policy, "", &layout(), None).unwrap();
    let titled = render_calendar(&cells, 2021, &policy, "A\nB", &layout(), None).unwrap();

    assert_eq!(bare.width(), titled.width());
    assert!(titled.height() > bare.height());
}

#[test]
fn test_unsupported_year() {
    let styles = StyleSet::builtin();
    let policy = styles.policy(MetricFamily::Temperature, RenderMode::Absolute);
    let err = render_calendar(&[], 1200, &policy, "", &layout(), None).unwrap_err();
    assert!(matches!(
        err,
        RenderError::Core(HeatmapError::InvalidReferenceYear { year: 1200, .. })
    ));
}

#[test]
fn test_two_year_comparison_renders_to_png() {
    let this_year = build_series(
        &station_year(2021),
        Metric::HighTemperature,
        2021,
        SeriesKind::Observed,
    )
    .unwrap();
    let last_year = build_series(
        &station_year(2020),
        Metric::HighTemperature,
        2020,
        SeriesKind::Observed,
    )
    .unwrap();
    let cells = align(&this_year, &last_year, AlignmentPolicy::SameDayOfYear).unwrap();

    let styles = StyleSet::builtin();
    let policy = styles.policy(MetricFamily::Temperature, RenderMode::Differential);
    let img = render_calendar(&cells, 2021, &policy, "2021 vs 2020", &layout(), None).unwrap();

    let png = img.to_png().unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (img.width(), img.height()));
    assert_eq!(&decoded, img.image());
}
