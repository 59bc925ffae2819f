//! Cell label formatting.

use heatmap_common::MetricFamily;

use crate::policy::RenderMode;

/// Format `value` the way it is printed inside a cell.
///
/// Temperature and wind print as whole numbers, ties to even. Precipitation
/// and snowfall are first rounded to hundredths: what rounds to zero is a zero
/// amount, what stays below 1 prints two decimals with the leading zero
/// dropped (`.05`), and the rest prints one decimal (`0.996` is `1.0`). A zero
/// amount prints nothing in absolute mode and `0` in differential mode.
pub fn format_label(value: f64, family: MetricFamily, mode: RenderMode) -> String {
    if !value.is_finite() {
        return String::new();
    }

    if family.rounds_to_whole() {
        return format!("{}", value.round_ties_even() as i64);
    }

    let hundredths = (value * 100.0).round() / 100.0;
    if hundredths == 0.0 {
        return match mode {
            RenderMode::Absolute => String::new(),
            RenderMode::Differential => "0".to_string(),
        };
    }

    if hundredths.abs() < 1.0 {
        let text = format!("{:.2}", hundredths);
        if let Some(rest) = text.strip_prefix("-0.") {
            format!("-.{}", rest)
        } else if let Some(rest) = text.strip_prefix("0.") {
            format!(".{}", rest)
        } else {
            text
        }
    } else {
        format!("{:.1}", value)
    }
}
