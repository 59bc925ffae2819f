//! Tests for month-day keys and calendar helpers.

use heatmap_common::calendar::{
    dates_of_year, days_in_month, is_leap_year, MonthDay, ParseMonthDayError,
};

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_parse_month_day() {
    let key: MonthDay = "07-04".parse().unwrap();
    assert_eq!(key.month(), 7);
    assert_eq!(key.day(), 4);
}

#[test]
fn test_parse_month_day_without_padding() {
    let key: MonthDay = "2-9".parse().unwrap();
    assert_eq!(key.to_string(), "02-09");
}

#[test]
fn test_parse_month_day_rejects_garbage() {
    assert_eq!(
        "0704".parse::<MonthDay>(),
        Err(ParseMonthDayError("0704".to_string()))
    );
    assert!("02-30".parse::<MonthDay>().is_err());
    assert!("xx-01".parse::<MonthDay>().is_err());
}

#[test]
fn test_month_day_serde_as_string() {
    let key = MonthDay::new(2, 29).unwrap();
    let json = serde_json::to_string(&key).unwrap();
    assert_eq!(json, "\"02-29\"");

    let back: MonthDay = serde_json::from_str(&json).unwrap();
    assert_eq!(back, key);
}

// ============================================================================
// Ordering and calendar walks
// ============================================================================

#[test]
fn test_month_day_orders_by_month_then_day() {
    let mut keys: Vec<MonthDay> = ["12-01", "01-31", "02-29", "01-02"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    keys.sort();
    let rendered: Vec<String> = keys.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["01-02", "01-31", "02-29", "12-01"]);
}

#[test]
fn test_century_leap_rules() {
    assert!(is_leap_year(2000));
    assert!(!is_leap_year(1900));
    assert!(is_leap_year(2024));
    assert!(!is_leap_year(2023));
}

#[test]
fn test_february_length() {
    assert_eq!(days_in_month(2020, 2), 29);
    assert_eq!(days_in_month(2021, 2), 28);
    assert_eq!(days_in_month(2021, 13), 0);
}

#[test]
fn test_dates_of_year_is_row_major() {
    let dates: Vec<_> = dates_of_year(2021).collect();
    assert_eq!(dates.first().unwrap().to_string(), "2021-01-01");
    assert_eq!(dates.last().unwrap().to_string(), "2021-12-31");
    assert!(dates.windows(2).all(|w| w[0] < w[1]));
}
