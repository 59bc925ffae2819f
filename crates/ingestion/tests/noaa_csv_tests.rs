//! Tests for parsing NOAA CSV responses.

use heatmap_common::metric::fields;
use heatmap_common::{Metric, SeriesKind};
use ingestion::{parse_csv, FetchError, FetchRequest};
use series::build_series;
use test_utils::date;

const SUMMARIES: &str = "\
\"STATION\",\"DATE\",\"NAME\",\"AWND\",\"PRCP\",\"SNOW\",\"TMAX\",\"TMIN\"
\"USW00094728\",\"2021-01-01\",\"NY CITY CENTRAL PARK, NY US\",\"5.1\",\"0.06\",\"0.0\",\"41\",\"33\"
\"USW00094728\",\"2021-01-02\",\"NY CITY CENTRAL PARK, NY US\",\"9.8\",\"0.00\",\"0.0\",\"50\",\"35\"
\"USW00094728\",\"2021-01-03\",\"NY CITY CENTRAL PARK, NY US\",\"\",\"T\",\"\",\"38\",\"\"
";

const NORMALS: &str = "\
STATION,DATE,LATITUDE,LONGITUDE,ELEVATION,NAME,month,day,DLY-TMAX-NORMAL,DLY-TMIN-NORMAL,DLY-TAVG-NORMAL
USW00094728,01-01,40.77898,-73.96925,42.7,\"NY CITY CENTRAL PARK, NY US\",01,01,39.5,28.6,34.0
USW00094728,02-29,40.77898,-73.96925,42.7,\"NY CITY CENTRAL PARK, NY US\",02,29,43.9,30.1,37.0
USW00094728,03-01,40.77898,-73.96925,42.7,\"NY CITY CENTRAL PARK, NY US\",03,01,44.1,30.2,37.2
";

fn summaries_request() -> FetchRequest {
    FetchRequest::daily_summaries("USW00094728", 2021)
}

#[test]
fn test_summaries_fields_and_name() {
    let fetched = parse_csv(SUMMARIES, &summaries_request()).unwrap();
    assert_eq!(fetched.display_name, "Ny City Central Park, Ny Us");
    assert_eq!(fetched.input.len(), 3);

    for field in [fields::TMAX, fields::TMIN, fields::PRCP, fields::SNOW, fields::AWND] {
        assert!(fetched.input.has_field(field), "{}", field);
    }
    assert!(!fetched.input.has_field(fields::TAVG));

    let first = &fetched.input.records[0];
    assert_eq!(first.date, date(2021, 1, 1));
    assert_eq!(first.get(fields::TMAX), Some(41.0));
    assert_eq!(first.get(fields::PRCP), Some(0.06));
}

#[test]
fn test_non_numeric_cells_are_missing() {
    let fetched = parse_csv(SUMMARIES, &summaries_request()).unwrap();
    let third = &fetched.input.records[2];
    assert_eq!(third.get(fields::TMAX), Some(38.0));
    // trace precipitation and blanks
    assert_eq!(third.get(fields::PRCP), None);
    assert_eq!(third.get(fields::TMIN), None);
    assert_eq!(third.get(fields::AWND), None);
}

#[test]
fn test_average_derived_after_fetch() {
    let fetched = parse_csv(SUMMARIES, &summaries_request()).unwrap();
    let series = build_series(
        &fetched.input,
        Metric::AverageTemperature,
        2021,
        SeriesKind::Observed,
    )
    .unwrap();

    let jan1 = "01-01".parse().unwrap();
    let jan2 = "01-02".parse().unwrap();
    let jan3 = "01-03".parse().unwrap();
    assert_eq!(series.value(&jan1), Some(37.0));
    // 42.5 rounds to even
    assert_eq!(series.value(&jan2), Some(42.0));
    assert_eq!(series.value(&jan3), None);
}

#[test]
fn test_normals_are_anchored_to_2000() {
    let request = FetchRequest::daily_normals("USW00094728");
    let fetched = parse_csv(NORMALS, &request).unwrap();

    let dates: Vec<_> = fetched.input.records.iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![date(2000, 1, 1), date(2000, 2, 29), date(2000, 3, 1)]);
    assert_eq!(fetched.input.records[0].get(fields::TMAX), Some(39.5));
    assert!(fetched.input.has_field(fields::TAVG));
    assert!(!fetched.input.has_field(fields::PRCP));
}

#[test]
fn test_normals_projected_onto_common_year() {
    let request = FetchRequest::daily_normals("USW00094728");
    let fetched = parse_csv(NORMALS, &request).unwrap();
    let series = build_series(
        &fetched.input,
        Metric::HighTemperature,
        2021,
        SeriesKind::ClimateNormal,
    )
    .unwrap();

    assert_eq!(series.len(), 2);
    assert!(!series.contains(&"02-29".parse().unwrap()));
    // 39.5 rounds to even
    assert_eq!(series.value(&"01-01".parse().unwrap()), Some(40.0));
}

#[test]
fn test_normals_with_month_day_columns() {
    let body = "STATION,month,day,DLY-TMIN-NORMAL\nX,7,4,68.2\n";
    let fetched = parse_csv(body, &FetchRequest::daily_normals("X")).unwrap();
    assert_eq!(fetched.input.records[0].date, date(2000, 7, 4));
    assert_eq!(fetched.display_name, "X");
}

#[test]
fn test_empty_body_is_not_found() {
    assert!(matches!(
        parse_csv("", &summaries_request()),
        Err(FetchError::NotFound(_))
    ));
    assert!(matches!(
        parse_csv("\"STATION\",\"DATE\",\"TMAX\"\n", &summaries_request()),
        Err(FetchError::NotFound(_))
    ));
}

#[test]
fn test_missing_date_column_is_malformed() {
    let body = "STATION,TMAX\nX,40\n";
    assert!(matches!(
        parse_csv(body, &summaries_request()),
        Err(FetchError::MalformedResponse(_))
    ));
}

#[test]
fn test_bad_date_is_malformed() {
    let body = "STATION,DATE,TMAX\nX,2021-13-01,40\n";
    let err = parse_csv(body, &summaries_request()).unwrap_err();
    assert!(matches!(err, FetchError::MalformedResponse(ref m) if m.contains("row 2")));
}
