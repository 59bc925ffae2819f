//! NOAA NCEI client: CDO daily summaries and 1991-2020 daily normals, both
//! served as CSV.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use reqwest::{Client, StatusCode};
use tracing::{debug, info, instrument};

use heatmap_common::metric::fields;
use heatmap_common::{InputRecord, MonthDay, SeriesInput, NORMALS_ANCHOR_YEAR};

use crate::error::{FetchError, Result};
use crate::source::{Dataset, FetchRequest, FetchedSeries, SeriesSource};

pub const DEFAULT_BASE_URL: &str = "https://www.ncei.noaa.gov";

const DAILY_DATA_TYPES: &str = "TMAX,TMIN,TAVG,PRCP,SNOW,AWND";

#[derive(Debug, Clone)]
pub struct NoaaConfig {
    /// Scheme and host, without a trailing slash.
    pub base_url: String,
    /// Per-request HTTP timeout. The fetcher applies its own overall timeout.
    pub request_timeout: Duration,
}

impl Default for NoaaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

pub struct NoaaClient {
    client: Client,
    config: NoaaConfig,
}

impl NoaaClient {
    pub fn new(config: NoaaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("calendar-heatmap/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::UpstreamUnavailable(format!("HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    /// URL serving `request`.
    pub fn url_for(&self, request: &FetchRequest) -> Result<String> {
        let base = self.config.base_url.trim_end_matches('/');
        match request.dataset {
            Dataset::DailySummaries => {
                let year = request.year.ok_or_else(|| {
                    FetchError::NotFound(format!("{}: daily summaries need a year", request))
                })?;
                Ok(format!(
                    "{}/access/services/data/v1?dataset=daily-summaries&stations={}\
                     &startDate={year}-01-01&endDate={year}-12-31&dataTypes={}\
                     &units=standard&format=csv&includeStationName=true",
                    base, request.station, DAILY_DATA_TYPES
                ))
            }
            Dataset::DailyNormals => Ok(format!(
                "{}/data/normals-daily/1991-2020/access/{}.csv",
                base, request.station
            )),
        }
    }
}

#[async_trait]
impl SeriesSource for NoaaClient {
    fn name(&self) -> &str {
        "noaa"
    }

    #[instrument(skip(self), fields(station = %request.station))]
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchedSeries> {
        let url = self.url_for(request)?;
        debug!(url = %url, "Requesting NOAA data");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::UpstreamUnavailable(format!("{}: {}", request, e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(request.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::UpstreamUnavailable(format!(
                "{}: HTTP {}",
                request, status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::UpstreamUnavailable(format!("{}: {}", request, e)))?;

        let fetched = parse_csv(&body, request)?;
        info!(
            records = fetched.input.len(),
            name = %fetched.display_name,
            dataset = ?request.dataset,
            "Fetched NOAA series"
        );
        Ok(fetched)
    }
}

/// How each CSV column is read.
struct Columns {
    date: DateColumns,
    name: Option<usize>,
    /// Column index to canonical field name.
    values: Vec<(usize, &'static str)>,
}

enum DateColumns {
    Date(usize),
    MonthDay { month: usize, day: usize },
}

/// Parse a NOAA CSV body into a [`FetchedSeries`].
///
/// Daily summaries carry `YYYY-MM-DD` dates and canonical column names.
/// Normals carry `MM-DD` dates (or `month`/`day` columns) and `DLY-*-NORMAL`
/// columns; their dates are placed in the anchor year 2000. Empty and
/// non-numeric cells are missing values.
pub fn parse_csv(body: &str, request: &FetchRequest) -> Result<FetchedSeries> {
    if body.trim().is_empty() {
        return Err(FetchError::NotFound(format!("{}: empty response", request)));
    }

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| FetchError::MalformedResponse(format!("{}: {}", request, e)))?
        .clone();
    let columns = resolve_columns(&headers, request)?;

    let mut input = SeriesInput::new();
    for (_, field) in &columns.values {
        input.declare_field(*field);
    }

    let mut station_name: Option<String> = None;
    for (row, record) in reader.records().enumerate() {
        let record = record
            .map_err(|e| FetchError::MalformedResponse(format!("{}: {}", request, e)))?;

        let date = parse_date(&record, &columns.date, request.dataset).ok_or_else(|| {
            FetchError::MalformedResponse(format!(
                "{}: unparseable date on row {}",
                request,
                row + 2
            ))
        })?;

        if station_name.is_none() {
            station_name = columns
                .name
                .and_then(|i| record.get(i))
                .filter(|n| !n.is_empty())
                .map(title_case);
        }

        let mut day = InputRecord::new(date);
        for (index, field) in &columns.values {
            if let Some(value) = record.get(*index).and_then(parse_value) {
                day.fields.insert((*field).to_string(), value);
            }
        }
        input.push(day);
    }

    if input.is_empty() {
        return Err(FetchError::NotFound(format!("{}: no rows", request)));
    }

    Ok(FetchedSeries {
        input,
        display_name: station_name.unwrap_or_else(|| request.station.clone()),
    })
}

fn resolve_columns(headers: &StringRecord, request: &FetchRequest) -> Result<Columns> {
    let index: HashMap<&str, usize> = headers.iter().enumerate().map(|(i, h)| (h, i)).collect();

    let date = match (index.get("DATE"), index.get("month"), index.get("day")) {
        (Some(&i), _, _) => DateColumns::Date(i),
        (None, Some(&month), Some(&day)) if request.dataset == Dataset::DailyNormals => {
            DateColumns::MonthDay { month, day }
        }
        _ => {
            return Err(FetchError::MalformedResponse(format!(
                "{}: no DATE column",
                request
            )))
        }
    };

    let values = fields::ALL
        .iter()
        .filter_map(|field| {
            let column = match request.dataset {
                Dataset::DailySummaries => index.get(*field),
                Dataset::DailyNormals => index.get(format!("DLY-{}-NORMAL", field).as_str()),
            };
            column.map(|&i| (i, *field))
        })
        .collect();

    Ok(Columns {
        date,
        name: index.get("NAME").copied(),
        values,
    })
}

fn parse_date(record: &StringRecord, columns: &DateColumns, dataset: Dataset) -> Option<NaiveDate> {
    match columns {
        DateColumns::Date(i) => {
            let raw = record.get(*i)?;
            match dataset {
                Dataset::DailySummaries => NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok(),
                Dataset::DailyNormals => raw
                    .parse::<MonthDay>()
                    .ok()
                    .and_then(|md| md.in_year(NORMALS_ANCHOR_YEAR)),
            }
        }
        DateColumns::MonthDay { month, day } => {
            let month = record.get(*month)?.parse().ok()?;
            let day = record.get(*day)?.parse().ok()?;
            MonthDay::new(month, day)?.in_year(NORMALS_ANCHOR_YEAR)
        }
    }
}

fn parse_value(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Capitalize the first letter of every word and lowercase the rest, where a
/// word is a run of letters.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
