use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::errors::AppError;
use crate::models::{DateWindow, MetricRow};

const DIMENSIONS: [&str; 3] = ["country", "region", "date"];
const METRICS: [&str; 3] = ["sessions", "conversions", "revenue"];

/// Read-only analytics query source. The HTTP implementation talks to the
/// external provider; tests substitute their own.
#[async_trait]
pub trait AnalyticsSource: Send + Sync {
    async fn run_report(&self, window: DateWindow) -> Result<Vec<MetricRow>, AppError>;
}

pub struct HttpAnalyticsSource {
    http: Client,
    base_url: String,
    property_id: String,
    api_key: String,
}

impl HttpAnalyticsSource {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            property_id: config.property_id.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    property_id: &'a str,
    dimensions: &'a [&'a str],
    metrics: &'a [&'a str],
    start_date: String,
    end_date: String,
}

#[derive(Debug, Default, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    rows: Vec<RawRow>,
}

/// Positional dimension/metric values as the provider returns them. Metric
/// values arrive as strings; either list may be short or hold nulls.
#[derive(Debug, Default, Deserialize)]
struct RawRow {
    #[serde(default)]
    dimensions: Vec<Option<String>>,
    #[serde(default)]
    metrics: Vec<Option<String>>,
}

#[async_trait]
impl AnalyticsSource for HttpAnalyticsSource {
    async fn run_report(&self, window: DateWindow) -> Result<Vec<MetricRow>, AppError> {
        let url = format!("{}/v1/reports/query", self.base_url);
        let body = QueryRequest {
            property_id: &self.property_id,
            dimensions: &DIMENSIONS,
            metrics: &METRICS,
            start_date: window.start.to_string(),
            end_date: window.end.to_string(),
        };

        debug!(url = %url, start = %window.start, end = %window.end, "querying analytics source");
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::upstream(format!(
                "analytics query returned {status}"
            )));
        }

        let payload: QueryResponse = response
            .json()
            .await
            .map_err(|err| AppError::upstream(format!("malformed analytics response: {err}")))?;

        let rows = payload
            .rows
            .into_iter()
            .map(normalize_row)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = rows.len(), "fetched report rows");
        Ok(rows)
    }
}

/// Missing metric values become 0 and missing country/region become ""
/// rather than dropping the row. A value that is present but unparseable
/// (a non-numeric metric, a bad date) counts as a malformed response.
fn normalize_row(raw: RawRow) -> Result<MetricRow, AppError> {
    let date_value = dimension(&raw, 2);
    let date = NaiveDate::parse_from_str(&date_value, "%Y-%m-%d")
        .map_err(|_| AppError::upstream(format!("malformed row date: {date_value:?}")))?;

    Ok(MetricRow {
        country: dimension(&raw, 0),
        region: dimension(&raw, 1),
        date,
        sessions: metric(&raw, 0, "sessions")?,
        conversions: metric(&raw, 1, "conversions")?,
        revenue: metric(&raw, 2, "revenue")?,
    })
}

fn dimension(raw: &RawRow, index: usize) -> String {
    raw.dimensions
        .get(index)
        .and_then(Clone::clone)
        .unwrap_or_default()
}

fn metric<T: std::str::FromStr + Default>(
    raw: &RawRow,
    index: usize,
    name: &str,
) -> Result<T, AppError> {
    let value = raw
        .metrics
        .get(index)
        .and_then(Clone::clone)
        .unwrap_or_default();
    if value.is_empty() {
        return Ok(T::default());
    }
    value
        .parse()
        .map_err(|_| AppError::upstream(format!("malformed {name} value: {value:?}")))
}
