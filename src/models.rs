use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive calendar-date window, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// One normalized row from the upstream analytics source.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub country: String,
    pub region: String,
    pub date: NaiveDate,
    pub sessions: u64,
    pub conversions: u64,
    pub revenue: f64,
}

#[derive(Debug, Clone)]
pub struct ReportSlice {
    pub window: DateWindow,
    pub rows: Vec<MetricRow>,
}

/// Current and previous period rows for one request. Never persisted.
#[derive(Debug, Clone)]
pub struct GeoReport {
    pub current: ReportSlice,
    pub previous: ReportSlice,
}

#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    pub days: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WindowDates {
    pub start: String,
    pub end: String,
}

impl From<DateWindow> for WindowDates {
    fn from(window: DateWindow) -> Self {
        Self {
            start: window.start.to_string(),
            end: window.end.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegionSummary {
    pub code: String,
    pub name: String,
    pub country: String,
    pub sessions: u64,
    pub conversions: u64,
    pub conversion_rate: f64,
    pub revenue: f64,
    pub lat: f64,
    pub lng: f64,
    pub delta: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub region: String,
    pub date: String,
    pub sessions: u64,
    pub conversions: u64,
    pub revenue: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub current_window: WindowDates,
    pub previous_window: WindowDates,
    pub regions: Vec<RegionSummary>,
    pub series: Vec<SeriesPoint>,
    pub insights: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: f64,
    pub version: String,
}
