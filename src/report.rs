use crate::client::AnalyticsSource;
use crate::errors::AppError;
use crate::models::{GeoReport, ReportSlice};
use crate::range::{last_n_days, shift_back};

/// Fetch the current window of `days` days and the equal-length window
/// immediately before it. The two queries run concurrently and both must
/// succeed; either failure fails the whole call with no partial result.
pub async fn fetch_geo_report(
    source: &dyn AnalyticsSource,
    days: u32,
) -> Result<GeoReport, AppError> {
    let current = last_n_days(days);
    let previous = shift_back(current);

    let (current_rows, previous_rows) =
        tokio::try_join!(source.run_report(current), source.run_report(previous))?;

    Ok(GeoReport {
        current: ReportSlice {
            window: current,
            rows: current_rows,
        },
        previous: ReportSlice {
            window: previous,
            rows: previous_rows,
        },
    })
}
