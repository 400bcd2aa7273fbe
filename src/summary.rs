use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::geo;
use crate::models::{GeoReport, MetricRow, RegionSummary, SeriesPoint, SummaryResponse};

/// A region must move at least this much vs. the previous period before a
/// growth or decline insight fires.
const GROWTH_THRESHOLD: f64 = 0.10;
const DECLINE_THRESHOLD: f64 = -0.10;

#[derive(Debug, Default, Clone)]
struct Totals {
    sessions: u64,
    conversions: u64,
    revenue: f64,
}

/// Region-level rollups, per-region time series and insight strings for the
/// dashboard payload.
pub fn build_summary(report: &GeoReport) -> SummaryResponse {
    let current_totals = rollup(&report.current.rows);
    let previous_totals = rollup(&report.previous.rows);

    let mut regions: Vec<RegionSummary> = current_totals
        .into_iter()
        .map(|(key, totals)| {
            let previous_sessions = previous_totals
                .get(&key)
                .map(|totals| totals.sessions)
                .unwrap_or(0);
            let (country, region) = key;
            region_summary(country, region, totals, previous_sessions)
        })
        .collect();

    regions.sort_by(|a, b| {
        b.sessions
            .cmp(&a.sessions)
            .then_with(|| a.name.cmp(&b.name))
    });

    let insights = build_insights(&regions);

    SummaryResponse {
        current_window: report.current.window.into(),
        previous_window: report.previous.window.into(),
        series: build_series(&report.current.rows),
        regions,
        insights,
    }
}

fn rollup(rows: &[MetricRow]) -> BTreeMap<(String, String), Totals> {
    let mut totals: BTreeMap<(String, String), Totals> = BTreeMap::new();
    for row in rows {
        let entry = totals
            .entry((row.country.clone(), row.region.clone()))
            .or_default();
        entry.sessions += row.sessions;
        entry.conversions += row.conversions;
        entry.revenue += row.revenue;
    }
    totals
}

fn region_summary(
    country: String,
    region: String,
    totals: Totals,
    previous_sessions: u64,
) -> RegionSummary {
    let delta = if previous_sessions > 0 {
        Some((totals.sessions as f64 - previous_sessions as f64) / previous_sessions as f64)
    } else {
        None
    };
    let conversion_rate = if totals.sessions > 0 {
        totals.conversions as f64 / totals.sessions as f64
    } else {
        0.0
    };
    let (lat, lng) = geo::centroid(&country, &region).unwrap_or((0.0, 0.0));

    RegionSummary {
        code: geo::region_code(&country, &region),
        name: region,
        country,
        sessions: totals.sessions,
        conversions: totals.conversions,
        conversion_rate,
        revenue: totals.revenue,
        lat,
        lng,
        delta,
    }
}

/// Current-window rows bucketed per region per date. The BTreeMap key keeps
/// each region's points in ascending date order; dates with no rows for a
/// region are omitted.
fn build_series(rows: &[MetricRow]) -> Vec<SeriesPoint> {
    let mut buckets: BTreeMap<(String, NaiveDate), Totals> = BTreeMap::new();
    for row in rows {
        let entry = buckets
            .entry((geo::region_code(&row.country, &row.region), row.date))
            .or_default();
        entry.sessions += row.sessions;
        entry.conversions += row.conversions;
        entry.revenue += row.revenue;
    }

    buckets
        .into_iter()
        .map(|((region, date), totals)| SeriesPoint {
            region,
            date: date.to_string(),
            sessions: totals.sessions,
            conversions: totals.conversions,
            revenue: totals.revenue,
        })
        .collect()
}

/// Expects `regions` already sorted by sessions descending, which makes every
/// pick below deterministic (ties resolve to the earlier entry).
fn build_insights(regions: &[RegionSummary]) -> Vec<String> {
    let mut insights = Vec::new();

    let Some(top) = regions.first() else {
        return insights;
    };
    insights.push(format!(
        "{} leads with {} sessions",
        top.name, top.sessions
    ));

    let mut fastest: Option<&RegionSummary> = None;
    let mut steepest: Option<&RegionSummary> = None;
    for region in regions {
        let Some(delta) = region.delta else { continue };
        if fastest.is_none_or(|best| delta > best.delta.unwrap()) {
            fastest = Some(region);
        }
        if steepest.is_none_or(|worst| delta < worst.delta.unwrap()) {
            steepest = Some(region);
        }
    }

    if let Some(region) = fastest {
        let delta = region.delta.unwrap();
        if delta >= GROWTH_THRESHOLD {
            insights.push(format!(
                "{} is up {:.0}% vs the previous period",
                region.name,
                delta * 100.0
            ));
        }
    }
    if let Some(region) = steepest {
        let delta = region.delta.unwrap();
        if delta <= DECLINE_THRESHOLD {
            insights.push(format!(
                "{} is down {:.0}% vs the previous period",
                region.name,
                delta.abs() * 100.0
            ));
        }
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateWindow, ReportSlice};
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    fn row(region: &str, d: u32, sessions: u64, conversions: u64, revenue: f64) -> MetricRow {
        row_in("United States", region, d, sessions, conversions, revenue)
    }

    fn row_in(
        country: &str,
        region: &str,
        d: u32,
        sessions: u64,
        conversions: u64,
        revenue: f64,
    ) -> MetricRow {
        MetricRow {
            country: country.to_string(),
            region: region.to_string(),
            date: date(d),
            sessions,
            conversions,
            revenue,
        }
    }

    fn report(current: Vec<MetricRow>, previous: Vec<MetricRow>) -> GeoReport {
        GeoReport {
            current: ReportSlice {
                window: DateWindow { start: date(22), end: date(28) },
                rows: current,
            },
            previous: ReportSlice {
                window: DateWindow { start: date(15), end: date(21) },
                rows: previous,
            },
        }
    }

    #[test]
    fn totals_accumulate_across_dates() {
        let summary = build_summary(&report(
            vec![
                row("California", 22, 100, 5, 200.0),
                row("California", 23, 50, 5, 100.0),
            ],
            vec![row("California", 15, 100, 4, 180.0)],
        ));

        assert_eq!(summary.regions.len(), 1);
        let region = &summary.regions[0];
        assert_eq!(region.sessions, 150);
        assert_eq!(region.conversions, 10);
        assert_eq!(region.revenue, 300.0);
        assert!((region.conversion_rate - 10.0 / 150.0).abs() < 1e-9);
        assert!((region.delta.unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn delta_is_null_without_previous_sessions() {
        let summary = build_summary(&report(vec![row("Texas", 22, 40, 1, 10.0)], vec![]));
        assert_eq!(summary.regions[0].delta, None);
    }

    #[test]
    fn regions_sorted_by_sessions_descending() {
        let summary = build_summary(&report(
            vec![
                row("Texas", 22, 40, 1, 10.0),
                row("California", 22, 90, 2, 50.0),
                row("New York", 22, 40, 1, 10.0),
            ],
            vec![],
        ));
        let names: Vec<_> = summary.regions.iter().map(|r| r.name.as_str()).collect();
        // Equal session counts fall back to name order.
        assert_eq!(names, ["California", "New York", "Texas"]);
    }

    #[test]
    fn series_keeps_dates_in_order_per_region() {
        let summary = build_summary(&report(
            vec![
                row("California", 24, 10, 0, 0.0),
                row("California", 22, 5, 0, 0.0),
                row("California", 23, 7, 0, 0.0),
            ],
            vec![],
        ));
        let dates: Vec<_> = summary
            .series
            .iter()
            .filter(|point| point.region == "united-states-california")
            .map(|point| point.date.as_str())
            .collect();
        assert_eq!(dates, ["2026-08-22", "2026-08-23", "2026-08-24"]);
    }

    #[test]
    fn same_region_name_in_two_countries_stays_separate() {
        let summary = build_summary(&report(
            vec![
                row_in("Australia", "Victoria", 22, 10, 1, 5.0),
                row_in("Canada", "Victoria", 22, 7, 1, 3.0),
            ],
            vec![],
        ));

        assert_eq!(summary.regions.len(), 2);
        assert_ne!(summary.regions[0].code, summary.regions[1].code);

        assert_eq!(summary.series.len(), 2);
        let australia = summary
            .series
            .iter()
            .find(|point| point.region == "australia-victoria")
            .unwrap();
        assert_eq!(australia.sessions, 10);
        let canada = summary
            .series
            .iter()
            .find(|point| point.region == "canada-victoria")
            .unwrap();
        assert_eq!(canada.sessions, 7);
    }

    #[test]
    fn known_region_gets_coordinates_and_unknown_falls_back() {
        let summary = build_summary(&report(
            vec![
                row("California", 22, 10, 0, 0.0),
                row("Narnia", 22, 5, 0, 0.0),
            ],
            vec![],
        ));
        let california = summary.regions.iter().find(|r| r.name == "California").unwrap();
        assert_eq!((california.lat, california.lng), (36.78, -119.42));
        let narnia = summary.regions.iter().find(|r| r.name == "Narnia").unwrap();
        assert_eq!((narnia.lat, narnia.lng), (0.0, 0.0));
    }

    #[test]
    fn insights_name_top_growth_and_decline() {
        let summary = build_summary(&report(
            vec![
                row("California", 22, 100, 5, 200.0),
                row("Texas", 22, 60, 1, 50.0),
                row("New York", 22, 30, 1, 20.0),
            ],
            vec![
                row("California", 15, 100, 5, 200.0),
                row("Texas", 15, 40, 1, 50.0),
                row("New York", 15, 60, 1, 40.0),
            ],
        ));
        assert_eq!(summary.insights.len(), 3);
        assert!(summary.insights[0].contains("California leads"));
        assert!(summary.insights[1].contains("Texas is up 50%"));
        assert!(summary.insights[2].contains("New York is down 50%"));
    }

    #[test]
    fn flat_deltas_produce_only_the_top_region_insight() {
        let summary = build_summary(&report(
            vec![row("California", 22, 100, 5, 200.0)],
            vec![row("California", 15, 98, 5, 200.0)],
        ));
        assert_eq!(summary.insights.len(), 1);
    }

    #[test]
    fn empty_report_has_no_regions_or_insights() {
        let summary = build_summary(&report(vec![], vec![]));
        assert!(summary.regions.is_empty());
        assert!(summary.series.is_empty());
        assert!(summary.insights.is_empty());
    }
}
