use crate::models::DateWindow;
use chrono::{Duration, NaiveDate, Utc};

/// Window of `n` days ending on today's UTC date, inclusive.
/// `n` must already be validated to 1..=90 by the caller.
pub fn last_n_days(n: u32) -> DateWindow {
    last_n_days_from(Utc::now().date_naive(), n)
}

pub fn last_n_days_from(today: NaiveDate, n: u32) -> DateWindow {
    DateWindow {
        start: today - Duration::days(i64::from(n) - 1),
        end: today,
    }
}

/// Equal-length window immediately preceding `window`: for `[s, e]` this is
/// `[s - delta - 1, s - 1]` with `delta = e - s` in days. No gap, no overlap.
pub fn shift_back(window: DateWindow) -> DateWindow {
    let delta = (window.end - window.start).num_days();
    DateWindow {
        start: window.start - Duration::days(delta + 1),
        end: window.start - Duration::days(1),
    }
}
