use chrono::{Days, NaiveDate};

/// Number of days in the trailing window.
pub const WINDOW_DAYS: usize = 31;

/// Number of trailing days used for the sparkline.
pub const CHART_DAYS: usize = 28;

/// Number of trailing days summed into the weekly total.
pub const WEEK_DAYS: usize = 7;

/// Daily download counts over a fixed 31-day window ending at `end`.
///
/// Counts are stored by day offset from the start of the window, so the series always has exactly
/// [`WINDOW_DAYS`] entries in chronological order. Days that never received a value count as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSeries {
    start: NaiveDate,
    counts: [u64; WINDOW_DAYS],
}

impl DownloadSeries {
    /// Create an empty series whose last day is `end`.
    #[must_use]
    pub fn ending_at(end: NaiveDate) -> Self {
        let start = end
            .checked_sub_days(Days::new(WINDOW_DAYS as u64 - 1))
            .unwrap_or(NaiveDate::MIN);
        Self {
            start,
            counts: [0; WINDOW_DAYS],
        }
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.start
            .checked_add_days(Days::new(WINDOW_DAYS as u64 - 1))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Record the count for a day. A later value for the same day replaces the earlier one.
    ///
    /// Returns `false` when the date lies outside the window, in which case it is ignored.
    pub fn set(&mut self, date: NaiveDate, value: u64) -> bool {
        let Ok(offset) = usize::try_from((date - self.start).num_days()) else {
            return false;
        };

        match self.counts.get_mut(offset) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// All counts in chronological order.
    #[must_use]
    pub const fn values(&self) -> &[u64; WINDOW_DAYS] {
        &self.counts
    }

    /// Count for the last day of the window.
    #[must_use]
    pub const fn day(&self) -> u64 {
        self.counts[WINDOW_DAYS - 1]
    }

    /// Sum of the last seven days.
    #[must_use]
    pub fn week(&self) -> u64 {
        self.tail(WEEK_DAYS).iter().sum()
    }

    /// Sum of the whole window.
    #[must_use]
    pub fn month(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// The last `days` counts (or all of them if `days` exceeds the window).
    #[must_use]
    pub fn tail(&self, days: usize) -> &[u64] {
        &self.counts[WINDOW_DAYS.saturating_sub(days)..]
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_window_bounds() {
        let series = DownloadSeries::ending_at(date("2024-03-31"));
        assert_eq!(series.start(), date("2024-03-01"));
        assert_eq!(series.end(), date("2024-03-31"));
        assert_eq!(series.values().len(), WINDOW_DAYS);
    }

    #[test]
    fn test_every_day_round_trips_in_order() {
        let end = date("2024-02-10");
        let mut series = DownloadSeries::ending_at(end);
        let mut day = series.start();
        let mut expected = Vec::new();
        let mut value = 1;
        while day <= end {
            assert!(series.set(day, value));
            expected.push(value);
            value += 1;
            day = day.succ_opt().unwrap();
        }

        assert_eq!(series.values().to_vec(), expected);
    }

    #[test]
    fn test_missing_days_are_zero() {
        let mut series = DownloadSeries::ending_at(date("2024-01-31"));
        assert!(series.set(date("2024-01-15"), 9));

        let values = series.values();
        assert_eq!(values[14], 9);
        assert_eq!(values.iter().filter(|&&v| v == 0).count(), WINDOW_DAYS - 1);
    }

    #[test]
    fn test_out_of_window_dates_are_ignored() {
        let mut series = DownloadSeries::ending_at(date("2024-01-31"));
        assert!(!series.set(date("2023-12-31"), 5));
        assert!(!series.set(date("2024-02-01"), 5));
        assert!(series.is_empty());
    }

    #[test]
    fn test_later_value_replaces_earlier() {
        let mut series = DownloadSeries::ending_at(date("2024-01-31"));
        assert!(series.set(date("2024-01-31"), 1));
        assert!(series.set(date("2024-01-31"), 7));
        assert_eq!(series.day(), 7);
    }

    #[test]
    fn test_totals() {
        let end = date("2024-01-31");
        let mut series = DownloadSeries::ending_at(end);
        let mut day = series.start();
        while day <= end {
            assert!(series.set(day, 2));
            day = day.succ_opt().unwrap();
        }

        assert_eq!(series.day(), 2);
        assert_eq!(series.week(), 14);
        assert_eq!(series.month(), 62);
        assert_eq!(series.tail(CHART_DAYS).len(), CHART_DAYS);
    }
}
