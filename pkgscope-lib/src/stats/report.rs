use super::chart::make_chart;
use super::series::{CHART_DAYS, DownloadSeries, WEEK_DAYS};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

const LOG_TARGET: &str = "     stats";

/// Breakdown dimensions offered by the statistics API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    /// Downloads per Python minor version
    Pythons,

    /// Downloads per operating system
    Systems,
}

impl Category {
    /// Path segment of the API endpoint serving this breakdown.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Pythons => "python_minor",
            Self::Systems => "system",
        }
    }
}

/// One row of a category breakdown as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyRecord {
    #[serde(default)]
    pub category: Option<String>,
    pub date: NaiveDate,
    pub downloads: u64,
}

/// Aggregated downloads for one category label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStat {
    pub category: String,
    pub day: u64,
    pub week: u64,
    pub month: u64,
    pub chart: String,
}

impl CategoryStat {
    #[must_use]
    pub fn from_series(category: impl Into<String>, series: &DownloadSeries) -> Self {
        Self {
            category: category.into(),
            day: series.day(),
            week: series.week(),
            month: series.month(),
            chart: make_chart(series.tail(CHART_DAYS), Some(WEEK_DAYS)),
        }
    }
}

/// Download totals across all categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub day: u64,
    pub week: u64,
    pub month: u64,
}

/// The complete statistics report for a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    pub total: Totals,
    pub pythons: Vec<CategoryStat>,
    pub systems: Vec<CategoryStat>,
}

/// Group daily records by category label into series ending at `yesterday`, then aggregate them.
///
/// Dots are stripped from labels, so `3.9` and `39` land in the same category. Categories keep the
/// order in which they first appear; those without a single download in the window are dropped.
#[must_use]
pub fn build_category_stats(records: impl IntoIterator<Item = DailyRecord>, yesterday: NaiveDate) -> Vec<CategoryStat> {
    let mut grouped: Vec<(String, DownloadSeries)> = Vec::new();

    for record in records {
        let label = record.category.as_deref().unwrap_or("null").replace('.', "");
        let index = if let Some(index) = grouped.iter().position(|(name, _)| *name == label) {
            index
        } else {
            grouped.push((label, DownloadSeries::ending_at(yesterday)));
            grouped.len() - 1
        };

        let (label, series) = &mut grouped[index];
        if !series.set(record.date, record.downloads) {
            log::trace!(target: LOG_TARGET, "Ignoring '{label}' downloads for {} outside the window", record.date);
        }
    }

    grouped
        .iter()
        .filter(|(_, series)| !series.is_empty())
        .map(|(label, series)| CategoryStat::from_series(label.as_str(), series))
        .collect()
}
