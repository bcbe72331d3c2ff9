//! Download statistics for Python packages
//!
//! # Implementation Model
//!
//! [`StatsClient`] queries a pypistats-style JSON API: one request for the recent totals and one
//! per [`Category`] for the daily breakdown. Daily records are grouped per category label into a
//! [`DownloadSeries`], a fixed 31-day window ending yesterday. Each non-empty series becomes a
//! [`CategoryStat`] with day/week/month totals and a sparkline rendered by [`make_chart`].
//!
//! The first unsuccessful response aborts the whole fetch; no partial [`StatsReport`] is ever
//! produced and nothing is retried.

mod chart;
mod client;
mod report;
mod series;

pub use chart::{EMPTY_TICK, TICKS, make_chart};
pub use client::{DEFAULT_STATS_BASE_URL, FetchError, StatsClient, normalize_package};
pub use report::{Category, CategoryStat, DailyRecord, StatsReport, Totals, build_category_stats};
pub use series::{CHART_DAYS, DownloadSeries, WEEK_DAYS, WINDOW_DAYS};
