//! Client for the download statistics API.

use super::report::{Category, DailyRecord, StatsReport, Totals, build_category_stats};
use chrono::{Days, NaiveDate};
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use strum::IntoEnumIterator;

const LOG_TARGET: &str = "     stats";

pub const DEFAULT_STATS_BASE_URL: &str = "https://pypistats.org";

/// Errors produced while fetching statistics.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The API answered with something other than 200 OK.
    #[error("invalid status code {status} from {url}")]
    Status { url: String, status: StatusCode },

    #[error("sending HTTP request to {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("decoding response body from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("creating HTTP client")]
    Client(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
#[expect(clippy::struct_field_names, reason = "field names match the API exactly")]
struct RecentData {
    last_day: u64,
    last_week: u64,
    last_month: u64,
}

impl From<RecentData> for Totals {
    fn from(recent: RecentData) -> Self {
        Self {
            day: recent.last_day,
            week: recent.last_week,
            month: recent.last_month,
        }
    }
}

/// Fetches download statistics for packages.
#[derive(Debug, Clone)]
pub struct StatsClient {
    client: reqwest::Client,
    base_url: String,
}

impl StatsClient {
    /// Create a client against `base_url`, or the public pypistats service when `None`.
    pub fn new(base_url: Option<&str>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().user_agent("pkgscope").build()?;

        Ok(Self {
            client,
            base_url: base_url.unwrap_or(DEFAULT_STATS_BASE_URL).trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the recent totals endpoint for an already normalized package name.
    #[must_use]
    pub fn recent_url(&self, name: &str) -> String {
        format!("{}/api/packages/{name}/recent", self.base_url)
    }

    /// URL of a category breakdown endpoint for an already normalized package name.
    #[must_use]
    pub fn category_url(&self, name: &str, category: Category) -> String {
        format!("{}/api/packages/{name}/{}", self.base_url, category.endpoint())
    }

    /// Fetch the report for `package`, using the 31 days ending the day before `today`.
    ///
    /// The first request that fails aborts the whole fetch.
    pub async fn fetch(&self, package: &str, today: NaiveDate) -> Result<StatsReport, FetchError> {
        let name = normalize_package(package);
        let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);

        let recent: RecentData = self.get_data(self.recent_url(&name)).await?;

        let mut report = StatsReport {
            total: recent.into(),
            pythons: Vec::new(),
            systems: Vec::new(),
        };

        for category in Category::iter() {
            let records: Vec<DailyRecord> = self.get_data(self.category_url(&name, category)).await?;
            let stats = build_category_stats(records, yesterday);
            log::debug!(target: LOG_TARGET, "Found {} {category} with downloads for '{name}'", stats.len());

            match category {
                Category::Pythons => report.pythons = stats,
                Category::Systems => report.systems = stats,
            }
        }

        Ok(report)
    }

    async fn get_data<T: DeserializeOwned>(&self, url: String) -> Result<T, FetchError> {
        log::info!(target: LOG_TARGET, "Querying '{url}'");

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(source) => return Err(FetchError::Transport { url, source }),
        };

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status { url, status });
        }

        match response.json::<Envelope<T>>().await {
            Ok(envelope) => Ok(envelope.data),
            Err(source) => Err(FetchError::Decode { url, source }),
        }
    }
}

/// Lowercase the name and turn underscores into hyphens, as the API expects.
#[must_use]
pub fn normalize_package(name: &str) -> String {
    name.trim().to_lowercase().replace('_', "-")
}
