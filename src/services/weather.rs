use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::error;

use crate::error::ApiError;

/// Source of the weather stamped onto new todos
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn today(&self) -> Result<String, ApiError>;
}

/// One row of the remote weather feed
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherEntry {
    /// `MM-dd`
    pub date: String,
    pub weather: String,
}

/// Picks the entry whose date equals `today` (`MM-dd`)
pub fn find_weather(entries: Option<Vec<WeatherEntry>>, today: &str) -> Result<String, ApiError> {
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => return Err(ApiError::server("날씨 데이터가 없습니다.")),
    };

    entries
        .into_iter()
        .find(|entry| entry.date == today)
        .map(|entry| entry.weather)
        .ok_or_else(|| ApiError::server("오늘에 해당하는 날씨 데이터를 찾을 수 없습니다."))
}

/// Fetches the feed over HTTP on every call
pub struct HttpWeatherProvider {
    client: reqwest::Client,
    url: String,
}

impl HttpWeatherProvider {
    pub fn new(url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_default();
        Self { client, url: url.into() }
    }
}

#[async_trait]
impl WeatherProvider for HttpWeatherProvider {
    async fn today(&self) -> Result<String, ApiError> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            error!("weather request to {} failed: {}", self.url, e);
            ApiError::server("날씨 데이터를 가져오는데 실패했습니다.")
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::server(format!(
                "날씨 데이터를 가져오는데 실패했습니다. 상태 코드: {}",
                status.as_u16()
            )));
        }

        let entries: Option<Vec<WeatherEntry>> = response.json().await.map_err(|e| {
            error!("weather payload could not be decoded: {}", e);
            ApiError::server("날씨 데이터가 없습니다.")
        })?;

        let today = chrono::Local::now().format("%m-%d").to_string();
        find_weather(entries, &today)
    }
}

/// Always answers with the configured weather
#[derive(Debug, Clone)]
pub struct FixedWeatherProvider(pub String);

#[async_trait]
impl WeatherProvider for FixedWeatherProvider {
    async fn today(&self) -> Result<String, ApiError> {
        Ok(self.0.clone())
    }
}
