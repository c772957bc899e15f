use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    date::ReportDate,
    error::{Error, Result},
    model::SunTimes,
    provider::truncate_body,
};

use super::SunTimesProvider;

const SERVICE: &str = "sunrise-sunset.org";

/// Client for the sunrise-sunset.org JSON API.
#[derive(Debug, Clone)]
pub struct SunriseSunsetClient {
    http: Client,
    base_url: String,
}

impl SunriseSunsetClient {
    pub fn new(http: Client, base_url: String) -> Self {
        Self { http, base_url }
    }
}

#[derive(Debug, Deserialize)]
struct SsResults {
    sunrise: DateTime<Utc>,
    sunset: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct SsResponse {
    // An empty string rather than an object when `status` is not OK.
    #[serde(default)]
    results: serde_json::Value,
    #[serde(default)]
    status: Option<String>,
}

fn query_params(latitude: f64, longitude: f64, date: ReportDate) -> [(&'static str, String); 4] {
    [
        ("lat", latitude.to_string()),
        ("lng", longitude.to_string()),
        ("date", date.iso()),
        // Unformatted output gives ISO 8601 instants with an explicit offset.
        ("formatted", "0".to_string()),
    ]
}

#[async_trait]
impl SunTimesProvider for SunriseSunsetClient {
    async fn sun_times(&self, latitude: f64, longitude: f64, date: ReportDate) -> Result<SunTimes> {
        debug!(latitude, longitude, date = %date.iso(), "requesting sun times");

        let res = self
            .http
            .get(&self.base_url)
            .query(&query_params(latitude, longitude, date))
            .send()
            .await
            .map_err(|e| Error::network("Failed to send request to sunrise-sunset API", e))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| Error::network("Failed to read sunrise-sunset response body", e))?;

        if !status.is_success() {
            return Err(Error::HttpStatus { service: SERVICE, status, body: truncate_body(&body) });
        }

        let times = parse_body(&body)?;
        debug!(?times, "sun times received");
        Ok(times)
    }
}

fn parse_body(body: &str) -> Result<SunTimes> {
    let parsed: SsResponse = serde_json::from_str(body)
        .map_err(|e| Error::data_format(SERVICE, format!("invalid JSON: {e}")))?;

    match parsed.status.as_deref() {
        Some(status) if status != "OK" => {
            return Err(Error::data_format(SERVICE, format!("status {status}")));
        }
        _ => {}
    }

    if parsed.results.is_null() {
        return Err(Error::data_format(SERVICE, "response contained no results"));
    }

    let results: SsResults = serde_json::from_value(parsed.results)
        .map_err(|e| Error::data_format(SERVICE, format!("unexpected results: {e}")))?;

    // Polar day and polar night come back as 1970-01-01T00:00:01+00:00.
    if results.sunrise.timestamp() <= 1 || results.sunset.timestamp() <= 1 {
        return Err(Error::data_format(
            SERVICE,
            "the sun does not rise or set on this day at this location (polar day or night)",
        ));
    }

    Ok(SunTimes { sunrise: results.sunrise, sunset: results.sunset })
}
