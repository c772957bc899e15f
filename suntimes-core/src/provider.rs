use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;

use crate::{
    Config,
    date::ReportDate,
    error::{Error, Result},
    model::{GeocodedPlace, SunTimes},
    provider::{nominatim::NominatimGeocoder, sunrise_sunset::SunriseSunsetClient},
};

pub mod nominatim;
pub mod sunrise_sunset;

/// Resolves a free-text place name to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// `Ok(None)` when the service has no match for `name`.
    async fn geocode(&self, name: &str) -> Result<Option<GeocodedPlace>>;
}

/// Fetches sunrise and sunset instants for a point and a day.
#[async_trait]
pub trait SunTimesProvider: Send + Sync + Debug {
    async fn sun_times(&self, latitude: f64, longitude: f64, date: ReportDate) -> Result<SunTimes>;
}

/// Construct the geocoder described by `config.geocoder`.
pub fn geocoder_from_config(config: &Config) -> Result<Box<dyn Geocoder>> {
    let http = Client::builder()
        .user_agent(config.geocoder.user_agent.as_str())
        .timeout(config.geocoder.timeout())
        .build()
        .map_err(|e| Error::network("Failed to build HTTP client for geocoder", e))?;

    Ok(Box::new(NominatimGeocoder::new(http, config.geocoder.base_url.clone())))
}

/// Construct the sunrise/sunset client described by `config.sun_api`.
pub fn sun_times_from_config(config: &Config) -> Result<Box<dyn SunTimesProvider>> {
    let http = Client::builder()
        .user_agent(config.geocoder.user_agent.as_str())
        .timeout(config.sun_api.timeout())
        .build()
        .map_err(|e| Error::network("Failed to build HTTP client for sunrise-sunset API", e))?;

    Ok(Box::new(SunriseSunsetClient::new(http, config.sun_api.base_url.clone())))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
