use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{Error, Result},
    location::validate_coordinates,
    model::GeocodedPlace,
    provider::truncate_body,
};

use super::Geocoder;

const SERVICE: &str = "Nominatim";

/// OpenStreetMap Nominatim search client.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    http: Client,
    base_url: String,
}

impl NominatimGeocoder {
    /// `http` must carry an identifying user agent.
    pub fn new(http: Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct NmPlace {
    lat: String,
    lon: String,
    display_name: String,
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, name: &str) -> Result<Option<GeocodedPlace>> {
        let url = self.search_url();
        debug!(%url, query = name, "geocoding place name");

        let res = self
            .http
            .get(&url)
            .query(&[("q", name), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| Error::network("Failed to send request to Nominatim", e))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| Error::network("Failed to read Nominatim response body", e))?;

        if !status.is_success() {
            return Err(Error::HttpStatus { service: SERVICE, status, body: truncate_body(&body) });
        }

        let place = parse_search_body(&body)?;
        debug!(?place, "geocoder answered");
        Ok(place)
    }
}

fn parse_search_body(body: &str) -> Result<Option<GeocodedPlace>> {
    let parsed: Vec<NmPlace> = serde_json::from_str(body)
        .map_err(|e| Error::data_format(SERVICE, format!("invalid search JSON: {e}")))?;

    let Some(first) = parsed.into_iter().next() else {
        return Ok(None);
    };

    let latitude = parse_coordinate(&first.lat, "lat")?;
    let longitude = parse_coordinate(&first.lon, "lon")?;
    validate_coordinates(latitude, longitude)
        .map_err(|e| Error::data_format(SERVICE, e.to_string()))?;

    Ok(Some(GeocodedPlace { label: first.display_name, latitude, longitude }))
}

fn parse_coordinate(raw: &str, field: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| Error::data_format(SERVICE, format!("field '{field}' is not a number: '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOSCOW: &str = r#"[{
        "place_id": 123,
        "lat": "55.7504461",
        "lon": "37.6174943",
        "display_name": "Moscow, Central Federal District, Russia",
        "importance": 0.88
    }]"#;

    #[test]
    fn first_hit_is_adopted() {
        let place = parse_search_body(MOSCOW).unwrap().expect("one hit");

        assert_eq!(place.label, "Moscow, Central Federal District, Russia");
        assert!((place.latitude - 55.7504461).abs() < 1e-9);
        assert!((place.longitude - 37.6174943).abs() < 1e-9);
    }

    #[test]
    fn empty_result_is_no_match() {
        assert_eq!(parse_search_body("[]").unwrap(), None);
    }

    #[test]
    fn non_numeric_coordinate_is_data_format_error() {
        let body = r#"[{"lat": "north", "lon": "37.6", "display_name": "x"}]"#;
        let err = parse_search_body(body).unwrap_err();
        assert!(matches!(err, Error::DataFormat { .. }));
        assert!(err.to_string().contains("'lat'"));
    }

    #[test]
    fn out_of_range_coordinate_is_rejected() {
        let body = r#"[{"lat": "95.0", "lon": "37.6", "display_name": "x"}]"#;
        assert!(matches!(parse_search_body(body), Err(Error::DataFormat { .. })));
    }

    #[test]
    fn unexpected_shape_is_data_format_error() {
        let err = parse_search_body(r#"{"error": "Unable to geocode"}"#).unwrap_err();
        assert!(matches!(err, Error::DataFormat { service: "Nominatim", .. }));
    }

    #[test]
    fn search_url_tolerates_trailing_slash() {
        let geocoder = NominatimGeocoder::new(Client::new(), "https://example.org/".into());
        assert_eq!(geocoder.search_url(), "https://example.org/search");
    }
}
