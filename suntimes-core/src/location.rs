//! Turning user input into a validated [`Location`].
//!
//! A place name always wins: when one is given it is geocoded and any
//! coordinates supplied alongside it are dropped. Without a name, a full
//! latitude/longitude pair is required.

use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    provider::Geocoder,
    timezone::TimezoneLookup,
};

/// How a [`Location`] came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSource {
    /// Looked up by name; the label is the geocoder's canonical name.
    Geocoded,
    /// Entered directly; the label already spells out the coordinates.
    Coordinates,
}

/// A place with validated coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    label: String,
    latitude: f64,
    longitude: f64,
    source: LocationSource,
}

impl Location {
    pub fn from_coordinates(latitude: f64, longitude: f64) -> Result<Self> {
        validate_coordinates(latitude, longitude)?;
        Ok(Self {
            label: format!("coordinates: {latitude}, {longitude}"),
            latitude,
            longitude,
            source: LocationSource::Coordinates,
        })
    }

    pub fn geocoded(label: impl Into<String>, latitude: f64, longitude: f64) -> Result<Self> {
        validate_coordinates(latitude, longitude)?;
        Ok(Self { label: label.into(), latitude, longitude, source: LocationSource::Geocoded })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn source(&self) -> LocationSource {
        self.source
    }

    /// Whether the label already contains the coordinates.
    pub fn label_has_coordinates(&self) -> bool {
        self.source == LocationSource::Coordinates
    }

    /// IANA timezone for this location, looked up offline.
    pub fn timezone(&self, lookup: &dyn TimezoneLookup) -> Result<Tz> {
        let not_found =
            || Error::TimezoneNotFound { latitude: self.latitude, longitude: self.longitude };

        let name = lookup.timezone_name(self.latitude, self.longitude).ok_or_else(not_found)?;
        debug!(timezone = %name, label = %self.label, "timezone resolved");
        name.parse::<Tz>().map_err(|_| not_found())
    }
}

/// Raw resolver input, straight from the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationQuery {
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocationQuery {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }

    pub fn by_coordinates(latitude: f64, longitude: f64) -> Self {
        Self { name: None, latitude: Some(latitude), longitude: Some(longitude) }
    }

    fn usable_name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}

/// Builds [`Location`]s, geocoding names through the injected service.
#[derive(Debug)]
pub struct LocationResolver {
    geocoder: Box<dyn Geocoder>,
}

impl LocationResolver {
    pub fn new(geocoder: Box<dyn Geocoder>) -> Self {
        Self { geocoder }
    }

    pub async fn resolve(&self, query: &LocationQuery) -> Result<Location> {
        if let Some(name) = query.usable_name() {
            if query.latitude.is_some() || query.longitude.is_some() {
                warn!(
                    place = name,
                    "a place name was given; supplied coordinates are ignored and looked up instead"
                );
            }

            let place = self
                .geocoder
                .geocode(name)
                .await?
                .ok_or_else(|| Error::LocationNotFound(name.to_string()))?;

            return Location::geocoded(place.label, place.latitude, place.longitude);
        }

        match (query.latitude, query.longitude) {
            (Some(lat), Some(lon)) => Location::from_coordinates(lat, lon),
            _ => {
                warn!("not enough data: provide a place name or both latitude and longitude");
                Err(Error::InvalidInput(
                    "provide a place name or both latitude and longitude".into(),
                ))
            }
        }
    }
}

pub(crate) fn validate_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::InvalidInput(format!(
            "latitude {latitude} is outside -90..=90"
        )));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(Error::InvalidInput(format!(
            "longitude {longitude} is outside -180..=180"
        )));
    }
    Ok(())
}
