use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// A geocoder hit: coordinates plus the provider's canonical label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedPlace {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Sunrise and sunset as returned by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunTimes {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

impl SunTimes {
    pub fn in_timezone(&self, timezone: Tz) -> LocalSunTimes {
        LocalSunTimes {
            timezone,
            sunrise: self.sunrise.with_timezone(&timezone),
            sunset: self.sunset.with_timezone(&timezone),
        }
    }
}

/// Sunrise and sunset converted to the civil time of a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSunTimes {
    pub timezone: Tz,
    pub sunrise: DateTime<Tz>,
    pub sunset: DateTime<Tz>,
}
