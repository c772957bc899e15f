//! Core library for the `suntimes` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - Location resolution (geocoding, coordinate validation, offline timezone lookup)
//! - Clients for the geocoding and sunrise/sunset services
//! - The reporter that localizes and formats sunrise/sunset times
//!
//! It is used by `suntimes-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod date;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;
pub mod reporter;
pub mod timezone;

pub use config::{Config, OutputConfig, Palette};
pub use date::ReportDate;
pub use error::{Error, Result};
pub use location::{Location, LocationQuery, LocationResolver, LocationSource};
pub use model::{GeocodedPlace, LocalSunTimes, SunTimes};
pub use provider::{Geocoder, SunTimesProvider, geocoder_from_config, sun_times_from_config};
pub use reporter::{TimeReporter, format_report};
pub use timezone::{TimezoneLookup, TzfLookup};
