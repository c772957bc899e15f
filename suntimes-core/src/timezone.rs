//! Offline reverse timezone lookup.

use std::fmt;
use tzf_rs::DefaultFinder;

/// Maps coordinates to an IANA timezone identifier without touching the network.
pub trait TimezoneLookup: Send + Sync + fmt::Debug {
    /// `None` when the coordinates fall outside every known zone.
    fn timezone_name(&self, latitude: f64, longitude: f64) -> Option<String>;
}

/// Lookup backed by the polygon data embedded in `tzf-rs`.
pub struct TzfLookup {
    finder: DefaultFinder,
}

impl TzfLookup {
    /// Building the finder decodes the embedded dataset; do it once per run.
    pub fn new() -> Self {
        Self { finder: DefaultFinder::new() }
    }
}

impl Default for TzfLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TzfLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TzfLookup").finish_non_exhaustive()
    }
}

impl TimezoneLookup for TzfLookup {
    fn timezone_name(&self, latitude: f64, longitude: f64) -> Option<String> {
        // tzf-rs takes longitude first.
        let name = self.finder.get_tz_name(longitude, latitude);
        if name.is_empty() { None } else { Some(name.to_string()) }
    }
}
