use anyhow::{Context, Result, anyhow};
use chrono::format::{Item, StrftimeItems};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_SUN_API_URL: &str = "https://api.sunrise-sunset.org/json";
pub const DEFAULT_DATE_FORMAT: &str = "%d.%m.%Y";
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M";

/// Settings for the place-name geocoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    pub base_url: String,
    /// Nominatim rejects requests without an identifying user agent.
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl GeocoderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEOCODER_URL.to_string(),
            user_agent: default_user_agent(),
            timeout_secs: 10,
        }
    }
}

/// Settings for the sunrise/sunset API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl SunApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SunApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_SUN_API_URL.to_string(), timeout_secs: 10 }
    }
}

/// How the report is rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// chrono format string used both to parse `--date` and to print the date.
    pub date_format: String,
    pub time_format: String,
    pub color: bool,
}

impl OutputConfig {
    pub fn palette(&self) -> Palette {
        if self.color { Palette::ansi() } else { Palette::plain() }
    }

    /// Both format strings must be renderable by chrono.
    pub fn validate(&self) -> crate::Result<()> {
        check_format("date_format", &self.date_format)?;
        check_format("time_format", &self.time_format)
    }
}

pub(crate) fn check_format(field: &'static str, format: &str) -> crate::Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(crate::Error::OutputFormat { field, format: format.to_string() });
    }
    Ok(())
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            color: true,
        }
    }
}

/// Terminal escape sequences used to highlight parts of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub warning: &'static str,
    pub highlight: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub const fn ansi() -> Self {
        Self { warning: "\x1b[91m", highlight: "\x1b[92m", reset: "\x1b[0m" }
    }

    pub const fn plain() -> Self {
        Self { warning: "", highlight: "", reset: "" }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// [geocoder]
/// user_agent = "suntimes/0.1 (me@example.com)"
///
/// [output]
/// color = false
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub geocoder: GeocoderConfig,
    pub sun_api: SunApiConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        cfg.output
            .validate()
            .with_context(|| format!("Invalid output settings in {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "suntimes", "suntimes-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

fn default_user_agent() -> String {
    format!("suntimes/{}", env!("CARGO_PKG_VERSION"))
}
