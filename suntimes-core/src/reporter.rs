//! Fetching, localizing and rendering sunrise/sunset for one day.

use std::fmt::Write;
use tracing::debug;

use crate::{
    config::{OutputConfig, Palette},
    date::ReportDate,
    error::Result,
    location::Location,
    model::{LocalSunTimes, SunTimes},
    provider::SunTimesProvider,
    timezone::TimezoneLookup,
};

const SEPARATOR: &str = "-----------------------";

/// Produces the sunrise/sunset report for a fixed date.
#[derive(Debug)]
pub struct TimeReporter {
    date: ReportDate,
    sun_api: Box<dyn SunTimesProvider>,
    timezones: Box<dyn TimezoneLookup>,
    output: OutputConfig,
}

impl TimeReporter {
    pub fn new(
        date: ReportDate,
        sun_api: Box<dyn SunTimesProvider>,
        timezones: Box<dyn TimezoneLookup>,
        output: OutputConfig,
    ) -> Self {
        Self { date, sun_api, timezones, output }
    }

    /// Parses `date` with the configured format; `None` means today.
    pub fn for_date(
        date: Option<&str>,
        sun_api: Box<dyn SunTimesProvider>,
        timezones: Box<dyn TimezoneLookup>,
        output: OutputConfig,
    ) -> Result<Self> {
        output.validate()?;
        let date = ReportDate::parse_or_today(date, &output.date_format)?;
        Ok(Self::new(date, sun_api, timezones, output))
    }

    pub fn date(&self) -> ReportDate {
        self.date
    }

    /// Sunrise and sunset in UTC, straight from the remote service.
    pub async fn fetch_times(&self, location: &Location) -> Result<SunTimes> {
        self.sun_api.sun_times(location.latitude(), location.longitude(), self.date).await
    }

    /// Sunrise and sunset in the location's own timezone.
    pub async fn localize(&self, location: &Location) -> Result<LocalSunTimes> {
        let timezone = location.timezone(self.timezones.as_ref())?;
        let times = self.fetch_times(location).await?;
        debug!(%timezone, ?times, "localizing sun times");
        Ok(times.in_timezone(timezone))
    }

    /// Full report text, ready to print.
    pub async fn render(&self, location: &Location) -> Result<String> {
        let local = self.localize(location).await?;
        format_report(location, self.date, &local, &self.output)
    }
}

pub fn format_report(
    location: &Location,
    date: ReportDate,
    times: &LocalSunTimes,
    output: &OutputConfig,
) -> Result<String> {
    output.validate()?;

    let Palette { highlight: hl, reset, .. } = output.palette();
    let sunrise = times.sunrise.format(&output.time_format);
    let sunset = times.sunset.format(&output.time_format);
    let date = date.format(&output.date_format)?;

    let mut out = String::new();
    writeln!(out, "Sunrise and sunset for {hl}{}{reset}", location.label())?;
    if !location.label_has_coordinates() {
        writeln!(out, "Latitude: {}, longitude: {}", location.latitude(), location.longitude())?;
    }
    writeln!(out, "Timezone: {}", times.timezone.name())?;
    writeln!(out, "{SEPARATOR}")?;
    writeln!(
        out,
        "On {hl}{date}{reset} the sun rises at {hl}{sunrise}{reset} and sets at {hl}{sunset}{reset}"
    )?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use async_trait::async_trait;
    use chrono::{TimeZone, Timelike, Utc};
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    /// Moscow, 1 June 2023, as reported by sunrise-sunset.org.
    fn moscow_june() -> SunTimes {
        SunTimes {
            sunrise: Utc.with_ymd_and_hms(2023, 6, 1, 0, 52, 37).unwrap(),
            sunset: Utc.with_ymd_and_hms(2023, 6, 1, 18, 4, 21).unwrap(),
        }
    }

    #[derive(Debug, Default)]
    struct FakeSunApi {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl SunTimesProvider for FakeSunApi {
        async fn sun_times(&self, _lat: f64, _lon: f64, date: ReportDate) -> Result<SunTimes> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::data_format("fake", "status INVALID_REQUEST"));
            }
            assert_eq!(date.iso(), "2023-06-01");
            Ok(moscow_june())
        }
    }

    #[derive(Debug)]
    struct FixedZone(&'static str);

    impl TimezoneLookup for FixedZone {
        fn timezone_name(&self, _latitude: f64, _longitude: f64) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    fn plain_output() -> OutputConfig {
        OutputConfig { color: false, ..OutputConfig::default() }
    }

    fn reporter(api: FakeSunApi) -> TimeReporter {
        TimeReporter::for_date(
            Some("01.06.2023"),
            Box::new(api),
            Box::new(FixedZone("Europe/Moscow")),
            plain_output(),
        )
        .unwrap()
    }

    #[test]
    fn malformed_date_fails_construction() {
        let err = TimeReporter::for_date(
            Some("2023/06/01"),
            Box::new(FakeSunApi::default()),
            Box::new(FixedZone("UTC")),
            plain_output(),
        )
        .unwrap_err();

        assert!(matches!(err, Error::Parse { .. }));
    }

    #[tokio::test]
    async fn localize_fetches_once_and_converts() {
        let api = FakeSunApi::default();
        let calls = Arc::clone(&api.calls);
        let reporter = reporter(api);
        let moscow = Location::from_coordinates(55.75, 37.62).unwrap();

        let local = reporter.localize(&moscow).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(local.timezone, chrono_tz::Europe::Moscow);
        // MSK is UTC+3 all year.
        assert_eq!((local.sunrise.hour(), local.sunrise.minute()), (3, 52));
        assert_eq!((local.sunset.hour(), local.sunset.minute()), (21, 4));
    }

    #[tokio::test]
    async fn service_errors_propagate() {
        let reporter = reporter(FakeSunApi { fail: true, ..FakeSunApi::default() });
        let moscow = Location::from_coordinates(55.75, 37.62).unwrap();

        let err = reporter.render(&moscow).await.unwrap_err();
        assert!(matches!(err, Error::DataFormat { .. }));
    }

    #[tokio::test]
    async fn coordinate_report_omits_lat_lon_line() {
        let reporter = reporter(FakeSunApi::default());
        let loc = Location::from_coordinates(55.75, 37.62).unwrap();

        let text = reporter.render(&loc).await.unwrap();

        assert_eq!(
            text,
            "Sunrise and sunset for coordinates: 55.75, 37.62\n\
             Timezone: Europe/Moscow\n\
             -----------------------\n\
             On 01.06.2023 the sun rises at 03:52 and sets at 21:04\n"
        );
    }

    #[tokio::test]
    async fn named_report_includes_lat_lon_line() {
        let reporter = reporter(FakeSunApi::default());
        let loc = Location::geocoded("Moscow, Russia", 55.7504461, 37.6174943).unwrap();

        let text = reporter.render(&loc).await.unwrap();

        assert!(text.starts_with("Sunrise and sunset for Moscow, Russia\n"));
        assert!(text.contains("Latitude: 55.7504461, longitude: 37.6174943\n"));
    }

    #[test]
    fn unrenderable_time_format_fails_instead_of_truncating() {
        let loc = Location::from_coordinates(55.75, 37.62).unwrap();
        let date: ReportDate = "01.06.2023".parse().unwrap();
        let local = moscow_june().in_timezone(chrono_tz::Europe::Moscow);
        let output = OutputConfig { time_format: "%H:%Q".into(), ..plain_output() };

        let err = format_report(&loc, date, &local, &output).unwrap_err();
        assert!(matches!(err, Error::OutputFormat { field: "time_format", .. }));
    }

    #[test]
    fn unrenderable_date_format_fails_construction_for_today() {
        let err = TimeReporter::for_date(
            None,
            Box::new(FakeSunApi::default()),
            Box::new(FixedZone("Europe/Moscow")),
            OutputConfig { date_format: "%d.%Q".into(), ..plain_output() },
        )
        .unwrap_err();

        assert!(matches!(err, Error::OutputFormat { field: "date_format", .. }));
    }

    #[tokio::test]
    async fn unrenderable_date_format_fails_render() {
        let reporter = TimeReporter::new(
            "01.06.2023".parse().unwrap(),
            Box::new(FakeSunApi::default()),
            Box::new(FixedZone("Europe/Moscow")),
            OutputConfig { date_format: "%d.%Q".into(), ..plain_output() },
        );
        let loc = Location::from_coordinates(55.75, 37.62).unwrap();

        let err = reporter.render(&loc).await.unwrap_err();
        assert!(matches!(err, Error::OutputFormat { field: "date_format", .. }));
    }

    #[test]
    fn colored_report_highlights_values() {
        let loc = Location::geocoded("Moscow, Russia", 55.75, 37.62).unwrap();
        let date: ReportDate = "01.06.2023".parse().unwrap();
        let local = moscow_june().in_timezone(chrono_tz::Europe::Moscow);

        let text = format_report(&loc, date, &local, &OutputConfig::default()).unwrap();

        assert!(text.contains("\x1b[92mMoscow, Russia\x1b[0m"));
        assert!(text.contains("\x1b[92m01.06.2023\x1b[0m"));
        assert!(text.contains("\x1b[92m03:52\x1b[0m"));
        assert!(text.contains("\x1b[92m21:04\x1b[0m"));
    }
}
