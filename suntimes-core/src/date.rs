use chrono::{Local, NaiveDate};
use std::fmt::{self, Write};

use crate::{
    config::{DEFAULT_DATE_FORMAT, check_format},
    error::{Error, Result},
};

/// The calendar day a report is produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReportDate(NaiveDate);

impl ReportDate {
    /// Current date in the machine's local timezone.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn parse(input: &str, format: &str) -> Result<Self> {
        NaiveDate::parse_from_str(input.trim(), format)
            .map(Self)
            .map_err(|source| Error::Parse {
                input: input.to_string(),
                format: format.to_string(),
                source,
            })
    }

    /// `None` means today.
    pub fn parse_or_today(input: Option<&str>, format: &str) -> Result<Self> {
        match input {
            Some(s) => Self::parse(s, format),
            None => Ok(Self::today()),
        }
    }

    pub fn format(&self, format: &str) -> Result<String> {
        check_format("date_format", format)?;
        let mut out = String::new();
        write!(out, "{}", self.0.format(format))?;
        Ok(out)
    }

    /// `YYYY-MM-DD`, as expected by the sunrise/sunset API.
    pub fn iso(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for ReportDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DEFAULT_DATE_FORMAT))
    }
}

impl std::str::FromStr for ReportDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s, DEFAULT_DATE_FORMAT)
    }
}
