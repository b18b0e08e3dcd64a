use crate::timestamp::types::Timestamp;
use chrono::{DateTime, Local, SecondsFormat, Utc};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::fmt::Write;

lazy_static! {
    /// Template placeholders: "{datetime}", "{relative}", "{fmt:%H:%M}"
    static ref PLACEHOLDER: Regex = Regex::new(r"\{([a-z_]+)(?::([^}]*))?\}").unwrap();
}

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Renders timestamps through user supplied display templates
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampTextFormatter {
    utc: bool,
}

impl TimestampTextFormatter {
    pub fn new(utc: bool) -> Self {
        Self { utc }
    }

    /// Replace every known placeholder in `template`; unknown ones are left untouched
    pub fn format(&self, timestamp: &Timestamp, template: &str, now: DateTime<Utc>) -> String {
        let Some(datetime) = timestamp.to_datetime() else {
            return template.to_string();
        };

        PLACEHOLDER
            .replace_all(template, |caps: &Captures| {
                let name = &caps[1];
                let argument = caps.get(2).map(|m| m.as_str());
                self.render(name, argument, timestamp, datetime, now)
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    fn render(
        &self,
        name: &str,
        argument: Option<&str>,
        timestamp: &Timestamp,
        datetime: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Option<String> {
        match (name, argument) {
            ("ts", None) => Some(timestamp.seconds().to_string()),
            ("ts_ms", None) => Some(timestamp.millis().to_string()),
            ("datetime", None) => self.strftime(datetime, DATETIME_FORMAT),
            ("date", None) => self.strftime(datetime, DATE_FORMAT),
            ("time", None) => self.strftime(datetime, TIME_FORMAT),
            ("utc", None) => Some(datetime.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            ("relative", None) => Some(relative(datetime, now)),
            ("fmt", Some(pattern)) => self.strftime(datetime, pattern),
            _ => None,
        }
    }

    // None for patterns chrono cannot render
    fn strftime(&self, datetime: DateTime<Utc>, pattern: &str) -> Option<String> {
        let mut out = String::new();
        let written = if self.utc {
            write!(out, "{}", datetime.format(pattern))
        } else {
            write!(out, "{}", datetime.with_timezone(&Local).format(pattern))
        };
        written.ok().map(|_| out)
    }
}

/// "3 hours ago", "in 2 days", "now"
pub fn relative(datetime: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = (datetime - now).num_seconds();
    let distance = delta.abs();

    if distance == 0 {
        return "now".to_string();
    }

    let (count, unit) = match distance {
        d if d < MINUTE => (d, "second"),
        d if d < HOUR => (d / MINUTE, "minute"),
        d if d < DAY => (d / HOUR, "hour"),
        d if d < MONTH => (d / DAY, "day"),
        d if d < YEAR => (d / MONTH, "month"),
        d => (d / YEAR, "year"),
    };
    let plural = if count == 1 { "" } else { "s" };

    if delta < 0 {
        format!("{} {}{} ago", count, unit, plural)
    } else {
        format!("in {} {}{}", count, unit, plural)
    }
}
