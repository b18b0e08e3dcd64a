use crate::config::TimestampConfig;
use crate::convert::{Conversion, ConvertResult, Converter};
use crate::timestamp::formatter::TimestampTextFormatter;
use crate::timestamp::types::{Timestamp, TimestampUnit};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;

lazy_static! {
    /// Epoch-like token: 9-13 digits, optionally with a fractional part (seconds only)
    static ref EPOCH_TOKEN: Regex = Regex::new(r"\b(\d{9,13})(?:\.(\d{1,9}))?\b").unwrap();
}

const NANOS_DIGITS: usize = 9;

/// Source of "now" for relative renderings
#[derive(Debug, Clone, Copy)]
pub enum Clock {
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(now) => *now,
        }
    }
}

/// Finds Unix timestamps (seconds or milliseconds) in clipboard text
pub struct TimestampConverter {
    formatter: TimestampTextFormatter,
    enabled: bool,
    min_seconds: i64,
    max_seconds: i64,
    output_template: String,
    templates: BTreeMap<String, String>,
    clock: Clock,
}

impl TimestampConverter {
    pub fn new(config: &TimestampConfig, enabled: bool) -> Self {
        Self {
            formatter: TimestampTextFormatter::new(config.utc),
            enabled,
            min_seconds: config.min_seconds,
            max_seconds: config.max_seconds,
            output_template: config.output.clone(),
            templates: config.templates.clone(),
            clock: Clock::System,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// First in-range timestamp in the text, with the token it was read from
    pub fn find_timestamp<'t>(&self, text: &'t str) -> Option<(Timestamp, &'t str)> {
        EPOCH_TOKEN.captures_iter(text).find_map(|caps| {
            let token = caps.get(0)?;

            // "1.1700000000" or "1700000000.5.3" are version numbers, not timestamps
            let before = text[..token.start()].chars().next_back();
            let after = text[token.end()..].chars().next();
            if before == Some('.') || after == Some('.') {
                return None;
            }

            let whole: i64 = caps.get(1)?.as_str().parse().ok()?;
            let timestamp = match caps.get(2) {
                Some(fraction) => {
                    self.in_range(whole)?;
                    Timestamp::new(whole, parse_nanos(fraction.as_str())?, TimestampUnit::Seconds)
                }
                None => self.interpret_integer(whole)?,
            };

            Some((timestamp, token.as_str()))
        })
    }

    fn interpret_integer(&self, value: i64) -> Option<Timestamp> {
        if self.in_range(value).is_some() {
            return Some(Timestamp::new(value, 0, TimestampUnit::Seconds));
        }

        let seconds = value / 1000;
        self.in_range(seconds)?;
        let nanos = u32::try_from(value % 1000).ok()? * 1_000_000;
        Some(Timestamp::new(seconds, nanos, TimestampUnit::Milliseconds))
    }

    fn in_range(&self, seconds: i64) -> Option<()> {
        (self.min_seconds..=self.max_seconds)
            .contains(&seconds)
            .then_some(())
    }
}

// ".5" -> 500_000_000
fn parse_nanos(fraction: &str) -> Option<u32> {
    let padded = format!("{:0<width$}", fraction, width = NANOS_DIGITS);
    padded.get(..NANOS_DIGITS)?.parse().ok()
}

impl Converter for TimestampConverter {
    fn name(&self) -> &str {
        "Timestamp"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn try_convert(&self, text: &str) -> Conversion {
        let Some((timestamp, token)) = self.find_timestamp(text) else {
            return Conversion::NoMatch;
        };

        let now = self.clock.now();
        let output = self
            .formatter
            .format(&timestamp, &self.output_template, now);

        let mut result = ConvertResult::new(self.name(), token, output)
            .with_metadata("timestamp", timestamp.seconds().to_string())
            .with_metadata("unit", timestamp.unit().as_str());

        for (name, template) in &self.templates {
            let rendered = self.formatter.format(&timestamp, template, now);
            result = result.with_metadata(format!("template.{}", name), rendered);
        }

        Conversion::Matched(result)
    }
}
