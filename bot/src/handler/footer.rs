use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use std::fmt::Display;
use std::str::FromStr;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Day 1 is the day the relay went live.
pub const DEFAULT_START_DATE: &str = "2024-10-27";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockStyle {
    #[default]
    TwelveHour,
    TwentyFourHour,
}

impl FromStr for ClockStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "12" | "12h" => Ok(ClockStyle::TwelveHour),
            "24" | "24h" => Ok(ClockStyle::TwentyFourHour),
            other => Err(format!("unknown clock style {other:?}, expected 12h or 24h")),
        }
    }
}

/// Counted from 1
pub fn day_number<Tz: TimeZone>(now: &DateTime<Tz>, start: &DateTime<Utc>) -> i64 {
    (now.timestamp_millis() - start.timestamp_millis()).div_euclid(MS_PER_DAY) + 1
}

pub fn time_label<Tz: TimeZone>(now: &DateTime<Tz>, style: ClockStyle) -> String
where
    Tz::Offset: Display,
{
    match style {
        ClockStyle::TwelveHour => now.format("%I:%M %p").to_string(),
        ClockStyle::TwentyFourHour => now.format("%H:%M").to_string(),
    }
}

pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FooterFormat {
    pub start: DateTime<Utc>,
    pub clock: ClockStyle,
}

impl FooterFormat {
    pub fn new(start_date: NaiveDate, clock: ClockStyle) -> FooterFormat {
        FooterFormat {
            start: start_of_day(start_date),
            clock,
        }
    }

    pub fn render<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> String
    where
        Tz::Offset: Display,
    {
        format!(
            "Day {} [ {} ]",
            day_number(now, &self.start),
            time_label(now, self.clock)
        )
    }
}
