use std::time::{Duration, Instant};

use chrono::{NaiveTime, TimeDelta};

use crate::error::{Error, Result};

/// the format alarms are stored in and compared against, e.g. `07:30 AM`
pub const DISPLAY_FORMAT: &str = "%I:%M %p";

/// 24 hour format, what a native time picker hands us
const PICKER_FORMAT: &str = "%H:%M";

#[must_use]
pub fn format_time(time: NaiveTime) -> String {
    time.format(DISPLAY_FORMAT).to_string()
}

/// Parses user input into a time of day.
///
/// Accepts the display format (`07:30 AM`, `7:30 pm`) and 24 hour `HH:MM`.
/// Seconds are not accepted since alarms only resolve to the minute.
///
/// # Errors
///
/// Returns [`Error::InvalidTime`] if the input matches neither format.
pub fn parse_time(input: &str) -> Result<NaiveTime> {
    let trimmed = input.trim();
    let upper = trimmed.to_uppercase();
    NaiveTime::parse_from_str(&upper, DISPLAY_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(trimmed, PICKER_FORMAT))
        .map_err(|_| Error::InvalidTime(input.to_string()))
}

/// Parses user input and re-renders it in [`DISPLAY_FORMAT`].
///
/// # Errors
///
/// See [`parse_time`].
pub fn normalize_time(input: &str) -> Result<String> {
    parse_time(input).map(format_time)
}

/// `now` pushed forward by `minutes`, wrapping past midnight
#[must_use]
pub fn snooze_time(now: NaiveTime, minutes: u32) -> NaiveTime {
    let (time, _) = now.overflowing_add_signed(TimeDelta::minutes(i64::from(minutes)));
    time
}

/// Decides when the next poll is due.
///
/// The first call to [`Ticker::due`] always fires, after that once per
/// interval. Ticks missed while the app was not being updated are collapsed
/// into one.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next: Option<Instant>,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl Ticker {
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: None,
        }
    }

    pub fn due(&mut self, now: Instant) -> bool {
        match self.next {
            Some(next) if now < next => false,
            Some(next) => {
                let following = next + self.interval;
                self.next = Some(if following <= now {
                    now + self.interval
                } else {
                    following
                });
                true
            }
            None => {
                self.next = Some(now + self.interval);
                true
            }
        }
    }

    /// how long until the next tick, zero if one is already due
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next
            .map_or(Duration::ZERO, |next| next.saturating_duration_since(now))
    }
}
