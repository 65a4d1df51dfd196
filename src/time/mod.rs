//! Duration formatting, parsing and validation.
//!
//! Durations are whole seconds. Display strings are `MM:SS` below one hour
//! and `HH:MM:SS` from one hour up, every component padded to at least two
//! digits.
//!
//! ```rust
//! use online_timer::time::{format_timer_time, parse_time_string, validate_timer_time};
//!
//! assert_eq!(format_timer_time(3661), "01:01:01");
//! assert_eq!(parse_time_string("25:00").unwrap(), 1500);
//! assert!(validate_timer_time(1500));
//! assert!(!validate_timer_time(1.5));
//! ```

mod error;

pub use error::TimeParseError;

use crate::types::MAX_TIMER_SECONDS;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3600;
const MAX_HOURS: u64 = 100;

/// Numeric types accepted as a count of seconds.
///
/// Integers convert exactly; floats keep their fractional part so that
/// validation can reject them.
pub trait SecondsValue: Copy {
    fn as_seconds(self) -> f64;
}

macro_rules! impl_seconds_value {
    ($($t:ty),*) => {
        $(
            impl SecondsValue for $t {
                #[inline]
                fn as_seconds(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_seconds_value!(i32, i64, u32, u64, f32, f64);

/// Formats a number of seconds as `MM:SS` or `HH:MM:SS`.
///
/// Zero, negative and non-finite inputs format as `"00:00"`. Fractional
/// seconds are truncated.
pub fn format_timer_time(seconds: impl SecondsValue) -> String {
    let seconds = seconds.as_seconds();
    if !seconds.is_finite() || seconds <= 0.0 {
        return "00:00".to_string();
    }

    // Float-to-int casts saturate, so huge inputs cannot wrap.
    let total = seconds.floor() as u64;
    let hours = total / SECONDS_PER_HOUR;
    let minutes = (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let secs = total % SECONDS_PER_MINUTE;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Parses `MM:SS` or `HH:MM:SS` into a number of seconds.
///
/// Minutes are unbounded in the two-part form. In the three-part form hours
/// must be below 100 and minutes below 60; seconds are always below 60.
///
/// # Errors
///
/// Returns a [`TimeParseError`] describing whether the input was malformed
/// or a component was out of range.
pub fn parse_time_string(text: &str) -> Result<u64, TimeParseError> {
    let parts = text
        .split(':')
        .map(|part| parse_component(text, part))
        .collect::<Result<Vec<u64>, _>>()?;

    match parts.as_slice() {
        [minutes, seconds] => {
            check_below("seconds", *seconds, SECONDS_PER_MINUTE)?;
            minutes
                .checked_mul(SECONDS_PER_MINUTE)
                .and_then(|total| total.checked_add(*seconds))
                .ok_or_else(|| TimeParseError::Overflow(text.to_string()))
        }
        [hours, minutes, seconds] => {
            check_below("hours", *hours, MAX_HOURS)?;
            check_below("minutes", *minutes, SECONDS_PER_MINUTE)?;
            check_below("seconds", *seconds, SECONDS_PER_MINUTE)?;
            Ok(hours * SECONDS_PER_HOUR + minutes * SECONDS_PER_MINUTE + seconds)
        }
        _ => Err(TimeParseError::WrongArity {
            input: text.to_string(),
            found: parts.len(),
        }),
    }
}

/// Returns true if `value` is a whole number of seconds between 1 and
/// 99 hours inclusive.
pub fn validate_timer_time(value: impl SecondsValue) -> bool {
    let value = value.as_seconds();
    value.is_finite()
        && value.fract() == 0.0
        && value >= 1.0
        && value <= MAX_TIMER_SECONDS as f64
}

fn parse_component(input: &str, part: &str) -> Result<u64, TimeParseError> {
    let value: i64 = part
        .trim()
        .parse()
        .map_err(|_| TimeParseError::InvalidFormat(input.to_string()))?;
    u64::try_from(value).map_err(|_| TimeParseError::NegativeComponent(input.to_string()))
}

fn check_below(unit: &'static str, value: u64, limit: u64) -> Result<(), TimeParseError> {
    if value >= limit {
        return Err(TimeParseError::OutOfRange { unit, value, limit });
    }
    Ok(())
}
