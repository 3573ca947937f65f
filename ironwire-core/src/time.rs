/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/2/26
******************************************************************************/

//! FIX UTC timestamp formatting and parsing.
//!
//! The FIX grammar is `YYYYMMDD-HH:MM:SS[.fff[fff[fff]]]`: 17 bytes at
//! second precision, 21 at millisecond, 24 at microsecond, 27 at nanosecond.
//! The parser detects precision from the input length and normalizes to
//! nanoseconds since the Unix epoch.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Sub-second precision of a FIX UTC timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClockPrecision {
    /// `YYYYMMDD-HH:MM:SS` (17 bytes).
    Seconds,
    /// `YYYYMMDD-HH:MM:SS.fff` (21 bytes).
    Millis,
    /// `YYYYMMDD-HH:MM:SS.ffffff` (24 bytes).
    Micros,
    /// `YYYYMMDD-HH:MM:SS.fffffffff` (27 bytes).
    Nanos,
}

impl ClockPrecision {
    /// Returns the encoded width in bytes at this precision.
    #[inline]
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::Seconds => 17,
            Self::Millis => 21,
            Self::Micros => 24,
            Self::Nanos => 27,
        }
    }
}

/// Returns the current UTC time as nanoseconds since the Unix epoch.
#[inline]
#[must_use]
pub fn unix_now_nanos() -> i64 {
    Utc::now().timestamp_nanos_opt().unwrap_or(0)
}

#[inline]
fn write2(dest: &mut [u8], at: usize, v: u32) {
    dest[at] = b'0' + (v / 10 % 10) as u8;
    dest[at + 1] = b'0' + (v % 10) as u8;
}

#[inline]
fn write3(dest: &mut [u8], at: usize, v: u32) {
    dest[at] = b'0' + (v / 100 % 10) as u8;
    dest[at + 1] = b'0' + (v / 10 % 10) as u8;
    dest[at + 2] = b'0' + (v % 10) as u8;
}

/// Formats a FIX UTC timestamp into `dest`, returning the byte count
/// (17, 21, 24, or 27 depending on `precision`).
///
/// # Arguments
/// * `dest` - Output buffer; must hold `precision.width()` bytes
/// * `nanos` - Nanoseconds since the Unix epoch
/// * `precision` - Sub-second precision to emit
#[must_use]
pub fn format_utc(dest: &mut [u8], nanos: i64, precision: ClockPrecision) -> usize {
    let secs = nanos.div_euclid(1_000_000_000);
    let subsec = nanos.rem_euclid(1_000_000_000) as u32;
    let dt: DateTime<Utc> =
        DateTime::from_timestamp(secs, subsec).unwrap_or(DateTime::UNIX_EPOCH);

    let year = dt.year() as u32;
    dest[0] = b'0' + (year / 1000 % 10) as u8;
    dest[1] = b'0' + (year / 100 % 10) as u8;
    dest[2] = b'0' + (year / 10 % 10) as u8;
    dest[3] = b'0' + (year % 10) as u8;
    write2(dest, 4, dt.month());
    write2(dest, 6, dt.day());
    dest[8] = b'-';
    write2(dest, 9, dt.hour());
    dest[11] = b':';
    write2(dest, 12, dt.minute());
    dest[14] = b':';
    write2(dest, 15, dt.second());
    if precision == ClockPrecision::Seconds {
        return 17;
    }

    dest[17] = b'.';
    write3(dest, 18, subsec / 1_000_000);
    if precision == ClockPrecision::Millis {
        return 21;
    }
    write3(dest, 21, subsec / 1_000 % 1_000);
    if precision == ClockPrecision::Micros {
        return 24;
    }
    write3(dest, 24, subsec % 1_000);
    27
}

#[inline]
fn digit(src: &[u8], at: usize) -> Option<u32> {
    let b = src[at];
    b.is_ascii_digit().then(|| u32::from(b - b'0'))
}

#[inline]
fn read2(src: &[u8], at: usize) -> Option<u32> {
    Some(digit(src, at)? * 10 + digit(src, at + 1)?)
}

#[inline]
fn read3(src: &[u8], at: usize) -> Option<u32> {
    Some(digit(src, at)? * 100 + digit(src, at + 1)? * 10 + digit(src, at + 2)?)
}

/// Parses a FIX UTC timestamp, returning nanoseconds since the Unix epoch.
///
/// Precision is detected from the input length; a length between two
/// precision widths is treated as the longest fully present precision.
///
/// # Arguments
/// * `src` - The timestamp bytes, without delimiters
///
/// # Returns
/// Nanoseconds since the epoch, or `None` if the input does not match the
/// FIX UTC timestamp grammar.
#[must_use]
pub fn parse_utc(src: &[u8]) -> Option<i64> {
    if src.len() < 17 {
        return None;
    }
    let year = (read2(src, 0)? * 100 + read2(src, 2)?) as i32;
    let month = read2(src, 4)?;
    let day = read2(src, 6)?;
    let hour = read2(src, 9)?;
    let minute = read2(src, 12)?;
    let second = read2(src, 15)?;
    if src[8] != b'-' || src[11] != b':' || src[14] != b':' {
        return None;
    }

    let secs = NaiveDate::from_ymd_opt(year, month, day)?
        .and_hms_opt(hour, minute, second)?
        .and_utc()
        .timestamp();

    let mut subsec_nanos: i64 = 0;
    if src.len() >= 21 {
        if src[17] != b'.' {
            return None;
        }
        subsec_nanos = i64::from(read3(src, 18)?) * 1_000_000;
        if src.len() >= 24 {
            subsec_nanos += i64::from(read3(src, 21)?) * 1_000;
            if src.len() >= 27 {
                subsec_nanos += i64::from(read3(src, 24)?);
            }
        }
    }
    Some(secs * 1_000_000_000 + subsec_nanos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn nanos_of(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, ns: u32) -> i64 {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
            .unwrap()
            .timestamp_nanos_opt()
            .unwrap()
            + i64::from(ns)
    }

    #[test]
    fn test_format_widths() {
        let ts = nanos_of(2025, 2, 11, 12, 28, 38, 728_000_000);
        let mut buf = [0u8; 32];
        assert_eq!(format_utc(&mut buf, ts, ClockPrecision::Seconds), 17);
        assert_eq!(&buf[..17], b"20250211-12:28:38");
        assert_eq!(format_utc(&mut buf, ts, ClockPrecision::Millis), 21);
        assert_eq!(&buf[..21], b"20250211-12:28:38.728");
        assert_eq!(format_utc(&mut buf, ts, ClockPrecision::Micros), 24);
        assert_eq!(&buf[..24], b"20250211-12:28:38.728000");
        assert_eq!(format_utc(&mut buf, ts, ClockPrecision::Nanos), 27);
        assert_eq!(&buf[..27], b"20250211-12:28:38.728000000");
    }

    #[test]
    fn test_format_epoch() {
        let mut buf = [0u8; 32];
        let n = format_utc(&mut buf, 0, ClockPrecision::Seconds);
        assert_eq!(&buf[..n], b"19700101-00:00:00");
    }

    #[test]
    fn test_parse_precisions() {
        let expected_sec = nanos_of(2025, 2, 11, 12, 28, 38, 0);
        assert_eq!(parse_utc(b"20250211-12:28:38"), Some(expected_sec));
        assert_eq!(
            parse_utc(b"20250211-12:28:38.728"),
            Some(expected_sec + 728_000_000)
        );
        assert_eq!(
            parse_utc(b"20250211-12:28:38.728431"),
            Some(expected_sec + 728_431_000)
        );
        assert_eq!(
            parse_utc(b"20250211-12:28:38.728431902"),
            Some(expected_sec + 728_431_902)
        );
    }

    #[test]
    fn test_parse_in_between_length_takes_prefix() {
        // 19 bytes: not enough for milliseconds, falls back to seconds.
        let expected = nanos_of(2025, 2, 11, 12, 28, 38, 0);
        assert_eq!(parse_utc(b"20250211-12:28:38.7"), Some(expected));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_utc(b""), None);
        assert_eq!(parse_utc(b"20250211 12:28:38"), None);
        assert_eq!(parse_utc(b"2025021x-12:28:38"), None);
        assert_eq!(parse_utc(b"20251311-12:28:38"), None);
    }

    #[test]
    fn test_roundtrip() {
        let ts = nanos_of(2026, 1, 27, 9, 5, 3, 120_450_780);
        let mut buf = [0u8; 32];
        let n = format_utc(&mut buf, ts, ClockPrecision::Nanos);
        assert_eq!(parse_utc(&buf[..n]), Some(ts));
    }
}
