//! Civil time normalization and the Julian Day scales the oracle works in.

use crate::ephemeris::types::{BirthData, TimeZoneSpec};
use crate::error::{AstroError, Result};
use chrono::{
    DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Julian Day of 1970-01-01T00:00:00Z.
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;
pub const J2000_JD: f64 = 2_451_545.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
const MAX_OFFSET_SECONDS: i32 = 26 * 3600;

/// A moment in time in the three representations the calculations need.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Instant {
    pub utc: DateTime<Utc>,
    /// Julian Day, Universal Time. Drives sidereal time.
    pub julian_day_ut: f64,
    /// Julian Day, Terrestrial Time. Drives obliquity and precession.
    pub julian_day_tt: f64,
}

impl Instant {
    pub fn from_utc(utc: DateTime<Utc>) -> Self {
        let seconds = utc.timestamp() as f64 + utc.timestamp_subsec_nanos() as f64 / 1e9;
        let julian_day_ut = UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY;
        Self {
            utc,
            julian_day_ut,
            julian_day_tt: julian_day_ut + delta_t_seconds(julian_day_ut) / SECONDS_PER_DAY,
        }
    }

    /// Instant for a Julian Day (UT). The given day number is kept as is; the
    /// UTC timestamp is rounded to the nearest nanosecond.
    pub fn from_julian_day_ut(julian_day_ut: f64) -> Result<Self> {
        let invalid = || AstroError::InvalidTimestamp {
            input: format!("JD {}", julian_day_ut),
            message: "Julian Day is outside the representable calendar".to_string(),
        };
        if !julian_day_ut.is_finite() {
            return Err(invalid());
        }
        let seconds = (julian_day_ut - UNIX_EPOCH_JD) * SECONDS_PER_DAY;
        let whole = seconds.floor();
        if whole.abs() > i64::MAX as f64 / 2.0 {
            return Err(invalid());
        }
        let nanos = (((seconds - whole) * 1e9).round() as u32).min(999_999_999);
        let utc = Utc
            .timestamp_opt(whole as i64, nanos)
            .single()
            .ok_or_else(invalid)?;
        Ok(Self {
            utc,
            julian_day_ut,
            julian_day_tt: julian_day_ut + delta_t_seconds(julian_day_ut) / SECONDS_PER_DAY,
        })
    }
}

/// Civil birth time resolved to an instant plus the UTC offset in effect.
#[derive(Debug, Clone, PartialEq)]
pub struct CivilTime {
    pub instant: Instant,
    pub utc_offset_seconds: i32,
    pub zone: Option<String>,
}

/// Resolve the civil date and time of a birth record to UTC.
///
/// Local times skipped by a daylight-saving transition and local times that
/// occur twice are both rejected: picking one silently would shift the chart
/// by an hour.
pub fn normalize_birth_time(birth: &BirthData) -> Result<CivilTime> {
    let input = format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        birth.year, birth.month, birth.day, birth.hour, birth.minute, birth.second
    );
    let invalid = |message: String| AstroError::InvalidTimestamp {
        input: input.clone(),
        message,
    };

    let date = NaiveDate::from_ymd_opt(birth.year, birth.month, birth.day)
        .ok_or_else(|| invalid("not a calendar date".to_string()))?;
    let time = NaiveTime::from_hms_opt(birth.hour, birth.minute, birth.second)
        .ok_or_else(|| invalid("not a time of day".to_string()))?;
    let local = NaiveDateTime::new(date, time);

    let (utc, utc_offset_seconds, zone) = match &birth.timezone {
        TimeZoneSpec::Utc => (Utc.from_utc_datetime(&local), 0, None),
        TimeZoneSpec::Offset { seconds } => {
            if seconds.abs() > MAX_OFFSET_SECONDS {
                return Err(invalid(format!(
                    "UTC offset of {} seconds exceeds 26 hours",
                    seconds
                )));
            }
            let shifted = local
                .checked_sub_signed(chrono::Duration::seconds(*seconds as i64))
                .ok_or_else(|| invalid("offset moves the time out of range".to_string()))?;
            (Utc.from_utc_datetime(&shifted), *seconds, None)
        }
        TimeZoneSpec::Iana { name } => {
            let tz: Tz = name
                .parse()
                .map_err(|e| invalid(format!("unknown time zone '{}': {}", name, e)))?;
            let (utc, offset) = resolve_local(tz.from_local_datetime(&local), name)
                .map_err(invalid)?;
            (utc, offset, Some(name.clone()))
        }
    };

    Ok(CivilTime {
        instant: Instant::from_utc(utc),
        utc_offset_seconds,
        zone,
    })
}

fn resolve_local<Z: TimeZone>(
    result: LocalResult<DateTime<Z>>,
    zone: &str,
) -> std::result::Result<(DateTime<Utc>, i32), String> {
    match result {
        LocalResult::Single(dt) => {
            let offset = dt.offset().fix().local_minus_utc();
            Ok((dt.with_timezone(&Utc), offset))
        }
        LocalResult::None => Err(format!(
            "local time does not exist in {} (daylight-saving gap)",
            zone
        )),
        LocalResult::Ambiguous(first, second) => Err(format!(
            "local time is ambiguous in {} (offsets {} and {})",
            zone,
            first.offset().fix(),
            second.offset().fix()
        )),
    }
}

/// Delta T = TT - UT in seconds, Espenak & Meeus polynomial expressions.
pub fn delta_t_seconds(julian_day_ut: f64) -> f64 {
    let y = 2000.0 + (julian_day_ut - J2000_JD) / 365.25;
    let long_term = |y: f64| {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    };

    if y < -500.0 {
        long_term(y)
    } else if y < 500.0 {
        poly(
            y / 100.0,
            &[10583.6, -1014.41, 33.78311, -5.952053, -0.1798452, 0.022174192, 0.0090316521],
        )
    } else if y < 1600.0 {
        poly(
            (y - 1000.0) / 100.0,
            &[1574.2, -556.01, 71.23472, 0.319781, -0.8503463, -0.005050998, 0.0083572073],
        )
    } else if y < 1700.0 {
        poly(y - 1600.0, &[120.0, -0.9808, -0.01532, 1.0 / 7129.0])
    } else if y < 1800.0 {
        poly(
            y - 1700.0,
            &[8.83, 0.1603, -0.0059285, 0.00013336, -1.0 / 1_174_000.0],
        )
    } else if y < 1860.0 {
        poly(
            y - 1800.0,
            &[
                13.72,
                -0.332447,
                0.0068612,
                0.0041116,
                -0.00037436,
                0.0000121272,
                -0.0000001699,
                0.000000000875,
            ],
        )
    } else if y < 1900.0 {
        poly(
            y - 1860.0,
            &[7.62, 0.5737, -0.251754, 0.01680668, -0.0004473624, 1.0 / 233_174.0],
        )
    } else if y < 1920.0 {
        poly(y - 1900.0, &[-2.79, 1.494119, -0.0598939, 0.0061966, -0.000197])
    } else if y < 1941.0 {
        poly(y - 1920.0, &[21.20, 0.84493, -0.076100, 0.0020936])
    } else if y < 1961.0 {
        poly(y - 1950.0, &[29.07, 0.407, -1.0 / 233.0, 1.0 / 2547.0])
    } else if y < 1986.0 {
        poly(y - 1975.0, &[45.45, 1.067, -1.0 / 260.0, -1.0 / 718.0])
    } else if y < 2005.0 {
        poly(
            y - 2000.0,
            &[63.86, 0.3345, -0.060374, 0.0017275, 0.000651814, 0.00002373599],
        )
    } else if y < 2050.0 {
        poly(y - 2000.0, &[62.92, 0.32217, 0.005589])
    } else if y < 2150.0 {
        long_term(y) - 0.5628 * (2150.0 - y)
    } else {
        long_term(y)
    }
}

// Horner evaluation, coefficients in ascending order.
fn poly(x: f64, coefficients: &[f64]) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}
