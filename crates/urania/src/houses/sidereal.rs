//! Earth orientation quantities shared by every house system.

use crate::ephemeris::time::{Instant, J2000_JD};
use crate::zodiac::normalize_degrees;

/// Mean obliquity of the ecliptic in degrees (IAU 1980, Meeus 22.2).
pub fn mean_obliquity(julian_day_tt: f64) -> f64 {
    let t = (julian_day_tt - J2000_JD) / 36_525.0;
    let arcsec = 46.8150 * t + 0.00059 * t * t - 0.001813 * t * t * t;
    23.439_291_111 - arcsec / 3600.0
}

/// Greenwich mean sidereal time in degrees (IAU 1982, Meeus 12.4).
pub fn greenwich_mean_sidereal_time(julian_day_ut: f64) -> f64 {
    let d = julian_day_ut - J2000_JD;
    let t = d / 36_525.0;
    normalize_degrees(
        280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t
            - t * t * t / 38_710_000.0,
    )
}

/// Right ascension of the midheaven for an east longitude.
pub fn armc(instant: &Instant, longitude: f64) -> f64 {
    normalize_degrees(greenwich_mean_sidereal_time(instant.julian_day_ut) + longitude)
}

pub(crate) fn sind(x: f64) -> f64 {
    x.to_radians().sin()
}

pub(crate) fn cosd(x: f64) -> f64 {
    x.to_radians().cos()
}

pub(crate) fn tand(x: f64) -> f64 {
    x.to_radians().tan()
}

pub(crate) fn asind(x: f64) -> f64 {
    x.asin().to_degrees()
}

pub(crate) fn atand(x: f64) -> f64 {
    x.atan().to_degrees()
}

pub(crate) fn atan2d(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees()
}

/// Ecliptic longitude cut by the house circle of pole height `pole` whose
/// oblique ascension is `ra`. Pole 0 gives the ecliptic point of right
/// ascension `ra`; pole = latitude with `ra = ARMC + 90` gives the Ascendant.
pub(crate) fn ecliptic_intersection(ra: f64, pole: f64, obliquity: f64) -> f64 {
    normalize_degrees(atan2d(
        sind(ra),
        cosd(ra) * cosd(obliquity) - tand(pole) * sind(obliquity),
    ))
}

pub fn midheaven(armc: f64, obliquity: f64) -> f64 {
    ecliptic_intersection(armc, 0.0, obliquity)
}

pub fn ascendant(armc: f64, latitude: f64, obliquity: f64) -> f64 {
    ecliptic_intersection(armc + 90.0, latitude, obliquity)
}

/// Declination of an ecliptic point with zero ecliptic latitude.
pub(crate) fn declination(longitude: f64, obliquity: f64) -> f64 {
    asind(sind(obliquity) * sind(longitude))
}
