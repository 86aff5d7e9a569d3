//! Cusp strategies. Every strategy takes (latitude, ARMC, obliquity) in
//! degrees and returns cusps 1-12 in order.

use crate::error::{AstroError, Result};
use crate::houses::sidereal::{
    ascendant, asind, atan2d, atand, cosd, declination, ecliptic_intersection, midheaven, sind,
    tand,
};
use crate::zodiac::normalize_degrees;

const PLACIDUS_MAX_ITERATIONS: usize = 100;
const PLACIDUS_TOLERANCE: f64 = 1e-10;

/// Assemble 12 cusps from the eastern half (10, 11, 12, 1, 2, 3); the
/// western half is the opposite point of each.
fn from_quadrants(mc: f64, c11: f64, c12: f64, asc: f64, c2: f64, c3: f64) -> [f64; 12] {
    let east = [asc, c2, c3];
    let south = [mc, c11, c12];
    let mut cusps = [0.0; 12];
    for i in 0..3 {
        cusps[i] = normalize_degrees(east[i]);
        cusps[i + 3] = normalize_degrees(south[i] + 180.0);
        cusps[i + 6] = normalize_degrees(east[i] + 180.0);
        cusps[i + 9] = normalize_degrees(south[i]);
    }
    cusps
}

fn polar(system: &str, latitude: f64, message: &str) -> AstroError {
    AstroError::PolarCircleUndefined {
        system: system.to_string(),
        latitude,
        message: message.to_string(),
    }
}

/// Ascensional difference of an ecliptic point, if it rises and sets.
fn ascensional_difference(latitude: f64, longitude: f64, obliquity: f64) -> Option<f64> {
    let x = tand(latitude) * tand(declination(longitude, obliquity));
    if x.abs() > 1.0 {
        None
    } else {
        Some(asind(x))
    }
}

fn check_polar_circle(system: &str, latitude: f64, obliquity: f64) -> Result<()> {
    if latitude.abs() >= 90.0 - obliquity {
        Err(polar(
            system,
            latitude,
            "latitude is inside the polar circle, semi-arcs do not exist",
        ))
    } else {
        Ok(())
    }
}

pub fn placidus(latitude: f64, armc: f64, obliquity: f64) -> Result<[f64; 12]> {
    check_polar_circle("placidus", latitude, obliquity)?;
    let cusp = |fraction: f64, upper: bool| placidus_cusp(latitude, armc, obliquity, fraction, upper);
    let c11 = cusp(1.0 / 3.0, true)?;
    let c12 = cusp(2.0 / 3.0, true)?;
    let c2 = cusp(2.0 / 3.0, false)?;
    let c3 = cusp(1.0 / 3.0, false)?;
    Ok(from_quadrants(
        midheaven(armc, obliquity),
        c11,
        c12,
        ascendant(armc, latitude, obliquity),
        c2,
        c3,
    ))
}

/// Placidus cusps trisect the time a degree takes to travel its own
/// semi-arc, so each cusp depends on its own declination. Solved by fixed
/// point iteration from the zero-latitude guess.
fn placidus_cusp(
    latitude: f64,
    armc: f64,
    obliquity: f64,
    fraction: f64,
    upper: bool,
) -> Result<f64> {
    let right_ascension = |ad: f64| {
        if upper {
            armc + fraction * (90.0 + ad)
        } else {
            armc + 180.0 - fraction * (90.0 - ad)
        }
    };

    let mut longitude = ecliptic_intersection(right_ascension(0.0), 0.0, obliquity);
    for _ in 0..PLACIDUS_MAX_ITERATIONS {
        let ad = ascensional_difference(latitude, longitude, obliquity).ok_or_else(|| {
            polar(
                "placidus",
                latitude,
                "semi-arc equation has no solution for this cusp",
            )
        })?;
        let next = ecliptic_intersection(right_ascension(ad), 0.0, obliquity);
        let change = (next - longitude + 540.0).rem_euclid(360.0) - 180.0;
        longitude = next;
        if change.abs() < PLACIDUS_TOLERANCE {
            break;
        }
    }
    Ok(longitude)
}

pub fn koch(latitude: f64, armc: f64, obliquity: f64) -> Result<[f64; 12]> {
    check_polar_circle("koch", latitude, obliquity)?;
    let mc = midheaven(armc, obliquity);
    let ad = ascensional_difference(latitude, mc, obliquity)
        .ok_or_else(|| polar("koch", latitude, "the midheaven degree never rises"))?;
    let third = ad / 3.0;
    let cusp = |ra: f64| ecliptic_intersection(ra, latitude, obliquity);
    Ok(from_quadrants(
        mc,
        cusp(armc + 30.0 - 2.0 * third),
        cusp(armc + 60.0 - third),
        ascendant(armc, latitude, obliquity),
        cusp(armc + 120.0 + third),
        cusp(armc + 150.0 + 2.0 * third),
    ))
}

pub fn porphyry(latitude: f64, armc: f64, obliquity: f64) -> Result<[f64; 12]> {
    let mc = midheaven(armc, obliquity);
    let asc = ascendant(armc, latitude, obliquity);
    let upper = normalize_degrees(asc - mc) / 3.0;
    let lower = (180.0 - normalize_degrees(asc - mc)) / 3.0;
    Ok(from_quadrants(
        mc,
        mc + upper,
        mc + 2.0 * upper,
        asc,
        asc + lower,
        asc + 2.0 * lower,
    ))
}

pub fn regiomontanus(latitude: f64, armc: f64, obliquity: f64) -> Result<[f64; 12]> {
    let cusp = |hour_angle: f64| {
        let pole = atand(tand(latitude) * sind(hour_angle));
        ecliptic_intersection(armc + hour_angle, pole, obliquity)
    };
    Ok(from_quadrants(
        midheaven(armc, obliquity),
        cusp(30.0),
        cusp(60.0),
        ascendant(armc, latitude, obliquity),
        cusp(120.0),
        cusp(150.0),
    ))
}

pub fn campanus(latitude: f64, armc: f64, obliquity: f64) -> Result<[f64; 12]> {
    // prime vertical division projected onto the equator
    let cusp = |prime_vertical: f64| {
        let hour_angle = atan2d(
            cosd(latitude) * sind(prime_vertical),
            cosd(prime_vertical),
        );
        let pole = atand(tand(latitude) * sind(hour_angle));
        ecliptic_intersection(armc + hour_angle, pole, obliquity)
    };
    Ok(from_quadrants(
        midheaven(armc, obliquity),
        cusp(30.0),
        cusp(60.0),
        ascendant(armc, latitude, obliquity),
        cusp(120.0),
        cusp(150.0),
    ))
}

pub fn alcabitius(latitude: f64, armc: f64, obliquity: f64) -> Result<[f64; 12]> {
    let asc = ascendant(armc, latitude, obliquity);
    let ad = ascensional_difference(latitude, asc, obliquity)
        .ok_or_else(|| polar("alcabitius", latitude, "the ascendant degree has no semi-arc"))?;
    let diurnal = 90.0 + ad;
    let nocturnal = 90.0 - ad;
    let cusp = |ra: f64| ecliptic_intersection(ra, 0.0, obliquity);
    Ok(from_quadrants(
        midheaven(armc, obliquity),
        cusp(armc + diurnal / 3.0),
        cusp(armc + 2.0 * diurnal / 3.0),
        asc,
        cusp(armc + 180.0 - 2.0 * nocturnal / 3.0),
        cusp(armc + 180.0 - nocturnal / 3.0),
    ))
}

pub fn topocentric(latitude: f64, armc: f64, obliquity: f64) -> Result<[f64; 12]> {
    check_polar_circle("topocentric", latitude, obliquity)?;
    let near = atand(tand(latitude) / 3.0);
    let far = atand(2.0 * tand(latitude) / 3.0);
    let cusp = |offset: f64, pole: f64| ecliptic_intersection(armc + offset, pole, obliquity);
    Ok(from_quadrants(
        midheaven(armc, obliquity),
        cusp(30.0, near),
        cusp(60.0, far),
        ascendant(armc, latitude, obliquity),
        cusp(120.0, far),
        cusp(150.0, near),
    ))
}

pub fn morinus(_latitude: f64, armc: f64, obliquity: f64) -> Result<[f64; 12]> {
    let mut cusps = [0.0; 12];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        let ra = armc + 90.0 + 30.0 * i as f64;
        *cusp = normalize_degrees(atan2d(sind(ra) * cosd(obliquity), cosd(ra)));
    }
    Ok(cusps)
}

fn equal_from(start: f64) -> [f64; 12] {
    let mut cusps = [0.0; 12];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        *cusp = normalize_degrees(start + 30.0 * i as f64);
    }
    cusps
}

pub fn equal(latitude: f64, armc: f64, obliquity: f64) -> Result<[f64; 12]> {
    Ok(equal_from(ascendant(armc, latitude, obliquity)))
}

pub fn whole_sign(latitude: f64, armc: f64, obliquity: f64) -> Result<[f64; 12]> {
    let asc = ascendant(armc, latitude, obliquity);
    Ok(equal_from((asc / 30.0).floor() * 30.0))
}

/// Equal houses with the Ascendant in the middle of the first house.
pub fn vehlow_equal(latitude: f64, armc: f64, obliquity: f64) -> Result<[f64; 12]> {
    Ok(equal_from(ascendant(armc, latitude, obliquity) - 15.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 23.44;

    fn gap(from: f64, to: f64) -> f64 {
        normalize_degrees(to - from)
    }

    #[test]
    fn test_quadrant_systems_agree_on_the_equator_at_armc_zero() {
        // On the equator with ARMC 0 every quadrant system reduces to
        // right ascension divisions, and Cancer 0 rises.
        let p = placidus(0.0, 0.0, EPS).unwrap();
        let k = koch(0.0, 0.0, EPS).unwrap();
        let r = regiomontanus(0.0, 0.0, EPS).unwrap();
        for i in 0..12 {
            assert!((p[i] - k[i]).abs() < 1e-9, "cusp {}", i + 1);
            assert!((p[i] - r[i]).abs() < 1e-9, "cusp {}", i + 1);
        }
        assert!((p[0] - 90.0).abs() < 1e-9);
        assert!(p[9].abs() < 1e-9);
    }

    #[test]
    fn test_placidus_fails_inside_polar_circle() {
        assert!(matches!(
            placidus(70.0, 10.0, EPS),
            Err(AstroError::PolarCircleUndefined { .. })
        ));
        assert!(matches!(
            koch(-67.0, 10.0, EPS),
            Err(AstroError::PolarCircleUndefined { .. })
        ));
        assert!(porphyry(70.0, 10.0, EPS).is_ok());
    }

    #[test]
    fn test_whole_sign_and_vehlow() {
        let asc = ascendant(123.0, 45.0, EPS);
        let whole = whole_sign(45.0, 123.0, EPS).unwrap();
        assert_eq!(whole[0] % 30.0, 0.0);
        assert!(gap(whole[0], asc) < 30.0);
        let vehlow = vehlow_equal(45.0, 123.0, EPS).unwrap();
        assert!((gap(vehlow[0], asc) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_porphyry_trisects_quadrants() {
        let cusps = porphyry(40.0, 200.0, EPS).unwrap();
        let upper = gap(cusps[9], cusps[10]);
        assert!((gap(cusps[10], cusps[11]) - upper).abs() < 1e-9);
        assert!((gap(cusps[11], cusps[0]) - upper).abs() < 1e-9);
    }
}
