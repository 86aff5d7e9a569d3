#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use urania::ephemeris::time::J2000_JD;
use urania::subject::{BirthMetadata, SubjectKind, SubjectModel};
use urania::{
    AstroError, BirthData, EclipticPosition, EphemerisAdapter, EphemerisOracle, GeoLocation,
    HouseSystem, Instant, Point, TimeZoneSpec, ZodiacType,
};

/// Oracle where every body moves uniformly from a J2000 longitude.
pub struct LinearOracle {
    range: (f64, f64),
}

impl LinearOracle {
    pub fn new() -> Self {
        Self {
            range: (2_400_000.5, 2_500_000.5),
        }
    }

    pub fn with_range(range: (f64, f64)) -> Self {
        Self { range }
    }

    // (longitude at J2000, degrees per day)
    fn elements(point: Point) -> Option<(f64, f64)> {
        let elements = match point {
            Point::Sun => (280.46, 0.985_647),
            Point::Moon => (218.32, 13.176_396),
            Point::Mercury => (252.25, 1.383),
            Point::Venus => (181.98, 1.602),
            Point::Mars => (355.43, 0.524),
            Point::Jupiter => (34.35, 0.083),
            Point::Saturn => (50.08, 0.033),
            Point::Uranus => (314.05, 0.0117),
            Point::Neptune => (304.35, 0.006),
            Point::Pluto => (238.93, 0.004),
            Point::MeanNode | Point::TrueNode => (125.04, -0.052_954),
            Point::Chiron => (251.0, 0.02),
            Point::MeanLilith => (263.35, 0.111),
            _ => return None,
        };
        Some(elements)
    }
}

impl EphemerisOracle for LinearOracle {
    fn name(&self) -> &str {
        "linear"
    }

    fn valid_range(&self) -> (f64, f64) {
        self.range
    }

    fn tropical_position(
        &self,
        point: Point,
        instant: &Instant,
    ) -> urania::Result<EclipticPosition> {
        let (base, rate) = Self::elements(point).ok_or_else(|| AstroError::UnknownCelestialPoint {
            name: point.to_string(),
        })?;
        let days = instant.julian_day_ut - J2000_JD;
        Ok(EclipticPosition {
            lon: (base + rate * days).rem_euclid(360.0),
            lat: if point == Point::Moon { 5.0 } else { 0.0 },
            speed_lon: rate,
        })
    }
}

/// Oracle answering from a fixed table, regardless of time.
pub struct FixedOracle {
    pub positions: HashMap<Point, EclipticPosition>,
}

impl EphemerisOracle for FixedOracle {
    fn name(&self) -> &str {
        "fixed"
    }

    fn valid_range(&self) -> (f64, f64) {
        (f64::MIN, f64::MAX)
    }

    fn tropical_position(
        &self,
        point: Point,
        _instant: &Instant,
    ) -> urania::Result<EclipticPosition> {
        self.positions
            .get(&point)
            .copied()
            .ok_or_else(|| AstroError::EphemerisUnavailable {
                oracle: "fixed".to_string(),
                message: format!("no position for {}", point),
            })
    }
}

pub fn linear_adapter() -> EphemerisAdapter {
    EphemerisAdapter::new(Arc::new(LinearOracle::new()))
}

pub fn birth_1990() -> BirthData {
    BirthData {
        year: 1990,
        month: 1,
        day: 1,
        hour: 0,
        minute: 0,
        second: 0,
        latitude: 0.0,
        longitude: 0.0,
        timezone: TimeZoneSpec::Utc,
    }
}

pub fn equal_cusps(first: f64) -> [f64; 12] {
    let mut cusps = [0.0; 12];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        *cusp = (first + 30.0 * i as f64).rem_euclid(360.0);
    }
    cusps
}

/// Hand-made subject from (point, longitude, speed) triples.
pub fn subject(name: &str, points: &[(Point, f64, f64)]) -> SubjectModel {
    subject_with(name, points, equal_cusps(0.0), ZodiacType::Tropical)
}

pub fn subject_with(
    name: &str,
    points: &[(Point, f64, f64)],
    cusps: [f64; 12],
    zodiac: ZodiacType,
) -> SubjectModel {
    SubjectModel::assemble(
        name.to_string(),
        SubjectKind::Natal,
        BirthMetadata {
            instant: Instant::from_julian_day_ut(J2000_JD).unwrap(),
            location: GeoLocation::new(0.0, 0.0).unwrap(),
            utc_offset_seconds: 0,
            zone: None,
        },
        zodiac,
        HouseSystem::Equal,
        cusps,
        points
            .iter()
            .map(|(point, lon, speed)| (*point, *lon, 0.0, *speed))
            .collect(),
    )
}
