use crate::ephemeris::time::Instant;
use crate::ephemeris::types::GeoLocation;
use crate::houses::{house_for_longitude, HouseSystem};
use crate::points::{Point, PointKind};
use crate::zodiac::{normalize_degrees, sign_and_degree, Element, Quality, Sign, ZodiacType};
use serde::{Deserialize, Serialize};

/// A point placed in a subject: position, sign and house.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialPoint {
    pub point: Point,
    pub kind: PointKind,
    /// Ecliptic longitude in [0, 360)
    pub longitude: f64,
    pub latitude: f64,
    /// Degrees per day, negative when retrograde
    pub speed: f64,
    pub sign: Sign,
    /// 0 (Aries) to 11 (Pisces)
    pub sign_index: u8,
    /// Degree within the sign, [0, 30)
    pub degree: f64,
    pub element: Element,
    pub quality: Quality,
    /// 1 to 12
    pub house: u8,
    pub retrograde: bool,
}

impl CelestialPoint {
    pub fn new(point: Point, longitude: f64, latitude: f64, speed: f64, cusps: &[f64; 12]) -> Self {
        let longitude = normalize_degrees(longitude);
        let (sign_index, degree) = sign_and_degree(longitude);
        let sign = Sign::from_longitude(longitude);
        Self {
            point,
            kind: point.kind(),
            longitude,
            latitude,
            speed,
            sign,
            sign_index,
            degree,
            element: sign.element(),
            quality: sign.quality(),
            house: house_for_longitude(longitude, cusps),
            retrograde: speed < 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct House {
    pub number: u8,
    pub cusp: f64,
    pub sign: Sign,
    pub degree: f64,
    /// Traditional ruler of the sign on the cusp
    pub ruler: Point,
}

impl House {
    pub fn new(number: u8, cusp: f64) -> Self {
        let cusp = normalize_degrees(cusp);
        let (_, degree) = sign_and_degree(cusp);
        let sign = Sign::from_longitude(cusp);
        Self {
            number,
            cusp,
            sign,
            degree,
            ruler: sign.ruler(false),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    Natal,
    Composite,
}

/// When and where the subject was cast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthMetadata {
    pub instant: Instant,
    pub location: GeoLocation,
    pub utc_offset_seconds: i32,
    pub zone: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LunarPhaseName {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

const PHASE_NAMES: [LunarPhaseName; 8] = [
    LunarPhaseName::NewMoon,
    LunarPhaseName::WaxingCrescent,
    LunarPhaseName::FirstQuarter,
    LunarPhaseName::WaxingGibbous,
    LunarPhaseName::FullMoon,
    LunarPhaseName::WaningGibbous,
    LunarPhaseName::LastQuarter,
    LunarPhaseName::WaningCrescent,
];

/// Moon's elongation from the Sun and the phase it falls in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LunarPhase {
    /// Moon minus Sun, [0, 360)
    pub angle: f64,
    /// Lunar day, 1 to 28
    pub day: u8,
    pub name: LunarPhaseName,
}

impl LunarPhase {
    pub fn from_longitudes(sun: f64, moon: f64) -> Self {
        let angle = normalize_degrees(moon - sun);
        let day = ((angle / (360.0 / 28.0)).floor() as u8 + 1).min(28);
        let name = PHASE_NAMES[((angle / 45.0).floor() as usize).min(7)];
        Self { angle, day, name }
    }
}

/// A fully computed subject. Points are unique and ordered by identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectModel {
    pub name: String,
    pub kind: SubjectKind,
    pub birth: BirthMetadata,
    pub zodiac: ZodiacType,
    pub house_system: HouseSystem,
    pub points: Vec<CelestialPoint>,
    pub houses: Vec<House>,
    pub lunar_phase: Option<LunarPhase>,
}

/// Raw (point, longitude, latitude, speed) before houses are assigned.
pub type RawPosition = (Point, f64, f64, f64);

impl SubjectModel {
    /// Build a subject from raw positions and cusps. Duplicate identities
    /// keep the first occurrence.
    pub fn assemble(
        name: String,
        kind: SubjectKind,
        birth: BirthMetadata,
        zodiac: ZodiacType,
        house_system: HouseSystem,
        cusps: [f64; 12],
        mut positions: Vec<RawPosition>,
    ) -> Self {
        positions.sort_by_key(|(point, _, _, _)| *point);
        positions.dedup_by_key(|(point, _, _, _)| *point);

        let points: Vec<CelestialPoint> = positions
            .into_iter()
            .map(|(point, lon, lat, speed)| CelestialPoint::new(point, lon, lat, speed, &cusps))
            .collect();
        let houses = cusps
            .iter()
            .enumerate()
            .map(|(i, cusp)| House::new(i as u8 + 1, *cusp))
            .collect();

        let longitude_of = |wanted: Point| {
            points
                .iter()
                .find(|p| p.point == wanted)
                .map(|p| p.longitude)
        };
        let lunar_phase = match (longitude_of(Point::Sun), longitude_of(Point::Moon)) {
            (Some(sun), Some(moon)) => Some(LunarPhase::from_longitudes(sun, moon)),
            _ => None,
        };

        Self {
            name,
            kind,
            birth,
            zodiac,
            house_system,
            points,
            houses,
            lunar_phase,
        }
    }

    pub fn point(&self, point: Point) -> Option<&CelestialPoint> {
        self.points
            .binary_search_by_key(&point, |p| p.point)
            .ok()
            .map(|i| &self.points[i])
    }

    pub fn cusps(&self) -> [f64; 12] {
        let mut cusps = [0.0; 12];
        for (slot, house) in cusps.iter_mut().zip(&self.houses) {
            *slot = house.cusp;
        }
        cusps
    }
}
