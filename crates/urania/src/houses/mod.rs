//! House cusps and the four angles.

pub mod sidereal;
pub mod systems;

use crate::ephemeris::time::Instant;
use crate::error::{AstroError, Result};
use crate::zodiac::normalize_degrees;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use sidereal::{armc, greenwich_mean_sidereal_time, mean_obliquity};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    #[default]
    Placidus,
    Koch,
    Porphyry,
    Regiomontanus,
    Campanus,
    Alcabitius,
    Topocentric,
    Morinus,
    Equal,
    WholeSign,
    VehlowEqual,
}

/// Cusp strategy: (latitude, ARMC, obliquity) -> cusps 1..=12.
pub type CuspStrategy = fn(f64, f64, f64) -> Result<[f64; 12]>;

// (system, name, Swiss Ephemeris letter, strategy)
const REGISTRY: &[(HouseSystem, &str, char, CuspStrategy)] = &[
    (HouseSystem::Placidus, "placidus", 'P', systems::placidus),
    (HouseSystem::Koch, "koch", 'K', systems::koch),
    (HouseSystem::Porphyry, "porphyry", 'O', systems::porphyry),
    (HouseSystem::Regiomontanus, "regiomontanus", 'R', systems::regiomontanus),
    (HouseSystem::Campanus, "campanus", 'C', systems::campanus),
    (HouseSystem::Alcabitius, "alcabitius", 'B', systems::alcabitius),
    (HouseSystem::Topocentric, "topocentric", 'T', systems::topocentric),
    (HouseSystem::Morinus, "morinus", 'M', systems::morinus),
    (HouseSystem::Equal, "equal", 'A', systems::equal),
    (HouseSystem::WholeSign, "whole_sign", 'W', systems::whole_sign),
    (HouseSystem::VehlowEqual, "vehlow_equal", 'V', systems::vehlow_equal),
];

fn unsupported(system: String) -> AstroError {
    AstroError::UnsupportedHouseSystem {
        system,
        supported: REGISTRY
            .iter()
            .map(|(_, name, _, _)| name.to_string())
            .collect(),
    }
}

impl HouseSystem {
    fn entry(self) -> Result<&'static (HouseSystem, &'static str, char, CuspStrategy)> {
        REGISTRY
            .iter()
            .find(|(system, _, _, _)| *system == self)
            .ok_or_else(|| unsupported(format!("{:?}", self)))
    }

    /// Parse a Swiss Ephemeris house system letter. `E` is accepted as an
    /// alias for equal houses.
    pub fn from_identifier(identifier: char) -> Result<Self> {
        let letter = if identifier == 'E' { 'A' } else { identifier };
        REGISTRY
            .iter()
            .find(|(_, _, id, _)| *id == letter)
            .map(|(system, _, _, _)| *system)
            .ok_or_else(|| unsupported(identifier.to_string()))
    }

    pub fn identifier(self) -> char {
        self.entry().map(|(_, _, id, _)| *id).unwrap_or('?')
    }

    pub fn name(self) -> &'static str {
        self.entry().map(|(_, name, _, _)| *name).unwrap_or("unknown")
    }

    pub fn strategy(self) -> Result<CuspStrategy> {
        self.entry().map(|(_, _, _, strategy)| *strategy)
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HouseSystem {
    type Err = AstroError;

    /// Accepts registry names (`whole_sign`, `Whole Sign`) and single
    /// Swiss Ephemeris letters.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(letter), None) = (chars.next(), chars.next()) {
            return Self::from_identifier(letter.to_ascii_uppercase());
        }
        let key = trimmed.to_lowercase().replace(['-', ' '], "_");
        REGISTRY
            .iter()
            .find(|(_, name, _, _)| *name == key)
            .map(|(system, _, _, _)| *system)
            .ok_or_else(|| unsupported(s.to_string()))
    }
}

/// Cusps and angles of one chart. Longitudes in [0, 360).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseCusps {
    pub system: HouseSystem,
    /// Cusp of house `i + 1` at index `i`.
    pub cusps: [f64; 12],
    pub ascendant: f64,
    pub midheaven: f64,
    pub descendant: f64,
    pub imum_coeli: f64,
    pub armc: f64,
    pub obliquity: f64,
}

impl HouseCusps {
    /// Every longitude shifted by `-offset`, for sidereal charts.
    pub fn shifted(&self, offset: f64) -> Self {
        let mut cusps = self.cusps;
        for cusp in cusps.iter_mut() {
            *cusp = normalize_degrees(*cusp - offset);
        }
        Self {
            system: self.system,
            cusps,
            ascendant: normalize_degrees(self.ascendant - offset),
            midheaven: normalize_degrees(self.midheaven - offset),
            descendant: normalize_degrees(self.descendant - offset),
            imum_coeli: normalize_degrees(self.imum_coeli - offset),
            armc: self.armc,
            obliquity: self.obliquity,
        }
    }

    pub fn house_of(&self, longitude: f64) -> u8 {
        house_for_longitude(longitude, &self.cusps)
    }
}

/// House (1-12) containing `longitude`.
///
/// House `i` spans `[cusp_i, cusp_i+1)` going forward around the circle. The
/// house picked is the one whose cusp lies the shortest forward distance
/// behind the longitude, which is exactly that interval for ordered cusps and
/// still yields a single house if cusps are ever out of order.
pub fn house_for_longitude(longitude: f64, cusps: &[f64; 12]) -> u8 {
    let lon = normalize_degrees(longitude);
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (i, cusp) in cusps.iter().enumerate() {
        let distance = normalize_degrees(lon - cusp);
        if distance < best_distance {
            best = i;
            best_distance = distance;
        }
    }
    best as u8 + 1
}

/// House system calculator: sidereal time, obliquity and the registered
/// cusp strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct HouseCalculator;

impl HouseCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn compute(
        &self,
        latitude: f64,
        longitude: f64,
        instant: &Instant,
        system: HouseSystem,
    ) -> Result<HouseCusps> {
        let obliquity = mean_obliquity(instant.julian_day_tt);
        self.compute_from_armc(latitude, armc(instant, longitude), obliquity, system)
    }

    /// Cusps from an already known ARMC and obliquity.
    pub fn compute_from_armc(
        &self,
        latitude: f64,
        armc: f64,
        obliquity: f64,
        system: HouseSystem,
    ) -> Result<HouseCusps> {
        if latitude.abs() >= 90.0 {
            return Err(AstroError::PolarCircleUndefined {
                system: system.name().to_string(),
                latitude,
                message: "the horizon is undefined at the poles".to_string(),
            });
        }
        let strategy = system.strategy()?;
        let cusps = strategy(latitude, armc, obliquity)?;
        let ascendant = sidereal::ascendant(armc, latitude, obliquity);
        let midheaven = sidereal::midheaven(armc, obliquity);
        Ok(HouseCusps {
            system,
            cusps,
            ascendant,
            midheaven,
            descendant: normalize_degrees(ascendant + 180.0),
            imum_coeli: normalize_degrees(midheaven + 180.0),
            armc,
            obliquity,
        })
    }
}
