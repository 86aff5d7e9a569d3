use crate::ephemeris::adapter::EphemerisAdapter;
use crate::ephemeris::time::{normalize_birth_time, Instant};
use crate::ephemeris::types::{BirthData, GeoLocation};
use crate::error::Result;
use crate::houses::{HouseCalculator, HouseCusps, HouseSystem};
use crate::points::Point;
use crate::subject::types::{BirthMetadata, RawPosition, SubjectKind, SubjectModel};
use crate::zodiac::ZodiacType;
use serde::{Deserialize, Serialize};

/// Frame, house system and point set used for every subject a builder makes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectSettings {
    pub zodiac: ZodiacType,
    pub house_system: HouseSystem,
    pub active_points: Vec<Point>,
}

impl Default for SubjectSettings {
    fn default() -> Self {
        Self {
            zodiac: ZodiacType::Tropical,
            house_system: HouseSystem::Placidus,
            active_points: Point::DEFAULT_ACTIVE.to_vec(),
        }
    }
}

/// Builds natal subjects from birth data.
#[derive(Debug, Clone)]
pub struct SubjectBuilder {
    adapter: EphemerisAdapter,
    houses: HouseCalculator,
    settings: SubjectSettings,
}

impl SubjectBuilder {
    pub fn new(adapter: EphemerisAdapter, settings: SubjectSettings) -> Self {
        Self {
            adapter,
            houses: HouseCalculator::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &SubjectSettings {
        &self.settings
    }

    pub fn adapter(&self) -> &EphemerisAdapter {
        &self.adapter
    }

    /// Location is checked before the civil time so a bad record reports
    /// its coordinates first.
    pub fn build(&self, name: &str, birth: &BirthData) -> Result<SubjectModel> {
        let location = birth.location()?;
        let civil = normalize_birth_time(birth)?;
        self.build_at(
            name,
            &civil.instant,
            location,
            civil.utc_offset_seconds,
            civil.zone,
        )
    }

    pub fn build_at(
        &self,
        name: &str,
        instant: &Instant,
        location: GeoLocation,
        utc_offset_seconds: i32,
        zone: Option<String>,
    ) -> Result<SubjectModel> {
        let location = GeoLocation::new(location.lat, location.lon)?;
        let zodiac = self.settings.zodiac;
        let cusps = self
            .houses
            .compute(location.lat, location.lon, instant, self.settings.house_system)?
            .shifted(zodiac.offset(instant.julian_day_tt));

        let mut positions: Vec<RawPosition> = Vec::with_capacity(self.settings.active_points.len());
        for point in &self.settings.active_points {
            let raw = match angle_longitude(*point, &cusps) {
                Some(longitude) => (*point, longitude, 0.0, 0.0),
                None => {
                    let position = self.adapter.get_position(*point, instant, &zodiac)?;
                    (*point, position.lon, position.lat, position.speed_lon)
                }
            };
            positions.push(raw);
        }

        let subject = SubjectModel::assemble(
            name.to_string(),
            SubjectKind::Natal,
            BirthMetadata {
                instant: *instant,
                location,
                utc_offset_seconds,
                zone,
            },
            zodiac,
            self.settings.house_system,
            cusps.cusps,
            positions,
        );
        log::debug!(
            "Built subject '{}' at JD {} with {} points ({} houses)",
            subject.name,
            instant.julian_day_ut,
            subject.points.len(),
            subject.house_system
        );
        Ok(subject)
    }
}

fn angle_longitude(point: Point, cusps: &HouseCusps) -> Option<f64> {
    match point {
        Point::Ascendant => Some(cusps.ascendant),
        Point::Midheaven => Some(cusps.midheaven),
        Point::Descendant => Some(cusps.descendant),
        Point::ImumCoeli => Some(cusps.imum_coeli),
        _ => None,
    }
}
