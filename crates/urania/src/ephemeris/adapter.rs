use crate::ephemeris::oracle::{EphemerisOracle, SwissEphemerisOracle};
use crate::ephemeris::time::Instant;
use crate::ephemeris::types::EclipticPosition;
use crate::error::{AstroError, Result};
use crate::points::Point;
use crate::zodiac::{normalize_degrees, ZodiacType};
use std::path::PathBuf;
use std::sync::Arc;

/// Front door to the ephemeris oracle.
///
/// Handles everything the oracle does not: angles are rejected, south nodes
/// are mirrored from their north node, the valid time range is enforced and
/// the ayanamsa is applied for sidereal zodiacs.
#[derive(Clone)]
pub struct EphemerisAdapter {
    oracle: Arc<dyn EphemerisOracle>,
}

impl EphemerisAdapter {
    pub fn new(oracle: Arc<dyn EphemerisOracle>) -> Self {
        Self { oracle }
    }

    /// Adapter over the Swiss Ephemeris, Moshier mode unless a data path is given.
    pub fn swiss(ephemeris_path: Option<PathBuf>) -> Result<Self> {
        Ok(Self::new(Arc::new(SwissEphemerisOracle::new(ephemeris_path)?)))
    }

    pub fn oracle_name(&self) -> &str {
        self.oracle.name()
    }

    pub fn get_position(
        &self,
        point: Point,
        instant: &Instant,
        zodiac: &ZodiacType,
    ) -> Result<EclipticPosition> {
        if point.is_angle() {
            return Err(AstroError::UnknownCelestialPoint {
                name: format!("{} (house angle, not an ephemeris body)", point),
            });
        }

        let jd = instant.julian_day_ut;
        let (first, last) = self.oracle.valid_range();
        if !(first..=last).contains(&jd) {
            return Err(AstroError::EphemerisUnavailable {
                oracle: self.oracle.name().to_string(),
                message: format!("JD {} is outside the supported range [{}, {}]", jd, first, last),
            });
        }

        let tropical = match point.north_node_of() {
            Some(north) => {
                let node = self.checked_position(north, instant)?;
                EclipticPosition {
                    lon: node.lon + 180.0,
                    lat: -node.lat,
                    speed_lon: node.speed_lon,
                }
            }
            None => self.checked_position(point, instant)?,
        };

        let offset = zodiac.offset(instant.julian_day_tt);
        Ok(EclipticPosition {
            lon: normalize_degrees(tropical.lon - offset),
            ..tropical
        })
    }

    /// Positions for several points at one instant, in the order given.
    /// Fails on the first point that cannot be resolved.
    pub fn get_positions(
        &self,
        points: &[Point],
        instant: &Instant,
        zodiac: &ZodiacType,
    ) -> Result<Vec<(Point, EclipticPosition)>> {
        points
            .iter()
            .map(|point| Ok((*point, self.get_position(*point, instant, zodiac)?)))
            .collect()
    }

    fn checked_position(&self, point: Point, instant: &Instant) -> Result<EclipticPosition> {
        let position = self.oracle.tropical_position(point, instant)?;
        if !(position.lon.is_finite() && position.lat.is_finite() && position.speed_lon.is_finite())
        {
            return Err(AstroError::EphemerisUnavailable {
                oracle: self.oracle.name().to_string(),
                message: format!(
                    "non-finite position for {} at JD {}",
                    point, instant.julian_day_ut
                ),
            });
        }
        Ok(position)
    }
}

impl std::fmt::Debug for EphemerisAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EphemerisAdapter")
            .field("oracle", &self.oracle.name())
            .finish()
    }
}
