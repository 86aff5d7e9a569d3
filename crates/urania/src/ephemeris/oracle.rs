use crate::ephemeris::time::Instant;
use crate::ephemeris::types::EclipticPosition;
use crate::error::{AstroError, Result};
use crate::points::Point;
use lazy_static::lazy_static;
use std::env;
use std::path::PathBuf;
use std::sync::Mutex;
use swisseph::swe::calc_ut;

/// Source of tropical, geocentric ecliptic coordinates.
///
/// Implementations are trusted: positions are only checked for being finite.
pub trait EphemerisOracle: Send + Sync {
    fn name(&self) -> &str;

    /// Inclusive JD(UT) range the oracle can resolve.
    fn valid_range(&self) -> (f64, f64);

    /// Tropical position of an ephemeris body. Never called for angles or
    /// south nodes; the adapter derives those.
    fn tropical_position(&self, point: Point, instant: &Instant) -> Result<EclipticPosition>;
}

// Swiss Ephemeris body numbers
const PLANET_IDS: &[(Point, i32)] = &[
    (Point::Sun, 0),
    (Point::Moon, 1),
    (Point::Mercury, 2),
    (Point::Venus, 3),
    (Point::Mars, 4),
    (Point::Jupiter, 5),
    (Point::Saturn, 6),
    (Point::Uranus, 7),
    (Point::Neptune, 8),
    (Point::Pluto, 9),
    (Point::MeanNode, 10),
    (Point::TrueNode, 11),
    (Point::MeanLilith, 12),
    (Point::Chiron, 15),
];

const FLG_SWIEPH: i32 = 2;
const FLG_MOSEPH: i32 = 4;
const FLG_SPEED: i32 = 256;

// Moshier analytic theory: 3000 BC to 3000 AD
const MOSHIER_RANGE: (f64, f64) = (625_000.5, 2_818_000.5);
// Chiron's orbit is only integrated for 675 AD to 4650 AD
const CHIRON_RANGE: (f64, f64) = (1_967_601.5, 3_419_437.5);

lazy_static! {
    // The C library keeps the ephemeris path and file handles in globals.
    static ref SWISS_LOCK: Mutex<()> = Mutex::new(());
}

/// Oracle backed by the Swiss Ephemeris C library.
pub struct SwissEphemerisOracle {
    ephemeris_path: Option<PathBuf>,
    flags: i32,
}

impl SwissEphemerisOracle {
    /// Moshier analytic mode when `ephemeris_path` is `None`, otherwise the
    /// Swiss data files found in that directory.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self> {
        let flags = match &ephemeris_path {
            None => {
                log::warn!("No ephemeris path set, falling back to the Moshier analytic ephemeris");
                FLG_MOSEPH | FLG_SPEED
            }
            Some(path) => {
                if !path.exists() {
                    return Err(AstroError::EphemerisUnavailable {
                        oracle: "swisseph".to_string(),
                        message: format!(
                            "ephemeris path {} does not exist. Please ensure Swiss Ephemeris data files are installed.",
                            path.display()
                        ),
                    });
                }
                env::set_var("SE_EPHE_PATH", path);
                log::info!("Using Swiss Ephemeris files from {}", path.display());
                FLG_SWIEPH | FLG_SPEED
            }
        };
        Ok(Self {
            ephemeris_path,
            flags,
        })
    }

    /// Whether positions come from the built-in Moshier theory.
    pub fn is_analytic(&self) -> bool {
        self.flags & FLG_MOSEPH != 0
    }

    pub fn ephemeris_path(&self) -> Option<&PathBuf> {
        self.ephemeris_path.as_ref()
    }

    fn unavailable(&self, message: String) -> AstroError {
        AstroError::EphemerisUnavailable {
            oracle: self.name().to_string(),
            message,
        }
    }
}

impl EphemerisOracle for SwissEphemerisOracle {
    fn name(&self) -> &str {
        "swisseph"
    }

    fn valid_range(&self) -> (f64, f64) {
        MOSHIER_RANGE
    }

    fn tropical_position(&self, point: Point, instant: &Instant) -> Result<EclipticPosition> {
        let planet_code = PLANET_IDS
            .iter()
            .find(|(id, _)| *id == point)
            .map(|(_, code)| *code)
            .ok_or_else(|| AstroError::UnknownCelestialPoint {
                name: point.name().to_string(),
            })?;

        let jd = instant.julian_day_ut;
        if point == Point::Chiron && self.is_analytic() {
            return Err(self.unavailable(
                "chiron needs the Swiss Ephemeris asteroid files; set an ephemeris path".to_string(),
            ));
        }
        if point == Point::Chiron && !(CHIRON_RANGE.0..=CHIRON_RANGE.1).contains(&jd) {
            return Err(self.unavailable(format!("chiron is not available at JD {}", jd)));
        }

        let result = {
            let _guard = SWISS_LOCK
                .lock()
                .map_err(|_| self.unavailable("ephemeris lock poisoned".to_string()))?;
            calc_ut(jd, planet_code as u32, self.flags as u32).map_err(|e| {
                self.unavailable(format!("Swiss Ephemeris error for {} at JD {}: {}", point, jd, e))
            })?
        };

        let out = result.out;
        Ok(EclipticPosition {
            lon: out[0],
            lat: out[1],
            speed_lon: out[3],
        })
    }
}
