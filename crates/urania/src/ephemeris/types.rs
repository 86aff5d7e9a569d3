use crate::error::{AstroError, Result};
use serde::{Deserialize, Serialize};

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees, north positive
    pub lat: f64,
    /// Longitude in degrees, east positive
    pub lon: f64,
}

impl GeoLocation {
    /// Validated location: finite, latitude in [-90, 90].
    ///
    /// Longitude may be any finite value; it only enters sidereal time, which
    /// is taken modulo 360.
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(AstroError::InvalidLocation {
                latitude: lat,
                longitude: lon,
                message: "coordinates must be finite".to_string(),
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(AstroError::InvalidLocation {
                latitude: lat,
                longitude: lon,
                message: "latitude must lie in [-90, 90]".to_string(),
            });
        }
        Ok(Self { lat, lon })
    }
}

/// Ecliptic position of a body as returned by the adapter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EclipticPosition {
    /// Longitude in degrees (0-360)
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
    /// Speed in longitude (degrees per day)
    pub speed_lon: f64,
}

impl EclipticPosition {
    pub fn retrograde(&self) -> bool {
        self.speed_lon < 0.0
    }
}

/// How the civil time of a birth record relates to UTC.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimeZoneSpec {
    #[default]
    Utc,
    /// Fixed offset east of UTC, in seconds.
    Offset { seconds: i32 },
    /// IANA zone name such as `Europe/Rome`.
    Iana { name: String },
}

/// Raw civil birth data, before normalization to an `Instant`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthData {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    #[serde(default)]
    pub second: u32,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub timezone: TimeZoneSpec,
}

impl BirthData {
    pub fn location(&self) -> Result<GeoLocation> {
        GeoLocation::new(self.latitude, self.longitude)
    }
}
