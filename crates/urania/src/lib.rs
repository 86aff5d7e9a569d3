//! Astrological subject computation: positions, houses, aspects, composite
//! subjects and relationship scores.

pub mod aspects;
pub mod composite;
pub mod ephemeris;
pub mod error;
pub mod houses;
pub mod points;
pub mod relationship;
pub mod subject;
pub mod transits;
pub mod zodiac;

pub use aspects::{AspectDetector, AspectKind, AspectMatch, Movement, OrbConfig, OrbEntry};
pub use composite::{circular_midpoint, CompositeSubjectFactory};
pub use ephemeris::{
    BirthData, EclipticPosition, EphemerisAdapter, EphemerisOracle, EphemerisRange, GeoLocation,
    Instant, SwissEphemerisOracle, TimeZoneSpec,
};
pub use error::{AstroError, Result};
pub use houses::{HouseCalculator, HouseCusps, HouseSystem};
pub use points::{Point, PointKind};
pub use relationship::{RelationshipScoreResult, RelationshipScorer, ScoreBand, ScoreFactor};
pub use subject::{CelestialPoint, SubjectBuilder, SubjectKind, SubjectModel, SubjectSettings};
pub use transits::{TransitMoment, TransitTimeRange};
pub use zodiac::{Ayanamsa, Sign, ZodiacType};
