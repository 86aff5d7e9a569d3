use thiserror::Error;

/// Errors surfaced by subject, house, aspect and scoring computations.
///
/// Every input to this crate is deterministic, so none of these are retried
/// internally. A failure means bad input or an oracle limitation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AstroError {
    #[error("Invalid timestamp {input}: {message}")]
    InvalidTimestamp { input: String, message: String },
    #[error("Ephemeris '{oracle}' unavailable: {message}")]
    EphemerisUnavailable { oracle: String, message: String },
    #[error("Unsupported house system: {system}. Supported systems: {supported:?}")]
    UnsupportedHouseSystem {
        system: String,
        supported: Vec<String>,
    },
    #[error("{system} houses are undefined at latitude {latitude}: {message}")]
    PolarCircleUndefined {
        system: String,
        latitude: f64,
        message: String,
    },
    #[error("Unknown celestial point: {name}")]
    UnknownCelestialPoint { name: String },
    #[error("Malformed orb configuration: {message}")]
    MalformedOrbConfig { message: String },
    #[error("Invalid location lat={latitude} lon={longitude}: {message}")]
    InvalidLocation {
        latitude: f64,
        longitude: f64,
        message: String,
    },
    #[error("Subjects '{first}' and '{second}' cannot be combined: {message}")]
    IncompatibleSubjects {
        first: String,
        second: String,
        message: String,
    },
    #[error("Requested range has {steps} steps, limit is {max_steps}")]
    RangeTooLarge { steps: usize, max_steps: usize },
}

pub type Result<T> = std::result::Result<T, AstroError>;
