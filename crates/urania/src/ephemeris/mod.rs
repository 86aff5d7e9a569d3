pub mod adapter;
pub mod oracle;
pub mod range;
pub mod time;
pub mod types;

pub use adapter::EphemerisAdapter;
pub use oracle::{EphemerisOracle, SwissEphemerisOracle};
pub use range::{instants_between, EphemerisRange, RangeKey};
pub use time::{delta_t_seconds, normalize_birth_time, CivilTime, Instant};
pub use types::{BirthData, EclipticPosition, GeoLocation, TimeZoneSpec};
