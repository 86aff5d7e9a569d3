pub mod builder;
pub mod types;

pub use builder::{SubjectBuilder, SubjectSettings};
pub use types::{
    BirthMetadata, CelestialPoint, House, LunarPhase, LunarPhaseName, RawPosition, SubjectKind,
    SubjectModel,
};
