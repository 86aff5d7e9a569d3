pub mod scorer;
pub mod tables;

pub use scorer::{RelationshipScoreResult, RelationshipScorer, ScoreBand, ScoreFactor};
pub use tables::SignRelation;
