use crate::aspects::{AspectKind, AspectMatch};
use crate::points::Point;
use crate::relationship::tables::{aspect_weight, sign_bonus, SignRelation, SIGN_ANCHORS};
use crate::subject::SubjectModel;
use serde::{Deserialize, Serialize};

/// Descriptive band of a relationship score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Minimal,
    Medium,
    Important,
    VeryImportant,
    Exceptional,
    RareExceptional,
}

// (lower edge, band), highest first
const BANDS: [(i32, ScoreBand); 5] = [
    (30, ScoreBand::RareExceptional),
    (20, ScoreBand::Exceptional),
    (15, ScoreBand::VeryImportant),
    (10, ScoreBand::Important),
    (5, ScoreBand::Medium),
];

impl ScoreBand {
    pub fn from_score(score: i32) -> Self {
        BANDS
            .iter()
            .find(|(lower, _)| score >= *lower)
            .map(|(_, band)| *band)
            .unwrap_or(ScoreBand::Minimal)
    }
}

/// One contribution to a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ScoreFactor {
    Aspect {
        p1: Point,
        p2: Point,
        kind: AspectKind,
        sensitive: bool,
        points: i32,
    },
    SignRelation {
        first: Point,
        second: Point,
        relation: SignRelation,
        points: i32,
    },
}

impl ScoreFactor {
    pub fn points(&self) -> i32 {
        match self {
            ScoreFactor::Aspect { points, .. } | ScoreFactor::SignRelation { points, .. } => *points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipScoreResult {
    pub score: i32,
    pub band: ScoreBand,
    pub factors: Vec<ScoreFactor>,
}

/// Table driven compatibility score for a pair of subjects.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationshipScorer;

impl RelationshipScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score the cross aspects between `first` and `second` plus the sign
    /// relations of their anchor points. Factors worth nothing are left out.
    pub fn score(
        &self,
        aspects: &[AspectMatch],
        first: &SubjectModel,
        second: &SubjectModel,
    ) -> RelationshipScoreResult {
        let mut factors = Vec::new();

        for aspect in aspects {
            let sensitive = aspect.p1.is_sensitive() || aspect.p2.is_sensitive();
            let points = aspect_weight(aspect.kind, sensitive);
            if points > 0 {
                factors.push(ScoreFactor::Aspect {
                    p1: aspect.p1,
                    p2: aspect.p2,
                    kind: aspect.kind,
                    sensitive,
                    points,
                });
            }
        }

        for (anchor_a, anchor_b) in SIGN_ANCHORS {
            let (Some(a), Some(b)) = (first.point(anchor_a), second.point(anchor_b)) else {
                continue;
            };
            let relation = SignRelation::between(a.sign, b.sign);
            let points = sign_bonus(anchor_a, anchor_b, relation);
            if points > 0 {
                factors.push(ScoreFactor::SignRelation {
                    first: anchor_a,
                    second: anchor_b,
                    relation,
                    points,
                });
            }
        }

        let score = factors.iter().map(ScoreFactor::points).sum();
        log::debug!(
            "Scored '{}' / '{}': {} from {} factors",
            first.name,
            second.name,
            score,
            factors.len()
        );
        RelationshipScoreResult {
            score,
            band: ScoreBand::from_score(score),
            factors,
        }
    }
}
