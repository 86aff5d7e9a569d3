//! Weights behind the relationship score.

use crate::aspects::AspectKind;
use crate::points::Point;
use crate::zodiac::Sign;
use serde::{Deserialize, Serialize};

/// How two signs relate, from the shorter distance between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignRelation {
    Same,
    Adjacent,
    /// Two signs apart, sextile
    Complementary,
    /// Three signs apart, square
    SameQuality,
    /// Four signs apart, trine
    SameElement,
    Inconjunct,
    Polar,
}

impl SignRelation {
    pub const ALL: [SignRelation; 7] = [
        SignRelation::Same,
        SignRelation::Adjacent,
        SignRelation::Complementary,
        SignRelation::SameQuality,
        SignRelation::SameElement,
        SignRelation::Inconjunct,
        SignRelation::Polar,
    ];

    pub fn between(a: Sign, b: Sign) -> Self {
        let forward = a.distance_to(b);
        match forward.min(12 - forward) {
            0 => SignRelation::Same,
            1 => SignRelation::Adjacent,
            2 => SignRelation::Complementary,
            3 => SignRelation::SameQuality,
            4 => SignRelation::SameElement,
            5 => SignRelation::Inconjunct,
            _ => SignRelation::Polar,
        }
    }
}

// (kind, weight, weight when a luminary or angle is involved)
pub const ASPECT_WEIGHTS: [(AspectKind, i32, i32); 11] = [
    (AspectKind::Conjunction, 2, 4),
    (AspectKind::SemiSextile, 0, 1),
    (AspectKind::SemiSquare, 0, 1),
    (AspectKind::Sextile, 1, 2),
    (AspectKind::Quintile, 1, 1),
    (AspectKind::Square, 1, 2),
    (AspectKind::Trine, 2, 3),
    (AspectKind::Sesquiquadrate, 0, 1),
    (AspectKind::Biquintile, 0, 1),
    (AspectKind::Quincunx, 0, 1),
    (AspectKind::Opposition, 1, 3),
];

pub fn aspect_weight(kind: AspectKind, sensitive: bool) -> i32 {
    ASPECT_WEIGHTS
        .iter()
        .find(|(k, _, _)| *k == kind)
        .map(|(_, normal, heightened)| if sensitive { *heightened } else { *normal })
        .unwrap_or(0)
}

/// Anchor pairs compared by sign. The first point is taken from the first
/// subject; Sun/Moon is checked in both directions.
pub const SIGN_ANCHORS: [(Point, Point); 5] = [
    (Point::Sun, Point::Sun),
    (Point::Moon, Point::Moon),
    (Point::Ascendant, Point::Ascendant),
    (Point::Sun, Point::Moon),
    (Point::Moon, Point::Sun),
];

// (anchor pair with the lower identity first, relation, points)
const SIGN_BONUSES: &[((Point, Point), SignRelation, i32)] = &[
    ((Point::Sun, Point::Sun), SignRelation::Same, 3),
    ((Point::Sun, Point::Sun), SignRelation::SameElement, 2),
    ((Point::Sun, Point::Sun), SignRelation::Complementary, 1),
    ((Point::Sun, Point::Sun), SignRelation::SameQuality, 1),
    ((Point::Sun, Point::Sun), SignRelation::Polar, 1),
    ((Point::Moon, Point::Moon), SignRelation::Same, 2),
    ((Point::Moon, Point::Moon), SignRelation::SameElement, 2),
    ((Point::Moon, Point::Moon), SignRelation::Complementary, 1),
    ((Point::Ascendant, Point::Ascendant), SignRelation::Same, 2),
    ((Point::Ascendant, Point::Ascendant), SignRelation::SameElement, 1),
    ((Point::Ascendant, Point::Ascendant), SignRelation::Complementary, 1),
    ((Point::Sun, Point::Moon), SignRelation::Same, 3),
    ((Point::Sun, Point::Moon), SignRelation::SameElement, 2),
    ((Point::Sun, Point::Moon), SignRelation::Complementary, 1),
    ((Point::Sun, Point::Moon), SignRelation::Polar, 1),
];

pub fn sign_bonus(first: Point, second: Point, relation: SignRelation) -> i32 {
    let key = if first <= second {
        (first, second)
    } else {
        (second, first)
    };
    SIGN_BONUSES
        .iter()
        .find(|(anchor, r, _)| *anchor == key && *r == relation)
        .map(|(_, _, points)| *points)
        .unwrap_or(0)
}
