//! Identities of the points a subject can carry.

use crate::error::{AstroError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Celestial point identity. Declaration order is the stable ordering used
/// wherever points are sorted (subject point lists, aspect tie-breaks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Point {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    MeanNode,
    TrueNode,
    MeanSouthNode,
    TrueSouthNode,
    Chiron,
    MeanLilith,
    Ascendant,
    Midheaven,
    Descendant,
    ImumCoeli,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointKind {
    Luminary,
    Planet,
    LunarNode,
    Asteroid,
    Apogee,
    Angle,
}

// (point, canonical name, kind)
const POINT_TABLE: [(Point, &str, PointKind); 20] = [
    (Point::Sun, "sun", PointKind::Luminary),
    (Point::Moon, "moon", PointKind::Luminary),
    (Point::Mercury, "mercury", PointKind::Planet),
    (Point::Venus, "venus", PointKind::Planet),
    (Point::Mars, "mars", PointKind::Planet),
    (Point::Jupiter, "jupiter", PointKind::Planet),
    (Point::Saturn, "saturn", PointKind::Planet),
    (Point::Uranus, "uranus", PointKind::Planet),
    (Point::Neptune, "neptune", PointKind::Planet),
    (Point::Pluto, "pluto", PointKind::Planet),
    (Point::MeanNode, "mean_node", PointKind::LunarNode),
    (Point::TrueNode, "true_node", PointKind::LunarNode),
    (Point::MeanSouthNode, "mean_south_node", PointKind::LunarNode),
    (Point::TrueSouthNode, "true_south_node", PointKind::LunarNode),
    (Point::Chiron, "chiron", PointKind::Asteroid),
    (Point::MeanLilith, "mean_lilith", PointKind::Apogee),
    (Point::Ascendant, "ascendant", PointKind::Angle),
    (Point::Midheaven, "midheaven", PointKind::Angle),
    (Point::Descendant, "descendant", PointKind::Angle),
    (Point::ImumCoeli, "imum_coeli", PointKind::Angle),
];

const ALIASES: &[(&str, Point)] = &[
    ("asc", Point::Ascendant),
    ("ac", Point::Ascendant),
    ("mc", Point::Midheaven),
    ("medium_coeli", Point::Midheaven),
    ("dsc", Point::Descendant),
    ("dc", Point::Descendant),
    ("desc", Point::Descendant),
    ("ic", Point::ImumCoeli),
    ("north_node", Point::TrueNode),
    ("south_node", Point::TrueSouthNode),
    ("lilith", Point::MeanLilith),
    ("black_moon", Point::MeanLilith),
];

impl Point {
    pub const ALL: [Point; 20] = [
        Point::Sun,
        Point::Moon,
        Point::Mercury,
        Point::Venus,
        Point::Mars,
        Point::Jupiter,
        Point::Saturn,
        Point::Uranus,
        Point::Neptune,
        Point::Pluto,
        Point::MeanNode,
        Point::TrueNode,
        Point::MeanSouthNode,
        Point::TrueSouthNode,
        Point::Chiron,
        Point::MeanLilith,
        Point::Ascendant,
        Point::Midheaven,
        Point::Descendant,
        Point::ImumCoeli,
    ];

    /// Points a subject carries unless configured otherwise. Chiron is left
    /// out: the analytic ephemeris used without data files has no asteroids.
    pub const DEFAULT_ACTIVE: [Point; 17] = [
        Point::Sun,
        Point::Moon,
        Point::Mercury,
        Point::Venus,
        Point::Mars,
        Point::Jupiter,
        Point::Saturn,
        Point::Uranus,
        Point::Neptune,
        Point::Pluto,
        Point::MeanNode,
        Point::MeanSouthNode,
        Point::MeanLilith,
        Point::Ascendant,
        Point::Midheaven,
        Point::Descendant,
        Point::ImumCoeli,
    ];

    pub fn name(self) -> &'static str {
        POINT_TABLE[self as usize].1
    }

    pub fn kind(self) -> PointKind {
        POINT_TABLE[self as usize].2
    }

    pub fn is_angle(self) -> bool {
        self.kind() == PointKind::Angle
    }

    /// Luminaries and angles weigh more in relationship scoring.
    pub fn is_sensitive(self) -> bool {
        matches!(self.kind(), PointKind::Luminary | PointKind::Angle)
    }

    /// North node a south node is derived from.
    pub fn north_node_of(self) -> Option<Point> {
        match self {
            Point::MeanSouthNode => Some(Point::MeanNode),
            Point::TrueSouthNode => Some(Point::TrueNode),
            _ => None,
        }
    }

    /// The point on the other end of the same axis, for pairs that are
    /// opposite by construction.
    pub fn axis_partner(self) -> Option<Point> {
        match self {
            Point::Ascendant => Some(Point::Descendant),
            Point::Descendant => Some(Point::Ascendant),
            Point::Midheaven => Some(Point::ImumCoeli),
            Point::ImumCoeli => Some(Point::Midheaven),
            Point::MeanNode => Some(Point::MeanSouthNode),
            Point::MeanSouthNode => Some(Point::MeanNode),
            Point::TrueNode => Some(Point::TrueSouthNode),
            Point::TrueSouthNode => Some(Point::TrueNode),
            _ => None,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Point {
    type Err = AstroError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        POINT_TABLE
            .iter()
            .find(|(_, name, _)| *name == key)
            .map(|(point, _, _)| *point)
            .or_else(|| {
                ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == key)
                    .map(|(_, point)| *point)
            })
            .ok_or_else(|| AstroError::UnknownCelestialPoint {
                name: s.to_string(),
            })
    }
}
