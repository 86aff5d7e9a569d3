use crate::error::{AstroError, Result};
use crate::points::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectKind {
    Conjunction,
    SemiSextile,
    SemiSquare,
    Sextile,
    Quintile,
    Square,
    Trine,
    Sesquiquadrate,
    Biquintile,
    Quincunx,
    Opposition,
}

// (kind, name, nominal angle)
const ASPECT_TABLE: [(AspectKind, &str, f64); 11] = [
    (AspectKind::Conjunction, "conjunction", 0.0),
    (AspectKind::SemiSextile, "semi_sextile", 30.0),
    (AspectKind::SemiSquare, "semi_square", 45.0),
    (AspectKind::Sextile, "sextile", 60.0),
    (AspectKind::Quintile, "quintile", 72.0),
    (AspectKind::Square, "square", 90.0),
    (AspectKind::Trine, "trine", 120.0),
    (AspectKind::Sesquiquadrate, "sesquiquadrate", 135.0),
    (AspectKind::Biquintile, "biquintile", 144.0),
    (AspectKind::Quincunx, "quincunx", 150.0),
    (AspectKind::Opposition, "opposition", 180.0),
];

impl AspectKind {
    pub const ALL: [AspectKind; 11] = [
        AspectKind::Conjunction,
        AspectKind::SemiSextile,
        AspectKind::SemiSquare,
        AspectKind::Sextile,
        AspectKind::Quintile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Sesquiquadrate,
        AspectKind::Biquintile,
        AspectKind::Quincunx,
        AspectKind::Opposition,
    ];

    pub fn name(self) -> &'static str {
        ASPECT_TABLE[self as usize].1
    }

    /// Nominal angle in degrees
    pub fn angle(self) -> f64 {
        ASPECT_TABLE[self as usize].2
    }

    pub fn is_major(self) -> bool {
        matches!(
            self,
            AspectKind::Conjunction
                | AspectKind::Sextile
                | AspectKind::Square
                | AspectKind::Trine
                | AspectKind::Opposition
        )
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Movement {
    Applying,
    Separating,
}

/// One detected aspect between two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectMatch {
    pub p1: Point,
    pub p2: Point,
    pub p1_longitude: f64,
    pub p2_longitude: f64,
    /// Shorter-arc distance, [0, 180]
    pub separation: f64,
    pub kind: AspectKind,
    /// Nominal angle of `kind`
    pub angle: f64,
    /// separation - angle
    pub delta: f64,
    pub movement: Movement,
}

impl AspectMatch {
    /// Absolute distance from exactness
    pub fn orb(&self) -> f64 {
        self.delta.abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbEntry {
    pub kind: AspectKind,
    pub orb: f64,
}

/// Active aspects with their orbs. Entry order is the priority used when
/// two aspects match a separation equally well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<OrbEntry>", into = "Vec<OrbEntry>")]
pub struct OrbConfig {
    entries: Vec<OrbEntry>,
}

impl OrbConfig {
    pub fn new(entries: Vec<OrbEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(AstroError::MalformedOrbConfig {
                message: "no aspects configured".to_string(),
            });
        }
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.kind) {
                return Err(AstroError::MalformedOrbConfig {
                    message: format!("{} is configured more than once", entry.kind),
                });
            }
            if !entry.orb.is_finite() || entry.orb < 0.0 || entry.orb >= 180.0 {
                return Err(AstroError::MalformedOrbConfig {
                    message: format!(
                        "orb for {} must be finite and within [0, 180), got {}",
                        entry.kind, entry.orb
                    ),
                });
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[OrbEntry] {
        &self.entries
    }

    pub fn orb_for(&self, kind: AspectKind) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.kind == kind)
            .map(|entry| entry.orb)
    }
}

impl Default for OrbConfig {
    /// Conjunction 10, sextile 6, quintile 1, square 5, trine 8,
    /// opposition 10, in ascending angle order.
    fn default() -> Self {
        let entry = |kind, orb| OrbEntry { kind, orb };
        Self {
            entries: vec![
                entry(AspectKind::Conjunction, 10.0),
                entry(AspectKind::Sextile, 6.0),
                entry(AspectKind::Quintile, 1.0),
                entry(AspectKind::Square, 5.0),
                entry(AspectKind::Trine, 8.0),
                entry(AspectKind::Opposition, 10.0),
            ],
        }
    }
}

impl TryFrom<Vec<OrbEntry>> for OrbConfig {
    type Error = AstroError;

    fn try_from(entries: Vec<OrbEntry>) -> Result<Self> {
        Self::new(entries)
    }
}

impl From<OrbConfig> for Vec<OrbEntry> {
    fn from(config: OrbConfig) -> Self {
        config.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orb_config_validation() {
        let entry = |kind, orb| OrbEntry { kind, orb };
        assert!(OrbConfig::new(vec![]).is_err());
        assert!(OrbConfig::new(vec![entry(AspectKind::Trine, -1.0)]).is_err());
        assert!(OrbConfig::new(vec![entry(AspectKind::Trine, 180.0)]).is_err());
        assert!(OrbConfig::new(vec![entry(AspectKind::Trine, f64::NAN)]).is_err());
        assert!(matches!(
            OrbConfig::new(vec![entry(AspectKind::Trine, 8.0), entry(AspectKind::Trine, 6.0)]),
            Err(AstroError::MalformedOrbConfig { .. })
        ));
        let config = OrbConfig::new(vec![entry(AspectKind::Square, 0.0)]).unwrap();
        assert_eq!(config.orb_for(AspectKind::Square), Some(0.0));
        assert_eq!(config.orb_for(AspectKind::Trine), None);
    }

    #[test]
    fn test_orb_config_deserialization_validates() {
        let ok: OrbConfig =
            serde_json::from_str(r#"[{"kind":"trine","orb":8.0},{"kind":"square","orb":5.0}]"#)
                .unwrap();
        assert_eq!(ok.entries()[0].kind, AspectKind::Trine);
        let dup = serde_json::from_str::<OrbConfig>(
            r#"[{"kind":"trine","orb":8.0},{"kind":"trine","orb":5.0}]"#,
        );
        assert!(dup.is_err());
    }

    #[test]
    fn test_default_orbs_ascending() {
        let angles: Vec<f64> = OrbConfig::default()
            .entries()
            .iter()
            .map(|e| e.kind.angle())
            .collect();
        assert!(angles.windows(2).all(|w| w[0] < w[1]));
    }
}
