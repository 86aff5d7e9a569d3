use crate::aspects::types::{AspectMatch, Movement, OrbConfig, OrbEntry};
use crate::subject::types::CelestialPoint;
use crate::zodiac::normalize_degrees;

/// Signed gap from `lon1` forward to `lon2`, in (-180, 180].
pub fn signed_gap(lon1: f64, lon2: f64) -> f64 {
    let d = normalize_degrees(lon2 - lon1);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// Shorter-arc separation, [0, 180]. Exactly symmetric in its arguments:
/// the absolute difference is taken before folding, so no rounding depends
/// on the order.
pub fn separation(lon1: f64, lon2: f64) -> f64 {
    let d = (normalize_degrees(lon1) - normalize_degrees(lon2)).abs();
    d.min(360.0 - d)
}

/// Whether the distance to exactness is shrinking.
///
/// The rate at which the separation changes follows from the signed gap
/// and the relative speed. At a gap of 0 the separation can only grow, at
/// 180 it can only shrink. Exact aspects and equal speeds are separating.
pub fn movement(lon1: f64, lon2: f64, speed1: f64, speed2: f64, delta: f64) -> Movement {
    let gap = signed_gap(lon1, lon2);
    let relative = speed2 - speed1;
    let rate = if gap == 180.0 {
        -relative.abs()
    } else if gap > 0.0 {
        relative
    } else if gap < 0.0 {
        -relative
    } else {
        relative.abs()
    };

    if delta * rate < 0.0 {
        Movement::Applying
    } else {
        Movement::Separating
    }
}

/// Aspect detector over a fixed orb configuration.
#[derive(Debug, Clone, Default)]
pub struct AspectDetector {
    orbs: OrbConfig,
}

impl AspectDetector {
    pub fn new(orbs: OrbConfig) -> Self {
        Self { orbs }
    }

    pub fn orbs(&self) -> &OrbConfig {
        &self.orbs
    }

    /// Aspects within one subject. Each unordered pair is checked once and
    /// pairs that are opposite by construction (Ascendant and Descendant,
    /// Midheaven and Imum Coeli, a node and its south node) are skipped.
    pub fn detect_natal(&self, points: &[CelestialPoint]) -> Vec<AspectMatch> {
        let mut matches = Vec::new();
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                let (a, b) = (&points[i], &points[j]);
                if a.point == b.point || a.point.axis_partner() == Some(b.point) {
                    continue;
                }
                if let Some(aspect) = self.match_pair(a, b) {
                    matches.push(aspect);
                }
            }
        }
        sort_matches(&mut matches);
        matches
    }

    /// Aspects from every point of `first` to every point of `second`,
    /// same identities included.
    pub fn detect(&self, first: &[CelestialPoint], second: &[CelestialPoint]) -> Vec<AspectMatch> {
        let mut matches: Vec<AspectMatch> = first
            .iter()
            .flat_map(|a| second.iter().filter_map(move |b| self.match_pair(a, b)))
            .collect();
        sort_matches(&mut matches);
        matches
    }

    /// Best aspect between two points, if any is within orb.
    ///
    /// The candidate closest to exact wins; on an exact tie the entry that
    /// comes first in the orb configuration wins.
    pub fn match_pair(&self, p1: &CelestialPoint, p2: &CelestialPoint) -> Option<AspectMatch> {
        let separation = separation(p1.longitude, p2.longitude);

        let mut best: Option<(f64, &OrbEntry)> = None;
        for entry in self.orbs.entries() {
            let delta = separation - entry.kind.angle();
            if delta.abs() > entry.orb {
                continue;
            }
            match best {
                Some((current, _)) if current.abs() <= delta.abs() => {}
                _ => best = Some((delta, entry)),
            }
        }

        let (delta, entry) = best?;
        Some(AspectMatch {
            p1: p1.point,
            p2: p2.point,
            p1_longitude: p1.longitude,
            p2_longitude: p2.longitude,
            separation,
            kind: entry.kind,
            angle: entry.kind.angle(),
            delta,
            movement: movement(p1.longitude, p2.longitude, p1.speed, p2.speed, delta),
        })
    }
}

fn sort_matches(matches: &mut [AspectMatch]) {
    matches.sort_by(|a, b| {
        a.separation
            .total_cmp(&b.separation)
            .then_with(|| (a.p1, a.p2).cmp(&(b.p1, b.p2)))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separation_symmetric_and_bounded() {
        let samples = [0.0, 0.5, 10.0, 179.9, 180.0, 200.0, 359.99];
        for a in samples {
            for b in samples {
                let s = separation(a, b);
                assert_eq!(s, separation(b, a));
                assert!((0.0..=180.0).contains(&s));
            }
        }
        assert_eq!(separation(350.0, 10.0), 20.0);
    }

    #[test]
    fn test_separation_is_bit_identical_for_inexact_decimals() {
        let pairs = [
            (0.1, 0.3),
            (10.1, 10.3),
            (123.456, 124.789),
            (359.7, 0.2),
            (-0.1, 179.9),
        ];
        for (a, b) in pairs {
            assert_eq!(
                separation(a, b).to_bits(),
                separation(b, a).to_bits(),
                "separation({}, {})",
                a,
                b
            );
        }
        assert!((separation(0.1, 0.3) - 0.2).abs() < 1e-12);
        assert!((separation(359.7, 0.2) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_movement_rules() {
        // faster body behind a slower one, closing on a conjunction
        assert_eq!(movement(10.0, 5.0, 0.5, 1.0, 5.0), Movement::Applying);
        assert_eq!(movement(10.0, 5.0, 1.0, 0.5, 5.0), Movement::Separating);
        // exact or equal speed
        assert_eq!(movement(10.0, 10.0, 1.0, 0.0, 0.0), Movement::Separating);
        assert_eq!(movement(10.0, 100.0, 1.0, 1.0, 0.0), Movement::Separating);
        // trine 2 degrees wide, gap widening towards 120
        assert_eq!(movement(0.0, 118.0, 0.0, 1.0, -2.0), Movement::Applying);
        // 179 degrees apart: moving forward opens the gap, moving back closes on 180
        assert_eq!(movement(0.0, 181.0, 0.0, 1.0, -1.0), Movement::Separating);
        assert_eq!(movement(0.0, 181.0, 0.0, -1.0, -1.0), Movement::Applying);
    }
}
