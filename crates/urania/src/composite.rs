//! Midpoint composite subjects.

use crate::ephemeris::time::Instant;
use crate::ephemeris::types::GeoLocation;
use crate::error::{AstroError, Result};
use crate::subject::types::{BirthMetadata, RawPosition, SubjectKind, SubjectModel};
use crate::zodiac::normalize_degrees;

/// Midpoint of two longitudes along the shorter arc.
///
/// When the longitudes are exactly opposite both arcs are equal; the
/// midpoint is then taken 90 degrees past `a`. Opposite ends of an axis
/// therefore stay opposite: `circular_midpoint(0, 180)` is 90 and
/// `circular_midpoint(180, 0)` is 270. Away from that tie the result does
/// not depend on argument order.
pub fn circular_midpoint(a: f64, b: f64) -> f64 {
    let (a, b) = (normalize_degrees(a), normalize_degrees(b));
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let diff = hi - lo;
    if diff < 180.0 {
        lo + diff / 2.0
    } else if diff > 180.0 {
        normalize_degrees(hi + (360.0 - diff) / 2.0)
    } else {
        normalize_degrees(a + 90.0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CompositeSubjectFactory;

impl CompositeSubjectFactory {
    pub fn new() -> Self {
        Self
    }

    /// Midpoint composite of two subjects cast in the same zodiac and house
    /// system. Only identities present in both subjects are kept.
    pub fn compose(&self, first: &SubjectModel, second: &SubjectModel) -> Result<SubjectModel> {
        let incompatible = |message: String| AstroError::IncompatibleSubjects {
            first: first.name.clone(),
            second: second.name.clone(),
            message,
        };
        if first.zodiac != second.zodiac {
            return Err(incompatible(format!(
                "zodiac {:?} differs from {:?}",
                first.zodiac, second.zodiac
            )));
        }
        if first.house_system != second.house_system {
            return Err(incompatible(format!(
                "house system {} differs from {}",
                first.house_system, second.house_system
            )));
        }

        let positions: Vec<RawPosition> = first
            .points
            .iter()
            .filter_map(|a| {
                second.point(a.point).map(|b| {
                    (
                        a.point,
                        circular_midpoint(a.longitude, b.longitude),
                        (a.latitude + b.latitude) / 2.0,
                        (a.speed + b.speed) / 2.0,
                    )
                })
            })
            .collect();

        let (cusps_a, cusps_b) = (first.cusps(), second.cusps());
        let mut cusps = [0.0; 12];
        for (i, cusp) in cusps.iter_mut().enumerate() {
            *cusp = circular_midpoint(cusps_a[i], cusps_b[i]);
        }

        let (birth_a, birth_b) = (&first.birth, &second.birth);
        let instant = Instant::from_julian_day_ut(
            (birth_a.instant.julian_day_ut + birth_b.instant.julian_day_ut) / 2.0,
        )?;
        let location = GeoLocation::new(
            (birth_a.location.lat + birth_b.location.lat) / 2.0,
            (birth_a.location.lon + birth_b.location.lon) / 2.0,
        )?;
        let utc_offset_seconds =
            ((birth_a.utc_offset_seconds as i64 + birth_b.utc_offset_seconds as i64) / 2) as i32;

        log::debug!(
            "Composing '{}' and '{}' over {} shared points",
            first.name,
            second.name,
            positions.len()
        );

        Ok(SubjectModel::assemble(
            format!("{} and {} Composite", first.name, second.name),
            SubjectKind::Composite,
            BirthMetadata {
                instant,
                location,
                utc_offset_seconds,
                zone: None,
            },
            first.zodiac,
            first.house_system,
            cusps,
            positions,
        ))
    }
}
