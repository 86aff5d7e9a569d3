//! Aspects of the moving sky to a fixed natal subject over a date range.

use crate::aspects::{AspectDetector, AspectMatch};
use crate::ephemeris::range::instants_between;
use crate::error::{AstroError, Result};
use crate::subject::{SubjectBuilder, SubjectModel};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Aspects from transiting points (`p1`) to natal points (`p2`) at one time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitMoment {
    pub utc: DateTime<Utc>,
    pub julian_day_ut: f64,
    pub aspects: Vec<AspectMatch>,
}

pub struct TransitTimeRange {
    builder: SubjectBuilder,
    detector: AspectDetector,
    max_steps: usize,
}

impl TransitTimeRange {
    pub const DEFAULT_MAX_STEPS: usize = 1_000;

    pub fn new(builder: SubjectBuilder, detector: AspectDetector) -> Self {
        Self {
            builder,
            detector,
            max_steps: Self::DEFAULT_MAX_STEPS,
        }
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Transit charts are cast for the natal location, so transiting angles
    /// are local to the subject.
    pub fn compute(
        &self,
        natal: &SubjectModel,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        step: Duration,
    ) -> Result<Vec<TransitMoment>> {
        let settings = self.builder.settings();
        if settings.zodiac != natal.zodiac {
            return Err(AstroError::IncompatibleSubjects {
                first: "transits".to_string(),
                second: natal.name.clone(),
                message: format!(
                    "transits use {:?} but the natal subject uses {:?}",
                    settings.zodiac, natal.zodiac
                ),
            });
        }

        let instants = instants_between(start, end, step, self.max_steps)?;
        log::debug!(
            "Computing transits to '{}' at {} instants",
            natal.name,
            instants.len()
        );

        instants
            .iter()
            .map(|instant| {
                let transit = self.builder.build_at(
                    &format!("{} transits", natal.name),
                    instant,
                    natal.birth.location,
                    natal.birth.utc_offset_seconds,
                    natal.birth.zone.clone(),
                )?;
                Ok(TransitMoment {
                    utc: instant.utc,
                    julian_day_ut: instant.julian_day_ut,
                    aspects: self.detector.detect(&transit.points, &natal.points),
                })
            })
            .collect()
    }
}
