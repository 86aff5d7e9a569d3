//! Positions over a date range, fetched concurrently.

use crate::ephemeris::adapter::EphemerisAdapter;
use crate::ephemeris::time::Instant;
use crate::ephemeris::types::EclipticPosition;
use crate::error::{AstroError, Result};
use crate::points::Point;
use crate::zodiac::ZodiacType;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Key of one range result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RangeKey {
    pub utc: DateTime<Utc>,
    pub point: Point,
}

/// Evenly spaced instants from `start` to `end` inclusive.
pub fn instants_between(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    step: Duration,
    max_steps: usize,
) -> Result<Vec<Instant>> {
    if step < Duration::milliseconds(1) {
        return Err(AstroError::InvalidTimestamp {
            input: format!("step {}", step),
            message: "range step must be at least one millisecond".to_string(),
        });
    }
    if end < start {
        return Err(AstroError::InvalidTimestamp {
            input: format!("{} .. {}", start, end),
            message: "range end precedes its start".to_string(),
        });
    }

    let span = (end - start).num_milliseconds();
    let step_ms = step.num_milliseconds();
    let steps = (span / step_ms) as usize + 1;
    if steps > max_steps {
        return Err(AstroError::RangeTooLarge { steps, max_steps });
    }

    let mut instants = Vec::with_capacity(steps);
    let mut current = start;
    while current <= end {
        instants.push(Instant::from_utc(current));
        current += step;
    }
    Ok(instants)
}

/// Batch position lookups for a set of points across a date range.
pub struct EphemerisRange {
    adapter: Arc<EphemerisAdapter>,
    max_steps: usize,
}

impl EphemerisRange {
    pub const DEFAULT_MAX_STEPS: usize = 10_000;

    pub fn new(adapter: Arc<EphemerisAdapter>) -> Self {
        Self {
            adapter,
            max_steps: Self::DEFAULT_MAX_STEPS,
        }
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Every (instant, point) lookup runs as its own blocking task; the
    /// results are keyed so completion order does not matter. The first
    /// failing lookup cancels the rest and is returned.
    pub async fn compute(
        &self,
        points: &[Point],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        step: Duration,
        zodiac: ZodiacType,
    ) -> Result<BTreeMap<RangeKey, EclipticPosition>> {
        let instants = instants_between(start, end, step, self.max_steps)?;
        log::debug!(
            "Computing {} positions ({} instants x {} points)",
            instants.len() * points.len(),
            instants.len(),
            points.len()
        );

        let mut tasks = JoinSet::new();
        for instant in &instants {
            for point in points {
                let adapter = Arc::clone(&self.adapter);
                let instant = *instant;
                let point = *point;
                tasks.spawn_blocking(move || {
                    let key = RangeKey {
                        utc: instant.utc,
                        point,
                    };
                    (key, adapter.get_position(point, &instant, &zodiac))
                });
            }
        }

        let mut positions = BTreeMap::new();
        while let Some(joined) = tasks.join_next().await {
            let (key, result) = joined.map_err(|e| AstroError::EphemerisUnavailable {
                oracle: self.adapter.oracle_name().to_string(),
                message: format!("position task failed: {}", e),
            })?;
            match result {
                Ok(position) => {
                    positions.insert(key, position);
                }
                Err(e) => {
                    tasks.abort_all();
                    return Err(e);
                }
            }
        }
        Ok(positions)
    }
}
