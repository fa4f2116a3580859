//! Expanding-radius peak search
//!
//! Tries radii in increasing order and stops at the first radius that yields
//! any named peak. Attempts are strictly sequential: the next radius is only
//! queried after the previous request has completed.
//!
//! Dropping the future returned by [`PeakSearch::search`] abandons the
//! in-flight request together with everything gathered so far.

use crate::config::SearchConfig;
use crate::coord::{Coordinates, DistanceUnit};
use crate::error::{Error, QueryError, Result};
use crate::peaks::{PeakSource, RankedResult, SearchQuery};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Default first radius, in the search unit
pub const DEFAULT_RADIUS_FLOOR: f64 = 10.0;

/// Default radius increment, in the search unit
pub const DEFAULT_RADIUS_STEP: f64 = 20.0;

/// Default largest radius, in the search unit
pub const DEFAULT_RADIUS_CEILING: f64 = 100.0;

/// Default number of peaks returned
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Most radii a single search may try
pub const MAX_SEARCH_ATTEMPTS: u32 = 100;

/// What to do when a single radius attempt fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Count the attempt as empty and try the next radius
    Continue,
    /// Stop the search and return the failure
    Abort,
}

impl Default for FailurePolicy {
    fn default() -> Self {
        Self::Continue
    }
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Continue => write!(f, "continue"),
            Self::Abort => write!(f, "abort"),
        }
    }
}

impl std::str::FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "continue" => Ok(Self::Continue),
            "abort" => Ok(Self::Abort),
            _ => Err(format!("Unknown failure policy: {}", s)),
        }
    }
}

/// Increasing sequence of search radii: floor, floor + step, ... up to ceiling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusSchedule {
    pub floor: f64,
    pub step: f64,
    pub ceiling: f64,
}

impl RadiusSchedule {
    /// Create a validated schedule
    pub fn new(floor: f64, step: f64, ceiling: f64) -> Result<Self> {
        let schedule = Self {
            floor,
            step,
            ceiling,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Check that the schedule is finite and non-empty
    pub fn validate(&self) -> Result<()> {
        if !self.floor.is_finite() || self.floor <= 0.0 {
            return Err(Error::InvalidRadius(format!(
                "Radius floor must be positive, got {}",
                self.floor
            )));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(Error::InvalidRadius(format!(
                "Radius step must be positive, got {}",
                self.step
            )));
        }
        if !self.ceiling.is_finite() || self.ceiling < self.floor {
            return Err(Error::InvalidRadius(format!(
                "Radius ceiling {} is below floor {}",
                self.ceiling, self.floor
            )));
        }
        let attempts = self.attempt_count();
        if attempts > f64::from(MAX_SEARCH_ATTEMPTS) {
            return Err(Error::InvalidRadius(format!(
                "Radius schedule {}..{} by {} needs {} attempts, at most {} allowed",
                self.floor, self.ceiling, self.step, attempts, MAX_SEARCH_ATTEMPTS
            )));
        }
        Ok(())
    }

    fn attempt_count(&self) -> f64 {
        ((self.ceiling - self.floor) / self.step).floor() + 1.0
    }

    /// Radii in the order they are tried, never more than [`MAX_SEARCH_ATTEMPTS`]
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        // Multiply instead of accumulating so float error does not drift
        (0..MAX_SEARCH_ATTEMPTS)
            .map(|i| self.floor + self.step * f64::from(i))
            .take_while(|r| *r <= self.ceiling)
    }

    /// All radii in the order they are tried
    pub fn radii(&self) -> Vec<f64> {
        self.iter().collect()
    }
}

impl Default for RadiusSchedule {
    fn default() -> Self {
        Self {
            floor: DEFAULT_RADIUS_FLOOR,
            step: DEFAULT_RADIUS_STEP,
            ceiling: DEFAULT_RADIUS_CEILING,
        }
    }
}

/// How a single radius attempt ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// The query returned this many usable peaks
    Found { count: usize },
    /// The query succeeded with nothing usable
    Empty,
    /// The query failed
    Failed { kind: String, message: String },
}

/// Diagnostic record of one query made during a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchAttempt {
    /// Radius in the search unit
    pub radius: f64,
    pub radius_meters: f64,
    pub outcome: AttemptOutcome,
}

/// Ranked peaks plus the attempts that produced them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchReport {
    pub ranked: RankedResult,
    pub attempts: Vec<SearchAttempt>,
}

impl SearchReport {
    /// Number of attempts that failed
    pub fn failed_attempts(&self) -> usize {
        self.attempts
            .iter()
            .filter(|a| matches!(a.outcome, AttemptOutcome::Failed { .. }))
            .count()
    }
}

/// Expanding-radius search over a peak source
#[derive(Debug, Clone)]
pub struct PeakSearch<S> {
    source: S,
    schedule: RadiusSchedule,
    unit: DistanceUnit,
    policy: FailurePolicy,
}

impl<S: PeakSource> PeakSearch<S> {
    /// Create a search with the default schedule (10, 30, 50, 70, 90 miles)
    pub fn new(source: S) -> Self {
        Self {
            source,
            schedule: RadiusSchedule::default(),
            unit: DistanceUnit::default(),
            policy: FailurePolicy::default(),
        }
    }

    /// Create a search using the configured schedule, unit and policy
    pub fn from_config(source: S, config: &SearchConfig) -> Result<Self> {
        let schedule =
            RadiusSchedule::new(config.radius_floor, config.radius_step, config.radius_ceiling)?;
        Ok(Self::new(source)
            .with_schedule(schedule)
            .with_unit(config.unit)
            .with_failure_policy(config.failure_policy))
    }

    pub fn with_schedule(mut self, schedule: RadiusSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_unit(mut self, unit: DistanceUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn schedule(&self) -> &RadiusSchedule {
        &self.schedule
    }

    pub fn unit(&self) -> DistanceUnit {
        self.unit
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Find up to `max_results` peaks nearest to `center`
    ///
    /// Returns an empty result when nothing is found within the ceiling.
    pub async fn find_nearest_peaks(
        &self,
        center: Coordinates,
        max_results: usize,
    ) -> Result<RankedResult> {
        Ok(self.search(center, max_results).await?.ranked)
    }

    /// Like [`Self::find_nearest_peaks`], also returning every attempt made
    pub async fn search(&self, center: Coordinates, max_results: usize) -> Result<SearchReport> {
        center.validate()?;
        if max_results == 0 {
            return Err(Error::InvalidLimit(
                "At least one result must be requested".to_string(),
            ));
        }

        let mut attempts = Vec::new();

        for radius in self.schedule.iter() {
            let query = SearchQuery::new(center, self.unit.to_meters(radius));
            debug!(radius, unit = %self.unit, radius_meters = query.radius_meters, "search attempt");

            match self.source.query(query.center, query.radius_meters).await {
                Ok(records) if records.is_empty() => {
                    attempts.push(attempt(radius, &query, AttemptOutcome::Empty));
                }
                Ok(records) => {
                    attempts.push(attempt(
                        radius,
                        &query,
                        AttemptOutcome::Found {
                            count: records.len(),
                        },
                    ));
                    let ranked = RankedResult::rank(center, records, max_results);
                    info!(
                        radius,
                        unit = %self.unit,
                        returned = ranked.len(),
                        "found peaks"
                    );
                    return Ok(SearchReport { ranked, attempts });
                }
                Err(err) => {
                    warn!(
                        radius,
                        unit = %self.unit,
                        kind = err.kind(),
                        error = %err,
                        "peak query failed"
                    );
                    attempts.push(attempt(radius, &query, failed(&err)));
                    if self.policy == FailurePolicy::Abort {
                        return Err(err.into());
                    }
                }
            }
        }

        info!(
            ceiling = self.schedule.ceiling,
            unit = %self.unit,
            "no peaks within search ceiling"
        );
        Ok(SearchReport {
            ranked: RankedResult::empty(),
            attempts,
        })
    }
}

fn attempt(radius: f64, query: &SearchQuery, outcome: AttemptOutcome) -> SearchAttempt {
    SearchAttempt {
        radius,
        radius_meters: query.radius_meters,
        outcome,
    }
}

fn failed(err: &QueryError) -> AttemptOutcome {
    AttemptOutcome::Failed {
        kind: err.kind().to_string(),
        message: err.to_string(),
    }
}
