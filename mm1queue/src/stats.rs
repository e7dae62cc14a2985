//! Trajectory reduction and the repeated-trial harness.

use rand::{rngs::StdRng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::error::{ConfigError, SimError};
use crate::process::{ProcessConfig, QueueLengthProcess};

/// The four values one trajectory is reduced to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectorySummary {
    /// Share of observations with an empty queue, in percent.
    pub percent_zero: f64,
    pub median: f64,
    pub mean: f64,
    pub max: usize,
}

impl TrajectorySummary {
    pub fn from_trajectory(trajectory: &[usize]) -> Option<Self> {
        if trajectory.is_empty() {
            return None;
        }
        let n = trajectory.len();
        let zeros = trajectory.iter().filter(|&&len| len == 0).count();
        let total: u64 = trajectory.iter().map(|&len| len as u64).sum();
        let max = trajectory.iter().copied().max().unwrap_or(0);

        let mut sorted = trajectory.to_vec();
        sorted.sort_unstable();
        let median = if n % 2 == 1 {
            sorted[n / 2] as f64
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) as f64 / 2.0
        };

        Some(TrajectorySummary {
            percent_zero: 100.0 * zeros as f64 / n as f64,
            median,
            mean: total as f64 / n as f64,
            max,
        })
    }
}

/// Per-metric columns over a batch of trials, in trial order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrialReport {
    pub percent_zero: Vec<f64>,
    pub median: Vec<f64>,
    pub mean: Vec<f64>,
    pub max: Vec<usize>,
}

impl TrialReport {
    pub fn from_summaries(summaries: &[TrajectorySummary]) -> Self {
        let mut report = TrialReport::default();
        for s in summaries {
            report.percent_zero.push(s.percent_zero);
            report.median.push(s.median);
            report.mean.push(s.mean);
            report.max.push(s.max);
        }
        report
    }

    pub fn trials(&self) -> usize {
        self.max.len()
    }
}

/// Generates `trials` independent counter-form trajectories of `steps` steps
/// and reduces each one.
///
/// Trial `i` draws from `StdRng::seed_from_u64(base_seed + i)`, so the result
/// does not depend on how rayon schedules the trials.
pub fn run_trials(
    config: &ProcessConfig,
    steps: usize,
    trials: usize,
    base_seed: u64,
) -> Result<Vec<TrajectorySummary>, SimError> {
    config.validate()?;
    if steps == 0 {
        return Err(ConfigError::ZeroSteps.into());
    }
    if trials == 0 {
        return Err(ConfigError::ZeroTrials.into());
    }
    info!(trials, steps, base_seed, "running trials");

    let summaries = (0..trials)
        .into_par_iter()
        .map(|trial| -> Result<TrajectorySummary, SimError> {
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(trial as u64));
            let mut process = QueueLengthProcess::new(*config)?;
            let trajectory = process.run(steps, &mut rng)?;
            TrajectorySummary::from_trajectory(&trajectory)
                .ok_or_else(|| SimError::from(ConfigError::ZeroSteps))
        })
        .collect::<Result<Vec<_>, _>>()?;

    info!(trials = summaries.len(), "trials finished");
    Ok(summaries)
}
