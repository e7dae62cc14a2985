//! Discrete-time queue-length process.
//!
//! Each step draws one Bernoulli arrival and, only if the queue is non-empty
//! after the arrival, one Bernoulli departure. Every `interval` steps an
//! enabled control policy truncates the queue to `limit`; between those
//! boundaries the queue may exceed the limit freely.
//!
//! Arrivals over time form a Bernoulli process (a discrete stand-in for a
//! Poisson process); the number of steps an item spends at the head is
//! geometric (a stand-in for exponential service).

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::circular_buffer::BoundedCircularQueue;
use crate::error::{ConfigError, QueueError};

pub const DEFAULT_CONTROL_INTERVAL: u64 = 10;
pub const DEFAULT_CONTROL_LIMIT: usize = 2;

/// Periodic truncation of the queue length.
///
/// Fields missing from a serialized policy take the reference values:
/// enabled, every 10 steps, limit 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlPolicy {
    pub enabled: bool,
    pub interval: u64,
    pub limit: usize,
}

impl ControlPolicy {
    pub fn disabled() -> Self {
        ControlPolicy {
            enabled: false,
            interval: DEFAULT_CONTROL_INTERVAL,
            limit: 0,
        }
    }

    pub fn every(interval: u64, limit: usize) -> Self {
        ControlPolicy {
            enabled: true,
            interval,
            limit,
        }
    }

    /// Whether the policy truncates after step number `step` (1-based).
    pub fn fires_at(&self, step: u64) -> bool {
        self.enabled && self.interval > 0 && step % self.interval == 0
    }
}

impl Default for ControlPolicy {
    fn default() -> Self {
        ControlPolicy::every(DEFAULT_CONTROL_INTERVAL, DEFAULT_CONTROL_LIMIT)
    }
}

/// Missing fields take the reference values: arrival 0.25, departure 0.30
/// and the default [`ControlPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessConfig {
    pub arrival_prob: f64,
    pub departure_prob: f64,
    pub control: ControlPolicy,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        ProcessConfig {
            arrival_prob: 0.25,
            departure_prob: 0.30,
            control: ControlPolicy::default(),
        }
    }
}

impl ProcessConfig {
    pub fn new(arrival_prob: f64, departure_prob: f64) -> Self {
        ProcessConfig {
            arrival_prob,
            departure_prob,
            control: ControlPolicy::disabled(),
        }
    }

    pub fn with_control(mut self, interval: u64, limit: usize) -> Self {
        self.control = ControlPolicy::every(interval, limit);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_probability("arrival_prob", self.arrival_prob)?;
        check_probability("departure_prob", self.departure_prob)?;
        if self.control.interval == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange { name, value })
    }
}

/// Event totals since construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessCounters {
    pub arrivals: u64,
    pub departures: u64,
    /// Items (or units, in counter form) removed by the control policy.
    pub evicted: u64,
    /// Sum of waiting times of departed items, buffer form only.
    pub total_wait: u64,
}

#[derive(Debug, Clone)]
enum Backing {
    Counter,
    /// Items are the step number at which they arrived.
    Buffer(BoundedCircularQueue<u64>),
}

#[derive(Debug, Clone)]
pub struct QueueLengthProcess {
    config: ProcessConfig,
    backing: Backing,
    current_length: usize,
    step_count: u64,
    counters: ProcessCounters,
    halted: bool,
}

/// Counter-form process from the five construction parameters.
pub fn new_process(
    arrival_prob: f64,
    departure_prob: f64,
    control_enabled: bool,
    control_interval: u64,
    control_limit: usize,
) -> Result<QueueLengthProcess, ConfigError> {
    QueueLengthProcess::new(ProcessConfig {
        arrival_prob,
        departure_prob,
        control: ControlPolicy {
            enabled: control_enabled,
            interval: control_interval,
            limit: control_limit,
        },
    })
}

impl QueueLengthProcess {
    /// Counter form: the length is a plain integer with no upper bound.
    pub fn new(config: ProcessConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_backing(config, Backing::Counter))
    }

    /// Buffer form: arrivals and departures move items through a
    /// `BoundedCircularQueue` of the given capacity.
    pub fn buffered(config: ProcessConfig, capacity: usize) -> Result<Self, ConfigError> {
        config.validate()?;
        let queue = BoundedCircularQueue::new(capacity)?;
        Ok(Self::with_backing(config, Backing::Buffer(queue)))
    }

    fn with_backing(config: ProcessConfig, backing: Backing) -> Self {
        QueueLengthProcess {
            config,
            backing,
            current_length: 0,
            step_count: 0,
            counters: ProcessCounters::default(),
            halted: false,
        }
    }

    /// Performs one step and returns the new length.
    ///
    /// In buffer form an arrival that fills the buffer ends the step early
    /// with `Overflow`: the item stays stored, no departure is drawn and no
    /// control is applied. The process is halted from then on and every
    /// further call returns `Halted` without touching the random source.
    pub fn advance<R: Rng>(&mut self, rng: &mut R) -> Result<usize, QueueError> {
        if self.halted {
            return Err(QueueError::Halted);
        }
        let step = self.step_count + 1;

        let arrival = rng.gen_bool(self.config.arrival_prob);
        let mut length = self.current_length;
        if arrival {
            self.counters.arrivals += 1;
            length += 1;
            if let Backing::Buffer(queue) = &mut self.backing {
                if let Err(err) = queue.enqueue(step) {
                    self.step_count = step;
                    self.current_length = queue.len();
                    self.halted = true;
                    warn!(step, capacity = queue.capacity(), "queue overflow, halting process");
                    return Err(err);
                }
            }
        }

        // departures are never sampled against an empty queue
        if length > 0 && rng.gen_bool(self.config.departure_prob) {
            self.counters.departures += 1;
            length -= 1;
            if let Backing::Buffer(queue) = &mut self.backing {
                if let Some(arrived_at) = queue.dequeue() {
                    self.counters.total_wait += step - arrived_at;
                }
            }
        }

        let control = self.config.control;
        if control.fires_at(step) && length > control.limit {
            let evicted = match &mut self.backing {
                Backing::Counter => length - control.limit,
                Backing::Buffer(queue) => queue.truncate_to(control.limit),
            };
            self.counters.evicted += evicted as u64;
            length -= evicted;
        }

        self.current_length = length;
        self.step_count = step;
        debug_assert!(match &self.backing {
            Backing::Counter => true,
            Backing::Buffer(queue) => queue.len() == self.current_length,
        });
        Ok(length)
    }

    /// Runs `steps` steps and returns the length observed after each one.
    pub fn run<R: Rng>(&mut self, steps: usize, rng: &mut R) -> Result<Vec<usize>, QueueError> {
        let mut trajectory = Vec::with_capacity(steps);
        self.run_into(steps, rng, &mut trajectory)?;
        Ok(trajectory)
    }

    /// Like [`run`](Self::run) but appends to `trajectory` as it goes, so the
    /// observations made before an overflow survive the error.
    pub fn run_into<R: Rng>(
        &mut self,
        steps: usize,
        rng: &mut R,
        trajectory: &mut Vec<usize>,
    ) -> Result<(), QueueError> {
        for _ in 0..steps {
            trajectory.push(self.advance(rng)?);
        }
        Ok(())
    }

    pub fn current_length(&self) -> usize {
        self.current_length
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn config(&self) -> &ProcessConfig {
        &self.config
    }

    pub fn counters(&self) -> &ProcessCounters {
        &self.counters
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// The backing buffer, `None` in counter form.
    pub fn queue(&self) -> Option<&BoundedCircularQueue<u64>> {
        match &self.backing {
            Backing::Counter => None,
            Backing::Buffer(queue) => Some(queue),
        }
    }

    /// Mean number of steps departed items spent queued. `None` in counter
    /// form or before the first departure.
    pub fn mean_wait(&self) -> Option<f64> {
        match self.backing {
            Backing::Buffer(_) if self.counters.departures > 0 => {
                Some(self.counters.total_wait as f64 / self.counters.departures as f64)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_fires_on_one_based_boundaries() {
        let policy = ControlPolicy::every(10, 2);
        assert!(!policy.fires_at(1));
        assert!(!policy.fires_at(9));
        assert!(policy.fires_at(10));
        assert!(policy.fires_at(20));
        assert!(!ControlPolicy::disabled().fires_at(10));
    }

    #[test]
    fn nan_probability_is_rejected() {
        let err = ProcessConfig::new(f64::NAN, 0.5).validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ProbabilityOutOfRange {
                name: "arrival_prob",
                ..
            }
        ));
    }
}
