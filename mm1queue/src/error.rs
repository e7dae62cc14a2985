use thiserror::Error;

/// Failures of a bounded queue or of a process backed by one.
///
/// An empty dequeue is not an error; it is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// Every slot of the buffer is occupied.
    #[error("queue overflow: all {capacity} slots are occupied")]
    Overflow { capacity: usize },

    /// A buffer-backed process already overflowed and will not step again.
    #[error("process halted after overflow")]
    Halted,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("queue capacity must be > 0")]
    ZeroCapacity,

    #[error("control interval must be > 0")]
    ZeroInterval,

    #[error("number of steps must be > 0")]
    ZeroSteps,

    #[error("number of trials must be > 0")]
    ZeroTrials,

    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Queue(#[from] QueueError),
}
