pub mod circular_buffer;
pub mod config;
pub mod error;
pub mod process;
pub mod stats;

pub use circular_buffer::BoundedCircularQueue;
pub use config::SimulationConfig;
pub use error::{ConfigError, QueueError, SimError};
pub use process::{new_process, ControlPolicy, ProcessConfig, ProcessCounters, QueueLengthProcess};
pub use stats::{run_trials, TrajectorySummary, TrialReport};
