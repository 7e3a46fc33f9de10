pub mod config;
pub mod fitness;
pub mod runner;

pub use config::{EngineConfig, EngineConfigBuilder};
pub use fitness::{FitnessFunction, Popcount};
pub use runner::{Engine, RunOutcome, StopHandle};
