//! # bitevolve
//!
//! A seeded, elitist genetic optimizer over fixed-length bit vectors,
//! aimed at combinatorial subset selection: each chromosome is a bit
//! vector in which gene `i` encodes inclusion of candidate element `i`,
//! and an externally supplied [`FitnessFunction`](engine::FitnessFunction)
//! scores whole populations.
//!
//! The engine drives evaluate → rank → recombine → mutate generations
//! deterministically from a configured seed, with elitist preservation of
//! the top-ranked genotypes, a wall-clock budget, and cooperative
//! cross-thread cancellation.
//!
//! ## Example
//!
//! ```rust
//! use bitevolve::engine::{Engine, EngineConfig, Popcount};
//!
//! let config = EngineConfig::builder()
//!     .population_size(16)
//!     .gene_count(8)
//!     .rng_seed(42)
//!     .iterations(20)
//!     .build()
//!     .unwrap();
//!
//! let mut engine = Engine::new(config, Popcount).unwrap();
//! engine.run().unwrap();
//! println!("{}", engine.best_summary());
//! ```

pub mod chromosome;
pub mod engine;
pub mod error;
pub mod mutation;
pub mod population;
pub mod ranking;
pub mod recombination;
pub mod registry;
pub mod rng;

// Re-export commonly used types for convenience
pub use chromosome::Chromosome;
pub use engine::{Engine, EngineConfig, FitnessFunction, RunOutcome, StopHandle};
pub use error::{EngineError, Result, ResultExt};
pub use population::Population;
