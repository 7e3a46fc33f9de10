//! # Engine Registry
//!
//! Command-style invocation surface: an explicit registry mapping string
//! identifiers to factory functions, replacing instantiation by reflected
//! type name, plus a structured parser for option strings replacing ad hoc
//! option handling.
//!
//! Given an engine name and a list of option strings, the registry either
//! prints the available configuration options (help flag) or instantiates
//! the problem-specific engine, runs it to completion, and reports the
//! result as a process-style exit status: 0 on success, 1 on failure, with
//! usage printed for malformed options.
//!
//! ## Example
//!
//! ```rust
//! use bitevolve::engine::{Engine, EngineConfig, Popcount};
//! use bitevolve::registry::{CommandOptions, EngineRegistry, RunnableEngine};
//!
//! let mut registry = EngineRegistry::new();
//! registry.register("popcount", |options: &CommandOptions| {
//!     let mut config = EngineConfig::new(16, 8);
//!     options.apply_to(&mut config);
//!     let engine = Engine::new(config, Popcount)?;
//!     Ok(Box::new(engine) as Box<dyn RunnableEngine>)
//! });
//!
//! let args = vec!["-s".to_string(), "42".to_string(), "-i".to_string(), "10".to_string()];
//! assert_eq!(registry.run_command("popcount", &args), 0);
//! ```

use std::collections::HashMap;

use tracing::info;

use crate::engine::{Engine, EngineConfig, FitnessFunction, RunOutcome, StopHandle};
use crate::error::{EngineError, Result};

/// Object-safe view of a configured engine, the shape the registry's
/// factories produce so engines over different fitness functions can share
/// one command surface.
pub trait RunnableEngine {
    /// Runs the generational loop to a terminal state.
    fn run(&mut self) -> Result<RunOutcome>;
    /// Human-readable summary of the best chromosome.
    fn best_summary(&self) -> String;
    /// Cancellation token for the running engine.
    fn stop_handle(&self) -> StopHandle;
}

impl<F: FitnessFunction> RunnableEngine for Engine<F> {
    fn run(&mut self) -> Result<RunOutcome> {
        Engine::run(self)
    }

    fn best_summary(&self) -> String {
        Engine::best_summary(self)
    }

    fn stop_handle(&self) -> StopHandle {
        Engine::stop_handle(self)
    }
}

/// Options parsed from a command-style option string list.
///
/// Every field is optional; a factory overlays the supplied values onto the
/// problem's own defaults via [`CommandOptions::apply_to`]. The gene count
/// is never an option — it is determined by the problem itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOptions {
    /// `-p`: population size.
    pub population_size: Option<usize>,
    /// `-s`: PRNG seed.
    pub rng_seed: Option<u64>,
    /// `-i`: iteration budget.
    pub iterations: Option<usize>,
    /// `-t`: wall-clock budget in seconds, 0 for unbounded.
    pub time_budget_secs: Option<u64>,
    /// `-sparse`: whether equal-fitness ties favor fewer active bits.
    pub favor_sparse: Option<bool>,
    /// `-h`: print the available options instead of running.
    pub help: bool,
}

impl CommandOptions {
    /// Parses `-key value` option strings.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidOptions`] for an unknown option, a
    /// missing value, or a value that does not parse.
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut options = Self::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-h" | "-help" | "--help" => options.help = true,
                "-p" => options.population_size = Some(parse_value(arg, iter.next())?),
                "-s" => options.rng_seed = Some(parse_value(arg, iter.next())?),
                "-i" => options.iterations = Some(parse_value(arg, iter.next())?),
                "-t" => options.time_budget_secs = Some(parse_value(arg, iter.next())?),
                "-sparse" => options.favor_sparse = Some(parse_value(arg, iter.next())?),
                unknown => {
                    return Err(EngineError::InvalidOptions(format!(
                        "unknown option '{}'",
                        unknown
                    )))
                }
            }
        }
        Ok(options)
    }

    /// The option listing printed for the help flag and on malformed input.
    pub fn usage() -> &'static str {
        "Options:\n\
         \x20 -p <num>            population size\n\
         \x20 -s <num>            random seed\n\
         \x20 -i <num>            number of generations\n\
         \x20 -t <secs>           wall-clock budget in seconds (0 = unbounded)\n\
         \x20 -sparse <bool>      break fitness ties toward fewer active genes\n\
         \x20 -h                  print this listing"
    }

    /// Overlays the supplied values onto `config`, leaving unset fields
    /// untouched.
    pub fn apply_to(&self, config: &mut EngineConfig) {
        if let Some(population_size) = self.population_size {
            config.population_size = population_size;
        }
        if let Some(rng_seed) = self.rng_seed {
            config.rng_seed = rng_seed;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(time_budget_secs) = self.time_budget_secs {
            config.time_budget_secs = time_budget_secs;
        }
        if let Some(favor_sparse) = self.favor_sparse {
            config.favor_sparse = favor_sparse;
        }
    }
}

fn parse_value<T: std::str::FromStr>(option: &str, value: Option<&String>) -> Result<T> {
    let raw = value.ok_or_else(|| {
        EngineError::InvalidOptions(format!("option '{}' requires a value", option))
    })?;
    raw.parse().map_err(|_| {
        EngineError::InvalidOptions(format!("invalid value '{}' for option '{}'", raw, option))
    })
}

/// Factory producing a configured engine from parsed options.
pub type EngineFactory =
    Box<dyn Fn(&CommandOptions) -> Result<Box<dyn RunnableEngine>> + Send + Sync>;

/// Maps string identifiers to engine factories.
#[derive(Default)]
pub struct EngineRegistry {
    factories: HashMap<String, EngineFactory>,
}

impl EngineRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory under `name`, replacing any previous entry.
    pub fn register<Factory>(&mut self, name: impl Into<String>, factory: Factory)
    where
        Factory: Fn(&CommandOptions) -> Result<Box<dyn RunnableEngine>> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Returns the registered engine names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Instantiates the engine registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownEngine`] for an unregistered name, or
    /// whatever the factory itself fails with.
    pub fn instantiate(
        &self,
        name: &str,
        options: &CommandOptions,
    ) -> Result<Box<dyn RunnableEngine>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| EngineError::UnknownEngine(name.to_string()))?;
        factory(options)
    }

    /// Runs the engine registered under `name` with the given option
    /// strings and returns a process-style exit status.
    ///
    /// With a help flag present, the option listing is printed and the
    /// status is 0. Malformed options print a diagnostic plus the usage and
    /// yield 1, as do unknown engine names and runtime failures. A
    /// completed run prints the best-chromosome summary and yields 0; the
    /// early-stop terminations count as success.
    pub fn run_command(&self, name: &str, args: &[String]) -> i32 {
        let options = match CommandOptions::parse(args) {
            Ok(options) => options,
            Err(e) => {
                eprintln!("{}", e);
                eprintln!("{}", CommandOptions::usage());
                return 1;
            }
        };

        if options.help {
            println!("{}", CommandOptions::usage());
            return 0;
        }

        let mut engine = match self.instantiate(name, &options) {
            Ok(engine) => engine,
            Err(e) => {
                eprintln!("{}", e);
                if matches!(e, EngineError::UnknownEngine(_)) {
                    eprintln!("registered engines: {}", self.names().join(", "));
                }
                return 1;
            }
        };

        match engine.run() {
            Ok(outcome) => {
                info!(name, ?outcome, "command run finished");
                println!("{}", engine.best_summary());
                0
            }
            Err(e) => {
                eprintln!("{}", e);
                1
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Popcount;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    fn popcount_registry() -> EngineRegistry {
        let mut registry = EngineRegistry::new();
        registry.register("popcount", |options: &CommandOptions| {
            let mut config = EngineConfig::new(16, 8);
            config.iterations = 5;
            options.apply_to(&mut config);
            let engine = Engine::new(config, Popcount)?;
            Ok(Box::new(engine) as Box<dyn RunnableEngine>)
        });
        registry
    }

    #[test]
    fn test_parse_full_option_set() {
        let options = CommandOptions::parse(&args(&[
            "-p", "24", "-s", "7", "-i", "50", "-t", "3", "-sparse", "false",
        ]))
        .unwrap();
        assert_eq!(options.population_size, Some(24));
        assert_eq!(options.rng_seed, Some(7));
        assert_eq!(options.iterations, Some(50));
        assert_eq!(options.time_budget_secs, Some(3));
        assert_eq!(options.favor_sparse, Some(false));
        assert!(!options.help);
    }

    #[test]
    fn test_parse_rejects_unknown_option() {
        let result = CommandOptions::parse(&args(&["-x", "1"]));
        assert!(matches!(result, Err(EngineError::InvalidOptions(_))));
    }

    #[test]
    fn test_parse_rejects_missing_value() {
        let result = CommandOptions::parse(&args(&["-p"]));
        assert!(matches!(result, Err(EngineError::InvalidOptions(_))));
    }

    #[test]
    fn test_parse_rejects_bad_number() {
        let result = CommandOptions::parse(&args(&["-i", "many"]));
        assert!(matches!(result, Err(EngineError::InvalidOptions(_))));
    }

    #[test]
    fn test_apply_to_overrides_only_supplied_fields() {
        let mut config = EngineConfig::new(16, 8);
        let options = CommandOptions {
            rng_seed: Some(99),
            ..Default::default()
        };
        options.apply_to(&mut config);
        assert_eq!(config.rng_seed, 99);
        assert_eq!(config.population_size, 16);
        assert!(config.favor_sparse);
    }

    #[test]
    fn test_run_command_success() {
        let registry = popcount_registry();
        let status = registry.run_command("popcount", &args(&["-s", "42", "-i", "3"]));
        assert_eq!(status, 0);
    }

    #[test]
    fn test_run_command_help() {
        let registry = popcount_registry();
        assert_eq!(registry.run_command("popcount", &args(&["-h"])), 0);
    }

    #[test]
    fn test_run_command_unknown_engine() {
        let registry = popcount_registry();
        assert_eq!(registry.run_command("no-such-engine", &[]), 1);
    }

    #[test]
    fn test_run_command_malformed_options() {
        let registry = popcount_registry();
        assert_eq!(registry.run_command("popcount", &args(&["-q"])), 1);
    }

    #[test]
    fn test_run_command_runtime_failure() {
        let mut registry = EngineRegistry::new();
        registry.register("failing", |options: &CommandOptions| {
            let mut config = EngineConfig::new(8, 8);
            options.apply_to(&mut config);
            let failing = |_: &[crate::chromosome::Chromosome], _: &mut [f64]| -> Result<()> {
                Err(EngineError::FitnessCalculation("no data".to_string()))
            };
            let engine = Engine::new(config, failing)?;
            Ok(Box::new(engine) as Box<dyn RunnableEngine>)
        });
        assert_eq!(registry.run_command("failing", &[]), 1);
    }

    #[test]
    fn test_instantiate_respects_options() {
        let registry = popcount_registry();
        let options = CommandOptions::parse(&args(&["-p", "4", "-i", "1"])).unwrap();
        let mut engine = registry.instantiate("popcount", &options).unwrap();
        assert!(engine.run().is_ok());
    }

    #[test]
    fn test_names_sorted() {
        let mut registry = popcount_registry();
        registry.register("another", |_: &CommandOptions| {
            Err(EngineError::Other("unused".to_string()))
        });
        assert_eq!(registry.names(), vec!["another", "popcount"]);
    }
}
