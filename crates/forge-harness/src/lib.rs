//! Regex step registry and scenario runner for Gherkin features.
//!
//! The registry maps step phrases to async handlers through regular
//! expressions, matched in registration order. The runner
//! flattens parsed features into scenarios, shuffles them with a seed, and
//! executes them sequentially; step failures are scenario verdicts, never
//! process aborts.

pub mod error;
pub mod features;
pub mod registry;
pub mod runner;

pub use error::{Error, Result, StepError};
pub use features::{ScenarioSpec, flatten_scenarios, load_features};
pub use registry::{StepFn, StepRegistry, StepResult};
pub use runner::{RunReport, ScenarioOutcome, ScenarioRunner, ScenarioStatus, wall_clock_seed};
