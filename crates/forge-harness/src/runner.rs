//! Sequential scenario execution in seeded random order.

use std::time::{SystemTime, UNIX_EPOCH};

use gherkin::Feature;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::StepError;
use crate::features::{ScenarioSpec, flatten_scenarios};
use crate::registry::StepRegistry;

/// Verdict for one executed scenario.
#[derive(Debug)]
pub enum ScenarioStatus {
    Passed,
    /// A step ran and failed; remaining steps were skipped
    Failed { step: String, error: StepError },
    /// A step phrase matched no registered pattern
    Undefined { step: String },
}

/// Result of one scenario together with where it came from.
#[derive(Debug)]
pub struct ScenarioOutcome {
    pub feature: String,
    pub scenario: String,
    pub status: ScenarioStatus,
}

impl ScenarioOutcome {
    pub fn passed(&self) -> bool {
        matches!(self.status, ScenarioStatus::Passed)
    }
}

/// Summary of a full run.
#[derive(Debug)]
pub struct RunReport {
    /// Seed the scenario order was shuffled with
    pub seed: u64,
    pub outcomes: Vec<ScenarioOutcome>,
}

impl RunReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn success(&self) -> bool {
        self.outcomes.iter().all(ScenarioOutcome::passed)
    }
}

/// Seed derived from wall-clock time, the default when none is pinned.
pub fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

/// Executes scenarios sequentially, one step at a time, single-threaded.
///
/// Scenario order is shuffled with the given seed to surface hidden
/// ordering dependencies between scenarios. Every scenario gets a fresh
/// world from the factory; a failing step marks its scenario failed and the
/// run continues with the next one.
pub struct ScenarioRunner<W> {
    registry: StepRegistry<W>,
    make_world: Box<dyn Fn() -> W + Send + Sync>,
}

impl<W> ScenarioRunner<W> {
    pub fn new(
        registry: StepRegistry<W>,
        make_world: impl Fn() -> W + Send + Sync + 'static,
    ) -> Self {
        Self {
            registry,
            make_world: Box::new(make_world),
        }
    }

    /// Run all scenarios of the given features in shuffled order.
    pub async fn run(&self, features: &[Feature], seed: u64) -> RunReport {
        let mut scenarios = flatten_scenarios(features);
        scenarios.shuffle(&mut StdRng::seed_from_u64(seed));
        tracing::info!(seed, count = scenarios.len(), "running scenarios in shuffled order");

        let mut outcomes = Vec::with_capacity(scenarios.len());
        for spec in &scenarios {
            let status = self.run_scenario(spec).await;
            match &status {
                ScenarioStatus::Passed => {
                    tracing::info!(scenario = %spec.scenario, "scenario passed");
                }
                ScenarioStatus::Failed { step, error } => {
                    tracing::warn!(scenario = %spec.scenario, step, %error, "scenario failed");
                }
                ScenarioStatus::Undefined { step } => {
                    tracing::warn!(scenario = %spec.scenario, step, "step is not defined");
                }
            }
            outcomes.push(ScenarioOutcome {
                feature: spec.feature.clone(),
                scenario: spec.scenario.clone(),
                status,
            });
        }

        RunReport { seed, outcomes }
    }

    async fn run_scenario(&self, spec: &ScenarioSpec) -> ScenarioStatus {
        let mut world = (self.make_world)();

        for step in &spec.steps {
            let Some((handler, args)) = self.registry.resolve(step) else {
                return ScenarioStatus::Undefined { step: step.clone() };
            };
            if let Err(error) = handler(&mut world, args).await {
                return ScenarioStatus::Failed {
                    step: step.clone(),
                    error,
                };
            }
        }

        ScenarioStatus::Passed
    }
}
