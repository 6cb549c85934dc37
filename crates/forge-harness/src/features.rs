//! Feature file loading and scenario flattening.

use std::fs;
use std::path::{Path, PathBuf};

use gherkin::{Feature, GherkinEnv};

use crate::error::{Error, Result};

/// Parse every `*.feature` file directly under `dir`, sorted by file name.
pub fn load_features(dir: &Path) -> Result<Vec<Feature>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "feature"))
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Err(Error::NoFeatures {
            dir: dir.to_path_buf(),
        });
    }

    paths
        .into_iter()
        .map(|path| {
            Feature::parse_path(&path, GherkinEnv::default()).map_err(|e| Error::Parse {
                path: path.clone(),
                message: e.to_string(),
            })
        })
        .collect()
}

/// One runnable scenario: its step phrases in order, background prepended.
#[derive(Debug, Clone)]
pub struct ScenarioSpec {
    pub feature: String,
    pub scenario: String,
    pub steps: Vec<String>,
}

/// Flatten features into runnable scenarios.
pub fn flatten_scenarios(features: &[Feature]) -> Vec<ScenarioSpec> {
    let mut scenarios = Vec::new();

    for feature in features {
        let background: Vec<String> = feature
            .background
            .as_ref()
            .map(|bg| bg.steps.iter().map(|step| step.value.clone()).collect())
            .unwrap_or_default();

        for scenario in &feature.scenarios {
            let steps = background
                .iter()
                .cloned()
                .chain(scenario.steps.iter().map(|step| step.value.clone()))
                .collect();

            scenarios.push(ScenarioSpec {
                feature: feature.name.clone(),
                scenario: scenario.name.clone(),
                steps,
            });
        }
    }

    scenarios
}
