//! Regex step table mapping Gherkin phrases to handlers.

use futures::future::BoxFuture;
use regex::Regex;

use crate::error::StepError;

/// Outcome of a single step handler.
pub type StepResult = std::result::Result<(), StepError>;

/// A step handler: borrows the scenario world and receives the capture
/// groups of the matched pattern as strings.
pub type StepFn<W> = for<'a> fn(&'a mut W, Vec<String>) -> BoxFuture<'a, StepResult>;

/// Ordered table of `(pattern, handler)` pairs.
///
/// Patterns are matched in registration order; the first match wins.
pub struct StepRegistry<W> {
    steps: Vec<(Regex, StepFn<W>)>,
}

impl<W> Default for StepRegistry<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> StepRegistry<W> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Bind a step pattern to a handler.
    ///
    /// # Panics
    /// Panics if the pattern is not a valid regular expression; registration
    /// happens once at startup and a malformed pattern is a programmer error.
    pub fn register(&mut self, pattern: &str, handler: StepFn<W>) {
        let regex = Regex::new(pattern)
            .unwrap_or_else(|e| panic!("invalid step pattern {pattern:?}: {e}"));
        self.steps.push((regex, handler));
    }

    /// Find the handler for a step phrase.
    ///
    /// Returns the handler and the matched capture groups (unmatched
    /// optional groups are omitted), or `None` when the phrase is undefined.
    pub fn resolve(&self, text: &str) -> Option<(StepFn<W>, Vec<String>)> {
        for (regex, handler) in &self.steps {
            if let Some(captures) = regex.captures(text) {
                let args = captures
                    .iter()
                    .skip(1)
                    .flatten()
                    .map(|group| group.as_str().to_string())
                    .collect();
                return Some((*handler, args));
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
