//! State of a single inference pass
//!
//! Returned by [`InferenceEngine::run`](super::InferenceEngine::run) so that
//! reports and plots can read what happened without the engine keeping any
//! per-call state.

use indexmap::IndexMap;
use serde::Serialize;

use crate::fuzzy::{Degrees, LabelRef, Universe};

/// Firing strength of one rule in one pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleActivation {
    /// Position in the engine's rule list
    pub index: usize,
    /// Human-readable rule text
    pub rule: String,
    pub consequent: LabelRef,
    /// `weight * antecedent`
    pub strength: f64,
}

/// Aggregated output fuzzy set of one output variable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputState {
    pub universe: Universe,
    /// Max of the clipped consequents per label
    pub activations: IndexMap<String, Vec<f64>>,
    /// Union of all label activations
    pub combined: Vec<f64>,
    /// Centroid of `combined`
    pub crisp: f64,
}

/// Everything computed by one inference pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferenceSession {
    /// Crisp inputs, in engine input order
    pub inputs: IndexMap<String, f64>,
    /// Fuzzified degree of every input label
    pub degrees: Degrees,
    /// Firing strength per rule, in rule order
    pub rules: Vec<RuleActivation>,
    pub outputs: IndexMap<String, OutputState>,
}

impl InferenceSession {
    /// Crisp value of one output
    pub fn output(&self, name: &str) -> Option<f64> {
        self.outputs.get(name).map(|o| o.crisp)
    }

    /// All crisp outputs
    pub fn crisp_outputs(&self) -> IndexMap<String, f64> {
        self.outputs
            .iter()
            .map(|(name, state)| (name.clone(), state.crisp))
            .collect()
    }

    pub fn degree(&self, variable: &str, label: &str) -> Option<f64> {
        self.degrees.get(variable)?.get(label).copied()
    }

    /// Rules with non-zero firing strength
    pub fn fired_rules(&self) -> impl Iterator<Item = &RuleActivation> {
        self.rules.iter().filter(|r| r.strength > 0.0)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
