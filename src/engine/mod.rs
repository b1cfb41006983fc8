//! Mamdani inference engine
//!
//! The engine is built once from input variables, output variables and
//! rules, validated up front, and is read-only afterwards. Every call to
//! [`InferenceEngine::run`] or [`InferenceEngine::compute`] owns its own
//! [`InferenceSession`], so one engine can serve concurrent callers
//! without locking.
//!
//! # Pipeline
//!
//! 1. Fuzzify each crisp input against its variable's sets
//! 2. Firing strength per rule: `weight * antecedent` (AND = min, OR = max)
//! 3. Clip each consequent set at its rule's strength (min), aggregate per
//!    label (max), then union all labels of an output (max)
//! 4. Centroid of the combined set
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use fuzzy_suction::{EngineBuilder, Expr, LabelRef, LinguisticVariable, MembershipFunction, Rule, Universe};
//!
//! let temp = LinguisticVariable::new("temp", Universe::arange(0.0, 11.0, 1.0)?)
//!     .with_set("cold", MembershipFunction::triangular(0.0, 0.0, 10.0)?)?
//!     .with_set("hot", MembershipFunction::triangular(0.0, 10.0, 10.0)?)?;
//! let fan = LinguisticVariable::new("fan", Universe::arange(0.0, 11.0, 1.0)?)
//!     .with_set("slow", MembershipFunction::triangular(0.0, 0.0, 10.0)?)?
//!     .with_set("fast", MembershipFunction::triangular(0.0, 10.0, 10.0)?)?;
//!
//! let engine = EngineBuilder::new()
//!     .input(temp)
//!     .output(fan)
//!     .rule(Rule::new(Expr::is("temp", "cold"), LabelRef::new("fan", "slow")))
//!     .rule(Rule::new(Expr::is("temp", "hot"), LabelRef::new("fan", "fast")))
//!     .build()?;
//!
//! let inputs = HashMap::from([("temp".to_string(), 10.0)]);
//! let outputs = engine.compute(&inputs)?;
//! assert!(outputs["fan"] > 5.0);
//! # Ok::<(), fuzzy_suction::FuzzyError>(())
//! ```

mod mamdani;
mod session;
mod simulation;

pub use mamdani::centroid;
pub use session::{InferenceSession, OutputState, RuleActivation};
pub use simulation::Simulation;

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use crate::error::{FuzzyError, FuzzyResult};
use crate::fuzzy::{Degrees, LabelRef, LinguisticVariable, Rule};

/// Validated, immutable fuzzy inference system
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    inputs: IndexMap<String, LinguisticVariable>,
    outputs: IndexMap<String, LinguisticVariable>,
    rules: Vec<Rule>,
    /// Consequent curves sampled on their output universes, by output then label
    curves: IndexMap<String, IndexMap<String, Vec<f64>>>,
}

impl InferenceEngine {
    /// Build and validate an engine
    ///
    /// Fails on duplicate variable names, rule weights outside `[0, 1]`, and
    /// any antecedent or consequent that does not resolve to a registered
    /// input or output label respectively.
    pub fn new(
        inputs: Vec<LinguisticVariable>,
        outputs: Vec<LinguisticVariable>,
        rules: Vec<Rule>,
    ) -> FuzzyResult<Self> {
        let mut seen = HashSet::new();
        for var in inputs.iter().chain(outputs.iter()) {
            if !seen.insert(var.name().to_string()) {
                return Err(FuzzyError::DuplicateVariable {
                    name: var.name().to_string(),
                });
            }
        }

        let inputs: IndexMap<String, LinguisticVariable> = inputs
            .into_iter()
            .map(|v| (v.name().to_string(), v))
            .collect();
        let outputs: IndexMap<String, LinguisticVariable> = outputs
            .into_iter()
            .map(|v| (v.name().to_string(), v))
            .collect();

        for (index, rule) in rules.iter().enumerate() {
            if !rule.weight.is_finite() || !(0.0..=1.0).contains(&rule.weight) {
                return Err(FuzzyError::InvalidRuleWeight {
                    rule: index,
                    weight: rule.weight,
                });
            }
            for literal in rule.antecedent.literals() {
                resolve(&inputs, literal, index, "input")?;
            }
            resolve(&outputs, &rule.consequent, index, "output")?;
        }

        let curves = outputs
            .iter()
            .map(|(name, var)| {
                let sampled = var
                    .sets()
                    .map(|set| (set.label.clone(), set.membership.sample(var.universe())))
                    .collect();
                (name.clone(), sampled)
            })
            .collect();

        tracing::debug!(
            inputs = inputs.len(),
            outputs = outputs.len(),
            rules = rules.len(),
            "inference engine built"
        );

        Ok(Self {
            inputs,
            outputs,
            rules,
            curves,
        })
    }

    /// Run one inference pass and keep every intermediate result
    pub fn run(&self, inputs: &HashMap<String, f64>) -> FuzzyResult<InferenceSession> {
        let mut crisp = IndexMap::with_capacity(self.inputs.len());
        for name in self.inputs.keys() {
            let value = *inputs.get(name).ok_or_else(|| FuzzyError::MissingInput {
                variable: name.clone(),
            })?;
            if !value.is_finite() {
                return Err(FuzzyError::InvalidInput {
                    variable: name.clone(),
                    value,
                });
            }
            crisp.insert(name.clone(), value);
        }

        let degrees: Degrees = self
            .inputs
            .iter()
            .map(|(name, var)| (name.clone(), var.fuzzify(crisp[name])))
            .collect();

        let mut activations = Vec::with_capacity(self.rules.len());
        for (index, rule) in self.rules.iter().enumerate() {
            let strength = rule.firing_strength(&degrees)?;
            tracing::trace!(rule = index, strength, consequent = %rule.consequent, "rule evaluated");
            activations.push(RuleActivation {
                index,
                rule: rule.to_string(),
                consequent: rule.consequent.clone(),
                strength,
            });
        }

        let mut outputs = IndexMap::with_capacity(self.outputs.len());
        for (name, var) in &self.outputs {
            let state = self.aggregate(name, var, &activations)?;
            tracing::debug!(output = %name, crisp = state.crisp, "defuzzified");
            outputs.insert(name.clone(), state);
        }

        Ok(InferenceSession {
            inputs: crisp,
            degrees,
            rules: activations,
            outputs,
        })
    }

    /// Crisp outputs only
    pub fn compute(&self, inputs: &HashMap<String, f64>) -> FuzzyResult<IndexMap<String, f64>> {
        Ok(self.run(inputs)?.crisp_outputs())
    }

    /// Stateful wrapper for setting inputs one at a time
    pub fn simulation(&self) -> Simulation<'_> {
        Simulation::new(self)
    }

    fn aggregate(
        &self,
        name: &str,
        var: &LinguisticVariable,
        activations: &[RuleActivation],
    ) -> FuzzyResult<OutputState> {
        let width = var.universe().len();
        let curves = &self.curves[name];

        let mut per_label: IndexMap<String, Vec<f64>> = var
            .labels()
            .map(|label| (label.to_string(), vec![0.0; width]))
            .collect();

        for activation in activations {
            if activation.consequent.variable != name || activation.strength <= 0.0 {
                continue;
            }
            let label = &activation.consequent.label;
            if let (Some(acc), Some(curve)) = (per_label.get_mut(label), curves.get(label)) {
                mamdani::clip_into(acc, curve, activation.strength);
            }
        }

        let mut combined = vec![0.0; width];
        for activation in per_label.values() {
            mamdani::union_into(&mut combined, activation);
        }

        let crisp = centroid(var.universe().points(), &combined).ok_or_else(|| {
            FuzzyError::NoRulesFired {
                variable: name.to_string(),
            }
        })?;

        Ok(OutputState {
            universe: var.universe().clone(),
            activations: per_label,
            combined,
            crisp,
        })
    }

    pub fn inputs(&self) -> impl Iterator<Item = &LinguisticVariable> {
        self.inputs.values()
    }

    pub fn outputs(&self) -> impl Iterator<Item = &LinguisticVariable> {
        self.outputs.values()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Input or output variable by name
    pub fn variable(&self, name: &str) -> Option<&LinguisticVariable> {
        self.inputs.get(name).or_else(|| self.outputs.get(name))
    }
}

fn resolve(
    vars: &IndexMap<String, LinguisticVariable>,
    reference: &LabelRef,
    rule: usize,
    role: &'static str,
) -> FuzzyResult<()> {
    match vars.get(&reference.variable) {
        Some(var) if var.has_label(&reference.label) => Ok(()),
        _ => Err(FuzzyError::UnresolvedReference {
            rule,
            role,
            variable: reference.variable.clone(),
            label: reference.label.clone(),
        }),
    }
}

/// Incremental construction of an [`InferenceEngine`]
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    inputs: Vec<LinguisticVariable>,
    outputs: Vec<LinguisticVariable>,
    rules: Vec<Rule>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an input (antecedent) variable
    pub fn input(mut self, var: LinguisticVariable) -> Self {
        self.inputs.push(var);
        self
    }

    /// Add an output (consequent) variable
    pub fn output(mut self, var: LinguisticVariable) -> Self {
        self.outputs.push(var);
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn build(self) -> FuzzyResult<InferenceEngine> {
        InferenceEngine::new(self.inputs, self.outputs, self.rules)
    }
}
