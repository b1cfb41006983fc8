//! Per-caller simulation state
//!
//! Inputs are set by name, `compute` runs the borrowed engine, and the most
//! recent successful session stays readable for reports and plots.

use std::collections::HashMap;

use super::{InferenceEngine, InferenceSession};
use crate::error::FuzzyResult;

/// Mutable driver around a shared, immutable engine
#[derive(Debug, Clone)]
pub struct Simulation<'e> {
    engine: &'e InferenceEngine,
    inputs: HashMap<String, f64>,
    last: Option<InferenceSession>,
}

impl<'e> Simulation<'e> {
    pub fn new(engine: &'e InferenceEngine) -> Self {
        Self {
            engine,
            inputs: HashMap::new(),
            last: None,
        }
    }

    /// Set (or replace) the crisp value of one input
    pub fn input(&mut self, name: impl Into<String>, value: f64) -> &mut Self {
        self.inputs.insert(name.into(), value);
        self
    }

    /// Run inference on the current inputs
    ///
    /// A failed run clears the previous session so stale outputs are never
    /// reported.
    pub fn compute(&mut self) -> FuzzyResult<&InferenceSession> {
        self.last = None;
        let session = self.engine.run(&self.inputs)?;
        Ok(&*self.last.insert(session))
    }

    /// Crisp output from the last successful run
    pub fn output(&self, name: &str) -> Option<f64> {
        self.last.as_ref()?.output(name)
    }

    pub fn last_session(&self) -> Option<&InferenceSession> {
        self.last.as_ref()
    }

    /// Forget inputs and results
    pub fn reset(&mut self) {
        self.inputs.clear();
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use crate::reference;

    #[test]
    fn test_simulation_workflow() {
        let engine = reference::engine().unwrap();
        let mut sim = engine.simulation();

        sim.input("surface", 5.0).input("dirt", 5.0);
        let crisp = sim.compute().unwrap().output("suction").unwrap();
        assert!((crisp - 8.0).abs() < 1e-9);
        assert_eq!(sim.output("suction"), Some(crisp));
        assert!(sim.last_session().is_some());
    }

    #[test]
    fn test_failed_compute_clears_last_session() {
        let engine = reference::engine().unwrap();
        let mut sim = engine.simulation();

        sim.input("surface", 0.0).input("dirt", 0.0);
        assert!(sim.compute().is_ok());

        sim.input("surface", 2.0).input("dirt", 1.0);
        assert!(sim.compute().is_err());
        assert!(sim.last_session().is_none());
        assert_eq!(sim.output("suction"), None);

        sim.reset();
        assert!(sim.compute().is_err());
    }
}
