//! Linguistic variables
//!
//! A named universe partitioned into labeled fuzzy sets, e.g. `surface`
//! with `easy`, `moderate` and `difficult`.

use indexmap::IndexMap;
use serde::Serialize;

use super::membership::MembershipFunction;
use super::universe::Universe;
use crate::error::{FuzzyError, FuzzyResult};

/// A fuzzy set (term) of a linguistic variable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzySet {
    /// Name of the fuzzy set (e.g., "easy", "heavy")
    pub label: String,
    /// The membership function
    pub membership: MembershipFunction,
}

impl FuzzySet {
    pub fn new(label: impl Into<String>, membership: MembershipFunction) -> Self {
        Self {
            label: label.into(),
            membership,
        }
    }

    /// Get membership degree for a value
    pub fn membership_of(&self, x: f64) -> f64 {
        self.membership.evaluate(x)
    }
}

/// A linguistic variable with associated fuzzy sets
///
/// Sets keep their insertion order, so `fuzzify` and reports iterate
/// reproducibly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinguisticVariable {
    name: String,
    universe: Universe,
    sets: IndexMap<String, FuzzySet>,
}

impl LinguisticVariable {
    pub fn new(name: impl Into<String>, universe: Universe) -> Self {
        Self {
            name: name.into(),
            universe,
            sets: IndexMap::new(),
        }
    }

    /// Register a fuzzy set under a label unique to this variable
    ///
    /// The membership parameters are checked again, so variants built
    /// without their constructor are held to the same rules.
    pub fn add_set(
        &mut self,
        label: impl Into<String>,
        membership: MembershipFunction,
    ) -> FuzzyResult<()> {
        let label = label.into();
        membership.validate()?;
        if self.sets.contains_key(&label) {
            return Err(FuzzyError::DuplicateLabel {
                variable: self.name.clone(),
                label,
            });
        }
        self.sets.insert(label.clone(), FuzzySet::new(label, membership));
        Ok(())
    }

    /// Builder form of [`add_set`](Self::add_set)
    pub fn with_set(
        mut self,
        label: impl Into<String>,
        membership: MembershipFunction,
    ) -> FuzzyResult<Self> {
        self.add_set(label, membership)?;
        Ok(self)
    }

    /// Fuzzify a crisp value: membership for every label, zeros included
    pub fn fuzzify(&self, x: f64) -> IndexMap<String, f64> {
        self.sets
            .iter()
            .map(|(label, set)| (label.clone(), set.membership_of(x)))
            .collect()
    }

    /// Label with the highest degree at `x`; the first registered wins ties
    pub fn dominant_label(&self, x: f64) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for (label, set) in &self.sets {
            let degree = set.membership_of(x);
            if best.map_or(true, |(_, d)| degree > d) {
                best = Some((label.as_str(), degree));
            }
        }
        best
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn set(&self, label: &str) -> Option<&FuzzySet> {
        self.sets.get(label)
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.sets.contains_key(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    pub fn sets(&self) -> impl Iterator<Item = &FuzzySet> {
        self.sets.values()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dirt() -> LinguisticVariable {
        LinguisticVariable::new("dirt", Universe::arange(0.0, 6.0, 1.0).unwrap())
            .with_set("light", MembershipFunction::triangular(0.0, 0.0, 2.0).unwrap())
            .unwrap()
            .with_set("moderate", MembershipFunction::triangular(1.0, 3.0, 5.0).unwrap())
            .unwrap()
            .with_set("heavy", MembershipFunction::triangular(3.0, 5.0, 5.0).unwrap())
            .unwrap()
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let mut var = dirt();
        let err = var
            .add_set("heavy", MembershipFunction::triangular(4.0, 5.0, 5.0).unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            FuzzyError::DuplicateLabel {
                variable: "dirt".to_string(),
                label: "heavy".to_string(),
            }
        );
        // first set kept
        assert_eq!(
            var.set("heavy").unwrap().membership,
            MembershipFunction::Triangular(3.0, 5.0, 5.0)
        );
        assert_eq!(var.len(), 3);
    }

    #[test]
    fn test_invalid_variant_rejected_by_add_set() {
        let mut var = LinguisticVariable::new("x", Universe::arange(0.0, 11.0, 1.0).unwrap());
        let err = var
            .add_set("spike", MembershipFunction::Gaussian(5.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, FuzzyError::InvalidMembership { .. }));
        assert!(var.is_empty());
    }

    #[test]
    fn test_fuzzify_returns_every_label() {
        let var = dirt();
        let degrees = var.fuzzify(1.5);

        assert_eq!(
            degrees.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["light", "moderate", "heavy"]
        );
        for set in var.sets() {
            assert_eq!(degrees[&set.label], set.membership_of(1.5));
        }
        assert!((degrees["light"] - 0.25).abs() < 1e-12);
        assert!((degrees["moderate"] - 0.25).abs() < 1e-12);
        assert_eq!(degrees["heavy"], 0.0);
    }

    #[test]
    fn test_fuzzify_outside_universe() {
        let var = dirt();
        let degrees = var.fuzzify(9.0);
        assert_eq!(degrees.len(), 3);
        assert!(degrees.values().all(|d| *d == 0.0));

        let below = var.fuzzify(-1.0);
        assert_eq!(below["light"], 0.0);
    }

    #[test]
    fn test_dominant_label() {
        let var = dirt();
        assert_eq!(var.dominant_label(0.0), Some(("light", 1.0)));
        assert_eq!(var.dominant_label(3.0), Some(("moderate", 1.0)));
        assert_eq!(var.dominant_label(5.0), Some(("heavy", 1.0)));
        // tie at 1.5 goes to the first registered label
        assert_eq!(var.dominant_label(1.5).map(|(l, _)| l), Some("light"));
    }

    #[test]
    fn test_lookups() {
        let var = dirt();
        assert_eq!(var.name(), "dirt");
        assert!(var.has_label("moderate"));
        assert!(!var.has_label("spotless"));
        assert!(var.set("spotless").is_none());
        assert_eq!(var.universe().len(), 6);
        assert!(LinguisticVariable::new("empty", Universe::from_points(vec![0.0]).unwrap()).is_empty());
    }
}
