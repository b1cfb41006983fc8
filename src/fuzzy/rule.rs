//! Fuzzy rules
//!
//! An antecedent is a closed expression tree over `(variable, label)`
//! literals combined with Zadeh AND (min) and OR (max). A rule maps its
//! antecedent onto one consequent label of an output variable.
//!
//! ```rust
//! use fuzzy_suction::{Expr, LabelRef, Rule};
//!
//! let rule = Rule::new(
//!     Expr::is("surface", "easy") & Expr::is("dirt", "light"),
//!     LabelRef::new("suction", "low"),
//! );
//! assert_eq!(
//!     rule.to_string(),
//!     "IF (surface is easy AND dirt is light) THEN suction is low"
//! );
//! ```

use std::fmt;
use std::ops::{BitAnd, BitOr};

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{FuzzyError, FuzzyResult};

/// Fuzzified degrees of one inference pass, keyed by variable then label
pub type Degrees = IndexMap<String, IndexMap<String, f64>>;

/// Reference to one fuzzy set of one variable
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LabelRef {
    pub variable: String,
    pub label: String,
}

impl LabelRef {
    pub fn new(variable: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            label: label.into(),
        }
    }
}

impl fmt::Display for LabelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is {}", self.variable, self.label)
    }
}

/// Antecedent expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(LabelRef),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Literal `variable is label`
    pub fn is(variable: impl Into<String>, label: impl Into<String>) -> Self {
        Expr::Literal(LabelRef::new(variable, label))
    }

    pub fn and(self, other: Expr) -> Self {
        Expr::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Expr) -> Self {
        Expr::Or(Box::new(self), Box::new(other))
    }

    /// Degree of truth given the fuzzified inputs
    pub fn evaluate(&self, degrees: &Degrees) -> FuzzyResult<f64> {
        match self {
            Expr::Literal(r) => degrees
                .get(&r.variable)
                .and_then(|labels| labels.get(&r.label))
                .copied()
                .ok_or_else(|| FuzzyError::UnknownLabel {
                    variable: r.variable.clone(),
                    label: r.label.clone(),
                }),
            Expr::And(left, right) => Ok(left.evaluate(degrees)?.min(right.evaluate(degrees)?)),
            Expr::Or(left, right) => Ok(left.evaluate(degrees)?.max(right.evaluate(degrees)?)),
        }
    }

    /// All literals in left-to-right order
    pub fn literals(&self) -> Vec<&LabelRef> {
        let mut out = Vec::new();
        self.collect_literals(&mut out);
        out
    }

    fn collect_literals<'a>(&'a self, out: &mut Vec<&'a LabelRef>) {
        match self {
            Expr::Literal(r) => out.push(r),
            Expr::And(left, right) | Expr::Or(left, right) => {
                left.collect_literals(out);
                right.collect_literals(out);
            }
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Expr::Literal(_) => 1,
            Expr::And(left, right) | Expr::Or(left, right) => 1 + left.depth().max(right.depth()),
        }
    }
}

impl BitAnd for Expr {
    type Output = Expr;

    fn bitand(self, rhs: Expr) -> Expr {
        self.and(rhs)
    }
}

impl BitOr for Expr {
    type Output = Expr;

    fn bitor(self, rhs: Expr) -> Expr {
        self.or(rhs)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(r) => write!(f, "{}", r),
            Expr::And(left, right) => write!(f, "({} AND {})", left, right),
            Expr::Or(left, right) => write!(f, "({} OR {})", left, right),
        }
    }
}

/// A fuzzy rule
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Rule name/label
    pub name: Option<String>,
    /// Condition over input variables
    pub antecedent: Expr,
    /// Output fuzzy set implied by the condition
    pub consequent: LabelRef,
    /// Multiplies the firing strength, in [0, 1]
    pub weight: f64,
}

impl Rule {
    pub fn new(antecedent: Expr, consequent: LabelRef) -> Self {
        Self {
            name: None,
            antecedent,
            consequent,
            weight: 1.0,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// `weight * antecedent`
    pub fn firing_strength(&self, degrees: &Degrees) -> FuzzyResult<f64> {
        Ok(self.weight * self.antecedent.evaluate(degrees)?)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "[{}] ", name)?;
        }
        write!(f, "IF {} THEN {}", self.antecedent, self.consequent)?;
        if self.weight != 1.0 {
            write!(f, " (weight {})", self.weight)?;
        }
        Ok(())
    }
}
