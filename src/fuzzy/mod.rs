//! Fuzzy logic building blocks
//!
//! - [`Universe`]: sampled domain of a variable
//! - [`MembershipFunction`]: triangular, trapezoidal, gaussian and singleton shapes
//! - [`LinguisticVariable`]: labeled fuzzy sets over a universe
//! - [`Expr`] / [`Rule`]: antecedent trees and Mamdani rules

mod membership;
mod rule;
mod universe;
mod variable;

pub use membership::MembershipFunction;
pub use rule::{Degrees, Expr, LabelRef, Rule};
pub use universe::Universe;
pub use variable::{FuzzySet, LinguisticVariable};
