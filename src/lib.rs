//! fuzzy-suction
//!
//! A Mamdani fuzzy inference engine and the vacuum suction controller built
//! on it.
//!
//! # Architecture
//!
//! - [`fuzzy`] - universes, membership functions, linguistic variables,
//!   antecedent expressions and rules
//! - [`engine`] - validated inference engine, per-call sessions, centroid
//!   defuzzification
//! - [`reference`] - the surface/dirt/suction controller
//! - [`report`] - text and chart rendering of sessions
//! - [`config`] - CLI configuration (TOML + environment)
//! - [`error`] - error type and codes
//!
//! # Example
//!
//! ```rust
//! use fuzzy_suction::compute_suction;
//!
//! // difficult surface, heavy dirt
//! let suction = compute_suction(5.0, 5.0).unwrap();
//! assert!((suction - 8.0).abs() < 1e-9);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod fuzzy;
pub mod reference;
pub mod report;

pub use engine::{
    centroid, EngineBuilder, InferenceEngine, InferenceSession, OutputState, RuleActivation,
    Simulation,
};
pub use error::{ErrorCode, ErrorResponse, FuzzyError, FuzzyResult};
pub use fuzzy::{
    Degrees, Expr, FuzzySet, LabelRef, LinguisticVariable, MembershipFunction, Rule, Universe,
};
pub use reference::compute_suction;
