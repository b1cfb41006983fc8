//! Structured error handling for fuzzy-suction
//!
//! Provides a single error enum for the inference core with:
//! - Stable error codes for programmatic handling
//! - Construction-time vs call-time classification
//! - Structured error responses (JSON-friendly)
//!
//! # Error Categories
//!
//! - Construction errors (1xxx): invalid universes, membership parameters,
//!   duplicate labels or variables, unresolved rule references, bad weights
//! - Inference errors (2xxx): missing or invalid inputs, unknown labels,
//!   no rule firing for an output
//!
//! Construction errors abort building an engine. Inference errors are
//! scoped to a single `compute` call; the engine stays usable afterwards.
//!
//! # Example
//!
//! ```rust
//! use fuzzy_suction::{FuzzyError, LinguisticVariable, MembershipFunction, Universe};
//!
//! let universe = Universe::arange(0.0, 6.0, 1.0).unwrap();
//! let mut surface = LinguisticVariable::new("surface", universe);
//! surface.add_set("easy", MembershipFunction::triangular(0.0, 0.0, 2.0).unwrap()).unwrap();
//!
//! let err = surface
//!     .add_set("easy", MembershipFunction::triangular(0.0, 1.0, 2.0).unwrap())
//!     .unwrap_err();
//! assert!(matches!(err, FuzzyError::DuplicateLabel { .. }));
//! assert!(err.code().is_construction_error());
//! ```

use std::fmt;

use serde::Serialize;

// ============================================================================
// Error Codes
// ============================================================================

/// Unique error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Construction errors (1xxx)
    /// Universe of discourse is empty, non-finite or not increasing
    InvalidUniverse = 1001,
    /// Membership function parameters out of order or non-finite
    InvalidMembership = 1002,
    /// Label registered twice on one variable
    DuplicateLabel = 1003,
    /// Variable name used twice in one engine
    DuplicateVariable = 1004,
    /// Rule refers to a variable or label the engine does not know
    UnresolvedReference = 1005,
    /// Rule weight outside [0, 1]
    InvalidRuleWeight = 1006,

    // Inference errors (2xxx)
    /// Input variable without a crisp value
    MissingInput = 2001,
    /// Crisp input is NaN or infinite
    InvalidInput = 2002,
    /// Antecedent names a label that was never fuzzified
    UnknownLabel = 2003,
    /// Output fuzzy set is zero everywhere
    NoRulesFired = 2004,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a short description of the error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::InvalidUniverse => "Invalid universe of discourse",
            ErrorCode::InvalidMembership => "Invalid membership function",
            ErrorCode::DuplicateLabel => "Duplicate fuzzy set label",
            ErrorCode::DuplicateVariable => "Duplicate variable name",
            ErrorCode::UnresolvedReference => "Unresolved rule reference",
            ErrorCode::InvalidRuleWeight => "Invalid rule weight",

            ErrorCode::MissingInput => "Missing input value",
            ErrorCode::InvalidInput => "Invalid input value",
            ErrorCode::UnknownLabel => "Unknown label",
            ErrorCode::NoRulesFired => "No rules fired",
        }
    }

    /// Whether this error can only happen while building variables or engines
    pub fn is_construction_error(&self) -> bool {
        (1000..2000).contains(&self.code())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

// ============================================================================
// Main Error Type
// ============================================================================

/// The error type for the fuzzy inference core
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FuzzyError {
    #[error("Invalid universe: {reason}")]
    InvalidUniverse { reason: String },

    #[error("Invalid membership function: {reason}")]
    InvalidMembership { reason: String },

    #[error("Label '{label}' is already defined on variable '{variable}'")]
    DuplicateLabel { variable: String, label: String },

    #[error("Variable '{name}' is defined more than once")]
    DuplicateVariable { name: String },

    #[error("Rule {rule} refers to unknown {role} '{variable}' is '{label}'")]
    UnresolvedReference {
        rule: usize,
        role: &'static str,
        variable: String,
        label: String,
    },

    #[error("Rule {rule} has weight {weight}, expected a value in [0, 1]")]
    InvalidRuleWeight { rule: usize, weight: f64 },

    #[error("No value supplied for input variable '{variable}'")]
    MissingInput { variable: String },

    #[error("Input '{variable}' has non-finite value {value}")]
    InvalidInput { variable: String, value: f64 },

    #[error("Label '{label}' of variable '{variable}' was never registered")]
    UnknownLabel { variable: String, label: String },

    #[error("No rule produced any membership for output '{variable}'")]
    NoRulesFired { variable: String },
}

impl FuzzyError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            FuzzyError::InvalidUniverse { .. } => ErrorCode::InvalidUniverse,
            FuzzyError::InvalidMembership { .. } => ErrorCode::InvalidMembership,
            FuzzyError::DuplicateLabel { .. } => ErrorCode::DuplicateLabel,
            FuzzyError::DuplicateVariable { .. } => ErrorCode::DuplicateVariable,
            FuzzyError::UnresolvedReference { .. } => ErrorCode::UnresolvedReference,
            FuzzyError::InvalidRuleWeight { .. } => ErrorCode::InvalidRuleWeight,
            FuzzyError::MissingInput { .. } => ErrorCode::MissingInput,
            FuzzyError::InvalidInput { .. } => ErrorCode::InvalidInput,
            FuzzyError::UnknownLabel { .. } => ErrorCode::UnknownLabel,
            FuzzyError::NoRulesFired { .. } => ErrorCode::NoRulesFired,
        }
    }

    pub(crate) fn invalid_universe(reason: impl Into<String>) -> Self {
        FuzzyError::InvalidUniverse { reason: reason.into() }
    }

    pub(crate) fn invalid_membership(reason: impl Into<String>) -> Self {
        FuzzyError::InvalidMembership { reason: reason.into() }
    }

    /// Hint for resolving the error, shown by the CLI
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            FuzzyError::NoRulesFired { .. } => Some(
                "the inputs fall where no rule antecedent has a non-zero degree; \
                 add a rule covering this region",
            ),
            FuzzyError::MissingInput { .. } => Some("every input variable needs a crisp value"),
            FuzzyError::UnresolvedReference { .. } => {
                Some("antecedents must name input variables, consequents output variables")
            }
            _ => None,
        }
    }
}

/// A Result type using FuzzyError
pub type FuzzyResult<T> = Result<T, FuzzyError>;

// ============================================================================
// Error response for machine-readable output
// ============================================================================

/// Structured error response, emitted by the CLI in JSON mode
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error indicator
    pub error: bool,
    /// Error code (string form)
    pub code: ErrorCode,
    /// Numeric error code
    pub code_num: u32,
    /// Error message
    pub message: String,
    /// Hint for resolution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl From<&FuzzyError> for ErrorResponse {
    fn from(err: &FuzzyError) -> Self {
        let code = err.code();
        Self {
            error: true,
            code,
            code_num: code.code(),
            message: err.to_string(),
            hint: err.hint().map(str::to_string),
        }
    }
}

impl ErrorResponse {
    /// Convert to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"error":true,"message":"{}"}}"#, self.message)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ErrorCode::DuplicateLabel.code(), 1003);
        assert_eq!(ErrorCode::NoRulesFired.code(), 2004);
        assert!(ErrorCode::UnresolvedReference.is_construction_error());
        assert!(!ErrorCode::MissingInput.is_construction_error());
    }

    #[test]
    fn test_error_display() {
        let err = FuzzyError::UnresolvedReference {
            rule: 2,
            role: "input",
            variable: "surface".to_string(),
            label: "slippery".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Rule 2 refers to unknown input 'surface' is 'slippery'"
        );
        assert_eq!(err.code(), ErrorCode::UnresolvedReference);
    }

    #[test]
    fn test_error_response_json() {
        let err = FuzzyError::NoRulesFired { variable: "suction".to_string() };
        let json = ErrorResponse::from(&err).to_json();
        assert!(json.contains("\"code\":\"NO_RULES_FIRED\""));
        assert!(json.contains("\"code_num\":2004"));
        assert!(json.contains("hint"));

        let missing = FuzzyError::InvalidInput { variable: "dirt".to_string(), value: f64::NAN };
        let response = ErrorResponse::from(&missing);
        assert!(response.hint.is_none());
        assert!(!response.to_json().contains("hint"));
    }
}
