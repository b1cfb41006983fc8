//! Membership functions
//!
//! Every shape maps any real `x` to a degree in `[0, 1]` and is zero outside
//! its support. Degenerate shapes (zero-width edges, single points) are
//! handled without dividing by zero.

use serde::Serialize;

use super::universe::Universe;
use crate::error::{FuzzyError, FuzzyResult};

/// Membership function types
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipFunction {
    /// Triangular: (left, peak, right)
    Triangular(f64, f64, f64),
    /// Trapezoidal: (left, left_top, right_top, right)
    Trapezoidal(f64, f64, f64, f64),
    /// Gaussian: (mean, sigma)
    Gaussian(f64, f64),
    /// Singleton at a specific value
    Singleton(f64),
}

impl MembershipFunction {
    /// Triangle rising from `a` to a peak at `b` and falling to zero at `c`
    ///
    /// `a == b` or `b == c` give a vertical edge; `a == b == c` is a crisp
    /// singleton.
    pub fn triangular(a: f64, b: f64, c: f64) -> FuzzyResult<Self> {
        check_finite(&[a, b, c])?;
        if !(a <= b && b <= c) {
            return Err(FuzzyError::invalid_membership(format!(
                "triangle needs a <= b <= c, got ({}, {}, {})",
                a, b, c
            )));
        }
        Ok(MembershipFunction::Triangular(a, b, c))
    }

    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> FuzzyResult<Self> {
        check_finite(&[a, b, c, d])?;
        if !(a <= b && b <= c && c <= d) {
            return Err(FuzzyError::invalid_membership(format!(
                "trapezoid needs a <= b <= c <= d, got ({}, {}, {}, {})",
                a, b, c, d
            )));
        }
        Ok(MembershipFunction::Trapezoidal(a, b, c, d))
    }

    pub fn gaussian(mean: f64, sigma: f64) -> FuzzyResult<Self> {
        check_finite(&[mean, sigma])?;
        if sigma <= 0.0 {
            return Err(FuzzyError::invalid_membership(format!(
                "gaussian sigma must be positive, got {}",
                sigma
            )));
        }
        Ok(MembershipFunction::Gaussian(mean, sigma))
    }

    pub fn singleton(value: f64) -> FuzzyResult<Self> {
        check_finite(&[value])?;
        Ok(MembershipFunction::Singleton(value))
    }

    /// Evaluate membership for a crisp value
    pub fn evaluate(&self, x: f64) -> f64 {
        if x.is_nan() {
            return 0.0;
        }

        let degree = match *self {
            MembershipFunction::Triangular(a, b, c) => {
                if x < a || x > c {
                    0.0
                } else if x == b {
                    1.0
                } else if x < b {
                    // a <= x < b, so b > a
                    (x - a) / (b - a)
                } else {
                    // b < x <= c, so c > b
                    (c - x) / (c - b)
                }
            }
            MembershipFunction::Trapezoidal(a, b, c, d) => {
                if x < a || x > d {
                    0.0
                } else if x >= b && x <= c {
                    1.0
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (d - x) / (d - c)
                }
            }
            MembershipFunction::Gaussian(mean, sigma) => {
                let exp = -((x - mean).powi(2)) / (2.0 * sigma.powi(2));
                exp.exp()
            }
            MembershipFunction::Singleton(v) => {
                if x == v {
                    1.0
                } else {
                    0.0
                }
            }
        };

        if degree.is_nan() {
            0.0
        } else {
            degree.clamp(0.0, 1.0)
        }
    }

    /// Re-run the constructor checks on a directly built variant
    pub fn validate(&self) -> FuzzyResult<()> {
        match *self {
            MembershipFunction::Triangular(a, b, c) => Self::triangular(a, b, c).map(drop),
            MembershipFunction::Trapezoidal(a, b, c, d) => {
                Self::trapezoidal(a, b, c, d).map(drop)
            }
            MembershipFunction::Gaussian(mean, sigma) => Self::gaussian(mean, sigma).map(drop),
            MembershipFunction::Singleton(v) => Self::singleton(v).map(drop),
        }
    }

    /// Sample the curve at every point of a universe
    pub fn sample(&self, universe: &Universe) -> Vec<f64> {
        universe.iter().map(|x| self.evaluate(x)).collect()
    }

    /// Interval where membership = 1
    pub fn peak(&self) -> (f64, f64) {
        match *self {
            MembershipFunction::Triangular(_, b, _) => (b, b),
            MembershipFunction::Trapezoidal(_, b, c, _) => (b, c),
            MembershipFunction::Gaussian(mean, _) => (mean, mean),
            MembershipFunction::Singleton(v) => (v, v),
        }
    }

    /// Closed interval where membership may be non-zero, if bounded
    pub fn support(&self) -> Option<(f64, f64)> {
        match *self {
            MembershipFunction::Triangular(a, _, c) => Some((a, c)),
            MembershipFunction::Trapezoidal(a, _, _, d) => Some((a, d)),
            MembershipFunction::Gaussian(..) => None,
            MembershipFunction::Singleton(v) => Some((v, v)),
        }
    }
}

fn check_finite(params: &[f64]) -> FuzzyResult<()> {
    match params.iter().find(|p| !p.is_finite()) {
        Some(bad) => Err(FuzzyError::invalid_membership(format!(
            "parameter {} is not finite",
            bad
        ))),
        None => Ok(()),
    }
}
