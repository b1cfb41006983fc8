//! Universe of discourse
//!
//! A finite, strictly increasing grid of sample points. Membership curves
//! are sampled on it and the centroid is integrated over it.

use serde::Serialize;

use crate::error::{FuzzyError, FuzzyResult};

/// Sampled domain of a linguistic variable
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Universe {
    points: Vec<f64>,
}

impl Universe {
    /// Half-open grid `start, start + step, ...` strictly below `stop`
    ///
    /// `Universe::arange(0.0, 6.0, 1.0)` yields `0, 1, 2, 3, 4, 5`.
    pub fn arange(start: f64, stop: f64, step: f64) -> FuzzyResult<Self> {
        if !(start.is_finite() && stop.is_finite() && step.is_finite()) {
            return Err(FuzzyError::invalid_universe("arange bounds must be finite"));
        }
        if step <= 0.0 {
            return Err(FuzzyError::invalid_universe(format!(
                "arange step must be positive, got {}",
                step
            )));
        }
        if stop <= start {
            return Err(FuzzyError::invalid_universe(format!(
                "arange stop {} must exceed start {}",
                stop, start
            )));
        }

        let count = ((stop - start) / step).ceil() as usize;
        let points = (0..count).map(|i| start + i as f64 * step).collect();
        Self::from_points(points)
    }

    /// `n` evenly spaced points from `start` to `end`, both inclusive
    pub fn linspace(start: f64, end: f64, n: usize) -> FuzzyResult<Self> {
        if n == 0 {
            return Err(FuzzyError::invalid_universe("linspace needs at least one point"));
        }
        if n == 1 {
            return Self::from_points(vec![start]);
        }

        let step = (end - start) / (n - 1) as f64;
        let mut points: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
        points[n - 1] = end;
        Self::from_points(points)
    }

    /// Explicit grid; must be non-empty, finite and strictly increasing
    pub fn from_points(points: Vec<f64>) -> FuzzyResult<Self> {
        if points.is_empty() {
            return Err(FuzzyError::invalid_universe("universe has no points"));
        }
        if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
            return Err(FuzzyError::invalid_universe(format!(
                "universe point {} is not finite",
                bad
            )));
        }
        if let Some(pair) = points.windows(2).find(|w| w[1] <= w[0]) {
            return Err(FuzzyError::invalid_universe(format!(
                "universe points must be strictly increasing ({} then {})",
                pair[0], pair[1]
            )));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a universe holds at least one point
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn min(&self) -> f64 {
        self.points[0]
    }

    pub fn max(&self) -> f64 {
        self.points[self.points.len() - 1]
    }

    /// Whether `x` lies within the nominal bounds of the grid
    pub fn spans(&self, x: f64) -> bool {
        x >= self.min() && x <= self.max()
    }
}
