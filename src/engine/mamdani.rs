//! Pointwise Mamdani operators over sampled curves

/// Clip a consequent curve at the rule's firing strength (min implication)
/// and fold it into an accumulated activation (max aggregation)
pub(crate) fn clip_into(activation: &mut [f64], curve: &[f64], strength: f64) {
    for (acc, mu) in activation.iter_mut().zip(curve) {
        *acc = acc.max(mu.min(strength));
    }
}

/// Pointwise maximum of `other` into `acc`
pub(crate) fn union_into(acc: &mut [f64], other: &[f64]) {
    for (a, b) in acc.iter_mut().zip(other) {
        *a = a.max(*b);
    }
}

/// Center of gravity of a sampled fuzzy set
///
/// `Σ x·μ(x) / Σ μ(x)`; `None` when the set is zero everywhere.
pub fn centroid(points: &[f64], degrees: &[f64]) -> Option<f64> {
    let (numerator, denominator) = points
        .iter()
        .zip(degrees)
        .fold((0.0, 0.0), |(n, d), (x, m)| (n + x * m, d + m));

    if denominator > 0.0 {
        Some(numerator / denominator)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_into_takes_min_then_max() {
        let mut acc = vec![0.0, 0.2, 0.0, 0.0];
        clip_into(&mut acc, &[0.0, 0.5, 1.0, 0.5], 0.4);
        assert_eq!(acc, vec![0.0, 0.4, 0.4, 0.4]);

        clip_into(&mut acc, &[1.0, 0.0, 0.0, 0.0], 0.1);
        assert_eq!(acc, vec![0.1, 0.4, 0.4, 0.4]);
    }

    #[test]
    fn test_zero_strength_contributes_nothing() {
        let mut acc = vec![0.0; 3];
        clip_into(&mut acc, &[0.5, 1.0, 0.5], 0.0);
        assert_eq!(acc, vec![0.0; 3]);
    }

    #[test]
    fn test_union_into() {
        let mut acc = vec![0.1, 0.9, 0.0];
        union_into(&mut acc, &[0.3, 0.2, 0.0]);
        assert_eq!(acc, vec![0.3, 0.9, 0.0]);
    }

    #[test]
    fn test_centroid_of_symmetric_triangle() {
        let points: Vec<f64> = (0..=10).map(f64::from).collect();
        let low = [0.0, 0.5, 1.0, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        assert_eq!(centroid(&points, &low), Some(2.0));
    }

    #[test]
    fn test_centroid_of_empty_set() {
        let points = [0.0, 1.0, 2.0];
        assert_eq!(centroid(&points, &[0.0, 0.0, 0.0]), None);
    }
}
