//! The vacuum suction controller
//!
//! Two inputs on `[0, 5]`, one output on `[0, 10]`, four rules:
//!
//! | # | antecedent                         | suction |
//! |---|------------------------------------|---------|
//! | 1 | surface is easy AND dirt is light     | low     |
//! | 2 | surface is moderate AND dirt is light | medium  |
//! | 3 | surface is difficult OR dirt is heavy | high    |
//! | 4 | surface is moderate                   | medium  |
//!
//! Rule 3 combines two different variables with OR: a very difficult
//! surface alone, or very heavy dirt alone, drives suction to high even when
//! the other input is mild.

use std::collections::HashMap;

use crate::engine::{InferenceEngine, InferenceSession};
use crate::error::{FuzzyError, FuzzyResult};
use crate::fuzzy::{Expr, LabelRef, LinguisticVariable, MembershipFunction, Rule, Universe};

pub const SURFACE: &str = "surface";
pub const DIRT: &str = "dirt";
pub const SUCTION: &str = "suction";

/// Nominal bounds of both inputs
pub const INPUT_RANGE: (f64, f64) = (0.0, 5.0);

pub fn surface() -> FuzzyResult<LinguisticVariable> {
    LinguisticVariable::new(SURFACE, Universe::arange(0.0, 6.0, 1.0)?)
        .with_set("easy", MembershipFunction::triangular(0.0, 0.0, 2.0)?)?
        .with_set("moderate", MembershipFunction::triangular(2.0, 3.0, 4.0)?)?
        .with_set("difficult", MembershipFunction::triangular(3.0, 5.0, 5.0)?)
}

pub fn dirt() -> FuzzyResult<LinguisticVariable> {
    LinguisticVariable::new(DIRT, Universe::arange(0.0, 6.0, 1.0)?)
        .with_set("light", MembershipFunction::triangular(0.0, 0.0, 2.0)?)?
        .with_set("moderate", MembershipFunction::triangular(1.0, 3.0, 5.0)?)?
        .with_set("heavy", MembershipFunction::triangular(3.0, 5.0, 5.0)?)
}

pub fn suction() -> FuzzyResult<LinguisticVariable> {
    LinguisticVariable::new(SUCTION, Universe::arange(0.0, 11.0, 1.0)?)
        .with_set("low", MembershipFunction::triangular(0.0, 2.0, 4.0)?)?
        .with_set("medium", MembershipFunction::triangular(3.0, 5.0, 7.0)?)?
        .with_set("high", MembershipFunction::triangular(6.0, 8.0, 10.0)?)
}

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::new(
            Expr::is(SURFACE, "easy") & Expr::is(DIRT, "light"),
            LabelRef::new(SUCTION, "low"),
        ),
        Rule::new(
            Expr::is(SURFACE, "moderate") & Expr::is(DIRT, "light"),
            LabelRef::new(SUCTION, "medium"),
        ),
        Rule::new(
            Expr::is(SURFACE, "difficult") | Expr::is(DIRT, "heavy"),
            LabelRef::new(SUCTION, "high"),
        ),
        Rule::new(Expr::is(SURFACE, "moderate"), LabelRef::new(SUCTION, "medium")),
    ]
}

/// The controller as a validated engine
pub fn engine() -> FuzzyResult<InferenceEngine> {
    InferenceEngine::new(vec![surface()?, dirt()?], vec![suction()?], rules())
}

fn inputs(surface: f64, dirt: f64) -> HashMap<String, f64> {
    HashMap::from([(SURFACE.to_string(), surface), (DIRT.to_string(), dirt)])
}

/// Full inference session for one reading
pub fn run(engine: &InferenceEngine, surface: f64, dirt: f64) -> FuzzyResult<InferenceSession> {
    engine.run(&inputs(surface, dirt))
}

/// Recommended suction for one reading on a prebuilt engine
pub fn suction_level(engine: &InferenceEngine, surface: f64, dirt: f64) -> FuzzyResult<f64> {
    let session = run(engine, surface, dirt)?;
    session.output(SUCTION).ok_or_else(|| FuzzyError::NoRulesFired {
        variable: SUCTION.to_string(),
    })
}

/// Recommended suction level for a surface difficulty and dirt level
///
/// ```rust
/// let suction = fuzzy_suction::compute_suction(0.0, 0.0).unwrap();
/// assert!((suction - 2.0).abs() < 1e-9);
/// ```
pub fn compute_suction(surface: f64, dirt: f64) -> FuzzyResult<f64> {
    suction_level(&engine()?, surface, dirt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clean_easy_floor_gives_low_suction() {
        let engine = engine().unwrap();
        let session = run(&engine, 0.0, 0.0).unwrap();

        assert_eq!(session.rules[0].strength, 1.0);
        assert!(session.rules[1..].iter().all(|r| r.strength == 0.0));
        assert!((session.output(SUCTION).unwrap() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_difficult_dirty_floor_gives_high_suction() {
        let suction = compute_suction(5.0, 5.0).unwrap();
        assert!((suction - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_heavy_dirt_alone_triggers_high() {
        // OR across variables: an easy surface does not hold suction down
        let engine = engine().unwrap();
        let session = run(&engine, 0.0, 5.0).unwrap();
        assert_eq!(session.rules[2].strength, 1.0);
        assert!(session.output(SUCTION).unwrap() > 5.0);
    }

    #[test]
    fn test_moderate_surface_gives_medium() {
        let engine = engine().unwrap();
        let suction = suction_level(&engine, 3.0, 3.0).unwrap();
        // only rule 4 fires, at full strength: centroid of medium
        assert!((suction - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_dead_zone_reports_no_rules_fired() {
        // surface 2 is outside easy/moderate/difficult, dirt 1 is not heavy
        let err = compute_suction(2.0, 1.0).unwrap_err();
        assert_eq!(
            err,
            FuzzyError::NoRulesFired {
                variable: SUCTION.to_string()
            }
        );
    }

    #[test]
    fn test_engine_reusable_after_failure() {
        let engine = engine().unwrap();
        assert!(suction_level(&engine, 2.0, 1.0).is_err());
        let suction = suction_level(&engine, 0.0, 0.0).unwrap();
        assert!((suction - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_input() {
        let engine = engine().unwrap();
        let only_surface = HashMap::from([(SURFACE.to_string(), 1.0)]);
        assert_eq!(
            engine.compute(&only_surface).unwrap_err(),
            FuzzyError::MissingInput {
                variable: DIRT.to_string()
            }
        );
    }

    #[test]
    fn test_rule_order_does_not_matter() {
        let forward = engine().unwrap();
        let mut reversed_rules = rules();
        reversed_rules.reverse();
        let reversed =
            InferenceEngine::new(vec![surface().unwrap(), dirt().unwrap()], vec![suction().unwrap()], reversed_rules)
                .unwrap();
        let mut rotated_rules = rules();
        rotated_rules.rotate_left(1);
        let rotated =
            InferenceEngine::new(vec![surface().unwrap(), dirt().unwrap()], vec![suction().unwrap()], rotated_rules)
                .unwrap();

        for s in 0..=10 {
            for d in 0..=10 {
                let (s, d) = (s as f64 * 0.5, d as f64 * 0.5);
                let a = suction_level(&forward, s, d);
                let b = suction_level(&reversed, s, d);
                let c = suction_level(&rotated, s, d);
                match (a, b, c) {
                    (Ok(a), Ok(b), Ok(c)) => {
                        assert!((a - b).abs() < 1e-9, "({}, {}): {} vs {}", s, d, a, b);
                        assert!((a - c).abs() < 1e-9, "({}, {}): {} vs {}", s, d, a, c);
                    }
                    (Err(a), Err(b), Err(c)) => {
                        assert_eq!(a, b);
                        assert_eq!(a, c);
                    }
                    other => panic!("({}, {}) diverged: {:?}", s, d, other),
                }
            }
        }
    }

    #[test]
    fn test_repeated_runs_are_bit_identical() {
        let engine = engine().unwrap();
        let first = suction_level(&engine, 3.7, 2.2).unwrap();
        for _ in 0..10 {
            assert_eq!(suction_level(&engine, 3.7, 2.2).unwrap().to_bits(), first.to_bits());
        }
        assert_eq!(run(&engine, 3.7, 2.2).unwrap(), run(&engine, 3.7, 2.2).unwrap());
    }

    #[test]
    fn test_concurrent_compute_on_shared_engine() {
        let engine = engine().unwrap();
        let expected = suction_level(&engine, 4.5, 1.5).unwrap();

        thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| suction_level(&engine, 4.5, 1.5).unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap().to_bits(), expected.to_bits());
            }
        });
    }

    #[test]
    fn test_outputs_stay_in_universe() {
        let engine = engine().unwrap();
        for s in 0..=20 {
            for d in 0..=20 {
                if let Ok(v) = suction_level(&engine, s as f64 * 0.25, d as f64 * 0.25) {
                    assert!((0.0..=10.0).contains(&v));
                }
            }
        }
    }
}
