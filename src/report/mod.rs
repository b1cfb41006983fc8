//! Text rendering of inference results
//!
//! Consumers of the engine's read-only state: a result line, a session
//! breakdown, and terminal charts of membership curves with the crisp
//! value and output activation overlaid. Nothing here feeds back into
//! inference.

use std::fmt::Write;

use crate::engine::{InferenceEngine, InferenceSession};
use crate::fuzzy::LinguisticVariable;

const GLYPHS: [char; 6] = ['*', '+', 'o', 'x', '@', '%'];
const FILL: char = '#';
const MARKER: char = '|';

/// Chart dimensions in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotOptions {
    pub width: usize,
    pub height: usize,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            width: 60,
            height: 12,
        }
    }
}

/// The one-line answer printed by the CLI
pub fn format_result(suction: f64, precision: usize) -> String {
    format!("Recommended suction level: {:.*}", precision, suction)
}

/// Inputs with their degrees and dominant label, rule strengths and crisp
/// outputs
pub fn render_session(
    engine: &InferenceEngine,
    session: &InferenceSession,
    precision: usize,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Inputs:");
    for (name, value) in &session.inputs {
        let _ = write!(out, "  {} = {:.*}", name, precision, value);
        if let Some(labels) = session.degrees.get(name) {
            let parts: Vec<String> = labels
                .iter()
                .map(|(label, d)| format!("{} {:.*}", label, precision, d))
                .collect();
            let _ = write!(out, "  [{}]", parts.join(", "));
        }
        let dominant = engine
            .variable(name)
            .and_then(|var| var.dominant_label(*value))
            .filter(|(_, degree)| *degree > 0.0);
        if let Some((label, _)) = dominant {
            let _ = write!(out, "  -> {}", label);
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "Rules:");
    for activation in &session.rules {
        let _ = writeln!(
            out,
            "  {:>2}. {:.*}  {}",
            activation.index + 1,
            precision,
            activation.strength,
            activation.rule
        );
    }

    let _ = writeln!(out, "Outputs:");
    for (name, state) in &session.outputs {
        let _ = writeln!(out, "  {} = {:.*}", name, precision, state.crisp);
    }

    out
}

/// Chart the membership curves of a variable
///
/// `marker` draws a vertical line at a crisp value; `activation` is a curve
/// sampled on the variable's universe (e.g. an aggregated output set) drawn
/// as filled columns under the curves.
pub fn plot_variable(
    var: &LinguisticVariable,
    marker: Option<f64>,
    activation: Option<&[f64]>,
    options: PlotOptions,
) -> String {
    let width = options.width.max(2);
    let height = options.height.max(2);
    let universe = var.universe();
    let (min, max) = (universe.min(), universe.max());
    let span = if max > min { max - min } else { 1.0 };

    let col_of = |x: f64| -> Option<usize> {
        if x < min || x > max {
            return None;
        }
        Some((((x - min) / span) * (width - 1) as f64).round() as usize)
    };
    let row_of = |d: f64| -> usize { (height - 1) - (d * (height - 1) as f64).round() as usize };

    let mut grid = vec![vec![' '; width]; height];

    if let Some(curve) = activation {
        for (x, d) in universe.iter().zip(curve) {
            if *d <= 0.0 {
                continue;
            }
            if let Some(col) = col_of(x) {
                for row in grid.iter_mut().skip(row_of(*d)) {
                    row[col] = FILL;
                }
            }
        }
    }

    for (i, set) in var.sets().enumerate() {
        let glyph = GLYPHS[i % GLYPHS.len()];
        for col in 0..width {
            let x = min + span * col as f64 / (width - 1) as f64;
            let d = set.membership_of(x);
            if d > 0.0 {
                grid[row_of(d)][col] = glyph;
            }
        }
    }

    if let Some(col) = marker.and_then(col_of) {
        for row in grid.iter_mut() {
            if row[col] == ' ' {
                row[col] = MARKER;
            }
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", var.name());
    for (r, row) in grid.iter().enumerate() {
        let axis = if r == 0 {
            "1.0"
        } else if r == height - 1 {
            "0.0"
        } else {
            "   "
        };
        let line: String = row.iter().collect();
        let _ = writeln!(out, "{} |{}", axis, line.trim_end());
    }
    let _ = writeln!(out, "    +{}", "-".repeat(width));
    let left = format!("{}", min);
    let right = format!("{}", max);
    let pad = width.saturating_sub(left.len());
    let _ = writeln!(out, "     {}{:>pad$}", left, right, pad = pad);

    let mut legend: Vec<String> = var
        .labels()
        .enumerate()
        .map(|(i, label)| format!("{} {}", GLYPHS[i % GLYPHS.len()], label))
        .collect();
    if activation.is_some() {
        legend.push(format!("{} activation", FILL));
    }
    if let Some(x) = marker {
        legend.push(format!("{} {}", MARKER, x));
    }
    let _ = writeln!(out, "     {}", legend.join("  "));

    out
}

/// Charts for every variable in a session: inputs marked at their crisp
/// values, outputs with their aggregated set and centroid
pub fn plot_session<'a>(
    variables: impl IntoIterator<Item = &'a LinguisticVariable>,
    session: &InferenceSession,
    options: PlotOptions,
) -> String {
    let mut out = String::new();
    for var in variables {
        let name = var.name();
        let chart = if let Some(state) = session.outputs.get(name) {
            plot_variable(var, Some(state.crisp), Some(state.combined.as_slice()), options)
        } else {
            plot_variable(var, session.inputs.get(name).copied(), None, options)
        };
        out.push_str(&chart);
        out.push('\n');
    }
    out
}
