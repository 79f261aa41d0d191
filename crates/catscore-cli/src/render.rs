//! Terminal and JSON rendering of evaluation results.

use std::fmt::Write as _;

use catscore_core::{EvaluationResult, GranularScores};
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

pub(crate) fn render(result: &EvaluationResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(result)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
    }
}

pub(crate) fn render_text(result: &EvaluationResult) -> String {
    let mut out = String::new();
    let g = result.granular_scores();
    let max = GranularScores::SUB_MAX;

    // Writing to a String cannot fail.
    let _ = writeln!(
        out,
        "{}  score {:.2}/100  tier {}",
        result.name(),
        result.score(),
        result.tier()
    );
    let _ = writeln!(out);
    for (label, value) in [
        ("Animal protein", g.animal_protein),
        ("Fillers & cereals", g.fillers_and_cereals),
        ("Transparency", g.transparency),
        ("Vital balance", g.vital_balance),
    ] {
        let _ = writeln!(out, "  {label:<18} {value:>6.2} / {max:.0}");
    }

    if !result.summary().trim().is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", result.summary().trim());
    }

    for (heading, marker, items) in [
        ("Warnings", '!', result.warnings()),
        ("Observations", '+', result.observations()),
        ("Assumptions", '*', result.assumptions()),
    ] {
        if items.is_empty() {
            continue;
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{heading}:");
        for item in items {
            let _ = writeln!(out, "  {marker} {item}");
        }
    }

    out.trim_end().to_owned()
}
