//! Plain-text reports for the terminal

use std::fmt::Write;
use synergia_core::probability::MAX_CRIT_ORDER;
use synergia_core::{ProbabilitySummary, RollAnalysis, RollOutcome, ScenarioGrid};

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n=== {title} ===");
}

/// Exact odds, one percentage per line
pub fn render_probability(summary: &ProbabilitySummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Net advantage: {:+}", summary.net_advantage);
    let _ = writeln!(out, "Miss chance (rolled 1): {:.2}%", summary.miss_chance * 100.0);
    let _ = writeln!(
        out,
        "Critical chance (rolled {}): {:.2}%",
        summary.die_sides,
        summary.crit_chance * 100.0
    );
    for order in 2..=MAX_CRIT_ORDER {
        if let Some(chance) = summary.crit_chance_of_order(order) {
            let _ = writeln!(out, "  Order {order} critical: {:.6}%", chance * 100.0);
        }
    }
    out
}

/// A single resolution with its trace
pub fn render_outcome(outcome: &RollOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Status: {}", outcome.status);
    let _ = writeln!(out, "Details: {}", outcome.trace_lines().join(" | "));
    let _ = writeln!(out, "Final damage: {}", outcome.final_damage);
    out
}

/// Full analysis of one configuration
pub fn render_analysis(analysis: &RollAnalysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Configuration: {}", analysis.configuration);

    section(&mut out, "Probabilities");
    out.push_str(&render_probability(&analysis.probability));

    section(&mut out, "Simulated damage");
    let estimate = &analysis.estimate;
    let _ = writeln!(out, "Trials: {}", estimate.trials);
    let _ = writeln!(out, "Average damage: {:.3}", estimate.average_damage);
    let _ = writeln!(out, "Flat average (no rules): {:.3}", analysis.flat_average);
    let _ = writeln!(
        out,
        "Miss rate: {:.2}% | Crit rate: {:.2}% | Max damage: {}",
        estimate.miss_rate() * 100.0,
        estimate.crit_rate() * 100.0,
        estimate.max_damage
    );

    section(&mut out, "Example roll");
    out.push_str(&render_outcome(&analysis.example));
    out
}

/// Aligned table of a scenario grid
pub fn render_grid(grid: &ScenarioGrid) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Scenario: {}", grid.profile);
    let _ = writeln!(out, "Trials per cell: {}\n", grid.trials_per_cell);

    let _ = write!(out, "{:>6}", "Dice");
    for sides in &grid.die_sides {
        let _ = write!(out, "{:>10}", format!("d{sides}"));
    }
    out.push('\n');

    for (dice_count, row) in grid.iter_rows() {
        let _ = write!(out, "{:>6}", format!("{dice_count}d"));
        for average in row {
            let _ = write!(out, "{average:>10.3}");
        }
        out.push('\n');
    }
    out
}
