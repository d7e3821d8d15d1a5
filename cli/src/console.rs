//! Console output formatter for deliberation outcomes

use colored::Colorize;
use council_application::DeliberationOutcome;
use council_domain::{ConflictSeverity, RiskLevel};

/// Formats deliberation outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Short human-readable summary
    pub fn format_summary(outcome: &DeliberationOutcome) -> String {
        let mut output = String::new();
        let synthesis = &outcome.synthesis;

        output.push_str(&Self::header("Council Decision"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Proposal:".cyan().bold(),
            outcome.proposal
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Decision:".cyan().bold(),
            synthesis.decision
        ));
        output.push_str(&format!(
            "{} {} consensus, confidence {:.2} ({} strategy)\n",
            "Outcome:".cyan().bold(),
            synthesis.consensus_level,
            synthesis.confidence,
            synthesis.strategy
        ));
        output.push_str(&format!("{} {}\n", "Rationale:".dimmed(), synthesis.rationale));

        if let Some(advocate) = &outcome.advocate {
            output.push_str(&format!(
                "{} {}\n",
                "Devil's advocate:".cyan().bold(),
                advocate.participant
            ));
        }

        output.push_str(&Self::section_header(&format!(
            "Conflicts ({} detected, {} unresolved)",
            outcome.conflicts.len(),
            outcome.unresolved_conflicts()
        )));
        for conflict in &outcome.conflicts {
            let tag = format!("[{} {}]", conflict.severity, conflict.conflict_type);
            let tag = match conflict.severity {
                ConflictSeverity::Critical => tag.red().bold(),
                ConflictSeverity::Major => tag.yellow().bold(),
                ConflictSeverity::Minor => tag.normal(),
            };
            output.push_str(&format!("{} {}\n", tag, conflict.description));
            if let Some(resolution) = &conflict.resolution {
                output.push_str(&format!("    resolved: {}\n", resolution));
            } else if let Some(suggested) = &conflict.suggested_resolution {
                output.push_str(&format!("    suggested: {}\n", suggested));
            }
        }

        if let Some(report) = &synthesis.dissent_report {
            output.push_str(&Self::section_header("Dissent"));
            output.push_str(&format!("{}\n", report.summary));
        }

        if !synthesis.recommendations.is_empty() {
            output.push_str(&Self::section_header("Recommendations"));
            for recommendation in &synthesis.recommendations {
                output.push_str(&format!("  - {}\n", recommendation));
            }
        }

        if let Some(matrix) = &outcome.tradeoff_matrix {
            output.push_str(&Self::section_header("Trade-offs"));
            for entry in &matrix.entries {
                let risk = match entry.risk {
                    RiskLevel::High => entry.risk.as_str().red(),
                    RiskLevel::Medium => entry.risk.as_str().yellow(),
                    RiskLevel::Low => entry.risk.as_str().green(),
                };
                output.push_str(&format!(
                    "  {:<20} {} risk ({:.2}): +{} / -{}\n",
                    entry.option, risk, entry.risk_score, entry.support, entry.opposition
                ));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
