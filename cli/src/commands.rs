//! CLI command definitions

use clap::{Parser, ValueEnum};
use council_application::DeliberationParams;
use council_domain::StrategyKind;
use council_infrastructure::check_sensitivity;
use std::path::PathBuf;
use tracing::warn;

/// Output format for deliberation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full outcome as JSON
    Json,
    /// Short human-readable summary
    Summary,
}

/// CLI arguments for the council
#[derive(Parser, Debug)]
#[command(name = "council")]
#[command(author, version, about = "Perspective Council - detect conflicts and synthesize a group decision")]
#[command(long_about = r#"
Perspective Council reads a snapshot of participant perspectives on one
proposal, detects the conflicts between them, picks a devil's advocate and
synthesizes a single group decision with a confidence score.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./council.toml      Project-level config
3. ~/.config/perspective-council/config.toml   Global config

Example:
  council snapshot.json
  council snapshot.json --strategy weighted --domain security -o json
  council snapshot.json --option Redis --option Postgres -vv
"#)]
pub struct Cli {
    /// Snapshot JSON file (proposal, participants, perspectives)
    pub snapshot: Option<PathBuf>,

    /// Synthesis strategy: consensus, weighted or facilitator
    #[arg(short, long, value_name = "STRATEGY")]
    pub strategy: Option<String>,

    /// Conflict sensitivity (>= 0.5 keeps only critical and major conflicts)
    #[arg(long, value_name = "X")]
    pub sensitivity: Option<f64>,

    /// Participant who decides under the facilitator strategy
    #[arg(long, value_name = "NAME")]
    pub facilitator: Option<String>,

    /// Decision domain used to weigh expert opinions
    #[arg(long, value_name = "DOMAIN")]
    pub domain: Option<String>,

    /// Candidate option for the trade-off matrix (can be specified multiple times)
    #[arg(long = "option", value_name = "OPTION")]
    pub options: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Apply command-line flags on top of the configured parameters.
    ///
    /// Invalid values are logged and leave the configured value in place.
    pub fn apply_overrides(&self, params: &mut DeliberationParams) {
        if let Some(strategy) = &self.strategy {
            let kind = StrategyKind::parse_or_default(strategy);
            if strategy.parse::<StrategyKind>().is_err() {
                warn!("Unknown strategy '{}', falling back to '{}'", strategy, kind);
            }
            params.synthesis.strategy = kind;
        }
        if let Some(sensitivity) = self.sensitivity {
            match check_sensitivity("--sensitivity", sensitivity) {
                Some(issue) => warn!("{}", issue.message),
                None => params.sensitivity = sensitivity,
            }
        }
        if let Some(facilitator) = &self.facilitator {
            params.synthesis.facilitator = Some(facilitator.clone());
        }
        if let Some(domain) = &self.domain {
            params.domain = Some(domain.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_full_invocation() {
        let cli = Cli::parse_from([
            "council",
            "snap.json",
            "--strategy",
            "weighted",
            "--sensitivity",
            "0.6",
            "--option",
            "Redis",
            "--option",
            "Postgres",
            "-o",
            "json",
            "-vv",
        ]);
        assert_eq!(cli.snapshot, Some(PathBuf::from("snap.json")));
        assert_eq!(cli.strategy.as_deref(), Some("weighted"));
        assert_eq!(cli.sensitivity, Some(0.6));
        assert_eq!(cli.options, vec!["Redis", "Postgres"]);
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_overrides_apply_valid_values() {
        let cli = Cli::parse_from([
            "council",
            "snap.json",
            "--strategy",
            "facilitator",
            "--sensitivity",
            "0.8",
            "--facilitator",
            "Dana",
            "--domain",
            "security",
        ]);
        let mut params = DeliberationParams::default();
        cli.apply_overrides(&mut params);
        assert_eq!(params.synthesis.strategy, StrategyKind::Facilitator);
        assert_eq!(params.sensitivity, 0.8);
        assert_eq!(params.synthesis.facilitator.as_deref(), Some("Dana"));
        assert_eq!(params.domain.as_deref(), Some("security"));
    }

    #[test]
    fn test_out_of_range_sensitivity_keeps_configured_value() {
        let cli = Cli::parse_from(["council", "snap.json", "--sensitivity", "1.5"]);
        let mut params = DeliberationParams::default().with_sensitivity(0.6);
        cli.apply_overrides(&mut params);
        assert_eq!(params.sensitivity, 0.6);
    }

    #[test]
    fn test_unknown_strategy_falls_back_to_consensus() {
        let cli = Cli::parse_from(["council", "snap.json", "--strategy", "majority"]);
        let mut params = DeliberationParams::default();
        params.synthesis.strategy = StrategyKind::Weighted;
        cli.apply_overrides(&mut params);
        assert_eq!(params.synthesis.strategy, StrategyKind::Consensus);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["council", "--show-config"]);
        assert!(cli.snapshot.is_none());
        assert!(cli.show_config);
        assert_eq!(cli.output, OutputFormat::Summary);
    }
}
