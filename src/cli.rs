use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;

use crate::console::Reporter;
use crate::data::config::{ExtractConfig, Strictness, DEFAULT_CONFIG_PATH};
use crate::error::ExtractError;
use crate::shop::{run_extraction, validate_tables};

#[derive(Debug, Parser)]
#[command(name = "dailyshop", version, about = "Extract daily shop item chances and costs to CSV")]
pub struct Cli {
    /// Extractor config file
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    /// Decorated console output, overriding FUN_MODE
    #[arg(long, conflicts_with = "plain", global = true)]
    pub fun: bool,

    /// Plain console output, overriding FUN_MODE
    #[arg(long, global = true)]
    pub plain: bool,

    /// Skip the table shape check, overriding VALIDATE_TABLES
    #[arg(long, global = true)]
    pub lenient: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Read the trade tables and write the CSV output (default)
    Extract,
    /// Read and check the trade tables without writing anything
    Validate,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Extract)
    }

    fn apply_overrides(&self, config: &mut ExtractConfig) {
        if self.fun {
            config.fun_mode = true;
        } else if self.plain {
            config.fun_mode = false;
        }
        if self.lenient {
            config.strictness = Strictness::Lenient;
        }
    }
}

pub fn parse_command(args: &[String]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(args)
}

/// Dispatch a full argument list (program name first) and return the exit code.
pub fn run_with_args(args: &[String]) -> i32 {
    let cli = match parse_command(args) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return err.exit_code();
        }
    };

    let mut config = match ExtractConfig::load(&cli.config) {
        Ok(config) => config,
        Err(err) => return report_error(&err),
    };
    cli.apply_overrides(&mut config);
    tracing::debug!(?config, "loaded config");

    let reporter = Reporter::new(config.fun_mode);
    let result = match cli.command() {
        Command::Extract => run_extraction(&config, &reporter),
        Command::Validate => validate_tables(&config, &reporter),
    };

    match result {
        Ok(summary) => {
            tracing::info!(
                pools = summary.pool_count,
                rows = summary.row_count,
                "run complete"
            );
            0
        }
        Err(err) => report_error(&err),
    }
}

fn report_error(err: &ExtractError) -> i32 {
    eprintln!("{} {err}", style("Error:").red().bold());
    if let ExtractError::InvalidTable { diagnostics, .. } = err {
        for diag in diagnostics {
            eprintln!("- {diag}");
        }
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn extract_is_the_default_command() {
        let cli = parse_command(&args(&["dailyshop"])).expect("parse");
        assert_eq!(cli.command(), Command::Extract);
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let argv = args(&["dailyshop", "validate", "--config", "cfg.json", "--lenient"]);
        let cli = parse_command(&argv).expect("parse");
        assert_eq!(cli.command(), Command::Validate);
        assert_eq!(cli.config, PathBuf::from("cfg.json"));
        assert!(cli.lenient);
    }

    #[test]
    fn fun_and_plain_conflict() {
        assert!(parse_command(&args(&["dailyshop", "--fun", "--plain"])).is_err());
    }

    #[test]
    fn unknown_command_is_a_usage_error() {
        assert_eq!(run_with_args(&args(&["dailyshop", "simulate"])), 2);
    }

    #[test]
    fn overrides_replace_config_toggles() {
        let mut config = ExtractConfig::from_json(
            std::path::Path::new("cfg.json"),
            r#"{
                "COBBLEMON_DIR": "/srv",
                "OUTPUT_FILE_NAME": "out.csv",
                "CSV_COLUMNS": ["a", "b", "c", "d", "e"],
                "FUN_MODE": true
            }"#,
        )
        .expect("config");
        let cli = parse_command(&args(&["dailyshop", "--plain", "--lenient"])).expect("parse");
        cli.apply_overrides(&mut config);
        assert!(!config.fun_mode);
        assert_eq!(config.strictness, Strictness::Lenient);
    }
}
