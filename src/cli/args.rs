//! CLI argument parsing using clap

use crate::config::{ColorOption, OutputFormat};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// treeguard CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "treeguard")]
#[command(about = "Declarative file layout enforcement for repositories")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Output coloring (overrides treeguard.toml)
    #[arg(long, global = true)]
    pub color: Option<ColorOption>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available treeguard subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that every file in the project is allowed by the rules
    Check {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Print the compiled rule set, for debugging rules files
    Rules {
        #[command(flatten)]
        target: TargetArgs,
    },
}

/// Options selecting the project and rules file
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct TargetArgs {
    /// Project directory
    #[arg(short, long, default_value = ".")]
    pub directory: PathBuf,

    /// Rules file (defaults to the one named in treeguard.toml, then .treeguard)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format (overrides treeguard.toml)
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Treat files ignored by the root .gitignore as allowed
    #[arg(long)]
    pub gitignore: bool,
}

impl Default for TargetArgs {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            config: None,
            format: None,
            gitignore: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_verify_cli() {
        // Verify that the CLI struct is properly configured
        Cli::command().debug_assert();
    }

    #[test]
    fn test_check_default_args() {
        let cli = Cli::parse_from(["treeguard", "check"]);
        match cli.command {
            Command::Check { target } => assert_eq!(target, TargetArgs::default()),
            _ => panic!("Expected Check command"),
        }
        assert_eq!(cli.color, None);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_check_with_options() {
        let cli = Cli::parse_from([
            "treeguard",
            "check",
            "-d",
            "my/project",
            "-c",
            ".layout",
            "--format",
            "jsonl",
            "--gitignore",
        ]);
        match cli.command {
            Command::Check { target } => {
                assert_eq!(target.directory, PathBuf::from("my/project"));
                assert_eq!(target.config, Some(PathBuf::from(".layout")));
                assert_eq!(target.format, Some(OutputFormat::Jsonl));
                assert!(target.gitignore);
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_rules_long_options() {
        let cli = Cli::parse_from([
            "treeguard",
            "rules",
            "--directory",
            "proj",
            "--config",
            "proj/.treeguard",
        ]);
        match cli.command {
            Command::Rules { target } => {
                assert_eq!(target.directory, PathBuf::from("proj"));
                assert_eq!(target.config, Some(PathBuf::from("proj/.treeguard")));
                assert_eq!(target.format, None);
            }
            _ => panic!("Expected Rules command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["treeguard", "--color", "always", "check", "-v"]);
        assert_eq!(cli.color, Some(ColorOption::Always));
        assert!(cli.verbose);

        let cli = Cli::parse_from(["treeguard", "rules", "--color", "never"]);
        assert_eq!(cli.color, Some(ColorOption::Never));
    }

    #[test]
    fn test_help_contains_about() {
        let help = Cli::command().render_help().to_string();
        assert!(help.contains("Declarative file layout enforcement"));
    }

    #[test]
    fn test_version_flag() {
        let result = Cli::try_parse_from(["treeguard", "--version"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_format() {
        let result = Cli::try_parse_from(["treeguard", "check", "--format", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_subcommand() {
        assert!(Cli::try_parse_from(["treeguard"]).is_err());
    }
}
