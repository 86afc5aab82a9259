use clap::{ArgAction, Parser};
use log::LevelFilter;
use std::path::PathBuf;

use crate::config::Config;
use crate::output::WriteMode;

/// Build a .gitignore from github/gitignore templates.
#[derive(Debug, Parser)]
#[command(
    name = "gitignore",
    version,
    disable_version_flag = true,
    after_help = "Example:  gitignore node sass"
)]
pub struct Cli {
    /// Template names, case-insensitive (e.g. node python rust)
    #[arg(value_name = "LANG")]
    pub templates: Vec<String>,

    /// Print the available templates and exit
    #[arg(short, long)]
    pub list: bool,

    /// Replace the output file instead of appending to it
    #[arg(short, long)]
    pub overwrite: bool,

    /// Write to FILE instead of .gitignore
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Template repository ref to read from
    #[arg(long, value_name = "REF")]
    pub branch: Option<String>,

    /// Only print the final summary
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log requests and timings
    #[arg(long)]
    pub verbose: bool,

    /// Print the gitignore version
    #[arg(short = 'v', short_alias = 'V', long, action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,
}

impl Cli {
    /// Help is shown instead of a run when there is nothing to do.
    pub fn wants_help(&self) -> bool {
        self.templates.is_empty() && !self.list
    }

    pub fn write_mode(&self) -> WriteMode {
        if self.overwrite {
            WriteMode::Overwrite
        } else {
            WriteMode::Append
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else if self.quiet {
            LevelFilter::Error
        } else {
            LevelFilter::Warn
        }
    }

    /// Layers command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(branch) = &self.branch {
            config.branch = branch.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn positional_templates_in_order() {
        let cli = Cli::try_parse_from(["gitignore", "Node", "sass", "RUST"]).unwrap();

        assert_eq!(cli.templates, vec!["Node", "sass", "RUST"]);
        assert!(!cli.wants_help());
        assert_eq!(cli.write_mode(), WriteMode::Append);
        assert_eq!(cli.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn no_arguments_means_help() {
        let cli = Cli::try_parse_from(["gitignore"]).unwrap();
        assert!(cli.wants_help());

        let listing = Cli::try_parse_from(["gitignore", "--list"]).unwrap();
        assert!(!listing.wants_help());
    }

    #[test]
    fn help_and_version_short_circuit() {
        let help = Cli::try_parse_from(["gitignore", "-h"]).unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);

        for flag in ["-v", "-V", "--version"] {
            let version = Cli::try_parse_from(["gitignore", flag, "node"]).unwrap_err();
            assert_eq!(version.kind(), ErrorKind::DisplayVersion);
        }
    }

    #[test]
    fn overrides_apply_to_config() {
        let cli = Cli::try_parse_from([
            "gitignore",
            "-o",
            "--output",
            "build/.gitignore",
            "--branch",
            "legacy",
            "node",
        ])
        .unwrap();
        let mut config = Config::default();

        cli.apply(&mut config);

        assert_eq!(cli.write_mode(), WriteMode::Overwrite);
        assert_eq!(config.output, PathBuf::from("build/.gitignore"));
        assert_eq!(config.branch, "legacy");
        assert_eq!(config.owner, "github");
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["gitignore", "-q", "--verbose", "node"]).is_err());

        let quiet = Cli::try_parse_from(["gitignore", "-q", "node"]).unwrap();
        assert_eq!(quiet.log_level(), LevelFilter::Error);
    }
}
