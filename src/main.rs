mod commands;
mod controller;
mod logging;
mod menu;
mod paths;
mod profile;
mod tui;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::logging::{LogTarget, Verbosity};

#[derive(Parser, Debug)]
#[command(
    name = "setupmenu",
    version,
    about = "Pick software and system settings for a machine, saved as a provisioning profile"
)]
struct Cli {
    /// Profile to read and write [default: per-user config directory]
    #[arg(long, global = true, value_name = "PATH")]
    profile: Option<PathBuf>,
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Log errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Open the interactive menu (the default)
    View {
        /// Start from the defaults instead of the saved profile
        #[arg(long)]
        fresh: bool,
    },
    /// Write a profile containing only the default selection
    Init {
        /// Overwrite an existing profile
        #[arg(long)]
        force: bool,
    },
    /// Add another profile's selection to the saved profile
    Import {
        /// Profile to merge in
        #[arg(value_name = "FILE")]
        source: PathBuf,
    },
    /// Print the saved selection grouped by category
    List,
    /// Print the menu tree with selection status
    Tree {
        /// Include individual items, not just categories
        #[arg(long)]
        all: bool,
    },
    /// Check the built-in catalog for structural problems
    Validate,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::View { fresh: false });

    let target = match command {
        Command::View { .. } => LogTarget::File(paths::log_path()),
        _ => LogTarget::Stderr,
    };
    logging::init(Verbosity::from_flags(cli.verbose, cli.quiet), &target);

    match command {
        Command::View { fresh } => {
            commands::view::run(&paths::profile_path(cli.profile.as_deref())?, fresh)
        }
        Command::Init { force } => {
            commands::init::run(&paths::profile_path(cli.profile.as_deref())?, force)
        }
        Command::Import { source } => {
            commands::import::run(&paths::profile_path(cli.profile.as_deref())?, &source)
        }
        Command::List => commands::list::run(&paths::profile_path(cli.profile.as_deref())?),
        Command::Tree { all } => {
            commands::tree::run(&paths::profile_path(cli.profile.as_deref())?, all)
        }
        Command::Validate => commands::validate::run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn no_subcommand_means_view() {
        let cli = Cli::try_parse_from(["setupmenu"]).expect("bare invocation should parse");
        assert_eq!(cli.command, None);
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::try_parse_from([
            "setupmenu",
            "tree",
            "--all",
            "--profile",
            "/tmp/p.yml",
            "-v",
        ])
        .expect("global flags should parse after the subcommand");
        assert_eq!(cli.command, Some(Command::Tree { all: true }));
        assert_eq!(cli.profile, Some(PathBuf::from("/tmp/p.yml")));
        assert!(cli.verbose);
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        let parsed = Cli::try_parse_from(["setupmenu", "-v", "-q", "list"]);
        let err = parsed.err().expect("expected clap parse error");
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn view_accepts_fresh() {
        let cli = Cli::try_parse_from(["setupmenu", "view", "--fresh"]).unwrap();
        assert_eq!(cli.command, Some(Command::View { fresh: true }));
    }

    #[test]
    fn import_requires_a_file() {
        let cli = Cli::try_parse_from(["setupmenu", "import", "other.yml"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Import {
                source: PathBuf::from("other.yml")
            })
        );
        let err = Cli::try_parse_from(["setupmenu", "import"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        let parsed = Cli::try_parse_from(["setupmenu", "status"]);
        assert_eq!(
            parsed.err().expect("expected clap parse error").kind(),
            ErrorKind::InvalidSubcommand
        );
    }
}
