//! Tracing subscriber setup.
//!
//! Line-mode commands log to stderr. The interactive menu owns the terminal,
//! so it logs to a file instead, and records `info` events there by default.
//!
//! `SETUPMENU_LOG`, then `RUST_LOG`, override the directives derived from
//! `--verbose` / `--quiet` and the target.

use std::fs::{self, OpenOptions};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;

pub const LOG_ENV: &str = "SETUPMENU_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    /// clap rejects `-v -q` together; verbose wins if both reach here.
    pub const fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (true, _) => Self::Verbose,
            (false, true) => Self::Quiet,
            (false, false) => Self::Normal,
        }
    }
}

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// Filter directives used when neither environment variable is set.
    fn default_directives(&self, verbosity: Verbosity) -> &'static str {
        match (self, verbosity) {
            (_, Verbosity::Quiet) => "error",
            (_, Verbosity::Verbose) => "warn,setupmenu=debug",
            (Self::Stderr, Verbosity::Normal) => "warn",
            (Self::File(_), Verbosity::Normal) => "warn,setupmenu=info",
        }
    }

    /// The writer for this target, and whether it should get ANSI colours.
    ///
    /// An unopenable log file drops output instead of falling back to the
    /// terminal the menu is drawing on.
    fn writer(&self) -> (BoxMakeWriter, bool) {
        match self {
            Self::Stderr => (BoxMakeWriter::new(io::stderr), io::stderr().is_terminal()),
            Self::File(path) => match open_log(path) {
                Ok(file) => (BoxMakeWriter::new(Mutex::new(file)), false),
                Err(_) => (BoxMakeWriter::new(io::sink), false),
            },
        }
    }

    fn filter(&self, verbosity: Verbosity) -> EnvFilter {
        [LOG_ENV, EnvFilter::DEFAULT_ENV]
            .into_iter()
            .filter_map(|key| std::env::var(key).ok())
            .find_map(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::new(self.default_directives(verbosity)))
    }
}

/// Install the global subscriber. Call once, first thing in `main`.
pub fn init(verbosity: Verbosity, target: &LogTarget) {
    let (writer, ansi) = target.writer();
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .without_time()
        .compact();

    let _ = tracing_subscriber::registry()
        .with(target.filter(verbosity))
        .with(layer)
        .try_init();
}

fn open_log(path: &Path) -> io::Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
