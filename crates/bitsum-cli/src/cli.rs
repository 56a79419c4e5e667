#![forbid(unsafe_code)]

//! Command-line argument parsing for the bitsum binary.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via `BITSUM_*` prefix.

use std::env;
use std::fmt;

use bitsum::{FenwickTree, Result as TreeResult};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
bitsum: interactive Fenwick tree (Binary Indexed Tree)

USAGE:
    bitsum [OPTIONS]

OPTIONS:
    --capacity=N      Number of elements (skips the prompt)
    --values=A,B,C    Initial values for indices 1, 2, 3, ...
    --dump            Print the tree and every range sum, then exit
    --log=FILTER      Log filter directive (default: warn)
    --help, -h        Show this help message
    --version, -V     Show version

COMMANDS (interactive):
    1  Add a number at an index
    2  Query sum up to an index
    3  Quit
    4  Dump tree

ENVIRONMENT VARIABLES:
    BITSUM_CAPACITY   Override --capacity
    BITSUM_VALUES     Override --values
    BITSUM_LOG        Override --log";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Tree capacity; `None` means ask on stdin.
    pub capacity: Option<i64>,
    /// Values pre-loaded at indices `1..`.
    pub values: Option<Vec<i64>>,
    /// Dump and exit instead of running the command loop.
    pub dump: bool,
    /// `EnvFilter` directive for log output.
    pub log: String,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            capacity: None,
            values: None,
            dump: false,
            log: "warn".into(),
        }
    }
}

/// What the process should do after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Run(Opts),
    Help,
    Version,
}

/// Argument parsing failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    InvalidValue { flag: &'static str, value: String },
    UnknownArgument(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { flag, value } => write!(f, "invalid {flag} value: {value}"),
            Self::UnknownArgument(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl Opts {
    /// Parse the process arguments and environment.
    pub fn parse() -> Result<Action, CliError> {
        Self::parse_from(env::args().skip(1), |key| env::var(key).ok())
    }

    /// Parse `args` (without the program name) using `get_env` for overrides.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags.
    pub fn parse_from<I, F>(args: I, get_env: F) -> Result<Action, CliError>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Apply environment variable defaults first
        if let Some(val) = get_env("BITSUM_CAPACITY") {
            opts.capacity = Some(parse_int("BITSUM_CAPACITY", &val)?);
        }
        if let Some(val) = get_env("BITSUM_VALUES") {
            opts.values = Some(parse_list("BITSUM_VALUES", &val)?);
        }
        if let Some(val) = get_env("BITSUM_LOG") {
            opts.log = val;
        }

        // Parse command-line args (override env vars)
        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Action::Help),
                "--version" | "-V" => return Ok(Action::Version),
                "--dump" => opts.dump = true,
                other => {
                    if let Some(val) = other.strip_prefix("--capacity=") {
                        opts.capacity = Some(parse_int("--capacity", val)?);
                    } else if let Some(val) = other.strip_prefix("--values=") {
                        opts.values = Some(parse_list("--values", val)?);
                    } else if let Some(val) = other.strip_prefix("--log=") {
                        opts.log = val.to_string();
                    } else {
                        return Err(CliError::UnknownArgument(other.to_string()));
                    }
                }
            }
        }

        Ok(Action::Run(opts))
    }

    /// Build the starting tree, if the options determine one.
    ///
    /// `--values` without `--capacity` sizes the tree to the value count.
    /// Returns `Ok(None)` when the capacity is still unknown.
    pub fn initial_tree(&self) -> TreeResult<Option<FenwickTree>> {
        let capacity = match (self.capacity, &self.values) {
            (Some(capacity), _) => capacity,
            (None, Some(values)) => values.len() as i64,
            (None, None) => return Ok(None),
        };
        let mut tree = FenwickTree::new(capacity)?;
        if let Some(values) = &self.values {
            let mut padded = Vec::with_capacity(values.len() + 1);
            padded.push(0);
            padded.extend_from_slice(values);
            tree.build(&padded)?;
        }
        Ok(Some(tree))
    }
}

fn parse_int(flag: &'static str, val: &str) -> Result<i64, CliError> {
    val.trim().parse().map_err(|_| CliError::InvalidValue {
        flag,
        value: val.to_string(),
    })
}

fn parse_list(flag: &'static str, val: &str) -> Result<Vec<i64>, CliError> {
    val.split(',')
        .filter(|item| !item.trim().is_empty())
        .map(|item| parse_int(flag, item))
        .collect()
}
