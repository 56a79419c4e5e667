#![forbid(unsafe_code)]

//! bitsum binary entry point.

use std::io;
use std::process;

use bitsum::{Dump, RangeTable};
use bitsum_cli::cli::{self, Action, Opts};
use bitsum_cli::Session;
use tracing_subscriber::EnvFilter;

fn init_tracing(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() {
    let opts = match Opts::parse() {
        Ok(Action::Run(opts)) => opts,
        Ok(Action::Help) => {
            println!("{}", cli::HELP_TEXT);
            return;
        }
        Ok(Action::Version) => {
            println!("bitsum {}", cli::VERSION);
            return;
        }
        Err(e) => {
            eprintln!("{e}");
            eprintln!("Run with --help for usage information.");
            process::exit(2);
        }
    };

    init_tracing(&opts.log);

    let tree = match opts.initial_tree() {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    if opts.dump {
        match &tree {
            Some(tree) => {
                print!("{}{}", Dump::new(tree), RangeTable::new(tree));
                return;
            }
            None => {
                eprintln!("error: --dump needs --capacity or --values");
                process::exit(2);
            }
        }
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = match tree {
        Some(tree) => Session::with_tree(tree, stdin.lock(), stdout.lock()).run(),
        None => Session::new(stdin.lock(), stdout.lock()).run(),
    };
    if let Err(e) = result {
        eprintln!("I/O error: {e}");
        process::exit(1);
    }
}
