#![forbid(unsafe_code)]

//! Interactive front end for the bitsum Fenwick tree.

pub mod cli;
pub mod session;

pub use cli::{Action, CliError, Opts};
pub use session::Session;
