// BPTracker-cli lib.rs
//
// Command-line front end for BPTracker. The binary in src/bin parses
// arguments, opens the configured store and hands off to `commands::run`.

// Public modules
pub mod cli;
pub mod commands;
pub mod render;

pub use cli::{Cli, Command};
pub use commands::{run, CliError, Outcome};
