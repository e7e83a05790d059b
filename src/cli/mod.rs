//! CLI module - argument parsing for the terminal front-end

pub mod args;

pub use args::Cli;
