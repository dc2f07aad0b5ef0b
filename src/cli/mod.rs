//! CLI module for linkreap - command-line interface and subcommands.
//!
//! The bare command reconciles a source tree against a destination tree of links;
//! `sweep` and `relink` maintain the links themselves.

pub mod commands;

pub use commands::Cli;
