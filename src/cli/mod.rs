//! Command-line interface module.

mod args;
pub mod build;
pub mod check;
pub mod common;
pub mod list;

pub use args::{BuildArgs, CheckArgs, Cli, Commands, ListArgs};
