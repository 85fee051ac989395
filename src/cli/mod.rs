//! The `cordify` command line interface

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, HistoryFormat};
pub use commands::run;
