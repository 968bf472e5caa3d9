//! Library half of the `kubeschema` binary: config loading and command output.

pub mod config;
pub mod output;
