//! CLI layer: argument parsing and command dispatch

pub mod args;
pub mod commands;
