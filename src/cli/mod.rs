// CLI module for id3v1tag
//
// Thin front end over the library: argument parsing, log setup and output
// formatting. Compiled into the binary only.

pub mod commands;
pub mod config;
pub mod logger;
pub mod output;

pub use config::{Commands, Config};
pub use logger::SimpleLogger;
pub use output::OutputFormatter;
