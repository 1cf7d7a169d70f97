//! Command-line argument parsing, following `y-lang`'s `src/bin/why/cli.rs` split.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Struct containing the CLI configuration for MiniPyLang.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Source file to execute. Starts the REPL when omitted.
    #[arg(index = 1)]
    pub file: Option<PathBuf>,

    /// Dump the parsed AST before executing.
    #[arg(long)]
    pub tree: bool,

    /// Specify the log level.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    pub verbosity: LogLevel,
}

impl Cli {
    pub fn init() -> Self {
        Cli::parse()
    }
}

/// Enum for specifying the log level of MiniPyLang.
#[derive(ValueEnum, Clone, Default, Debug)]
pub enum LogLevel {
    /// The default log level. Only critical errors will be logged.
    #[default]
    #[value(alias("0"))]
    Error,

    /// Also logs warnings.
    #[value(alias("1"))]
    Warn,

    /// Also logs general progress information, e.g. which file is running.
    #[value(alias("2"))]
    Info,

    /// Logs everything that happens internally in the interpreter.
    #[value(alias("3"))]
    Debug,

    /// Logs extra information, including the parsed AST dump.
    #[value(alias("4"))]
    Trace,
}

impl From<&LogLevel> for log::Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}
