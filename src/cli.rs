use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::{
    config::Config,
    format::{Formatter, Json, Tmux},
    git::FormatVersion,
};

#[derive(Default, Debug, Parser)]
#[command(name = crate::APP_NAME)]
#[command(about = "Print the status of a git working tree")]
pub struct Args {
    /// Working tree to inspect, defaults to the current directory
    pub dir: Option<PathBuf>,
    /// Output format
    #[clap(long = "fmt", value_enum, default_value_t)]
    pub format: OutputFormat,
    /// Porcelain format to query git with, overrides the config file
    #[clap(long, value_enum)]
    pub porcelain: Option<FormatVersion>,
    /// Give up after this many milliseconds, 0 waits forever
    #[clap(long, value_name = "MS")]
    pub timeout: Option<u64>,
    /// Config file to use instead of the one in the config directory
    #[clap(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Don't print errors, only exit with a non-zero status
    #[clap(short, long, action)]
    pub quiet: bool,
    /// Enable logging to 'gitstatus.log'
    #[clap(long, action)]
    pub log: bool,

    #[clap(long, action)]
    /// Print version
    pub version: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Tmux,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Tmux => f.write_str("tmux"),
        }
    }
}

impl OutputFormat {
    pub fn formatter<'a>(&self, config: &'a Config) -> Box<dyn Formatter + 'a> {
        match self {
            OutputFormat::Json => Box::new(Json),
            OutputFormat::Tmux => Box::new(Tmux::new(&config.tmux)),
        }
    }
}
