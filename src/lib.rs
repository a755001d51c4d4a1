pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod format;
pub mod git;
pub mod process;

use std::{path::PathBuf, time::Duration};

pub use context::Context;
pub use error::Error;
pub use git::{
    Collector, FormatVersion,
    status::{OperationState, Porcelain, Snapshot},
};
pub use process::{GitCli, Runner};

pub const APP_NAME: &str = "gitstatus";

pub type Res<T> = Result<T, Error>;

/// Collects one snapshot of the working tree named by `args` and renders it.
pub fn run(args: &cli::Args) -> Res<String> {
    log::debug!("Initializing config");
    let config = config::init_config(args.config.clone())?;

    let dir = args.dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let version = args.porcelain.unwrap_or(config.general.porcelain);
    let ctx = match args.timeout.unwrap_or(config.general.timeout_ms) {
        0 => Context::background(),
        ms => Context::with_timeout(Duration::from_millis(ms)),
    };

    log::debug!("Collecting status of {:?} with {:?} porcelain", dir, version);
    let collector = Collector::new(GitCli::with_program(&config.general.git, dir), version);
    let snapshot = collector.collect(&ctx)?;

    args.format.formatter(&config).format(&snapshot)
}
