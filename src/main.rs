use clap::Parser;
use gitstatus::{Res, cli::Args, error::Error};
use log::LevelFilter;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    if args.version {
        println!("gitstatus {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    match init_and_run(&args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            // Status bars only capture stdout
            if !args.quiet {
                println!("error: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_and_run(args: &Args) -> Res<String> {
    if args.log {
        simple_logging::log_to_file("gitstatus.log", LevelFilter::Debug)
            .map_err(Error::OpenLogFile)?;
    }

    gitstatus::run(args)
}
