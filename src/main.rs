#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

use std::{
    error::Error,
    io::{stderr, stdin, stdout},
    path::{Path, PathBuf},
};

use clap::Parser;
use kingfall::Side;
use log::LevelFilter;

use crate::repl::{Settings, repl};

mod board_display;
mod misc;
mod repl;

/// Two-player chess in the terminal. Capture the king to win.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Side shown at the bottom of the board
    #[arg(long, default_value = "white")]
    view: Side,
    /// Hide rank and file labels
    #[arg(long)]
    no_coordinates: bool,
    /// One of off, error, warn, info, debug, trace
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn setup_logger(level: LevelFilter, file: Option<&Path>) -> Result<(), fern::InitError> {
    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ));
        })
        .level(level);
    let dispatch = match file {
        Some(path) => dispatch.chain(fern::log_file(path)?),
        None => dispatch.chain(stderr()),
    };
    dispatch.apply()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    setup_logger(args.log_level, args.log_file.as_deref())?;
    repl(
        stdin().lock(),
        stdout().lock(),
        stderr().lock(),
        Settings {
            view: args.view,
            show_coordinates: !args.no_coordinates,
        },
    )?;
    Ok(())
}
