// src/main.rs
use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use losscheckr::cli::{self, Args};

fn main() -> Result<()> {
    // Logs go to stderr so JSON on stdout stays clean
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    cli::run(args)?;
    Ok(())
}
