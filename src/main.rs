//! A.C.E relay binary entry point.

use std::process::ExitCode;

use ace_relay::cli::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    Cli::parse().run().await
}
