#![deny(unused_crate_dependencies)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod canteen;
mod config;
mod console;
mod error;
mod fetch;
mod monitor;
mod parse;
mod selection;
mod session;

use std::process::ExitCode;

use config::Config;

pub use error::{Error, Result};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    pretty_env_logger::init();
    // tokens are checked before anything touches the network
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {e}");
            eprintln!("Put your tokens into the token file (see tokeny.example.txt).");
            return ExitCode::FAILURE;
        }
    };
    log::debug!("{config:?}");

    match session::run(&config).await {
        Ok(end) => {
            log::info!("Session finished: {end:?}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("\n{}\nERROR: {e}\n{}", "=".repeat(50), "=".repeat(50));
            ExitCode::FAILURE
        }
    }
}
