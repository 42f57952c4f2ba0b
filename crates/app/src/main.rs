//! Storefront CLI

use std::process;

use clap::Parser;
use storefront_app::{observability, session::Session};

mod cli;

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    if let Err(error) = observability::init_subscriber(&cli.config.logging) {
        eprintln!("failed to initialise logging: {error}");
        process::exit(1);
    }

    let session = match Session::start(&cli.config.api) {
        Ok(session) => session,
        Err(error) => {
            eprintln!("{}", cli::describe(&error));
            process::exit(1);
        }
    };

    let result = cli.run(&session).await;

    session.end();

    if let Err(error) = result {
        eprintln!("{error}");
        process::exit(1);
    }
}
