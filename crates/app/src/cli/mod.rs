use std::error::Error;

use clap::{Parser, Subcommand};
use storefront_app::{config::ClientConfig, session::Session};

mod cart;
mod products;

#[derive(Debug, Parser)]
#[command(name = "storefront-cli", about = "Storefront cart client", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: ClientConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Cart(cart::CartCommand),
    Products(products::ProductsCommand),
}

impl Cli {
    pub(crate) async fn run(self, session: &Session) -> Result<(), String> {
        match self.command {
            Commands::Cart(command) => cart::run(session, command).await,
            Commands::Products(command) => products::run(session, command).await,
        }
    }
}

/// Render an error with its source chain, outermost first.
pub(crate) fn describe(error: &dyn Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}
