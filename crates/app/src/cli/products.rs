use clap::{Args, Subcommand};
use storefront::ProductUuid;
use storefront_app::session::Session;

use super::describe;

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List the catalogue
    List,

    /// Show one product
    Get {
        /// Product UUID
        #[arg(long)]
        product: ProductUuid,
    },
}

#[expect(clippy::print_stdout, reason = "command output")]
pub(crate) async fn run(session: &Session, command: ProductsCommand) -> Result<(), String> {
    match command.command {
        ProductsSubcommand::List => {
            let products = session
                .api
                .list_products()
                .await
                .map_err(|error| format!("failed to list products: {}", describe(&error)))?;

            for product in products {
                let availability = if product.available { "" } else { " (unavailable)" };

                println!(
                    "{}\t{}\t{}\t{}{availability}",
                    product.uuid, product.name, product.category, product.price
                );
            }
        }
        ProductsSubcommand::Get { product } => {
            let product = session
                .api
                .get_product(product)
                .await
                .map_err(|error| format!("failed to fetch product: {}", describe(&error)))?;

            println!("product_uuid: {}", product.uuid);
            println!("name: {}", product.name);
            println!("category: {}", product.category);
            println!("price: {}", product.price);
            println!("available: {}", product.available);
        }
    }

    Ok(())
}
