use clap::{Args, Subcommand};
use storefront::{Cart, CartLineUuid, PaymentMethod, ProductUuid, Quantity, ShippingAddress};
use storefront_app::session::Session;

use super::describe;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the current cart
    Show,

    /// Add a product to the cart
    Add {
        /// Product UUID
        #[arg(long)]
        product: ProductUuid,

        /// Units to add
        #[arg(long, default_value_t = Quantity::ONE)]
        quantity: Quantity,
    },

    /// Set a line's quantity; zero removes the line
    Update {
        /// Cart line UUID
        #[arg(long)]
        line: CartLineUuid,

        /// New quantity
        #[arg(long)]
        quantity: u32,
    },

    /// Add one unit to a line
    Increment {
        /// Cart line UUID
        #[arg(long)]
        line: CartLineUuid,
    },

    /// Take one unit off a line
    Decrement {
        /// Cart line UUID
        #[arg(long)]
        line: CartLineUuid,
    },

    /// Remove a line
    Remove {
        /// Cart line UUID
        #[arg(long)]
        line: CartLineUuid,
    },

    /// Empty the cart
    Clear,

    /// Place an order for the cart
    Checkout(CheckoutArgs),
}

#[derive(Debug, Args)]
struct CheckoutArgs {
    /// Recipient name
    #[arg(long)]
    name: String,

    /// First address line
    #[arg(long)]
    line1: String,

    /// Second address line
    #[arg(long)]
    line2: Option<String>,

    /// Town or city
    #[arg(long)]
    city: String,

    /// Postal code
    #[arg(long)]
    postcode: String,

    /// ISO 3166-1 alpha-2 country code
    #[arg(long)]
    country: String,

    /// Payment method (card, paypal, cash_on_delivery)
    #[arg(long, default_value_t = PaymentMethod::Card)]
    payment: PaymentMethod,
}

impl From<CheckoutArgs> for ShippingAddress {
    fn from(args: CheckoutArgs) -> Self {
        Self {
            name: args.name,
            line1: args.line1,
            line2: args.line2,
            city: args.city,
            postcode: args.postcode,
            country: args.country,
        }
    }
}

pub(crate) async fn run(session: &Session, command: CartCommand) -> Result<(), String> {
    let manager = &session.cart;

    // Line commands resolve against the held cart.
    manager
        .load()
        .await
        .map_err(|error| format!("failed to load cart: {}", describe(&error)))?;

    let result = match command.command {
        CartSubcommand::Show => Ok(()),
        CartSubcommand::Add { product, quantity } => manager.add_item(product, quantity).await,
        CartSubcommand::Update { line, quantity } => {
            manager.set_item_quantity(line, quantity).await
        }
        CartSubcommand::Increment { line } => manager.increment_item(line).await,
        CartSubcommand::Decrement { line } => manager.decrement_item(line).await,
        CartSubcommand::Remove { line } => manager.remove_item(line).await,
        CartSubcommand::Clear => manager.clear().await,
        CartSubcommand::Checkout(args) => {
            let payment_method = args.payment;

            let outcome = manager
                .checkout(args.into(), payment_method)
                .await
                .map_err(|error| format!("checkout failed: {}", describe(&error)))?;

            print_outcome(outcome.order_uuid.map(|uuid| uuid.to_string()), outcome.redirect_url);

            Ok(())
        }
    };

    result.map_err(|error| format!("cart operation failed: {}", describe(&error)))?;

    match manager.snapshot().cart {
        Some(cart) => print_cart(&cart),
        None => Err("no cart loaded".to_string()),
    }
}

#[expect(clippy::print_stdout, reason = "command output")]
fn print_cart(cart: &Cart) -> Result<(), String> {
    let total = cart
        .total_price()
        .map_err(|error| format!("failed to total cart: {error}"))?;

    if let Some(uuid) = cart.uuid() {
        println!("cart_uuid: {uuid}");
    }

    for line in cart.lines_sorted() {
        let line_total = line
            .line_total()
            .map_err(|error| format!("failed to total line {}: {error}", line.uuid))?;

        println!(
            "{}\t{}\t{} x {}\t{line_total}",
            line.uuid, line.product_uuid, line.quantity, line.unit_price
        );
    }

    println!("items: {}", cart.item_count());
    println!("total: {total}");

    Ok(())
}

#[expect(clippy::print_stdout, reason = "command output")]
fn print_outcome(order_uuid: Option<String>, redirect_url: Option<String>) {
    if let Some(order_uuid) = order_uuid {
        println!("order_uuid: {order_uuid}");
    }

    if let Some(redirect_url) = redirect_url {
        println!("redirect_url: {redirect_url}");
    }
}
