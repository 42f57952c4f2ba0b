//! In-memory commerce backend for exercising the cart manager end to end.

use std::collections::VecDeque;

use async_trait::async_trait;
use rusty_money::{Money, iso::Currency};
use tokio::sync::{Mutex, oneshot};

use storefront::{
    Cart, CartLine, CartLineUuid, CartUuid, CheckoutOutcome, NewCartLine, NewCheckout, OrderUuid,
    Product, ProductUuid, Quantity,
};
use storefront_app::api::{CommerceApi, CommerceApiError};

/// Endpoints a failure can be queued against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetCart,
    AddItem,
    UpdateItem,
    RemoveItem,
    ClearCart,
    Checkout,
}

/// A request as received by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    GetCart,
    AddItem(ProductUuid, Quantity),
    UpdateItem(CartLineUuid, Quantity),
    RemoveItem(CartLineUuid),
    ClearCart,
    Checkout(Option<CartUuid>),
    ListProducts,
    GetProduct(ProductUuid),
}

/// A cart fetch parked until released.
#[derive(Debug)]
pub struct HeldFetch {
    started: oneshot::Receiver<()>,
    release: oneshot::Sender<()>,
}

impl HeldFetch {
    /// Wait until the backend has read the cart and parked.
    pub async fn started(&mut self) -> Result<(), oneshot::error::RecvError> {
        (&mut self.started).await
    }

    /// Let the parked fetch answer.
    pub fn release(self) {
        drop(self.release);
    }
}

#[derive(Debug)]
struct Parked {
    started: oneshot::Sender<()>,
    release: oneshot::Receiver<()>,
}

#[derive(Debug, Default)]
struct Server {
    cart: Option<CartUuid>,
    lines: Vec<CartLine>,
    catalog: Vec<Product>,
}

impl Server {
    fn cart(&self, currency: &'static Currency) -> Result<Cart, CommerceApiError> {
        let uuid = self.cart.ok_or(CommerceApiError::NotFound)?;

        Cart::with_lines(uuid, self.lines.iter().cloned(), currency)
            .map_err(|error| CommerceApiError::InvalidResponse(error.to_string()))
    }

    fn line_mut(&mut self, uuid: CartLineUuid) -> Result<&mut CartLine, CommerceApiError> {
        self.lines
            .iter_mut()
            .find(|line| line.uuid == uuid)
            .ok_or(CommerceApiError::NotFound)
    }
}

/// Commerce backend holding one session's cart in memory.
#[derive(Debug)]
pub struct FakeCommerceApi {
    currency: &'static Currency,
    server: Mutex<Server>,
    failures: Mutex<Vec<(Operation, CommerceApiError)>>,
    parked: Mutex<VecDeque<Parked>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeCommerceApi {
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            currency,
            server: Mutex::new(Server::default()),
            failures: Mutex::new(Vec::new()),
            parked: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Put a product on sale at `price` minor units.
    pub fn stock(&mut self, name: &str, price: i64) -> ProductUuid {
        let uuid = ProductUuid::now_v7();

        self.server.get_mut().catalog.push(Product {
            uuid,
            name: name.to_string(),
            price: Money::from_minor(price, self.currency),
            category: "general".to_string(),
            available: true,
        });

        uuid
    }

    /// Fail the next request to `operation` with `error`.
    pub async fn fail_next(&self, operation: Operation, error: CommerceApiError) {
        self.failures.lock().await.push((operation, error));
    }

    /// Park the next cart fetch after it has read the cart.
    pub async fn hold_next_fetch(&self) -> HeldFetch {
        let (started_tx, started_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();

        self.parked.lock().await.push_back(Parked {
            started: started_tx,
            release: release_rx,
        });

        HeldFetch {
            started: started_rx,
            release: release_tx,
        }
    }

    /// Requests received so far, in arrival order.
    pub async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }

    /// The cart as the backend currently holds it.
    pub async fn server_cart(&self) -> Result<Cart, CommerceApiError> {
        self.server.lock().await.cart(self.currency)
    }

    async fn receive(&self, call: Call, operation: Operation) -> Result<(), CommerceApiError> {
        self.calls.lock().await.push(call);

        let mut failures = self.failures.lock().await;

        match failures.iter().position(|(queued, _)| *queued == operation) {
            Some(index) => Err(failures.remove(index).1),
            None => Ok(()),
        }
    }
}

fn rejected(status: u16, message: &str) -> CommerceApiError {
    CommerceApiError::Rejected {
        status,
        message: message.to_string(),
    }
}

#[async_trait]
impl CommerceApi for FakeCommerceApi {
    async fn get_cart(&self) -> Result<Cart, CommerceApiError> {
        let result = match self.receive(Call::GetCart, Operation::GetCart).await {
            Ok(()) => self.server.lock().await.cart(self.currency),
            Err(error) => Err(error),
        };

        let parked = self.parked.lock().await.pop_front();

        if let Some(parked) = parked {
            let _started = parked.started.send(());
            let _released = parked.release.await;
        }

        result
    }

    async fn add_item(&self, line: NewCartLine) -> Result<(), CommerceApiError> {
        self.receive(
            Call::AddItem(line.product_uuid, line.quantity),
            Operation::AddItem,
        )
        .await?;

        let mut server = self.server.lock().await;

        let product = server
            .catalog
            .iter()
            .find(|product| product.uuid == line.product_uuid)
            .cloned()
            .ok_or_else(|| rejected(422, "unknown product"))?;

        if !product.available {
            return Err(rejected(409, "product unavailable"));
        }

        if server.cart.is_none() {
            server.cart = Some(CartUuid::now_v7());
        }

        match server
            .lines
            .iter_mut()
            .find(|held| held.product_uuid == line.product_uuid)
        {
            Some(held) => {
                held.quantity = held
                    .quantity
                    .checked_add(line.quantity.get())
                    .map_err(|error| rejected(422, &error.to_string()))?;
            }
            None => server.lines.push(CartLine {
                uuid: CartLineUuid::now_v7(),
                product_uuid: product.uuid,
                quantity: line.quantity,
                unit_price: product.price,
            }),
        }

        Ok(())
    }

    async fn update_item(
        &self,
        line: CartLineUuid,
        quantity: Quantity,
    ) -> Result<(), CommerceApiError> {
        self.receive(Call::UpdateItem(line, quantity), Operation::UpdateItem)
            .await?;

        self.server.lock().await.line_mut(line)?.quantity = quantity;

        Ok(())
    }

    async fn remove_item(&self, line: CartLineUuid) -> Result<(), CommerceApiError> {
        self.receive(Call::RemoveItem(line), Operation::RemoveItem)
            .await?;

        let mut server = self.server.lock().await;
        let before = server.lines.len();

        server.lines.retain(|held| held.uuid != line);

        if server.lines.len() == before {
            return Err(CommerceApiError::NotFound);
        }

        Ok(())
    }

    async fn clear_cart(&self) -> Result<(), CommerceApiError> {
        self.receive(Call::ClearCart, Operation::ClearCart).await?;

        let mut server = self.server.lock().await;

        server.cart = None;
        server.lines.clear();

        Ok(())
    }

    async fn checkout(&self, checkout: NewCheckout) -> Result<CheckoutOutcome, CommerceApiError> {
        self.receive(Call::Checkout(checkout.cart_uuid), Operation::Checkout)
            .await?;

        let mut server = self.server.lock().await;

        if server.cart.is_none() || server.lines.is_empty() {
            return Err(rejected(422, "cart is empty"));
        }

        if checkout.cart_uuid != server.cart {
            return Err(rejected(409, "cart has changed"));
        }

        server.cart = None;
        server.lines.clear();

        Ok(CheckoutOutcome {
            order_uuid: Some(OrderUuid::now_v7()),
            redirect_url: None,
        })
    }

    async fn list_products(&self) -> Result<Vec<Product>, CommerceApiError> {
        self.calls.lock().await.push(Call::ListProducts);

        Ok(self.server.lock().await.catalog.clone())
    }

    async fn get_product(&self, uuid: ProductUuid) -> Result<Product, CommerceApiError> {
        self.calls.lock().await.push(Call::GetProduct(uuid));

        self.server
            .lock()
            .await
            .catalog
            .iter()
            .find(|product| product.uuid == uuid)
            .cloned()
            .ok_or(CommerceApiError::NotFound)
    }
}
