//! Cart state manager.

use std::{
    fmt,
    future::Future,
    sync::{
        Arc,
        atomic::{AtomicU64, AtomicUsize, Ordering},
    },
};

use rusty_money::iso::Currency;
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

use storefront::{
    Cart, CartLineUuid, CartUuid, CheckoutOutcome, NewCartLine, NewCheckout, PaymentMethod,
    ProductUuid, Quantity, ShippingAddress,
};

use crate::{
    api::{CommerceApi, CommerceApiError},
    domain::carts::{errors::CartManagerError, view::CartView},
};

/// Holds the session's cart and routes every change through the commerce API.
///
/// Each mutation is followed by a full re-fetch. Mutations run one at a time
/// in arrival order; refreshes may overlap, and every fetch carries a ticket
/// so that a response older than the one already applied is dropped.
pub struct CartManager {
    api: Arc<dyn CommerceApi>,
    currency: &'static Currency,
    state: watch::Sender<CartView>,
    mutations: Mutex<()>,
    tickets: AtomicU64,
    generation: AtomicU64,
    in_flight: AtomicUsize,
}

impl CartManager {
    /// Create a manager with nothing loaded. `currency` prices the empty cart.
    #[must_use]
    pub fn new(api: Arc<dyn CommerceApi>, currency: &'static Currency) -> Self {
        let (state, _) = watch::channel(CartView::default());

        Self {
            api,
            currency,
            state,
            mutations: Mutex::new(()),
            tickets: AtomicU64::new(0),
            generation: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Current view of the cart.
    pub fn snapshot(&self) -> CartView {
        self.state.borrow().clone()
    }

    /// Receive a notification every time the view changes.
    pub fn subscribe(&self) -> watch::Receiver<CartView> {
        self.state.subscribe()
    }

    /// Currency used for the empty cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Return the held cart, fetching it on first access.
    ///
    /// # Errors
    ///
    /// Returns an error when a fetch is needed and fails.
    pub async fn load(&self) -> Result<Cart, CartManagerError> {
        let held = self.state.borrow().cart.clone();

        match held {
            Some(cart) => Ok(cart),
            None => self.refresh().await,
        }
    }

    /// Replace the held cart with the server's.
    ///
    /// A session without a server-side cart gets the empty cart. On failure
    /// the held cart is kept and the error recorded.
    ///
    /// # Errors
    ///
    /// Returns [`CartManagerError::Api`] when the fetch fails for any reason
    /// other than the cart not existing.
    #[tracing::instrument(name = "carts.manager.refresh", skip_all, err)]
    pub async fn refresh(&self) -> Result<Cart, CartManagerError> {
        let _busy = BusyGuard::enter(self);
        let generation = self.generation();

        Ok(self.fetch(generation).await?)
    }

    /// Add `quantity` units of `product`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API refuses the item or the cart cannot be reloaded.
    #[tracing::instrument(
        name = "carts.manager.add_item",
        skip_all,
        fields(product_uuid = %product, quantity = %quantity),
        err
    )]
    pub async fn add_item(
        &self,
        product: ProductUuid,
        quantity: Quantity,
    ) -> Result<(), CartManagerError> {
        self.mutate(|| {
            self.api.add_item(NewCartLine {
                product_uuid: product,
                quantity,
            })
        })
        .await?;

        info!(product_uuid = %product, "added item to cart");

        Ok(())
    }

    /// Set an existing line to `quantity` units.
    ///
    /// # Errors
    ///
    /// Returns an error if the API refuses the update or the cart cannot be reloaded.
    #[tracing::instrument(
        name = "carts.manager.update_item_quantity",
        skip_all,
        fields(line_uuid = %line, quantity = %quantity),
        err
    )]
    pub async fn update_item_quantity(
        &self,
        line: CartLineUuid,
        quantity: Quantity,
    ) -> Result<(), CartManagerError> {
        self.mutate(|| self.api.update_item(line, quantity)).await?;

        info!(line_uuid = %line, "updated cart line quantity");

        Ok(())
    }

    /// Set a line to `quantity` units, removing it when `quantity` is zero.
    ///
    /// # Errors
    ///
    /// See [`Self::update_item_quantity`] and [`Self::remove_item`].
    pub async fn set_item_quantity(
        &self,
        line: CartLineUuid,
        quantity: u32,
    ) -> Result<(), CartManagerError> {
        match Quantity::new(quantity).ok() {
            Some(quantity) => self.update_item_quantity(line, quantity).await,
            None => self.remove_item(line).await,
        }
    }

    /// Add one unit to a held line.
    ///
    /// # Errors
    ///
    /// Returns [`CartManagerError::UnknownLine`] if the line is not in the
    /// held cart, otherwise as [`Self::update_item_quantity`].
    pub async fn increment_item(&self, line: CartLineUuid) -> Result<(), CartManagerError> {
        let quantity = self.held_quantity(line)?.checked_add(1)?;

        self.update_item_quantity(line, quantity).await
    }

    /// Take one unit off a held line, removing the line at its last unit.
    ///
    /// # Errors
    ///
    /// Returns [`CartManagerError::UnknownLine`] if the line is not in the
    /// held cart, otherwise as the update or removal it turns into.
    pub async fn decrement_item(&self, line: CartLineUuid) -> Result<(), CartManagerError> {
        match self.held_quantity(line)?.decrement() {
            Some(quantity) => self.update_item_quantity(line, quantity).await,
            None => self.remove_item(line).await,
        }
    }

    /// Remove a line.
    ///
    /// # Errors
    ///
    /// Returns an error if the API refuses the removal or the cart cannot be reloaded.
    #[tracing::instrument(
        name = "carts.manager.remove_item",
        skip_all,
        fields(line_uuid = %line),
        err
    )]
    pub async fn remove_item(&self, line: CartLineUuid) -> Result<(), CartManagerError> {
        self.mutate(|| self.api.remove_item(line)).await?;

        info!(line_uuid = %line, "removed cart line");

        Ok(())
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API refuses the request or the cart cannot be reloaded.
    #[tracing::instrument(name = "carts.manager.clear", skip_all, err)]
    pub async fn clear(&self) -> Result<(), CartManagerError> {
        self.mutate(|| self.api.clear_cart()).await?;

        info!("cleared cart");

        Ok(())
    }

    /// Place an order for the held cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API refuses the checkout or the cart cannot be reloaded.
    #[tracing::instrument(
        name = "carts.manager.checkout",
        skip_all,
        fields(payment_method = %payment_method),
        err
    )]
    pub async fn checkout(
        &self,
        shipping_address: ShippingAddress,
        payment_method: PaymentMethod,
    ) -> Result<CheckoutOutcome, CartManagerError> {
        let outcome = self
            .mutate(|| {
                self.api.checkout(NewCheckout {
                    cart_uuid: self.cart_uuid(),
                    shipping_address,
                    payment_method,
                })
            })
            .await?;

        info!(order_uuid = ?outcome.order_uuid, "checked out cart");

        Ok(outcome)
    }

    /// Forget the held cart at the end of a session.
    ///
    /// Results of operations started before the reset are never applied.
    pub fn reset(&self) {
        self.state.send_modify(|view| {
            self.generation.fetch_add(1, Ordering::SeqCst);

            view.cart = None;
            view.last_error = None;
        });

        debug!("reset cart state");
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn cart_uuid(&self) -> Option<CartUuid> {
        self.state.borrow().cart.as_ref().and_then(Cart::uuid)
    }

    fn held_quantity(&self, line: CartLineUuid) -> Result<Quantity, CartManagerError> {
        self.state
            .borrow()
            .cart
            .as_ref()
            .and_then(|cart| cart.line(line))
            .map(|held| held.quantity)
            .ok_or(CartManagerError::UnknownLine(line))
    }

    async fn mutate<T, F, Fut>(&self, request: F) -> Result<T, CartManagerError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, CommerceApiError>>,
    {
        let _busy = BusyGuard::enter(self);
        let generation = self.generation();
        let _single_flight = self.mutations.lock().await;

        let value = match request().await {
            Ok(value) => value,
            Err(error) => {
                self.record_error(generation, None, &error);

                return Err(CartManagerError::Api(error));
            }
        };

        self.fetch(generation)
            .await
            .map_err(CartManagerError::RefreshAfterMutation)?;

        Ok(value)
    }

    async fn fetch(&self, generation: u64) -> Result<Cart, CommerceApiError> {
        let ticket = self.tickets.fetch_add(1, Ordering::SeqCst) + 1;

        let cart = match self.api.get_cart().await {
            Ok(cart) => cart,
            Err(error) if error.is_not_found() => {
                debug!("session has no cart, using empty cart");

                Cart::empty(self.currency)
            }
            Err(error) => {
                self.record_error(generation, Some(ticket), &error);

                return Err(error);
            }
        };

        Ok(self.apply(generation, ticket, cart))
    }

    fn apply(&self, generation: u64, ticket: u64, cart: Cart) -> Cart {
        let mut held = None;

        let applied = self.state.send_if_modified(|view| {
            if self.generation() != generation || ticket <= view.version {
                held.clone_from(&view.cart);

                return false;
            }

            view.cart = Some(cart.clone());
            view.version = ticket;

            true
        });

        if applied {
            debug!(version = ticket, lines = cart.len(), "applied cart");

            return cart;
        }

        debug!(ticket, "discarded stale cart");

        held.unwrap_or(cart)
    }

    fn record_error(&self, generation: u64, ticket: Option<u64>, error: &CommerceApiError) {
        let recorded = self.state.send_if_modified(|view| {
            if self.generation() != generation || ticket.is_some_and(|t| t <= view.version) {
                return false;
            }

            view.last_error = Some(error.to_string());

            true
        });

        if recorded {
            warn!("cart operation failed: {error}");
        }
    }
}

impl fmt::Debug for CartManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartManager")
            .field("currency", &self.currency.iso_alpha_code)
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

/// Marks the manager busy for as long as it lives.
struct BusyGuard<'a> {
    manager: &'a CartManager,
}

impl<'a> BusyGuard<'a> {
    fn enter(manager: &'a CartManager) -> Self {
        manager.state.send_modify(|view| {
            manager.in_flight.fetch_add(1, Ordering::SeqCst);

            view.busy = true;
            view.last_error = None;
        });

        Self { manager }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        let manager = self.manager;

        manager.state.send_modify(|view| {
            let remaining = manager.in_flight.fetch_sub(1, Ordering::SeqCst) - 1;

            view.busy = remaining > 0;
        });
    }
}
