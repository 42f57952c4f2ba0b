//! HTTP client for the commerce API.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use storefront::{
    Cart, CartLineUuid, CheckoutOutcome, NewCartLine, NewCheckout, Product, ProductUuid, Quantity,
};

use crate::api::{
    CommerceApi, CommerceApiError, RequestSigner,
    requests::{AddItemRequest, CheckoutRequest, UpdateItemRequest},
    responses::{CartResponse, CheckoutResponse, ProductResponse},
};

/// Configuration for connecting to the commerce API.
#[derive(Debug, Clone)]
pub struct HttpCommerceApiConfig {
    /// Base address, e.g. `"https://shop.example.com/api"`.
    pub base_url: String,

    /// Per-request timeout. `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

/// [`CommerceApi`] over HTTP and JSON.
#[derive(Debug, Clone)]
pub struct HttpCommerceApi {
    base_url: String,
    http: Client,
    signer: Arc<dyn RequestSigner>,
}

impl HttpCommerceApi {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        config: HttpCommerceApiConfig,
        signer: Arc<dyn RequestSigner>,
    ) -> Result<Self, CommerceApiError> {
        let mut builder = Client::builder();

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http: builder.build()?,
            signer,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, CommerceApiError> {
        let response = self.signer.sign(request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(CommerceApiError::from_status(status, text));
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, CommerceApiError> {
        let bytes = response.bytes().await?;

        serde_json::from_slice(&bytes)
            .map_err(|error| CommerceApiError::InvalidResponse(error.to_string()))
    }
}

#[async_trait]
impl CommerceApi for HttpCommerceApi {
    #[tracing::instrument(name = "commerce_api.get_cart", skip(self), err)]
    async fn get_cart(&self) -> Result<Cart, CommerceApiError> {
        let response = self.send(self.http.get(self.url("cart"))).await?;

        Self::decode::<CartResponse>(response).await?.try_into()
    }

    #[tracing::instrument(
        name = "commerce_api.add_item",
        skip_all,
        fields(product_uuid = %line.product_uuid, quantity = %line.quantity),
        err
    )]
    async fn add_item(&self, line: NewCartLine) -> Result<(), CommerceApiError> {
        self.send(
            self.http
                .post(self.url("cart/add"))
                .json(&AddItemRequest::from(line)),
        )
        .await?;

        Ok(())
    }

    #[tracing::instrument(
        name = "commerce_api.update_item",
        skip_all,
        fields(line_uuid = %line, quantity = %quantity),
        err
    )]
    async fn update_item(
        &self,
        line: CartLineUuid,
        quantity: Quantity,
    ) -> Result<(), CommerceApiError> {
        self.send(
            self.http
                .put(self.url(&format!("cart/item/{line}")))
                .json(&UpdateItemRequest { quantity }),
        )
        .await?;

        Ok(())
    }

    #[tracing::instrument(
        name = "commerce_api.remove_item",
        skip_all,
        fields(line_uuid = %line),
        err
    )]
    async fn remove_item(&self, line: CartLineUuid) -> Result<(), CommerceApiError> {
        self.send(self.http.delete(self.url(&format!("cart/item/{line}"))))
            .await?;

        Ok(())
    }

    #[tracing::instrument(name = "commerce_api.clear_cart", skip(self), err)]
    async fn clear_cart(&self) -> Result<(), CommerceApiError> {
        self.send(self.http.delete(self.url("cart"))).await?;

        Ok(())
    }

    #[tracing::instrument(
        name = "commerce_api.checkout",
        skip(self, checkout),
        fields(payment_method = %checkout.payment_method),
        err
    )]
    async fn checkout(&self, checkout: NewCheckout) -> Result<CheckoutOutcome, CommerceApiError> {
        let response = self
            .send(
                self.http
                    .post(self.url("cart/checkout"))
                    .json(&CheckoutRequest::from(checkout)),
            )
            .await?;

        let text = response.text().await?;

        if text.trim().is_empty() {
            return Ok(CheckoutOutcome::default());
        }

        serde_json::from_str::<CheckoutResponse>(&text)
            .map(CheckoutOutcome::from)
            .map_err(|error| CommerceApiError::InvalidResponse(error.to_string()))
    }

    #[tracing::instrument(name = "commerce_api.list_products", skip(self), err)]
    async fn list_products(&self) -> Result<Vec<Product>, CommerceApiError> {
        let response = self.send(self.http.get(self.url("products"))).await?;

        Self::decode::<Vec<ProductResponse>>(response)
            .await?
            .into_iter()
            .map(Product::try_from)
            .collect()
    }

    #[tracing::instrument(
        name = "commerce_api.get_product",
        skip_all,
        fields(product_uuid = %uuid),
        err
    )]
    async fn get_product(&self, uuid: ProductUuid) -> Result<Product, CommerceApiError> {
        let response = self
            .send(self.http.get(self.url(&format!("products/{uuid}"))))
            .await?;

        Self::decode::<ProductResponse>(response).await?.try_into()
    }
}
