//! Storefront API client
//!
//! Fetches the three collections a report is built from. A snapshot is only
//! produced when all three succeed.

use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use crate::domain::{Customer, Order, Product};
use crate::{Config, ReportError, Result, Snapshot};

pub const ORDERS_ENDPOINT: &str = "/api/order/list";
pub const CUSTOMERS_ENDPOINT: &str = "/api/user/list-all";
pub const PRODUCTS_ENDPOINT: &str = "/api/product/list";

const SESSION_COOKIE: &str = "user_session";

/// `{ success, message, data }` wrapper used by the order and user APIs.
#[derive(Deserialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    data: Option<T>,
}

#[derive(Deserialize)]
struct OrderList { orders: Vec<Order> }

#[derive(Deserialize)]
struct UserList { users: Vec<Customer> }

/// The product API puts its payload at the top level.
#[derive(Deserialize)]
struct ProductListResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    products: Option<Vec<Product>>,
}

#[async_trait]
pub trait StorefrontClient: Send + Sync {
    async fn fetch_orders(&self) -> Result<Vec<Order>>;
    async fn fetch_customers(&self) -> Result<Vec<Customer>>;
    async fn fetch_products(&self) -> Result<Vec<Product>>;

    /// Fetches all three collections concurrently; any failure fails the
    /// whole snapshot.
    async fn fetch_snapshot(&self) -> Result<Snapshot> {
        let (orders, customers, products) =
            tokio::try_join!(self.fetch_orders(), self.fetch_customers(), self.fetch_products())?;
        Ok(Snapshot::new(orders, customers, products))
    }
}

#[derive(Debug, Clone)]
pub struct HttpStorefrontClient {
    client: Client,
    base_url: String,
    session: Option<String>,
}

impl HttpStorefrontClient {
    pub fn new(base_url: &str, session: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string(), session })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_base_url, config.session.clone(), config.fetch_timeout)
    }

    pub fn base_url(&self) -> &str { &self.base_url }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self.client.request(method, format!("{}{}", self.base_url, path));
        match &self.session {
            Some(session) => req.header(header::COOKIE, format!("{}={}", SESSION_COOKIE, session)),
            None => req,
        }
    }

    async fn send<T: DeserializeOwned>(&self, endpoint: &'static str, req: RequestBuilder) -> Result<T> {
        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(endpoint, status = status.as_u16(), body = %body, "storefront request failed");
            return Err(ReportError::UpstreamStatus { endpoint, status: status.as_u16() });
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ReportError::InvalidResponse { endpoint, reason: e.to_string() })
    }
}

fn payload<T>(endpoint: &'static str, success: bool, message: Option<String>, payload: Option<T>) -> Result<T> {
    if !success {
        return Err(ReportError::UpstreamRejected {
            endpoint,
            message: message.unwrap_or_else(|| "no message".to_string()),
        });
    }
    payload.ok_or_else(|| ReportError::InvalidResponse { endpoint, reason: "missing payload".to_string() })
}

#[async_trait]
impl StorefrontClient for HttpStorefrontClient {
    async fn fetch_orders(&self) -> Result<Vec<Order>> {
        let resp: ApiResponse<OrderList> = self.send(ORDERS_ENDPOINT, self.request(Method::POST, ORDERS_ENDPOINT)).await?;
        let list = payload(ORDERS_ENDPOINT, resp.success, resp.message, resp.data)?;
        tracing::debug!(count = list.orders.len(), "fetched orders");
        Ok(list.orders)
    }

    async fn fetch_customers(&self) -> Result<Vec<Customer>> {
        let resp: ApiResponse<UserList> = self.send(CUSTOMERS_ENDPOINT, self.request(Method::GET, CUSTOMERS_ENDPOINT)).await?;
        let list = payload(CUSTOMERS_ENDPOINT, resp.success, resp.message, resp.data)?;
        tracing::debug!(count = list.users.len(), "fetched customers");
        Ok(list.users)
    }

    async fn fetch_products(&self) -> Result<Vec<Product>> {
        let resp: ProductListResponse = self.send(PRODUCTS_ENDPOINT, self.request(Method::GET, PRODUCTS_ENDPOINT)).await?;
        let products = payload(PRODUCTS_ENDPOINT, resp.success, resp.message, resp.products)?;
        tracing::debug!(count = products.len(), "fetched products");
        Ok(products)
    }
}
