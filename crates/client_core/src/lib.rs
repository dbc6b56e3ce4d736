//! Client core for the restaurant order board: the REST client for the order
//! service, status triage, cart building, board polling, and settings.

use chrono::Utc;
use reqwest::{Client, StatusCode};
use shared::{
    domain::{BusinessId, Order, OrderDraft, OrderStatus, Product},
    error::{ApiError, ErrorCode},
};

pub mod cart;
pub mod config;
pub mod poll;
pub mod triage;

pub use cart::{CartBuilder, CartError};
pub use config::{load_settings, Settings};
pub use poll::{BoardEvent, BoardWatcher, BOARD_POLL_INTERVAL, KITCHEN_POLL_INTERVAL};
pub use triage::{alerts, triage, BoardView, Buckets};

/// Thin client for the external order service. One base URL, no retries, no
/// auth; every failure is mapped into [`ApiError`] at the call site.
#[derive(Clone)]
pub struct OrdersClient {
    http: Client,
    base_url: String,
}

impl OrdersClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_orders(&self, business: BusinessId) -> Result<Vec<Order>, ApiError> {
        let response = self
            .http
            .get(format!("{}/orders/{}", self.base_url, business.0))
            .send()
            .await
            .map_err(request_error)?;
        decode_json(response).await
    }

    pub async fn fetch_menu(&self, business: BusinessId) -> Result<Vec<Product>, ApiError> {
        let response = self
            .http
            .get(format!("{}/menu/{}", self.base_url, business.0))
            .send()
            .await
            .map_err(request_error)?;
        decode_json(response).await
    }

    pub async fn create_order(
        &self,
        business: BusinessId,
        draft: &OrderDraft,
    ) -> Result<(), ApiError> {
        let response = self
            .http
            .post(format!("{}/orders/{}", self.base_url, business.0))
            .json(draft)
            .send()
            .await
            .map_err(request_error)?;
        check_status(response)
    }

    /// Full-object upsert; the order service has no field-level update route,
    /// so every mutation ships the whole order with one field changed.
    pub async fn upsert_order(&self, business: BusinessId, order: &Order) -> Result<(), ApiError> {
        let response = self
            .http
            .post(format!("{}/orders/{}", self.base_url, business.0))
            .json(order)
            .send()
            .await
            .map_err(request_error)?;
        check_status(response)
    }

    /// Move an order to another kitchen stage. Callers re-fetch the list
    /// afterwards; there is no optimistic update and last write wins.
    pub async fn set_status(
        &self,
        business: BusinessId,
        order: &Order,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        let mut updated = order.clone();
        updated.post_checkout_status = Some(status);
        self.upsert_order(business, &updated).await?;
        Ok(updated)
    }

    /// Stamp `canceled_at` and upsert. Canceled orders are never deleted
    /// client-side.
    pub async fn cancel_order(
        &self,
        business: BusinessId,
        order: &Order,
    ) -> Result<Order, ApiError> {
        let mut updated = order.clone();
        updated.canceled_at = Some(Utc::now());
        self.upsert_order(business, &updated).await?;
        Ok(updated)
    }

    /// Stamp `finished_at` and upsert; clears the order from the alert list.
    pub async fn finish_order(
        &self,
        business: BusinessId,
        order: &Order,
    ) -> Result<Order, ApiError> {
        let mut updated = order.clone();
        updated.finished_at = Some(Utc::now());
        self.upsert_order(business, &updated).await?;
        Ok(updated)
    }
}

fn request_error(err: reqwest::Error) -> ApiError {
    ApiError::network(err.to_string())
}

fn status_error(status: StatusCode) -> ApiError {
    let code = if status == StatusCode::NOT_FOUND {
        ErrorCode::NotFound
    } else if status.is_client_error() {
        ErrorCode::Validation
    } else {
        ErrorCode::Internal
    };
    ApiError::new(code, format!("order service returned {status}"))
}

fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(status_error(status))
    }
}

async fn decode_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(status_error(status));
    }
    response.json().await.map_err(|err| {
        ApiError::new(
            ErrorCode::Internal,
            format!("invalid order service payload: {err}"),
        )
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
