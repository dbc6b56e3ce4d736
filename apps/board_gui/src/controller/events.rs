//! UI/backend events and error modeling for the board shell.

use shared::{
    domain::{Order, Product},
    error::{ApiError, ErrorCode},
};

pub enum UiEvent {
    /// Fresh order list, either from an explicit fetch or a poll tick.
    OrdersLoaded(Vec<Order>),
    MenuLoaded(Vec<Product>),
    OrderCreated,
    OrderUpdated,
    Info(String),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Network,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    FetchOrders,
    FetchMenu,
    CreateOrder,
    MoveOrder,
    CancelOrder,
    FinishAlert,
}

impl UiErrorContext {
    fn headline(self) -> &'static str {
        match self {
            UiErrorContext::BackendStartup => "Backend worker failed to start",
            UiErrorContext::FetchOrders => "Could not load orders",
            UiErrorContext::FetchMenu => "Could not load the menu",
            UiErrorContext::CreateOrder => "Could not create the order",
            UiErrorContext::MoveOrder => "Could not update the order status",
            UiErrorContext::CancelOrder => "Could not cancel the order",
            UiErrorContext::FinishAlert => "Could not finish the alert",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_api(context: UiErrorContext, err: &ApiError) -> Self {
        let category = match err.code {
            ErrorCode::Network => UiErrorCategory::Network,
            ErrorCode::Validation | ErrorCode::NotFound => UiErrorCategory::Validation,
            ErrorCode::Internal => UiErrorCategory::Unknown,
        };
        Self {
            category,
            context,
            message: err.message.clone(),
        }
    }

    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("timed out")
            || message_lower.contains("dns")
            || message_lower.contains("unreachable")
        {
            UiErrorCategory::Network
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("empty")
            || message_lower.contains("at least one item")
            || message_lower.contains("table")
        {
            UiErrorCategory::Validation
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    /// Poll/load failures only touch the status line; everything the user
    /// explicitly asked for gets a blocking alert.
    pub fn is_blocking(&self) -> bool {
        !matches!(
            self.context,
            UiErrorContext::FetchOrders | UiErrorContext::FetchMenu
        )
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn headline(&self) -> String {
        format!("{}: {}", self.context.headline(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_codes_map_onto_categories() {
        let err = UiError::from_api(
            UiErrorContext::FetchOrders,
            &ApiError::network("connection refused"),
        );
        assert_eq!(err.category(), UiErrorCategory::Network);

        let err = UiError::from_api(
            UiErrorContext::CreateOrder,
            &ApiError::validation("empty cart"),
        );
        assert_eq!(err.category(), UiErrorCategory::Validation);
    }

    #[test]
    fn classifies_message_text_when_no_code_is_available() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "failed to build runtime: connection pool exhausted",
        );
        assert_eq!(err.category(), UiErrorCategory::Network);

        let err = UiError::from_message(UiErrorContext::CreateOrder, "dine-in orders need a table");
        assert_eq!(err.category(), UiErrorCategory::Validation);
    }

    #[test]
    fn poll_failures_do_not_block_the_board() {
        let err = UiError::from_api(UiErrorContext::FetchOrders, &ApiError::network("down"));
        assert!(!err.is_blocking());

        let err = UiError::from_api(UiErrorContext::CancelOrder, &ApiError::network("down"));
        assert!(err.is_blocking());
    }
}
