use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(ProductId);
id_newtype!(ChannelId);
id_newtype!(BusinessId);
id_newtype!(DisplayId);

impl ChannelId {
    /// Orders arriving through the WhatsApp delivery flow.
    pub const WHATSAPP: ChannelId = ChannelId(1);
    /// Orders placed on site (dine-in).
    pub const SITE: ChannelId = ChannelId(2);
}

/// Opaque server-assigned order identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableNumber(pub u32);

/// Kitchen workflow stage of an order after checkout. Orders written before
/// the field existed carry no value on the wire and count as confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Confirmed,
    Preparing,
    Done,
}

impl OrderStatus {
    /// One step forward in the workflow; `None` once done.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Confirmed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Done),
            OrderStatus::Done => None,
        }
    }

    /// One step back in the workflow; `None` while still confirmed.
    pub fn prev(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Confirmed => None,
            OrderStatus::Preparing => Some(OrderStatus::Confirmed),
            OrderStatus::Done => Some(OrderStatus::Preparing),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Done => "DONE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// One line of an order's cart. Prices are snapshotted at order time, so the
/// line stays meaningful after the menu changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub brl_price: f64,
    pub amount: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CartItem {
    pub fn subtotal(&self) -> f64 {
        self.brl_price * f64::from(self.amount)
    }
}

/// Menu entry served by `GET /menu/{business}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub brl_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub display_id: DisplayId,
    pub channel_id: ChannelId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<TableNumber>,
    #[serde(default)]
    pub current_cart: Vec<CartItem>,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canceled_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_checkout_status: Option<OrderStatus>,
}

impl Order {
    /// Effective workflow stage; a missing wire value means confirmed.
    pub fn status(&self) -> OrderStatus {
        self.post_checkout_status.unwrap_or_default()
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled_at.is_some()
    }
}

/// Creation payload for `POST /orders/{business}`. The server assigns `id`
/// and `display_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub channel_id: ChannelId,
    pub current_cart: Vec<CartItem>,
    pub total_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<TableNumber>,
    pub finished_at: DateTime<Utc>,
    pub post_checkout_status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_moves_one_step_at_a_time() {
        assert_eq!(OrderStatus::Confirmed.next(), Some(OrderStatus::Preparing));
        assert_eq!(OrderStatus::Preparing.next(), Some(OrderStatus::Done));
        assert_eq!(OrderStatus::Done.next(), None);

        assert_eq!(OrderStatus::Done.prev(), Some(OrderStatus::Preparing));
        assert_eq!(OrderStatus::Preparing.prev(), Some(OrderStatus::Confirmed));
        assert_eq!(OrderStatus::Confirmed.prev(), None);
    }

    #[test]
    fn order_without_status_field_counts_as_confirmed() {
        let order: Order = serde_json::from_str(
            r#"{
                "id": "ord-1",
                "display_id": 42,
                "channel_id": 1
            }"#,
        )
        .expect("order");

        assert_eq!(order.post_checkout_status, None);
        assert_eq!(order.status(), OrderStatus::Confirmed);
        assert!(order.current_cart.is_empty());
    }

    #[test]
    fn status_uses_snake_case_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Preparing).expect("json"),
            "\"preparing\""
        );
        assert_eq!(
            serde_json::from_str::<OrderStatus>("\"done\"").expect("status"),
            OrderStatus::Done
        );
    }

    #[test]
    fn optional_fields_are_omitted_when_absent() {
        let order = Order {
            id: OrderId("ord-9".to_string()),
            display_id: DisplayId(9),
            channel_id: ChannelId::SITE,
            customer: None,
            address: None,
            payment_method: None,
            table_number: None,
            current_cart: Vec::new(),
            total_price: 0.0,
            finished_at: None,
            canceled_at: None,
            post_checkout_status: None,
        };

        let value = serde_json::to_value(&order).expect("json");
        let object = value.as_object().expect("object");
        assert!(!object.contains_key("post_checkout_status"));
        assert!(!object.contains_key("canceled_at"));
        assert!(!object.contains_key("table_number"));
    }

    #[test]
    fn cart_item_subtotal_scales_with_amount() {
        let item = CartItem {
            id: ProductId(3),
            name: "Margherita".to_string(),
            brl_price: 45.5,
            amount: 3,
            notes: None,
        };
        assert_eq!(item.subtotal(), 136.5);
    }
}
