//! Status triage for the board: channel filtering, finish-timestamp ordering,
//! and bucketing into the three kanban columns.

use shared::domain::{ChannelId, DisplayId, Order, OrderStatus};

/// Which board is being rendered; decides the channel filter and whether the
/// list is ordered by finish timestamp first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardView {
    Delivery,
    DineIn,
    Kitchen,
}

impl BoardView {
    /// Channel this view is restricted to; the kitchen sees every channel.
    pub fn channel(self) -> Option<ChannelId> {
        match self {
            BoardView::Delivery => Some(ChannelId::WHATSAPP),
            BoardView::DineIn => Some(ChannelId::SITE),
            BoardView::Kitchen => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            BoardView::Delivery => "Delivery",
            BoardView::DineIn => "Dine-in",
            BoardView::Kitchen => "Kitchen",
        }
    }

    fn sorts_by_finish(self) -> bool {
        matches!(self, BoardView::Delivery | BoardView::Kitchen)
    }
}

/// The three kanban columns. Membership is derived from each order's status
/// at triage time; nothing is stored.
#[derive(Debug, Clone, Default)]
pub struct Buckets {
    pub confirmed: Vec<Order>,
    pub preparing: Vec<Order>,
    pub done: Vec<Order>,
}

impl Buckets {
    pub fn len(&self) -> usize {
        self.confirmed.len() + self.preparing.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.confirmed
            .iter()
            .chain(self.preparing.iter())
            .chain(self.done.iter())
    }

    /// Locate an order across all columns; the detail modal is addressed by
    /// display id.
    pub fn find_by_display_id(&self, display_id: DisplayId) -> Option<&Order> {
        self.iter().find(|order| order.display_id == display_id)
    }
}

/// Partition `orders` into the view's three columns. An order with no status
/// on the wire lands in confirmed; every order lands in exactly one column.
pub fn triage(orders: &[Order], view: BoardView) -> Buckets {
    let mut filtered: Vec<Order> = orders
        .iter()
        .filter(|order| {
            view.channel()
                .map_or(true, |channel| order.channel_id == channel)
        })
        .cloned()
        .collect();

    if view.sorts_by_finish() {
        // Oldest finish first; unstamped orders lead. Stable, so server order
        // survives between equal timestamps.
        filtered.sort_by_key(|order| order.finished_at);
    }

    let mut buckets = Buckets::default();
    for order in filtered {
        match order.status() {
            OrderStatus::Confirmed => buckets.confirmed.push(order),
            OrderStatus::Preparing => buckets.preparing.push(order),
            OrderStatus::Done => buckets.done.push(order),
        }
    }
    buckets
}

/// Orders that never received a finish timestamp and still need staff
/// follow-up; feeds the alerts modal.
pub fn alerts(orders: &[Order]) -> Vec<&Order> {
    orders
        .iter()
        .filter(|order| order.finished_at.is_none())
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use shared::domain::OrderId;

    use super::*;

    fn order(
        display_id: i64,
        channel_id: ChannelId,
        status: Option<OrderStatus>,
        finished_minutes_ago: Option<i64>,
    ) -> Order {
        let base = Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap();
        Order {
            id: OrderId(format!("ord-{display_id}")),
            display_id: DisplayId(display_id),
            channel_id,
            customer: None,
            address: None,
            payment_method: None,
            table_number: None,
            current_cart: Vec::new(),
            total_price: 0.0,
            finished_at: finished_minutes_ago.map(|minutes| base - Duration::minutes(minutes)),
            canceled_at: None,
            post_checkout_status: status,
        }
    }

    #[test]
    fn every_order_lands_in_exactly_one_bucket() {
        let orders = vec![
            order(1, ChannelId::WHATSAPP, Some(OrderStatus::Confirmed), Some(3)),
            order(2, ChannelId::WHATSAPP, Some(OrderStatus::Preparing), Some(2)),
            order(3, ChannelId::WHATSAPP, Some(OrderStatus::Done), Some(1)),
        ];

        let buckets = triage(&orders, BoardView::Delivery);
        assert_eq!(buckets.confirmed.len(), 1);
        assert_eq!(buckets.preparing.len(), 1);
        assert_eq!(buckets.done.len(), 1);
        assert_eq!(buckets.len(), orders.len());
    }

    #[test]
    fn missing_status_buckets_as_confirmed() {
        let orders = vec![order(7, ChannelId::SITE, None, Some(1))];

        let buckets = triage(&orders, BoardView::DineIn);
        assert_eq!(buckets.confirmed.len(), 1);
        assert!(buckets.preparing.is_empty());
        assert!(buckets.done.is_empty());
    }

    #[test]
    fn views_filter_by_channel() {
        let orders = vec![
            order(1, ChannelId::WHATSAPP, None, Some(1)),
            order(2, ChannelId::SITE, None, Some(2)),
        ];

        let delivery = triage(&orders, BoardView::Delivery);
        assert_eq!(delivery.len(), 1);
        assert_eq!(delivery.confirmed[0].display_id, DisplayId(1));

        let dine_in = triage(&orders, BoardView::DineIn);
        assert_eq!(dine_in.len(), 1);
        assert_eq!(dine_in.confirmed[0].display_id, DisplayId(2));

        let kitchen = triage(&orders, BoardView::Kitchen);
        assert_eq!(kitchen.len(), 2);
    }

    #[test]
    fn delivery_sorts_by_ascending_finish_timestamp() {
        // Input arrives newest-first; T1 (older) must end up before T2.
        let orders = vec![
            order(2, ChannelId::WHATSAPP, None, Some(5)),
            order(1, ChannelId::WHATSAPP, None, Some(30)),
        ];

        let buckets = triage(&orders, BoardView::Delivery);
        let ids: Vec<i64> = buckets.confirmed.iter().map(|o| o.display_id.0).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn unstamped_orders_sort_ahead_of_stamped_ones() {
        let orders = vec![
            order(1, ChannelId::WHATSAPP, None, Some(5)),
            order(2, ChannelId::WHATSAPP, None, None),
        ];

        let buckets = triage(&orders, BoardView::Kitchen);
        let ids: Vec<i64> = buckets.confirmed.iter().map(|o| o.display_id.0).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn dine_in_preserves_input_order() {
        let orders = vec![
            order(2, ChannelId::SITE, None, Some(5)),
            order(1, ChannelId::SITE, None, Some(30)),
        ];

        let buckets = triage(&orders, BoardView::DineIn);
        let ids: Vec<i64> = buckets.confirmed.iter().map(|o| o.display_id.0).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn find_by_display_id_searches_all_buckets() {
        let orders = vec![
            order(1, ChannelId::SITE, Some(OrderStatus::Confirmed), Some(3)),
            order(2, ChannelId::SITE, Some(OrderStatus::Done), Some(1)),
        ];

        let buckets = triage(&orders, BoardView::DineIn);
        assert!(buckets.find_by_display_id(DisplayId(2)).is_some());
        assert!(buckets.find_by_display_id(DisplayId(9)).is_none());
    }

    #[test]
    fn alerts_are_the_orders_without_a_finish_timestamp() {
        let orders = vec![
            order(1, ChannelId::WHATSAPP, None, None),
            order(2, ChannelId::WHATSAPP, None, Some(10)),
            order(3, ChannelId::SITE, None, None),
        ];

        let alerting: Vec<i64> = alerts(&orders).iter().map(|o| o.display_id.0).collect();
        assert_eq!(alerting, vec![1, 3]);
    }
}
