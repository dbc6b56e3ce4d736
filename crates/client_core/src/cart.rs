//! Cart building for the create-order flow: a quantity-keyed selection of
//! menu products that validates into a creation payload.

use chrono::Utc;
use shared::domain::{
    CartItem, ChannelId, OrderDraft, OrderStatus, Product, ProductId, TableNumber,
};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("add at least one item to the order")]
    Empty,
    #[error("dine-in orders need a table")]
    MissingTable,
}

#[derive(Debug, Clone, Default)]
pub struct CartBuilder {
    lines: Vec<CartItem>,
}

impl CartBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product`, inserting a new line at quantity 1.
    pub fn add(&mut self, product: &Product) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == product.id) {
            line.amount += 1;
            return;
        }
        self.lines.push(CartItem {
            id: product.id,
            name: product.name.clone(),
            brl_price: product.brl_price,
            amount: 1,
            notes: None,
        });
    }

    /// Remove one unit; the line disappears when the last unit goes.
    pub fn remove(&mut self, product_id: ProductId) {
        let Some(index) = self.lines.iter().position(|line| line.id == product_id) else {
            return;
        };
        if self.lines[index].amount > 1 {
            self.lines[index].amount -= 1;
        } else {
            self.lines.remove(index);
        }
    }

    /// Attach a free-text kitchen note to a line; blank notes clear it.
    pub fn set_notes(&mut self, product_id: ProductId, notes: Option<String>) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == product_id) {
            line.notes = notes.filter(|text| !text.trim().is_empty());
        }
    }

    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.lines
            .iter()
            .find(|line| line.id == product_id)
            .map_or(0, |line| line.amount)
    }

    pub fn lines(&self) -> &[CartItem] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total_price(&self) -> f64 {
        self.lines.iter().map(CartItem::subtotal).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Validate and produce the creation payload. The caller clears the cart
    /// once the POST succeeds, not before.
    pub fn build(
        &self,
        channel_id: ChannelId,
        table_number: Option<TableNumber>,
    ) -> Result<OrderDraft, CartError> {
        if self.lines.is_empty() {
            return Err(CartError::Empty);
        }
        if channel_id == ChannelId::SITE && table_number.is_none() {
            return Err(CartError::MissingTable);
        }
        Ok(OrderDraft {
            channel_id,
            current_cart: self.lines.clone(),
            total_price: self.total_price(),
            table_number,
            finished_at: Utc::now(),
            post_checkout_status: OrderStatus::Confirmed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, price: f64) -> Product {
        Product {
            id: ProductId(id),
            name: format!("Product {id}"),
            description: String::new(),
            brl_price: price,
        }
    }

    #[test]
    fn add_increments_and_remove_decrements() {
        let mut cart = CartBuilder::new();
        let pizza = product(1, 40.0);

        cart.add(&pizza);
        cart.add(&pizza);
        assert_eq!(cart.quantity_of(pizza.id), 2);

        cart.remove(pizza.id);
        assert_eq!(cart.quantity_of(pizza.id), 1);
    }

    #[test]
    fn removing_the_last_unit_drops_the_line() {
        let mut cart = CartBuilder::new();
        let soda = product(2, 8.5);

        cart.add(&soda);
        cart.remove(soda.id);

        assert!(cart.is_empty());
        assert_eq!(cart.quantity_of(soda.id), 0);
    }

    #[test]
    fn removing_an_unknown_product_is_a_no_op() {
        let mut cart = CartBuilder::new();
        cart.add(&product(1, 10.0));
        cart.remove(ProductId(99));
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn total_is_the_sum_of_price_times_quantity() {
        let mut cart = CartBuilder::new();
        let pizza = product(1, 40.25);
        let soda = product(2, 8.5);

        cart.add(&pizza);
        cart.add(&pizza);
        cart.add(&soda);

        assert_eq!(cart.total_price(), 40.25 * 2.0 + 8.5);
    }

    #[test]
    fn building_an_empty_cart_fails() {
        let cart = CartBuilder::new();
        assert_eq!(
            cart.build(ChannelId::WHATSAPP, None),
            Err(CartError::Empty)
        );
    }

    #[test]
    fn dine_in_requires_a_table() {
        let mut cart = CartBuilder::new();
        cart.add(&product(1, 12.0));

        assert_eq!(cart.build(ChannelId::SITE, None), Err(CartError::MissingTable));

        let draft = cart
            .build(ChannelId::SITE, Some(TableNumber(4)))
            .expect("draft");
        assert_eq!(draft.table_number, Some(TableNumber(4)));
    }

    #[test]
    fn delivery_builds_without_a_table() {
        let mut cart = CartBuilder::new();
        cart.add(&product(1, 12.0));

        let draft = cart.build(ChannelId::WHATSAPP, None).expect("draft");
        assert_eq!(draft.channel_id, ChannelId::WHATSAPP);
        assert_eq!(draft.post_checkout_status, OrderStatus::Confirmed);
        assert_eq!(draft.total_price, 12.0);
        assert_eq!(draft.current_cart.len(), 1);
    }

    #[test]
    fn blank_notes_clear_the_line_note() {
        let mut cart = CartBuilder::new();
        let pizza = product(1, 40.0);
        cart.add(&pizza);

        cart.set_notes(pizza.id, Some("no onions".to_string()));
        assert_eq!(cart.lines()[0].notes.as_deref(), Some("no onions"));

        cart.set_notes(pizza.id, Some("   ".to_string()));
        assert_eq!(cart.lines()[0].notes, None);
    }
}
