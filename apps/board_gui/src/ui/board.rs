//! Kanban columns and order cards for the three board views.

use client_core::{triage, BoardView};
use eframe::egui;
use shared::domain::Order;

use crate::backend_bridge::commands::BackendCommand;
use crate::ui::app::BoardGuiApp;

impl BoardGuiApp {
    pub(crate) fn show_board(&mut self, ctx: &egui::Context) {
        let buckets = triage(&self.orders, self.route.view());
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(3, |columns| {
                self.show_column(&mut columns[0], "CONFIRMED", &buckets.confirmed);
                self.show_column(&mut columns[1], "PREPARING", &buckets.preparing);
                self.show_column(&mut columns[2], "DONE", &buckets.done);
            });
        });
    }

    fn show_column(&mut self, ui: &mut egui::Ui, title: &str, orders: &[Order]) {
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(title).strong());
            ui.separator();
            egui::ScrollArea::vertical().id_salt(title).show(ui, |ui| {
                if orders.is_empty() {
                    ui.add_space(12.0);
                    ui.weak("No orders in this stage yet");
                }
                for order in orders {
                    self.show_card(ui, order);
                    ui.add_space(6.0);
                }
            });
        });
    }

    fn show_card(&mut self, ui: &mut egui::Ui, order: &Order) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.strong(format!("#{}", order.display_id.0));
                ui.label(order_title(order));
                if order.is_canceled() {
                    ui.colored_label(egui::Color32::RED, "canceled");
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(finish_time_label(order));
                });
            });

            if order.current_cart.is_empty() {
                ui.weak("No items on this order");
            }
            for item in &order.current_cart {
                ui.label(format!("{}x {}", item.amount, item.name));
                if let Some(notes) = &item.notes {
                    ui.indent((order.display_id, &item.id), |ui| {
                        ui.small(notes.as_str());
                    });
                }
            }

            match self.route.view() {
                BoardView::Kitchen => self.show_kitchen_controls(ui, order),
                BoardView::Delivery | BoardView::DineIn => {
                    if ui.button("View details").clicked() {
                        self.set_route(self.route.with_order(Some(order.display_id)));
                    }
                }
            }
        });
    }

    /// Up/down controls move exactly one stage; each control disappears at
    /// its end of the workflow.
    fn show_kitchen_controls(&mut self, ui: &mut egui::Ui, order: &Order) {
        let status = order.status();
        ui.horizontal(|ui| {
            if let Some(previous) = status.prev() {
                let back = ui.add_enabled(
                    !self.mutation_in_flight,
                    egui::Button::new(format!("⬆ {}", previous.label())),
                );
                if back.clicked() {
                    self.mutation_in_flight = true;
                    self.queue_command(BackendCommand::MoveOrder {
                        order: order.clone(),
                        to: previous,
                    });
                }
            }
            if let Some(next) = status.next() {
                let forward = ui.add_enabled(
                    !self.mutation_in_flight,
                    egui::Button::new(format!("⬇ {}", next.label())),
                );
                if forward.clicked() {
                    self.mutation_in_flight = true;
                    self.queue_command(BackendCommand::MoveOrder {
                        order: order.clone(),
                        to: next,
                    });
                }
            }
        });
    }
}

pub(crate) fn order_title(order: &Order) -> String {
    if let Some(customer) = &order.customer {
        return customer.full_name.clone();
    }
    if let Some(table) = order.table_number {
        return format!("Table {}", table.0);
    }
    "Walk-in order".to_string()
}

pub(crate) fn finish_time_label(order: &Order) -> String {
    match order.finished_at {
        Some(finished_at) => finished_at
            .with_timezone(&chrono::Local)
            .format("%H:%M")
            .to_string(),
        None => "—".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use shared::domain::{ChannelId, Customer, DisplayId, OrderId, TableNumber};

    use super::*;

    fn bare_order() -> Order {
        Order {
            id: OrderId("ord-1".to_string()),
            display_id: DisplayId(1),
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
        }
    }

    #[test]
    fn card_title_prefers_customer_then_table() {
        let mut order = bare_order();
        assert_eq!(order_title(&order), "Walk-in order");

        order.table_number = Some(TableNumber(12));
        assert_eq!(order_title(&order), "Table 12");

        order.customer = Some(Customer {
            full_name: "Marina Lopes".to_string(),
            phone: None,
        });
        assert_eq!(order_title(&order), "Marina Lopes");
    }

    #[test]
    fn unfinished_orders_show_a_placeholder_time() {
        assert_eq!(finish_time_label(&bare_order()), "—");
    }
}
