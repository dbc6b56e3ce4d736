//! Modals: order detail, order creation, alerts, and the blocking error
//! alert. All of them are plain open/closed state driven from the app shell.

use client_core::{alerts, triage, BoardView};
use eframe::egui;
use shared::domain::{ChannelId, Order, Product, TableNumber};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorCategory, UiErrorContext};
use crate::ui::app::BoardGuiApp;

impl BoardGuiApp {
    pub(crate) fn show_modals(&mut self, ctx: &egui::Context) {
        self.show_error_alert(ctx);
        self.show_detail_modal(ctx);
        self.show_create_modal(ctx);
        self.show_alerts_modal(ctx);
    }

    /// Blocking failure alert; the board stays visible but the user has to
    /// acknowledge before carrying on.
    fn show_error_alert(&mut self, ctx: &egui::Context) {
        let Some(err) = self.error_alert.clone() else {
            return;
        };
        egui::Window::new("Something went wrong")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(err.headline());
                let hint = match err.category() {
                    UiErrorCategory::Network => {
                        "Check the connection to the order service and try again."
                    }
                    UiErrorCategory::Validation => "Review the order and try again.",
                    UiErrorCategory::Unknown => "Try again in a moment.",
                };
                ui.weak(hint);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    self.error_alert = None;
                }
            });
    }

    fn selected_order(&self) -> Option<Order> {
        let display_id = self.route.selected_order()?;
        triage(&self.orders, self.route.view())
            .find_by_display_id(display_id)
            .cloned()
    }

    fn show_detail_modal(&mut self, ctx: &egui::Context) {
        if self.route.selected_order().is_none() {
            return;
        }
        let Some(order) = self.selected_order() else {
            // The order left the board between polls; drop the stale link.
            self.set_route(self.route.with_order(None));
            return;
        };

        let mut close = false;
        egui::Window::new(format!("Order #{}", order.display_id.0))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.strong(super::board::order_title(&order));
                if order.is_canceled() {
                    ui.colored_label(egui::Color32::RED, "This order has been canceled.");
                }
                ui.add_space(6.0);

                ui.columns(2, |columns| {
                    columns[0].label(egui::RichText::new("Items").strong());
                    if order.current_cart.is_empty() {
                        columns[0].weak("No items on this order");
                    }
                    for item in &order.current_cart {
                        columns[0].label(format!("{}x {}", item.amount, item.name));
                        if let Some(notes) = &item.notes {
                            columns[0].small(notes.as_str());
                        }
                    }
                    columns[0].add_space(6.0);
                    columns[0].label(format!("Total: R$ {:.2}", order.total_price));

                    columns[1].label(egui::RichText::new("Customer").strong());
                    if let Some(customer) = &order.customer {
                        columns[1].label(customer.full_name.as_str());
                        if let Some(phone) = &customer.phone {
                            columns[1].horizontal(|ui| {
                                ui.label(phone.as_str());
                                if ui.small_button("Copy").clicked() {
                                    copy_to_clipboard(phone, &mut self.status);
                                }
                            });
                        }
                    } else if let Some(table) = order.table_number {
                        columns[1].label(format!("Table {}", table.0));
                    }
                    if let Some(address) = &order.address {
                        columns[1].label(address.as_str());
                    }
                    if let Some(payment_method) = &order.payment_method {
                        columns[1].label(format!("Payment: {payment_method}"));
                    }
                });

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    let cancel = ui.add_enabled(
                        !self.mutation_in_flight && !order.is_canceled(),
                        egui::Button::new(
                            egui::RichText::new("Cancel order").color(egui::Color32::RED),
                        ),
                    );
                    if cancel.clicked() {
                        self.mutation_in_flight = true;
                        self.queue_command(BackendCommand::CancelOrder {
                            order: order.clone(),
                        });
                        close = true;
                    }
                    if ui.button("Close").clicked() {
                        close = true;
                    }
                });
            });

        if close {
            self.set_route(self.route.with_order(None));
        }
    }

    fn show_create_modal(&mut self, ctx: &egui::Context) {
        if !self.create_open {
            return;
        }

        let menu = self.menu.clone();
        let mut close = false;
        egui::Window::new("New order")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                if self.menu_loading {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading the menu...");
                    });
                    return;
                }

                ui.columns(2, |columns| {
                    columns[0].label(egui::RichText::new("Menu").strong());
                    egui::ScrollArea::vertical()
                        .id_salt("create_menu")
                        .max_height(320.0)
                        .show(&mut columns[0], |ui| {
                            for product in &menu {
                                self.show_menu_entry(ui, product);
                            }
                            if menu.is_empty() {
                                ui.weak("The menu is empty");
                            }
                        });

                    columns[1].label(egui::RichText::new("Cart").strong());
                    self.show_cart_panel(&mut columns[1]);
                });

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    let create = ui.add_enabled(
                        !self.creating && !self.cart.is_empty(),
                        egui::Button::new("Create order"),
                    );
                    if create.clicked() {
                        self.submit_order();
                    }
                    if self.creating {
                        ui.spinner();
                    }
                    if ui.button("Cancel").clicked() {
                        close = true;
                    }
                });
            });

        if close {
            self.close_create_modal();
        }
    }

    fn show_menu_entry(&mut self, ui: &mut egui::Ui, product: &Product) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.strong(product.name.as_str());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("R$ {:.2}", product.brl_price));
                });
            });
            if !product.description.is_empty() {
                ui.weak(product.description.as_str());
            }
            ui.horizontal(|ui| {
                let quantity = self.cart.quantity_of(product.id);
                if ui
                    .add_enabled(quantity > 0, egui::Button::new("−"))
                    .clicked()
                {
                    self.cart.remove(product.id);
                }
                ui.label(quantity.to_string());
                if ui.button("+").clicked() {
                    self.cart.add(product);
                }
            });
        });
    }

    fn show_cart_panel(&mut self, ui: &mut egui::Ui) {
        if self.cart.is_empty() {
            ui.weak("Cart is empty");
            return;
        }

        let lines = self.cart.lines().to_vec();
        for line in &lines {
            ui.horizontal(|ui| {
                ui.label(format!("{}x {}", line.amount, line.name));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("R$ {:.2}", line.subtotal()));
                });
            });
        }
        ui.separator();
        ui.strong(format!("Total: R$ {:.2}", self.cart.total_price()));

        if self.route.view() == BoardView::DineIn {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label("Table");
                ui.add(
                    egui::TextEdit::singleline(&mut self.table_input)
                        .desired_width(60.0)
                        .hint_text("e.g. 12"),
                );
            });
        }
    }

    fn submit_order(&mut self) {
        // Orders created from the board inherit its channel; the kitchen view
        // has no creation flow at all.
        let channel = self.route.view().channel().unwrap_or(ChannelId::SITE);
        let table_number = self
            .table_input
            .trim()
            .parse::<u32>()
            .ok()
            .map(TableNumber);

        match self.cart.build(channel, table_number) {
            Ok(draft) => {
                self.creating = true;
                self.queue_command(BackendCommand::CreateOrder { draft });
            }
            Err(err) => {
                self.error_alert = Some(UiError::from_message(
                    UiErrorContext::CreateOrder,
                    err.to_string(),
                ));
            }
        }
    }

    fn show_alerts_modal(&mut self, ctx: &egui::Context) {
        if !self.alerts_open {
            return;
        }

        let alerting: Vec<Order> = alerts(&self.orders).into_iter().cloned().collect();
        let mut close = false;
        egui::Window::new("Alerts")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                if alerting.is_empty() {
                    ui.label("No alerts right now");
                    ui.weak("Every order has been handed over.");
                } else {
                    ui.label(format!("{} orders need follow-up", alerting.len()));
                    ui.add_space(6.0);
                    egui::ScrollArea::vertical()
                        .id_salt("alerts_list")
                        .max_height(360.0)
                        .show(ui, |ui| {
                            for order in &alerting {
                                self.show_alert_entry(ui, order);
                                ui.add_space(6.0);
                            }
                        });
                }
                ui.add_space(8.0);
                if ui.button("Close").clicked() {
                    close = true;
                }
            });

        if close {
            self.alerts_open = false;
        }
    }

    fn show_alert_entry(&mut self, ui: &mut egui::Ui, order: &Order) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.strong(format!("#{}", order.display_id.0));
                ui.label(super::board::order_title(order));
            });
            for item in &order.current_cart {
                ui.label(format!("{}x {}", item.amount, item.name));
            }
            if let Some(phone) = order.customer.as_ref().and_then(|c| c.phone.as_ref()) {
                ui.horizontal(|ui| {
                    ui.label(phone.as_str());
                    // Copied for a WhatsApp follow-up outside the app.
                    if ui.small_button("Copy phone").clicked() {
                        copy_to_clipboard(phone, &mut self.status);
                    }
                });
            }
            if let Some(address) = &order.address {
                ui.small(address.as_str());
            }
            let finish = ui.add_enabled(
                !self.mutation_in_flight,
                egui::Button::new("Finish alert"),
            );
            if finish.clicked() {
                self.mutation_in_flight = true;
                self.queue_command(BackendCommand::FinishAlert {
                    order: order.clone(),
                });
            }
        });
    }
}

fn copy_to_clipboard(text: &str, status: &mut String) {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => {
            if clipboard.set_text(text.to_string()).is_ok() {
                *status = "Copied to clipboard".to_string();
            }
        }
        Err(err) => {
            tracing::warn!("clipboard unavailable: {err}");
        }
    }
}
