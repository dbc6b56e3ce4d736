//! App shell: state, event processing, top bar, and the frame loop.

use std::time::Duration;

use client_core::{BoardView, CartBuilder, Settings};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{Order, Product};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::routes::Route;

pub struct BoardGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    pub(crate) route: Route,
    pub(crate) orders: Vec<Order>,
    pub(crate) menu: Vec<Product>,

    pub(crate) cart: CartBuilder,
    pub(crate) table_input: String,
    pub(crate) create_open: bool,
    pub(crate) creating: bool,
    pub(crate) menu_loading: bool,

    pub(crate) alerts_open: bool,
    pub(crate) mutation_in_flight: bool,

    pub(crate) status: String,
    pub(crate) error_alert: Option<UiError>,
}

impl BoardGuiApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        settings: Settings,
        route: Route,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            route,
            orders: Vec::new(),
            menu: Vec::new(),
            cart: CartBuilder::new(),
            table_input: String::new(),
            create_open: false,
            creating: false,
            menu_loading: false,
            alerts_open: false,
            mutation_in_flight: false,
            status: format!("Connecting to {}", settings.backend_url),
            error_alert: None,
        }
    }

    pub(crate) fn queue_command(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    /// Route changes mirror browser navigation: switching the view re-times
    /// the poller and triggers an immediate refresh.
    pub(crate) fn set_route(&mut self, route: Route) {
        let view_changed = route.view() != self.route.view();
        self.route = route;
        if view_changed {
            self.queue_command(BackendCommand::SetView {
                view: self.route.view(),
            });
            self.queue_command(BackendCommand::FetchOrders);
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::OrdersLoaded(orders) => {
                    self.orders = orders;
                    self.mutation_in_flight = false;
                    self.status = format!("{} orders on the board", self.orders.len());
                }
                UiEvent::MenuLoaded(menu) => {
                    self.menu = menu;
                    self.menu_loading = false;
                }
                UiEvent::OrderCreated => {
                    self.close_create_modal();
                    self.status = "Order created".to_string();
                }
                UiEvent::OrderUpdated => {
                    self.mutation_in_flight = false;
                }
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    tracing::error!(context = ?err.context(), "{}", err.message());
                    self.creating = false;
                    self.mutation_in_flight = false;
                    self.menu_loading = false;
                    if err.is_blocking() {
                        self.error_alert = Some(err);
                    } else {
                        self.status = err.headline();
                    }
                }
            }
        }
    }

    pub(crate) fn open_create_modal(&mut self) {
        self.create_open = true;
        self.menu_loading = true;
        self.queue_command(BackendCommand::FetchMenu);
    }

    pub(crate) fn close_create_modal(&mut self) {
        self.create_open = false;
        self.creating = false;
        self.menu_loading = false;
        self.cart.clear();
        self.table_input.clear();
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                let view = self.route.view();
                if ui
                    .selectable_label(view == BoardView::Delivery, "DELIVERY")
                    .clicked()
                {
                    self.set_route(Route::for_view(BoardView::Delivery));
                }
                if ui
                    .selectable_label(view == BoardView::DineIn, "DINE-IN")
                    .clicked()
                {
                    self.set_route(Route::for_view(BoardView::DineIn));
                }
                if ui
                    .selectable_label(view == BoardView::Kitchen, "KITCHEN")
                    .clicked()
                {
                    self.set_route(Route::for_view(BoardView::Kitchen));
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    // The kitchen screen is hands-off: no creation, no alerts.
                    if self.route.view() != BoardView::Kitchen {
                        if ui.button("➕ New order").clicked() {
                            self.open_create_modal();
                        }
                        if ui.button("🔔 Alerts").clicked() {
                            self.alerts_open = true;
                        }
                    }
                });
            });
            ui.add_space(4.0);
        });
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small(self.status.as_str());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(self.route.path());
                });
            });
        });
    }
}

impl eframe::App for BoardGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_top_bar(ctx);
        self.show_status_bar(ctx);
        self.show_board(ctx);
        self.show_modals(ctx);

        // The board only changes on poll ticks; a slow repaint beat is enough.
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}
