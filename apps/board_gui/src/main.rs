//! Desktop order board: delivery/dine-in kanban views and the kitchen
//! workflow view, backed by the external order service.

mod backend_bridge;
mod controller;
mod ui;

use client_core::load_settings;
use crossbeam_channel::bounded;
use eframe::egui;

use backend_bridge::commands::BackendCommand;
use backend_bridge::runtime::spawn_backend_thread;
use controller::events::UiEvent;
use controller::routes::Route;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    // Optional deep link, mirroring the hosted board's URLs:
    // `board_gui /orders/dine-in/42` opens that order's detail view.
    let route = std::env::args()
        .nth(1)
        .and_then(|path| Route::parse(&path))
        .unwrap_or_default();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    spawn_backend_thread(cmd_rx, ui_tx, settings.clone(), route.view());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Order Board")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([980.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Order Board",
        options,
        Box::new(move |_cc| Ok(Box::new(ui::BoardGuiApp::new(cmd_tx, ui_rx, settings, route)))),
    )
}
