//! Backend worker: owns the tokio runtime, the order-service client, and the
//! board watcher, and answers the UI command queue.

use std::thread;

use client_core::{BoardEvent, BoardView, BoardWatcher, OrdersClient, Settings};
use crossbeam_channel::{Receiver, Sender};
use shared::{domain::BusinessId, error::ApiError};
use tokio::task::JoinHandle;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn spawn_backend_thread(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    settings: Settings,
    initial_view: BoardView,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("failed to build backend runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = OrdersClient::new(settings.backend_url.clone());
            let business = settings.business();
            let _ = ui_tx.try_send(UiEvent::Info(format!(
                "Watching orders at {}",
                client.base_url()
            )));

            let mut watcher = BoardWatcher::spawn(
                client.clone(),
                business,
                poll_period(&settings, initial_view),
            );
            let mut forwarder = forward_board_events(&watcher, ui_tx.clone());

            while let Ok(cmd) = cmd_rx.recv() {
                tracing::debug!(command = cmd.name(), "processing ui->backend command");
                match cmd {
                    BackendCommand::SetView { view } => {
                        // The kitchen polls faster than the boards; swap the
                        // watcher rather than re-timing it in place.
                        forwarder.abort();
                        watcher.abort();
                        watcher = BoardWatcher::spawn(
                            client.clone(),
                            business,
                            poll_period(&settings, view),
                        );
                        forwarder = forward_board_events(&watcher, ui_tx.clone());
                    }
                    BackendCommand::FetchOrders => {
                        refresh_orders(&client, business, &ui_tx).await;
                    }
                    BackendCommand::FetchMenu => match client.fetch_menu(business).await {
                        Ok(menu) => {
                            let _ = ui_tx.try_send(UiEvent::MenuLoaded(menu));
                        }
                        Err(err) => send_error(&ui_tx, UiErrorContext::FetchMenu, &err),
                    },
                    BackendCommand::CreateOrder { draft } => {
                        match client.create_order(business, &draft).await {
                            Ok(()) => {
                                let _ = ui_tx.try_send(UiEvent::OrderCreated);
                                refresh_orders(&client, business, &ui_tx).await;
                            }
                            Err(err) => send_error(&ui_tx, UiErrorContext::CreateOrder, &err),
                        }
                    }
                    BackendCommand::MoveOrder { order, to } => {
                        match client.set_status(business, &order, to).await {
                            Ok(_) => {
                                let _ = ui_tx.try_send(UiEvent::OrderUpdated);
                                refresh_orders(&client, business, &ui_tx).await;
                            }
                            Err(err) => send_error(&ui_tx, UiErrorContext::MoveOrder, &err),
                        }
                    }
                    BackendCommand::CancelOrder { order } => {
                        match client.cancel_order(business, &order).await {
                            Ok(_) => {
                                let _ = ui_tx.try_send(UiEvent::OrderUpdated);
                                refresh_orders(&client, business, &ui_tx).await;
                            }
                            Err(err) => send_error(&ui_tx, UiErrorContext::CancelOrder, &err),
                        }
                    }
                    BackendCommand::FinishAlert { order } => {
                        match client.finish_order(business, &order).await {
                            Ok(_) => {
                                let _ = ui_tx.try_send(UiEvent::OrderUpdated);
                                refresh_orders(&client, business, &ui_tx).await;
                            }
                            Err(err) => send_error(&ui_tx, UiErrorContext::FinishAlert, &err),
                        }
                    }
                }
            }

            forwarder.abort();
            watcher.abort();
        });
    });
}

fn poll_period(settings: &Settings, view: BoardView) -> std::time::Duration {
    match view {
        BoardView::Kitchen => settings.kitchen_poll(),
        BoardView::Delivery | BoardView::DineIn => settings.board_poll(),
    }
}

async fn refresh_orders(client: &OrdersClient, business: BusinessId, ui_tx: &Sender<UiEvent>) {
    match client.fetch_orders(business).await {
        Ok(orders) => {
            let _ = ui_tx.try_send(UiEvent::OrdersLoaded(orders));
        }
        Err(err) => send_error(ui_tx, UiErrorContext::FetchOrders, &err),
    }
}

fn send_error(ui_tx: &Sender<UiEvent>, context: UiErrorContext, err: &ApiError) {
    tracing::error!(?context, "order service call failed: {err}");
    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_api(context, err)));
}

/// Forward watcher snapshots into the UI event queue. Fetch failures keep the
/// previous board; they only surface on the status line.
fn forward_board_events(watcher: &BoardWatcher, ui_tx: Sender<UiEvent>) -> JoinHandle<()> {
    let mut events = watcher.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            let forwarded = match event {
                BoardEvent::Snapshot(orders) => UiEvent::OrdersLoaded(orders),
                BoardEvent::FetchFailed(err) => {
                    UiEvent::Error(UiError::from_api(UiErrorContext::FetchOrders, &err))
                }
            };
            let _ = ui_tx.try_send(forwarded);
        }
    })
}
