//! Backend commands queued from UI to the backend worker.

use client_core::BoardView;
use shared::domain::{Order, OrderDraft, OrderStatus};

pub enum BackendCommand {
    FetchOrders,
    FetchMenu,
    CreateOrder {
        draft: OrderDraft,
    },
    /// Kitchen up/down control; carries the order as last fetched so the
    /// worker can ship the full object with only the status changed.
    MoveOrder {
        order: Order,
        to: OrderStatus,
    },
    CancelOrder {
        order: Order,
    },
    FinishAlert {
        order: Order,
    },
    /// The active view changed; the worker re-times its polling.
    SetView {
        view: BoardView,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::FetchOrders => "fetch_orders",
            BackendCommand::FetchMenu => "fetch_menu",
            BackendCommand::CreateOrder { .. } => "create_order",
            BackendCommand::MoveOrder { .. } => "move_order",
            BackendCommand::CancelOrder { .. } => "cancel_order",
            BackendCommand::FinishAlert { .. } => "finish_alert",
            BackendCommand::SetView { .. } => "set_view",
        }
    }
}
