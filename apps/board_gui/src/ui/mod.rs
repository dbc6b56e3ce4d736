//! UI layer for the order board: app shell, kanban columns, and modals.

pub mod app;
pub mod board;
pub mod modals;

pub use app::BoardGuiApp;
