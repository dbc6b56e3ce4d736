//! Controller layer: UI/backend events, error classification, and the route
//! model driving the view switcher.

pub mod events;
pub mod orchestration;
pub mod routes;
