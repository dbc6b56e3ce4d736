//! Shared wire types for the order board: the order/menu domain model and the
//! client-side API error taxonomy.

pub mod domain;
pub mod error;
