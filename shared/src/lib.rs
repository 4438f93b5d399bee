//! Shared types and models for the Powder Stock Tracker
//!
//! This crate contains types shared between the store, the browser frontend
//! (via WASM), and other components of the system.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::*;
