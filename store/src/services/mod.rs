//! Business logic services for the Powder Stock Tracker

pub mod history;
pub mod inventory;

pub use history::ConsumptionHistory;
pub use inventory::InventoryService;
