//! WebAssembly module for the Powder Stock Tracker
//!
//! Binds the inventory store to a browser UI:
//! - snapshot persistence in `window.localStorage`
//! - stock and history queries as JSON strings
//! - form-side validation helpers and RAL display ordering

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

use powder_stock_store::{AppError, InventoryService, KvBackend, NewLot};
use shared::models::ConsumptionStep;

// Re-export shared types for use from the rlib side
pub use shared::models::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Snapshot backend over `window.localStorage`
struct LocalStorageBackend {
    storage: web_sys::Storage,
}

impl LocalStorageBackend {
    fn from_window() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| js_err("no window available"))?;
        let storage = window
            .local_storage()?
            .ok_or_else(|| js_err("localStorage is not available"))?;
        Ok(Self { storage })
    }
}

impl KvBackend for LocalStorageBackend {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|_| anyhow::anyhow!("localStorage read failed for {}", key))
    }

    fn save(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|_| anyhow::anyhow!("localStorage write failed for {}", key))
    }
}

/// Browser-facing handle to the inventory store
#[wasm_bindgen]
pub struct StockTracker {
    service: InventoryService<LocalStorageBackend>,
}

#[wasm_bindgen]
impl StockTracker {
    /// Open the tracker, reading any persisted snapshot from localStorage.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<StockTracker, JsValue> {
        let backend = LocalStorageBackend::from_window()?;
        Ok(StockTracker {
            service: InventoryService::load(backend),
        })
    }

    /// Current stock as a JSON array.
    pub fn lots(&self) -> Result<String, JsValue> {
        to_json(&self.service.lots())
    }

    /// Add a lot from a JSON object; returns the created lot as JSON.
    pub fn add_lot(&mut self, input_json: &str) -> Result<String, JsValue> {
        let input: NewLot = serde_json::from_str(input_json)
            .map_err(|err| js_err(&format!("invalid lot input: {}", err)))?;
        let mutated = self.service.add_lot(input).map_err(app_err)?;
        report_durability(&mutated.durability);
        to_json(&mutated.value)
    }

    /// Remove a lot by id; returns the updated collection as JSON.
    pub fn remove_lot(&mut self, id: u32) -> Result<String, JsValue> {
        let mutated = self.service.remove_lot(id);
        report_durability(&mutated.durability);
        to_json(&mutated.value)
    }

    /// Consume a fixed step ("quarter", "half", "three_quarter", "empty")
    /// from a lot; returns the updated lot as JSON.
    pub fn consume_step(&mut self, id: u32, step: &str) -> Result<String, JsValue> {
        let step: ConsumptionStep = step.parse().map_err(|err| js_err(&format!("{}", err)))?;
        let mutated = self.service.consume_step(id, step).map_err(app_err)?;
        report_durability(&mutated.durability);
        to_json(&mutated.value)
    }

    /// Consume a measured weight in kilograms from a lot; returns the
    /// updated lot as JSON.
    pub fn consume_weight(&mut self, id: u32, amount_kg: f64) -> Result<String, JsValue> {
        let amount =
            Decimal::try_from(amount_kg).map_err(|_| js_err("invalid consumption amount"))?;
        let mutated = self.service.consume_weight(id, amount).map_err(app_err)?;
        report_durability(&mutated.durability);
        to_json(&mutated.value)
    }

    /// Full consumption history as a JSON array, most recent first.
    pub fn history(&self) -> Result<String, JsValue> {
        to_json(&self.service.history())
    }

    /// The most recent history entries for one lot, up to `limit`.
    pub fn recent_for_lot(&self, id: u32, limit: usize) -> Result<String, JsValue> {
        to_json(&self.service.recent_for_lot(id, limit))
    }

    /// Undo the most recent mutation; returns the restored lot as JSON,
    /// or "null" when there was nothing to undo.
    pub fn undo_last(&mut self) -> Result<String, JsValue> {
        let mutated = self.service.undo_last();
        report_durability(&mutated.durability);
        to_json(&mutated.value)
    }
}

/// Display sort key for a RAL color label
#[wasm_bindgen]
pub fn ral_sort_key(label: &str) -> u32 {
    shared::validation::ral_sort_key(label)
}

/// Check a new lot's box count before submitting the form
#[wasm_bindgen]
pub fn validate_box_count(box_count: u32) -> bool {
    shared::validation::validate_box_count(box_count).is_ok()
}

/// Check a custom consumption amount before submitting the form
#[wasm_bindgen]
pub fn validate_consumption_amount(amount_kg: f64) -> bool {
    match Decimal::try_from(amount_kg) {
        Ok(amount) => shared::validation::validate_consumption_amount(amount).is_ok(),
        Err(_) => false,
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|err| js_err(&format!("serialization failed: {}", err)))
}

fn js_err(message: &str) -> JsValue {
    js_sys::Error::new(message).into()
}

fn app_err(err: AppError) -> JsValue {
    js_err(&err.to_string())
}

fn report_durability(durability: &Result<(), AppError>) {
    if let Err(err) = durability {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "snapshot write failed: {}",
            err
        )));
    }
}
