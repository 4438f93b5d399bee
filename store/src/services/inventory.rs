//! Inventory store service
//!
//! Owns the stock lot collection and the consumption history. Weight is
//! the canonical quantity: both consumption entry points (fixed box steps
//! and measured weight) reduce to a weight delta, and the box count and
//! open-box fraction are re-derived from the remaining weight, so the
//! displayable-weight breakdown holds after every mutation.

use chrono::{NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shared::models::{
    box_weight, ConsumptionEntry, ConsumptionKind, ConsumptionStep, StockLot,
};
use shared::validation::{validate_box_count, validate_consumption_amount};

use crate::error::{AppError, AppResult};
use crate::services::history::ConsumptionHistory;
use crate::storage::{KvBackend, HISTORY_KEY, LOTS_KEY};

/// Outcome of a mutation together with the durability of its write-back
///
/// The in-memory mutation always wins: `durability` reports whether the
/// snapshot write succeeded, and callers choose whether to surface a
/// failure. State is never rolled back on a failed write.
#[derive(Debug)]
#[must_use]
pub struct Mutated<T> {
    pub value: T,
    pub durability: Result<(), AppError>,
}

/// Input for creating a stock lot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLot {
    pub ral_color: String,
    pub lacquer_type: String,
    pub brand: String,
    pub box_count: u32,
    pub expiry_date: Option<NaiveDate>,
}

/// Inventory store: the single owner of the lot collection and history
///
/// Constructed once per process via [`InventoryService::load`]; all reads
/// and mutations go through this handle.
pub struct InventoryService<B: KvBackend> {
    backend: B,
    lots: Vec<StockLot>,
    history: ConsumptionHistory,
}

impl<B: KvBackend> InventoryService<B> {
    /// Construct the store from the persisted snapshot, read exactly once.
    ///
    /// A missing or malformed lots snapshot falls back to the built-in
    /// seed stock; a missing or malformed history snapshot falls back to
    /// an empty history.
    pub fn load(backend: B) -> Self {
        let lots =
            Self::read_snapshot::<Vec<StockLot>>(&backend, LOTS_KEY).unwrap_or_else(seed_lots);
        let history = Self::read_snapshot::<Vec<ConsumptionEntry>>(&backend, HISTORY_KEY)
            .map(ConsumptionHistory::from_entries)
            .unwrap_or_default();

        Self {
            backend,
            lots,
            history,
        }
    }

    fn read_snapshot<T: serde::de::DeserializeOwned>(backend: &B, key: &str) -> Option<T> {
        let raw = match backend.load(key) {
            Ok(raw) => raw?,
            Err(err) => {
                tracing::warn!("failed to read snapshot {}: {:#}", key, err);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!("malformed snapshot {}: {}", key, err);
                None
            }
        }
    }

    /// Current stock, in insertion order.
    pub fn lots(&self) -> &[StockLot] {
        &self.lots
    }

    /// Create a new lot with a fresh id and a full-box weight.
    pub fn add_lot(&mut self, input: NewLot) -> AppResult<Mutated<StockLot>> {
        validate_box_count(input.box_count).map_err(|message| AppError::Validation {
            field: "box_count".to_string(),
            message: message.to_string(),
        })?;

        let id = self.lots.iter().map(|lot| lot.id).max().unwrap_or(0) + 1;
        let lot = StockLot {
            id,
            ral_color: input.ral_color,
            lacquer_type: input.lacquer_type,
            brand: input.brand,
            weight_kg: Decimal::from(input.box_count) * box_weight(),
            box_count: input.box_count,
            fraction_used: Decimal::ZERO,
            expiry_date: input.expiry_date,
        };
        self.lots.push(lot.clone());
        tracing::debug!("added lot {} (RAL {})", lot.id, lot.ral_color);

        let durability = self.persist();
        Ok(Mutated {
            value: lot,
            durability,
        })
    }

    /// Remove a lot wholesale; a missing id is an idempotent no-op.
    pub fn remove_lot(&mut self, id: u32) -> Mutated<Vec<StockLot>> {
        self.lots.retain(|lot| lot.id != id);
        let durability = self.persist();
        Mutated {
            value: self.lots.clone(),
            durability,
        }
    }

    /// Consume a fixed fraction of a lot's open box.
    pub fn consume_step(&mut self, id: u32, step: ConsumptionStep) -> AppResult<Mutated<StockLot>> {
        self.consume(id, step.weight_kg(), ConsumptionKind::from(step), None)
    }

    /// Consume an arbitrary measured weight from a lot.
    pub fn consume_weight(&mut self, id: u32, amount_kg: Decimal) -> AppResult<Mutated<StockLot>> {
        validate_consumption_amount(amount_kg).map_err(|message| AppError::Validation {
            field: "amount_kg".to_string(),
            message: message.to_string(),
        })?;
        self.consume(id, amount_kg, ConsumptionKind::Custom, Some(amount_kg))
    }

    fn consume(
        &mut self,
        id: u32,
        amount_kg: Decimal,
        kind: ConsumptionKind,
        recorded_amount: Option<Decimal>,
    ) -> AppResult<Mutated<StockLot>> {
        let lot = self
            .lots
            .iter_mut()
            .find(|lot| lot.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Lot {}", id)))?;

        let prior_state = lot.clone();
        apply_consumption(lot, amount_kg);
        let updated = lot.clone();
        tracing::debug!(
            "consumed {} kg from lot {} ({} kg remaining)",
            amount_kg,
            id,
            updated.weight_kg
        );

        self.history.record(ConsumptionEntry {
            lot_id: id,
            prior_state,
            timestamp: Utc::now(),
            kind,
            amount_kg: recorded_amount,
        });

        let durability = self.persist();
        Ok(Mutated {
            value: updated,
            durability,
        })
    }

    /// Recorded mutations, most recent first.
    pub fn history(&self) -> &[ConsumptionEntry] {
        self.history.entries()
    }

    /// The most recent entries for one lot, up to `limit`.
    pub fn recent_for_lot(&self, lot_id: u32, limit: usize) -> Vec<&ConsumptionEntry> {
        self.history.for_lot(lot_id, limit)
    }

    /// Restore the state captured by the most recent history entry.
    ///
    /// Returns `None` when there is nothing to undo, or when the affected
    /// lot was deleted after the entry was recorded; the popped entry is
    /// discarded either way. Undo is single-level: a raw state overwrite,
    /// no merge and no redo.
    pub fn undo_last(&mut self) -> Mutated<Option<StockLot>> {
        let entry = match self.history.pop_latest() {
            Some(entry) => entry,
            None => {
                return Mutated {
                    value: None,
                    durability: Ok(()),
                }
            }
        };

        let restored = match self.lots.iter_mut().find(|lot| lot.id == entry.lot_id) {
            Some(lot) => {
                *lot = entry.prior_state.clone();
                Some(lot.clone())
            }
            None => {
                tracing::debug!("undo target lot {} no longer exists", entry.lot_id);
                None
            }
        };

        let durability = self.persist();
        Mutated {
            value: restored,
            durability,
        }
    }

    /// Write both snapshots; every mutation calls this after updating
    /// memory.
    fn persist(&mut self) -> Result<(), AppError> {
        let lots = serde_json::to_string(&self.lots)?;
        let history = serde_json::to_string(self.history.entries())?;
        self.backend
            .save(LOTS_KEY, &lots)
            .and_then(|_| self.backend.save(HISTORY_KEY, &history))
            .map_err(|err| {
                tracing::warn!("snapshot write failed: {:#}", err);
                AppError::Storage(format!("{:#}", err))
            })
    }
}

/// Apply a weight delta to a lot and re-derive the box/fraction breakdown.
///
/// Consumption floors at zero: a delta larger than the remaining weight
/// empties the lot. A remainder that is not a whole number of boxes becomes
/// the open box, with `fraction_used` expressing how much of it is gone.
fn apply_consumption(lot: &mut StockLot, amount_kg: Decimal) {
    let remaining = (lot.total_weight() - amount_kg).max(Decimal::ZERO);
    let rem = remaining % box_weight();

    lot.box_count = (remaining / box_weight()).trunc().to_u32().unwrap_or(0);
    lot.fraction_used = if rem > Decimal::ZERO {
        (box_weight() - rem) / box_weight()
    } else {
        Decimal::ZERO
    };
    lot.weight_kg = remaining;
}

/// Built-in stock used when no usable snapshot exists.
pub fn seed_lots() -> Vec<StockLot> {
    vec![
        seed_lot(1, "9016", "mat", "Protech", 5, Some("2025-12-31")),
        seed_lot(2, "9005", "glans", "Tiger", 2, None),
        seed_lot(3, "7016", "structuur", "Sherwin-Williams", 8, Some("2026-01-15")),
        seed_lot(4, "9001", "mat", "Sherwin-Williams", 6, None),
        seed_lot(5, "9016", "glans", "Protech", 4, None),
    ]
}

fn seed_lot(
    id: u32,
    ral_color: &str,
    lacquer_type: &str,
    brand: &str,
    box_count: u32,
    expiry_date: Option<&str>,
) -> StockLot {
    StockLot {
        id,
        ral_color: ral_color.to_string(),
        lacquer_type: lacquer_type.to_string(),
        brand: brand.to_string(),
        weight_kg: Decimal::from(box_count) * box_weight(),
        box_count,
        fraction_used: Decimal::ZERO,
        expiry_date: expiry_date.and_then(|date| date.parse().ok()),
    }
}
