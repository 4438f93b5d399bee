//! Consumption history models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ConsumptionStep, StockLot};

/// A recorded stock mutation, kept for undo and recent-activity display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionEntry {
    pub lot_id: u32,
    /// Full copy of the lot before the mutation; undo restores this state
    pub prior_state: StockLot,
    pub timestamp: DateTime<Utc>,
    pub kind: ConsumptionKind,
    /// Weight delta in kilograms, present only for custom consumptions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_kg: Option<Decimal>,
}

/// What kind of mutation a history entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumptionKind {
    Quarter,
    Half,
    ThreeQuarter,
    Empty,
    Custom,
}

impl ConsumptionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsumptionKind::Quarter => "quarter",
            ConsumptionKind::Half => "half",
            ConsumptionKind::ThreeQuarter => "three_quarter",
            ConsumptionKind::Empty => "empty",
            ConsumptionKind::Custom => "custom",
        }
    }
}

impl From<ConsumptionStep> for ConsumptionKind {
    fn from(step: ConsumptionStep) -> Self {
        match step {
            ConsumptionStep::Quarter => ConsumptionKind::Quarter,
            ConsumptionStep::Half => ConsumptionKind::Half,
            ConsumptionStep::ThreeQuarter => ConsumptionKind::ThreeQuarter,
            ConsumptionStep::Empty => ConsumptionKind::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;

    fn entry(kind: ConsumptionKind, amount_kg: Option<Decimal>) -> ConsumptionEntry {
        ConsumptionEntry {
            lot_id: 2,
            prior_state: StockLot {
                id: 2,
                ral_color: "9005".to_string(),
                lacquer_type: "glans".to_string(),
                brand: "Tiger".to_string(),
                weight_kg: Decimal::from(40),
                box_count: 2,
                fraction_used: Decimal::ZERO,
                expiry_date: Some("2026-01-15".parse().unwrap()),
            },
            timestamp: Utc::now(),
            kind,
            amount_kg,
        }
    }

    #[test]
    fn test_entry_round_trips_through_json() {
        let original = entry(ConsumptionKind::Custom, Some(Decimal::new(25, 1)));

        let json = serde_json::to_string(&original).unwrap();
        let restored: ConsumptionEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, original);
    }

    #[test]
    fn test_step_entry_omits_amount_field() {
        let json = serde_json::to_string(&entry(ConsumptionKind::ThreeQuarter, None)).unwrap();

        assert!(json.contains("\"three_quarter\""));
        assert!(!json.contains("amount_kg"));
    }

    #[test]
    fn test_missing_amount_field_deserializes_as_none() {
        let json = serde_json::to_string(&entry(ConsumptionKind::Half, None)).unwrap();
        let restored: ConsumptionEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.amount_kg, None);
    }
}
