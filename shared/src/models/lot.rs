//! Stock lot model for powder-coating paint inventory

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Nominal weight of one unopened powder box in kilograms.
pub const BOX_WEIGHT_KG: u32 = 20;

/// The nominal box weight as a decimal quantity.
pub fn box_weight() -> Decimal {
    Decimal::from(BOX_WEIGHT_KG)
}

/// A tracked quantity of one RAL-color/lacquer/brand powder coating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLot {
    pub id: u32,
    /// RAL color code (e.g., "9016"); free text at the data layer
    pub ral_color: String,
    pub lacquer_type: String,
    pub brand: String,
    /// Total remaining weight; equals the box/fraction breakdown after
    /// every mutation
    pub weight_kg: Decimal,
    /// Full, unopened boxes remaining
    pub box_count: u32,
    /// Portion of the currently open box already consumed, in [0, 1);
    /// zero when no box is open
    pub fraction_used: Decimal,
    pub expiry_date: Option<NaiveDate>,
}

impl StockLot {
    /// Weight left in the currently open box; zero when none is open.
    pub fn open_box_remaining_kg(&self) -> Decimal {
        if self.fraction_used > Decimal::ZERO {
            (Decimal::ONE - self.fraction_used) * box_weight()
        } else {
            Decimal::ZERO
        }
    }

    /// Total weight implied by the box count plus the open-box remainder.
    pub fn total_weight(&self) -> Decimal {
        Decimal::from(self.box_count) * box_weight() + self.open_box_remaining_kg()
    }
}

/// Fixed consumption increments applied to the currently open box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumptionStep {
    Quarter,
    Half,
    ThreeQuarter,
    Empty,
}

impl ConsumptionStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsumptionStep::Quarter => "quarter",
            ConsumptionStep::Half => "half",
            ConsumptionStep::ThreeQuarter => "three_quarter",
            ConsumptionStep::Empty => "empty",
        }
    }

    /// Fraction of one box consumed by this step.
    pub fn fraction(&self) -> Decimal {
        match self {
            ConsumptionStep::Quarter => Decimal::new(25, 2),
            ConsumptionStep::Half => Decimal::new(5, 1),
            ConsumptionStep::ThreeQuarter => Decimal::new(75, 2),
            ConsumptionStep::Empty => Decimal::ONE,
        }
    }

    /// Weight delta this step removes from a lot.
    pub fn weight_kg(&self) -> Decimal {
        self.fraction() * box_weight()
    }
}

impl std::fmt::Display for ConsumptionStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a consumption step label is not recognized
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown consumption step: {0}")]
pub struct ParseStepError(pub String);

impl std::str::FromStr for ConsumptionStep {
    type Err = ParseStepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quarter" => Ok(ConsumptionStep::Quarter),
            "half" => Ok(ConsumptionStep::Half),
            "three_quarter" => Ok(ConsumptionStep::ThreeQuarter),
            "empty" => Ok(ConsumptionStep::Empty),
            other => Err(ParseStepError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lot(box_count: u32, fraction_used: Decimal) -> StockLot {
        StockLot {
            id: 1,
            ral_color: "9016".to_string(),
            lacquer_type: "mat".to_string(),
            brand: "Protech".to_string(),
            weight_kg: Decimal::ZERO,
            box_count,
            fraction_used,
            expiry_date: None,
        }
    }

    #[test]
    fn test_total_weight_full_boxes_only() {
        assert_eq!(lot(5, Decimal::ZERO).total_weight(), Decimal::from(100));
    }

    #[test]
    fn test_total_weight_with_open_box() {
        // 2 full boxes plus half of an open box left
        let l = lot(2, Decimal::new(5, 1));
        assert_eq!(l.total_weight(), Decimal::from(50));
        assert_eq!(l.open_box_remaining_kg(), Decimal::from(10));
    }

    #[test]
    fn test_step_weights() {
        assert_eq!(ConsumptionStep::Quarter.weight_kg(), Decimal::from(5));
        assert_eq!(ConsumptionStep::Half.weight_kg(), Decimal::from(10));
        assert_eq!(ConsumptionStep::ThreeQuarter.weight_kg(), Decimal::from(15));
        assert_eq!(ConsumptionStep::Empty.weight_kg(), Decimal::from(20));
    }

    #[test]
    fn test_step_parsing() {
        assert_eq!("quarter".parse(), Ok(ConsumptionStep::Quarter));
        assert_eq!("three_quarter".parse(), Ok(ConsumptionStep::ThreeQuarter));
        assert!("driekwart".parse::<ConsumptionStep>().is_err());
    }

    #[test]
    fn test_step_labels_round_trip() {
        for step in [
            ConsumptionStep::Quarter,
            ConsumptionStep::Half,
            ConsumptionStep::ThreeQuarter,
            ConsumptionStep::Empty,
        ] {
            assert_eq!(step.as_str().parse(), Ok(step));
        }
    }
}
