//! Validation utilities for the Powder Stock Tracker
//!
//! Field-level checks applied at the UI boundary before a mutation is
//! issued, plus the display sort key for RAL color labels.

use rust_decimal::Decimal;

// ============================================================================
// Stock Validations
// ============================================================================

/// Validate that a new lot starts with at least one box
pub fn validate_box_count(box_count: u32) -> Result<(), &'static str> {
    if box_count < 1 {
        return Err("Box count must be at least 1");
    }
    Ok(())
}

/// Validate a custom consumption amount (weight in kg)
pub fn validate_consumption_amount(amount_kg: Decimal) -> Result<(), &'static str> {
    if amount_kg <= Decimal::ZERO {
        return Err("Consumption amount must be positive");
    }
    Ok(())
}

/// Validate a RAL color label is present
pub fn validate_ral_color(ral: &str) -> Result<(), &'static str> {
    if ral.trim().is_empty() {
        return Err("RAL color is required");
    }
    Ok(())
}

/// Validate a required free-text field (lacquer type, brand)
pub fn validate_required(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err("Field is required");
    }
    Ok(())
}

// ============================================================================
// Display Ordering
// ============================================================================

/// Sort key for RAL color labels: the first run of 4 digits in the label
/// (e.g. "RAL 9005 mat" => 9005). Labels without one sort last.
pub fn ral_sort_key(label: &str) -> u32 {
    let bytes = label.as_bytes();
    let mut run = 0;
    for (i, b) in bytes.iter().enumerate() {
        if b.is_ascii_digit() {
            run += 1;
            if run == 4 {
                let start = i + 1 - 4;
                return label[start..=i].parse().unwrap_or(u32::MAX);
            }
        } else {
            run = 0;
        }
    }
    u32::MAX
}
