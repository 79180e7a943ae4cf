//! # kpool Precision - Decimal Rendering for Pool Quantities
//!
//! ## Purpose
//!
//! Stateless helpers that turn `f64` reserves, prices and invariants into
//! strings, and truncate them to an asset pair's decimal precision. The pool
//! model keeps its state in `f64`; every place that needs an exact decimal view
//! of those floats goes through this crate.
//!
//! ## Rendering Modes
//!
//! - **Minimal**: fewest digits that round-trip the float (`1.0 -> "1"`,
//!   `1.1 -> "1.1"`). Used for display and logging of pool state.
//! - **Fixed truncated**: cut at `precision` decimals toward zero, then render
//!   exactly `precision` digits after the point (`1.239 @ 2 -> "1.23"`).
//!
//! ## Truncation Model
//!
//! A float is first read as the decimal it prints as (its shortest round-trip
//! form), then truncated in [`Decimal`] space and converted back. Truncating
//! the binary value directly would leak representation error into the digits
//! that are kept (`0.29` is stored as `0.28999...`).
//!
//! Values a [`Decimal`] cannot hold (NaN, infinities, magnitudes beyond
//! ~7.9e28) pass through unchanged.
//!
//! ```rust
//! use kpool_precision::{format_fixed_truncated, format_minimal, truncate_to_precision};
//!
//! assert_eq!(format_minimal(1.0), "1");
//! assert_eq!(format_fixed_truncated(1.239, 2), "1.23");
//! assert_eq!(truncate_to_precision(104326.666821041, 0), 104326.0);
//! ```

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Largest fractional scale a [`Decimal`] can carry
pub const MAX_DECIMAL_SCALE: u32 = 28;

/// Render `value` with the fewest digits that parse back to the same float
///
/// Integral values carry no decimal point and no trailing zeros.
pub fn format_minimal(value: f64) -> String {
    value.to_string()
}

/// Truncate `value` toward zero at `precision` decimal places
///
/// Precisions above [`MAX_DECIMAL_SCALE`] keep every digit the decimal view
/// has. Non-representable values are returned as-is.
pub fn truncate_to_precision(value: f64, precision: u32) -> f64 {
    match to_decimal(value) {
        Some(decimal) => truncate_decimal(decimal, precision)
            .to_string()
            .parse::<f64>()
            .unwrap_or(value),
        None => value,
    }
}

/// Truncate `value` at `precision` decimals and render exactly `precision`
/// fractional digits, zero padded
///
/// A `precision` of zero renders the integer part without a decimal point.
/// Non-representable values fall back to [`format_minimal`].
pub fn format_fixed_truncated(value: f64, precision: u32) -> String {
    match to_decimal(value) {
        Some(decimal) => {
            let truncated = truncate_decimal(decimal, precision);
            pad_fraction(truncated.to_string(), precision)
        }
        None => format_minimal(value),
    }
}

/// Extend the fractional part of a rendered decimal to `precision` digits
///
/// Padding happens on the string: `Decimal`'s own width formatting has a
/// fixed-size buffer and cannot carry wide precisions.
fn pad_fraction(rendered: String, precision: u32) -> String {
    let precision = precision as usize;
    if precision == 0 {
        return rendered;
    }

    let (whole, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    format!("{whole}.{fraction:0<precision$}")
}

/// Batch form of [`format_fixed_truncated`], output order matches input order
pub fn format_many_fixed_truncated(values: &[f64], precision: u32) -> Vec<String> {
    values
        .iter()
        .map(|value| format_fixed_truncated(*value, precision))
        .collect()
}

/// Decimal view of a float, read from its shortest round-trip text
///
/// Fractional digits past [`MAX_DECIMAL_SCALE`] are cut from the text before
/// parsing; `Decimal::from_str` would otherwise round them into the last kept
/// digit.
fn to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }

    let text = format_minimal(value);
    let scale = MAX_DECIMAL_SCALE as usize;
    let text = match text.split_once('.') {
        Some((whole, fraction)) if fraction.len() > scale => {
            format!("{whole}.{}", &fraction[..scale])
        }
        _ => text,
    };

    Decimal::from_str(&text)
        .ok()
        .or_else(|| Decimal::from_f64(value))
}

fn truncate_decimal(value: Decimal, precision: u32) -> Decimal {
    value.round_dp_with_strategy(precision.min(MAX_DECIMAL_SCALE), RoundingStrategy::ToZero)
}
