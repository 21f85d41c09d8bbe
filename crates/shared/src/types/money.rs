//! Peso amounts with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Symbol shown in front of formatted amounts.
pub const PESO_SIGN: &str = "₱";

/// A peso amount.
///
/// Uses `Decimal` internally to avoid floating-point precision errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money {
    /// The amount in pesos.
    pub amount: Decimal,
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self { amount }
    }

    /// Creates a zero amount.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(Decimal::ZERO)
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }
}

/// Formats as `en-PH` currency: `₱1,234.50`, `-₱12.00`.
impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered = fixed(self.amount.abs(), 2);
        let (whole, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));
        let sign = if self.is_negative() && rendered != "0.00" {
            "-"
        } else {
            ""
        };
        write!(
            f,
            "{sign}{PESO_SIGN}{}.{fraction}",
            group_thousands(whole)
        )
    }
}

/// Rounds half away from zero, matching how amounts are shown to users.
#[must_use]
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Renders `value` with exactly `dp` fraction digits (`1000` -> `"1000.00"`).
///
/// Near `Decimal::MAX` the value cannot carry `dp` digits of scale, so the
/// missing zeros are appended to the text.
#[must_use]
pub fn fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = round_half_up(value, dp);
    rounded.rescale(dp);
    let mut rendered = rounded.to_string();

    let present = rendered.split_once('.').map_or(0, |(_, fraction)| fraction.len());
    let missing = usize::try_from(dp).unwrap_or_default().saturating_sub(present);
    if missing > 0 {
        if present == 0 {
            rendered.push('.');
        }
        rendered.extend(std::iter::repeat_n('0', missing));
    }
    rendered
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
