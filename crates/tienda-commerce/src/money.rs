//! Chilean peso amounts.
//!
//! CLP has no minor unit, so amounts are whole pesos held in a `u64`.
//! Arithmetic saturates instead of wrapping: a cart total can never be
//! negative and an absurd quantity pins at `u64::MAX` rather than panicking.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;

/// An amount of Chilean pesos.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Clp(u64);

impl Clp {
    /// Zero pesos.
    pub const ZERO: Clp = Clp(0);

    /// Create an amount from whole pesos.
    pub const fn new(pesos: u64) -> Self {
        Self(pesos)
    }

    /// Whole pesos.
    pub const fn pesos(self) -> u64 {
        self.0
    }

    /// Price of `quantity` units at this unit price.
    pub fn line_total(self, quantity: u32) -> Clp {
        Clp(self.0.saturating_mul(u64::from(quantity)))
    }

    /// Saturating addition.
    pub fn saturating_add(self, other: Clp) -> Clp {
        Clp(self.0.saturating_add(other.0))
    }

    /// Format like the es-CL locale: `$` prefix, `.` thousands separator,
    /// no decimals (e.g. `$11.000`).
    pub fn display(self) -> String {
        let digits = self.0.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        out.push('$');
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push('.');
            }
            out.push(c);
        }
        out
    }
}

impl Sum for Clp {
    fn sum<I: Iterator<Item = Clp>>(iter: I) -> Clp {
        iter.fold(Clp::ZERO, Clp::saturating_add)
    }
}

impl fmt::Display for Clp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}
