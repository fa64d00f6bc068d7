//! Cash denomination models.
//!
//! This module defines the [`Denomination`] and [`Breakdown`] types used to
//! describe a physical cash count as (bill value, count) pairs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A number of bills of a single value.
///
/// # Example
///
/// ```
/// use teller_shift_engine::models::Denomination;
/// use rust_decimal::Decimal;
///
/// let twenties = Denomination::new(20, 7);
/// assert_eq!(twenties.subtotal(), Decimal::from(140));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Denomination {
    /// The face value of the bill (e.g., 20).
    pub value: u32,
    /// How many bills of this value were counted. Negative counts are
    /// representable so that they can be rejected by validation.
    pub count: i64,
}

impl Denomination {
    /// Creates a new denomination entry.
    pub fn new(value: u32, count: i64) -> Self {
        Self { value, count }
    }

    /// Returns `value × count`.
    pub fn subtotal(&self) -> Decimal {
        Decimal::from(self.value) * Decimal::from(self.count)
    }
}

/// An ordered cash count.
///
/// Serializes as a plain JSON array of [`Denomination`] objects. A breakdown
/// is never mutated once attached to a shift or ledger entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Breakdown(Vec<Denomination>);

impl Breakdown {
    /// Creates a breakdown from its entries, preserving their order.
    pub fn new(entries: Vec<Denomination>) -> Self {
        Self(entries)
    }

    /// Returns the entries in their original order.
    pub fn entries(&self) -> &[Denomination] {
        &self.0
    }

    /// Returns true if the breakdown has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the monetary total of the breakdown.
    ///
    /// # Examples
    ///
    /// ```
    /// use teller_shift_engine::models::{Breakdown, Denomination};
    /// use rust_decimal::Decimal;
    ///
    /// let breakdown = Breakdown::from(vec![Denomination::new(100, 3), Denomination::new(50, 4)]);
    /// assert_eq!(breakdown.total(), Decimal::from(500));
    /// assert_eq!(Breakdown::default().total(), Decimal::ZERO);
    /// ```
    pub fn total(&self) -> Decimal {
        self.0.iter().map(Denomination::subtotal).sum()
    }
}

impl From<Vec<Denomination>> for Breakdown {
    fn from(entries: Vec<Denomination>) -> Self {
        Self::new(entries)
    }
}

impl FromIterator<(u32, i64)> for Breakdown {
    fn from_iter<I: IntoIterator<Item = (u32, i64)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(value, count)| Denomination::new(value, count))
                .collect(),
        )
    }
}
