//! Specific (scoped) price reductions.

use crate::ids::SpecificPriceId;
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a specific price reduces the base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReductionType {
    Amount,
    Percentage,
}

impl ReductionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReductionType::Amount => "amount",
            ReductionType::Percentage => "percentage",
        }
    }
}

/// A price reduction scoped by country, customer, group, quantity or time.
///
/// `reduction_type` decides which of `amount_reduction` / `percent_reduction`
/// is meaningful; the other one is ignored even when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecificPrice {
    pub id: Option<SpecificPriceId>,
    pub country_id: Option<String>,
    pub customer_group_id: Option<String>,
    pub customer_id: Option<String>,
    pub from_quantity: Option<i64>,
    pub amount_reduction: Option<Decimal>,
    pub percent_reduction: Option<Decimal>,
    pub reduction_type: ReductionType,
    pub start_date: Option<DateTime<FixedOffset>>,
    pub end_date: Option<DateTime<FixedOffset>>,
}

impl SpecificPrice {
    /// An unscoped fixed-amount reduction.
    pub fn amount_off(amount: Decimal) -> Self {
        Self {
            id: None,
            country_id: None,
            customer_group_id: None,
            customer_id: None,
            from_quantity: None,
            amount_reduction: Some(amount),
            percent_reduction: None,
            reduction_type: ReductionType::Amount,
            start_date: None,
            end_date: None,
        }
    }

    /// The reduction selected by `reduction_type`.
    pub fn effective_reduction(&self) -> Option<Decimal> {
        match self.reduction_type {
            ReductionType::Amount => self.amount_reduction,
            ReductionType::Percentage => self.percent_reduction,
        }
    }

    /// Apply this reduction to a base price. Never goes below zero.
    pub fn apply(&self, price: Decimal) -> Decimal {
        let reduced = match (self.reduction_type, self.effective_reduction()) {
            (_, None) => price,
            (ReductionType::Amount, Some(amount)) => price - amount,
            (ReductionType::Percentage, Some(percent)) => {
                price - price * percent / Decimal::ONE_HUNDRED
            }
        };
        reduced.max(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_reduction() {
        let sp = SpecificPrice::amount_off(dec!(5.00));
        assert_eq!(sp.effective_reduction(), Some(dec!(5.00)));
        assert_eq!(sp.apply(dec!(25.00)), dec!(20.00));
    }

    #[test]
    fn test_percentage_reduction_ignores_amount() {
        let mut sp = SpecificPrice::amount_off(dec!(99));
        sp.reduction_type = ReductionType::Percentage;
        sp.percent_reduction = Some(dec!(10));
        assert_eq!(sp.effective_reduction(), Some(dec!(10)));
        assert_eq!(sp.apply(dec!(50.00)), dec!(45.00));
    }

    #[test]
    fn test_reduction_never_negative() {
        let sp = SpecificPrice::amount_off(dec!(30));
        assert_eq!(sp.apply(dec!(20)), Decimal::ZERO);
    }
}
