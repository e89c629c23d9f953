//! Pure calculations over the expense list: how each expense lands on the
//! calendar, the per-month and per-category totals, and the balance
//! against income.

use rust_decimal::Decimal;

mod aggregate;
mod balance;
mod distribute;

pub(crate) use aggregate::{aggregate, Aggregate, CategoryTotal};
pub(crate) use balance::{balance, Balance};
pub(crate) use distribute::{annual_total, distribute, MonthlyAllocation};

pub(crate) const MONTHS_PER_YEAR: usize = 12;

/// Sum that clamps at `Decimal::MAX` instead of panicking. Input caps keep
/// real plans far from the limit, but stored data is not re-validated.
pub(crate) fn total<'a>(values: impl IntoIterator<Item = &'a Decimal>) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(*v))
}

#[cfg(test)]
mod tests;
