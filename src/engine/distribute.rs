use rust_decimal::Decimal;

use super::{total, MONTHS_PER_YEAR};
use crate::models::{Expense, Frequency};

/// Amount falling due in each month, January first.
pub(crate) type MonthlyAllocation = [Decimal; MONTHS_PER_YEAR];

/// Spread one expense over the calendar year.
///
/// The full `amount` lands on every occurrence. Quarterly expenses recur
/// every third month from the anchor and stop at December, so an anchor
/// late in the year yields fewer than four payments. Anchors outside
/// 0..=11 put nothing on the calendar for yearly and one-time expenses.
pub(crate) fn distribute(expense: &Expense) -> MonthlyAllocation {
    let mut months = [Decimal::ZERO; MONTHS_PER_YEAR];
    let start = expense.start_month();

    match expense.frequency {
        Frequency::Monthly => months = [expense.amount; MONTHS_PER_YEAR],
        Frequency::Quarterly => {
            // A negative anchor still steps by three; the first in-range hit
            // is the anchor's remainder.
            let first = if start < 0 { start.rem_euclid(3) } else { start };
            if let Ok(first) = usize::try_from(first) {
                for slot in months.iter_mut().skip(first).step_by(3) {
                    *slot = expense.amount;
                }
            }
        }
        Frequency::Yearly | Frequency::OneTime => {
            if let Some(slot) = usize::try_from(start).ok().and_then(|i| months.get_mut(i)) {
                *slot = expense.amount;
            }
        }
    }

    months
}

/// Total the expense contributes over the year.
pub(crate) fn annual_total(expense: &Expense) -> Decimal {
    total(&distribute(expense))
}
