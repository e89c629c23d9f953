use std::collections::HashMap;

use rust_decimal::Decimal;

use super::distribute::distribute;
use super::{total, MONTHS_PER_YEAR};
use crate::models::{swatch_for, Expense, Swatch};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryTotal {
    pub(crate) name: String,
    pub(crate) annual: Decimal,
    pub(crate) swatch: Swatch,
}

/// Year-level view of the whole expense list.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Aggregate {
    pub(crate) monthly: [Decimal; MONTHS_PER_YEAR],
    /// Largest first; ties keep the order categories were first seen in.
    pub(crate) categories: Vec<CategoryTotal>,
    pub(crate) annual: Decimal,
}

impl Aggregate {
    pub(crate) fn average_monthly(&self) -> Decimal {
        self.annual / Decimal::from(MONTHS_PER_YEAR)
    }

    /// Share of the annual total, in percent. `None` for an empty plan.
    pub(crate) fn share(&self, amount: Decimal) -> Option<Decimal> {
        if self.annual.is_zero() {
            return None;
        }
        Some(amount / self.annual * Decimal::ONE_HUNDRED)
    }

    pub(crate) fn peak_month(&self) -> Option<usize> {
        if self.annual.is_zero() {
            return None;
        }
        let mut best = 0;
        for (i, v) in self.monthly.iter().enumerate() {
            if *v > self.monthly[best] {
                best = i;
            }
        }
        Some(best)
    }
}

pub(crate) fn aggregate(expenses: &[Expense]) -> Aggregate {
    let mut monthly = [Decimal::ZERO; MONTHS_PER_YEAR];
    let mut categories: Vec<CategoryTotal> = Vec::new();
    let mut seen: HashMap<&str, usize> = HashMap::new();

    for expense in expenses {
        let months = distribute(expense);
        let annual = total(&months);
        for (sum, amount) in monthly.iter_mut().zip(months) {
            *sum = sum.saturating_add(amount);
        }

        let idx = *seen.entry(expense.category.as_str()).or_insert_with(|| {
            categories.push(CategoryTotal {
                name: expense.category.clone(),
                annual: Decimal::ZERO,
                swatch: swatch_for(categories.len()),
            });
            categories.len() - 1
        });
        categories[idx].annual = categories[idx].annual.saturating_add(annual);
    }

    // sort_by is stable, so equal totals stay in first-seen order
    categories.sort_by(|a, b| b.annual.cmp(&a.annual));

    Aggregate {
        annual: total(&monthly),
        monthly,
        categories,
    }
}
