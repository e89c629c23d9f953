use rust_decimal::Decimal;

use super::{total, MONTHS_PER_YEAR};
use crate::models::IncomeSchedule;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct MonthBalance {
    pub(crate) expense: Decimal,
    pub(crate) income: Decimal,
    pub(crate) balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Balance {
    pub(crate) months: [MonthBalance; MONTHS_PER_YEAR],
    pub(crate) annual_income: Decimal,
    pub(crate) annual_expense: Decimal,
    pub(crate) annual_balance: Decimal,
    /// Percent of income left over; `None` when there is no income.
    pub(crate) savings_rate: Option<Decimal>,
}

impl Balance {
    pub(crate) fn deficit_months(&self) -> impl Iterator<Item = usize> + '_ {
        self.months
            .iter()
            .enumerate()
            .filter(|(_, m)| m.balance.is_sign_negative() && !m.balance.is_zero())
            .map(|(i, _)| i)
    }
}

pub(crate) fn balance(monthly: &[Decimal; MONTHS_PER_YEAR], income: &IncomeSchedule) -> Balance {
    let months = std::array::from_fn(|i| {
        let expense = monthly[i];
        let earned = income.month(i);
        MonthBalance {
            expense,
            income: earned,
            balance: earned.saturating_sub(expense),
        }
    });

    let annual_income = income.annual();
    let annual_expense = total(monthly);
    let annual_balance = annual_income.saturating_sub(annual_expense);

    Balance {
        months,
        annual_income,
        annual_expense,
        annual_balance,
        savings_rate: savings_rate(annual_income, annual_expense),
    }
}

pub(crate) fn savings_rate(income: Decimal, expense: Decimal) -> Option<Decimal> {
    if income <= Decimal::ZERO {
        return None;
    }
    let ratio = income.saturating_sub(expense).checked_div(income)?;
    Some(ratio.saturating_mul(Decimal::ONE_HUNDRED))
}
