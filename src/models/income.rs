use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Expected income for each month of the year, January first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct IncomeSchedule([Decimal; 12]);

impl IncomeSchedule {
    /// The same figure for every month.
    pub(crate) fn flat(monthly: Decimal) -> Self {
        Self([monthly; 12])
    }

    pub(crate) fn months(&self) -> &[Decimal; 12] {
        &self.0
    }

    pub(crate) fn month(&self, index: usize) -> Decimal {
        self.0.get(index).copied().unwrap_or_default()
    }

    pub(crate) fn set_month(&mut self, index: usize, value: Decimal) {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = value;
        }
    }

    /// Copy January's figure into every other month.
    pub(crate) fn copy_first_to_all(&mut self) {
        self.0 = [self.0[0]; 12];
    }

    pub(crate) fn annual(&self) -> Decimal {
        self.0
            .iter()
            .fold(Decimal::ZERO, |acc, v| acc.saturating_add(*v))
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.0.iter().all(|m| m.is_zero())
    }
}
