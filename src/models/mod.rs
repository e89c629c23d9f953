mod category;
mod expense;
mod income;
mod month;
mod theme;

pub(crate) use category::{
    find_by_name, swatch_for, Swatch, BUILTIN_CATEGORIES, CATEGORY_PALETTE, DEFAULT_CATEGORY,
};
pub(crate) use expense::{Expense, ExpenseDraft, Frequency};
pub(crate) use income::IncomeSchedule;
pub(crate) use month::{parse_month, MONTHS, SHORT_MONTHS};
pub(crate) use theme::ThemeMode;

#[cfg(test)]
mod tests;
