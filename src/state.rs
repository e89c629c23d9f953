use crate::engine::{self, Aggregate, Balance, CategoryTotal, MonthlyAllocation};
use crate::models::{Expense, ExpenseDraft, IncomeSchedule, ThemeMode, BUILTIN_CATEGORIES};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub(crate) enum StateError {
    #[error("No expense with id '{0}'")]
    NotFound(String),
    #[error("Id prefix '{0}' matches {1} expenses, type more of it")]
    Ambiguous(String, usize),
}

/// Everything the user has entered. Front ends own one of these, mutate it
/// through the methods below and persist the touched key afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct BudgetState {
    pub(crate) expenses: Vec<Expense>,
    pub(crate) custom_categories: Vec<String>,
    pub(crate) income: IncomeSchedule,
    pub(crate) theme: ThemeMode,
}

impl BudgetState {
    pub(crate) fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub(crate) fn add_expense(&mut self, draft: ExpenseDraft) -> &Expense {
        self.expenses.push(Expense::new(draft));
        let last = self.expenses.len() - 1;
        &self.expenses[last]
    }

    /// Replace every field of an existing expense, keeping its id.
    pub(crate) fn update_expense(
        &mut self,
        id: &str,
        draft: ExpenseDraft,
    ) -> Result<&Expense, StateError> {
        let idx = self
            .expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| StateError::NotFound(id.to_string()))?;
        self.expenses[idx] = draft.into_expense(id.to_string());
        Ok(&self.expenses[idx])
    }

    /// Remove an expense. No confirmation here; unknown ids are ignored.
    pub(crate) fn delete_expense(&mut self, id: &str) -> Option<Expense> {
        let idx = self.expenses.iter().position(|e| e.id == id)?;
        Some(self.expenses.remove(idx))
    }

    /// Look up by full id, or by a prefix that matches exactly one expense.
    pub(crate) fn find_expense(&self, id_or_prefix: &str) -> Result<&Expense, StateError> {
        let needle = id_or_prefix.trim();
        if let Some(e) = self.expenses.iter().find(|e| e.id == needle) {
            return Ok(e);
        }
        if needle.is_empty() {
            return Err(StateError::NotFound(needle.to_string()));
        }
        let matches: Vec<&Expense> = self
            .expenses
            .iter()
            .filter(|e| e.id.starts_with(needle))
            .collect();
        match matches.as_slice() {
            [one] => Ok(one),
            [] => Err(StateError::NotFound(needle.to_string())),
            many => Err(StateError::Ambiguous(needle.to_string(), many.len())),
        }
    }

    pub(crate) fn summary(&self) -> Aggregate {
        engine::aggregate(&self.expenses)
    }

    pub(crate) fn monthly_totals(&self) -> MonthlyAllocation {
        self.summary().monthly
    }

    pub(crate) fn category_totals(&self) -> Vec<CategoryTotal> {
        self.summary().categories
    }

    pub(crate) fn balance(&self, income: &IncomeSchedule) -> Balance {
        engine::balance(&self.monthly_totals(), income)
    }

    /// Built-in categories followed by the user's own, in the order added.
    pub(crate) fn categories(&self) -> Vec<&str> {
        BUILTIN_CATEGORIES
            .iter()
            .copied()
            .chain(self.custom_categories.iter().map(String::as_str))
            .collect()
    }

    /// Totals for categories used by expenses but missing from
    /// `categories()`, such as the load-time fallback or free text from
    /// storage. Largest first.
    pub(crate) fn unlisted_categories(&self) -> Vec<CategoryTotal> {
        let listed = self.categories();
        self.category_totals()
            .into_iter()
            .filter(|t| !listed.contains(&t.name.as_str()))
            .collect()
    }

    /// Returns true when the category was added. Blank names and exact
    /// duplicates are ignored; "pets" and "Pets" are different categories.
    pub(crate) fn add_category(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.categories().contains(&name) {
            return false;
        }
        self.custom_categories.push(name.to_string());
        true
    }

    pub(crate) fn income(&self) -> &IncomeSchedule {
        &self.income
    }

    pub(crate) fn set_income(&mut self, income: IncomeSchedule) {
        self.income = income;
    }

    pub(crate) fn income_mut(&mut self) -> &mut IncomeSchedule {
        &mut self.income
    }

    pub(crate) fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub(crate) fn set_theme(&mut self, theme: ThemeMode) {
        self.theme = theme;
    }

    pub(crate) fn toggle_theme(&mut self) -> ThemeMode {
        self.theme = self.theme.toggled();
        self.theme
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
