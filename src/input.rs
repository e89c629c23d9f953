//! Parsing and validation of expense fields typed on the command line or
//! into the dashboard's command bar. Nothing past this module sees an
//! unvalidated amount.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::models::{self, find_by_name, Expense, ExpenseDraft, Frequency, DEFAULT_CATEGORY};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub(crate) enum InputError {
    #[error("Name is required")]
    MissingName,
    #[error("Amount is required (amount=<n>)")]
    MissingAmount,
    #[error("Invalid amount '{0}': must be a number greater than 0")]
    InvalidAmount(String),
    #[error("Amount '{0}' is too large (limit 1,000,000,000,000,000)")]
    AmountTooLarge(String),
    #[error("Unknown frequency '{0}' (monthly, quarterly, yearly, one-time)")]
    UnknownFrequency(String),
    #[error("Unknown month '{0}' (1-12, a month name, or 'default')")]
    UnknownMonth(String),
    #[error("Unknown category '{0}'. Add it first with :category")]
    UnknownCategory(String),
    #[error("Unknown field '{0}' (name, amount, freq, category, month)")]
    UnknownField(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Amount,
    Frequency,
    Category,
    Month,
}

impl Field {
    fn parse(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "name" | "n" => Some(Self::Name),
            "amount" | "amt" | "a" => Some(Self::Amount),
            "freq" | "frequency" | "f" => Some(Self::Frequency),
            "category" | "cat" | "c" => Some(Self::Category),
            "month" | "m" => Some(Self::Month),
            _ => None,
        }
    }
}

/// Raw `key=value` fields, not yet validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FieldArgs {
    pub(crate) name: Option<String>,
    pub(crate) amount: Option<String>,
    pub(crate) frequency: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) month: Option<String>,
}

impl FieldArgs {
    /// Words before the first `key=value` form the name. A bare word after
    /// a field continues that field's value, so `category=Eating Out` works.
    pub(crate) fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self, InputError> {
        let mut args = Self::default();
        let mut current = Field::Name;

        for token in tokens {
            let token = token.as_ref();
            match token.split_once('=') {
                Some((key, value)) => {
                    current = Field::parse(key)
                        .ok_or_else(|| InputError::UnknownField(key.to_string()))?;
                    *args.slot(current) = Some(value.to_string());
                }
                None => {
                    let slot = args.slot(current);
                    match slot {
                        Some(existing) if !existing.is_empty() => {
                            existing.push(' ');
                            existing.push_str(token);
                        }
                        _ => *slot = Some(token.to_string()),
                    }
                }
            }
        }

        Ok(args)
    }

    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Name => &mut self.name,
            Field::Amount => &mut self.amount,
            Field::Frequency => &mut self.frequency,
            Field::Category => &mut self.category,
            Field::Month => &mut self.month,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Largest amount or monthly income accepted from the user (10^15). Twelve
/// months of any realistic number of such expenses stay far inside
/// `Decimal`'s range.
pub(crate) const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Parse a positive amount. Thousands separators are allowed.
pub(crate) fn parse_amount(s: &str) -> Result<Decimal, InputError> {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
    match Decimal::from_str(&cleaned) {
        Ok(v) if v > MAX_AMOUNT => Err(InputError::AmountTooLarge(s.trim().to_string())),
        Ok(v) if v > Decimal::ZERO => Ok(v),
        _ => Err(InputError::InvalidAmount(s.trim().to_string())),
    }
}

/// `None` for the default anchor (January), otherwise the 0-based month.
pub(crate) fn parse_month(s: &str) -> Result<Option<i32>, InputError> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("default") || s.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    models::parse_month(s)
        .and_then(|m| i32::try_from(m).ok())
        .map(Some)
        .ok_or_else(|| InputError::UnknownMonth(s.to_string()))
}

pub(crate) fn parse_frequency(s: &str) -> Result<Frequency, InputError> {
    Frequency::parse(s).ok_or_else(|| InputError::UnknownFrequency(s.trim().to_string()))
}

/// Validate fields into a draft. Missing fields fall back to `base` (when
/// editing), then to: first known category, Monthly, default month.
pub(crate) fn build_draft(
    args: &FieldArgs,
    base: Option<&Expense>,
    known_categories: &[&str],
) -> Result<ExpenseDraft, InputError> {
    let name = match &args.name {
        Some(n) => n.trim().to_string(),
        None => base.map(|b| b.name.clone()).unwrap_or_default(),
    };
    if name.is_empty() {
        return Err(InputError::MissingName);
    }

    let amount = match (&args.amount, base) {
        (Some(a), _) => parse_amount(a)?,
        (None, Some(b)) => b.amount,
        (None, None) => return Err(InputError::MissingAmount),
    };

    let frequency = match &args.frequency {
        Some(f) => parse_frequency(f)?,
        None => base.map_or(Frequency::Monthly, |b| b.frequency),
    };

    let category = match &args.category {
        Some(c) => find_by_name(known_categories, c)
            .ok_or_else(|| InputError::UnknownCategory(c.trim().to_string()))?
            .to_string(),
        None => match base {
            Some(b) => b.category.clone(),
            None => known_categories
                .first()
                .copied()
                .unwrap_or(DEFAULT_CATEGORY)
                .to_string(),
        },
    };

    let specific_month = match &args.month {
        Some(m) => parse_month(m)?,
        None => base.and_then(|b| b.specific_month),
    };

    Ok(ExpenseDraft {
        name,
        category,
        amount,
        frequency,
        specific_month,
    })
}

/// Render an expense back into the `key=value` form accepted by `parse`,
/// used to pre-fill the edit line.
pub(crate) fn to_field_line(expense: &Expense) -> String {
    let mut line = format!(
        "name={} amount={} freq={} category={}",
        expense.name,
        expense.amount.normalize(),
        expense.frequency.as_str().to_lowercase(),
        expense.category,
    );
    if let Some(m) = expense.specific_month {
        line.push_str(&format!(" month={}", m + 1));
    }
    line
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
