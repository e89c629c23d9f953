use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::month::SHORT_MONTHS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub(crate) enum Frequency {
    Monthly,
    Quarterly,
    Yearly,
    #[serde(rename = "One-Time", alias = "OneTime")]
    OneTime,
}

impl Frequency {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::Yearly => "Yearly",
            Self::OneTime => "One-Time",
        }
    }

    /// Lenient parse used by the command line and the `:add` command.
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" | "m" => Some(Self::Monthly),
            "quarterly" | "quarter" | "q" => Some(Self::Quarterly),
            "yearly" | "annual" | "annually" | "year" | "y" => Some(Self::Yearly),
            "one-time" | "onetime" | "one_time" | "once" | "o" => Some(Self::OneTime),
            _ => None,
        }
    }

    pub(crate) fn all() -> &'static [Frequency] {
        &[Self::Monthly, Self::Quarterly, Self::Yearly, Self::OneTime]
    }

    /// Whether the anchor month has any effect for this frequency.
    pub(crate) fn uses_month(&self) -> bool {
        !matches!(self, Self::Monthly)
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recurring or one-off spending commitment.
///
/// `amount` is applied at every occurrence; it is never pre-divided across
/// months. `specific_month` is 0-based (0 = January) and `None` means the
/// default anchor, January. Out-of-range values from storage are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Expense {
    pub(crate) id: String,
    pub(crate) name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub(crate) category: String,
    pub(crate) amount: Decimal,
    pub(crate) frequency: Frequency,
    #[serde(default)]
    pub(crate) specific_month: Option<i32>,
}

impl Expense {
    pub(crate) fn new(draft: ExpenseDraft) -> Self {
        draft.into_expense(uuid::Uuid::new_v4().to_string())
    }

    pub(crate) fn start_month(&self) -> i32 {
        self.specific_month.unwrap_or(0)
    }

    /// First eight characters of the id, enough to address it from the CLI.
    pub(crate) fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }

    pub(crate) fn month_label(&self) -> String {
        if !self.frequency.uses_month() {
            return "every month".into();
        }
        match self.specific_month {
            None => "Default (Jan)".into(),
            Some(m) => usize::try_from(m)
                .ok()
                .and_then(|i| SHORT_MONTHS.get(i))
                .map(|s| s.to_string())
                .unwrap_or_else(|| format!("invalid ({m})")),
        }
    }
}

/// Older records may carry `"category": null`; treat it like a missing field
/// so the load-time fallback fills it in.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Validated field values for creating or replacing an expense.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ExpenseDraft {
    pub(crate) name: String,
    pub(crate) category: String,
    pub(crate) amount: Decimal,
    pub(crate) frequency: Frequency,
    pub(crate) specific_month: Option<i32>,
}

impl ExpenseDraft {
    pub(crate) fn into_expense(self, id: String) -> Expense {
        Expense {
            id,
            name: self.name,
            category: self.category,
            amount: self.amount,
            frequency: self.frequency,
            specific_month: self.specific_month,
        }
    }
}

impl From<&Expense> for ExpenseDraft {
    fn from(expense: &Expense) -> Self {
        Self {
            name: expense.name.clone(),
            category: expense.category.clone(),
            amount: expense.amount,
            frequency: expense.frequency,
            specific_month: expense.specific_month,
        }
    }
}
