use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::engine::{aggregate, distribute};
use crate::models::{Expense, SHORT_MONTHS};

fn header() -> Vec<&'static str> {
    let mut cols = vec!["Name", "Category", "Frequency", "Month", "Amount"];
    cols.extend(SHORT_MONTHS);
    cols.push("Annual");
    cols
}

/// Write the plan as CSV: one row per expense with its twelve month
/// amounts, then a totals row.
pub(crate) fn write_plan<W: Write>(writer: W, expenses: &[Expense]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(header())?;

    for expense in expenses {
        let months = distribute(expense);
        let mut row = vec![
            expense.name.clone(),
            expense.category.clone(),
            expense.frequency.to_string(),
            expense.month_label(),
            expense.amount.normalize().to_string(),
        ];
        row.extend(months.iter().map(|m| m.normalize().to_string()));
        row.push(months.iter().sum::<rust_decimal::Decimal>().normalize().to_string());
        wtr.write_record(&row)?;
    }

    let totals = aggregate(expenses);
    let mut row = vec![
        "Total".to_string(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
    ];
    row.extend(totals.monthly.iter().map(|m| m.normalize().to_string()));
    row.push(totals.annual.normalize().to_string());
    wtr.write_record(&row)?;

    wtr.flush().context("Failed to flush CSV output")?;
    Ok(())
}

pub(crate) fn export_plan(path: &Path, expenses: &[Expense]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_plan(file, expenses).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = expenses.len(), "Exported plan");
    Ok(())
}
