use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, InputMode, PendingAction, Screen};
use crate::db::{Database, StateKey};
use crate::input::{self, FieldArgs};
use crate::models::{parse_month, IncomeSchedule, ThemeMode, MONTHS};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!("c", "Go to Categories", cmd_categories, r);
    register_command!("categories", "Go to Categories", cmd_categories, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add expense (e.g. :add Rent amount=12000 freq=monthly)",
        cmd_add,
        r
    );
    register_command!("a", "Add expense", cmd_add, r);
    register_command!(
        "edit",
        "Edit selected expense (e.g. :edit amount=13000)",
        cmd_edit,
        r
    );
    register_command!("delete", "Delete selected expense", cmd_delete, r);
    register_command!("del", "Delete selected expense", cmd_delete, r);
    register_command!(
        "category",
        "Add category (e.g. :category Pets)",
        cmd_category,
        r
    );
    register_command!(
        "income",
        "Set income (e.g. :income 50000, :income mar 65000, :income copy)",
        cmd_income,
        r
    );
    register_command!("i", "Go to Income / set income", cmd_income, r);
    register_command!("theme", "Toggle or set theme (light|dark)", cmd_theme, r);
    register_command!("analyze", "Ask for an analysis of the plan", cmd_analyze, r);
    register_command!("ai", "Ask for an analysis of the plan", cmd_analyze, r);
    register_command!(
        "month",
        "Highlight a month (e.g. :month mar, :month clear)",
        cmd_month,
        r
    );
    register_command!("m", "Highlight a month", cmd_month, r);
    register_command!(
        "export",
        "Export plan to CSV (e.g. :export ~/budget.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, db)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 2) // skip short aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_expenses(_args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    Ok(())
}

fn cmd_categories(_args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    app.screen = Screen::Categories;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, db: &Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status(
            "Usage: :add <name> amount=<n> [freq=monthly|quarterly|yearly|one-time] [category=..] [month=..]",
        );
        return Ok(());
    }

    let tokens: Vec<&str> = args.split_whitespace().collect();
    let draft = match FieldArgs::parse(&tokens)
        .and_then(|fields| input::build_draft(&fields, None, &app.state.categories()))
    {
        Ok(d) => d,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };

    let name = app.state.add_expense(draft).name.clone();
    app.expense_index = app.state.expenses().len() - 1;
    app.commit(db, StateKey::Expenses)?;
    app.set_status(format!("Added expense: {name}"));
    Ok(())
}

fn cmd_edit(args: &str, app: &mut App, db: &Database) -> anyhow::Result<()> {
    let Some(selected) = app.selected_expense().cloned() else {
        app.set_status("No expense selected. Add one with :add");
        return Ok(());
    };

    if args.is_empty() {
        // Pre-fill the edit line with the selected expense
        app.command_input = input::to_field_line(&selected);
        app.editing_id = Some(selected.id.clone());
        app.input_mode = InputMode::Editing;
        app.set_status("Change fields, press Enter to save");
        return Ok(());
    }

    apply_edit(&selected.id, args, app, db)
}

/// Replace the fields of expense `id` from a `key=value` line.
pub(crate) fn apply_edit(id: &str, line: &str, app: &mut App, db: &Database) -> anyhow::Result<()> {
    let base = match app.state.find_expense(id) {
        Ok(e) => e.clone(),
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let draft = match FieldArgs::parse(&tokens)
        .and_then(|fields| input::build_draft(&fields, Some(&base), &app.state.categories()))
    {
        Ok(d) => d,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };

    if let Err(e) = app.state.update_expense(&base.id, draft) {
        app.set_status(e.to_string());
        return Ok(());
    }
    app.commit(db, StateKey::Expenses)?;
    app.set_status(format!("Updated expense: {}", base.name));
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    let Some(expense) = app.selected_expense() else {
        app.set_status("No expense selected");
        return Ok(());
    };

    let (id, name) = (expense.id.clone(), expense.name.clone());
    app.confirm_message = format!("Delete '{name}'?");
    app.pending_action = Some(PendingAction::DeleteExpense { id, name });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_category(args: &str, app: &mut App, db: &Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :category <name>");
        return Ok(());
    }

    if app.state.add_category(args) {
        app.commit(db, StateKey::Categories)?;
        app.set_status(format!("Added category: {args}"));
    } else {
        app.set_status(format!("Category '{args}' already exists"));
    }
    Ok(())
}

fn cmd_income(args: &str, app: &mut App, db: &Database) -> anyhow::Result<()> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    match parts.as_slice() {
        [] => {
            app.screen = Screen::Income;
            return Ok(());
        }
        ["copy"] => {
            app.state.income_mut().copy_first_to_all();
            app.set_status("Copied January income to every month");
        }
        [amount] => match parse_income(amount) {
            Some(v) => {
                app.state.set_income(IncomeSchedule::flat(v));
                app.set_status(format!("Income set to {amount} for every month"));
            }
            None => {
                app.set_status(format!("Invalid income: {amount}"));
                return Ok(());
            }
        },
        [month, amount] => {
            let (Some(m), Some(v)) = (parse_month(month), parse_income(amount)) else {
                app.set_status("Usage: :income <month> <amount>");
                return Ok(());
            };
            app.state.income_mut().set_month(m, v);
            app.set_status(format!("{} income set to {amount}", MONTHS[m]));
        }
        _ => {
            app.set_status("Usage: :income <amount> | :income <month> <amount> | :income copy");
            return Ok(());
        }
    }
    app.commit(db, StateKey::Incomes)?;
    Ok(())
}

/// Income may be zero, unlike expense amounts. Same upper limit.
pub(crate) fn parse_income(s: &str) -> Option<rust_decimal::Decimal> {
    let cleaned: String = s.chars().filter(|c| *c != ',').collect();
    cleaned
        .parse::<rust_decimal::Decimal>()
        .ok()
        .filter(|v| !v.is_sign_negative() && *v <= crate::input::MAX_AMOUNT)
}

fn cmd_theme(args: &str, app: &mut App, db: &Database) -> anyhow::Result<()> {
    let mode = if args.is_empty() {
        app.state.toggle_theme()
    } else if let Some(mode) = ThemeMode::parse(args) {
        app.state.set_theme(mode);
        mode
    } else {
        app.set_status("Usage: :theme [light|dark]");
        return Ok(());
    };
    app.commit(db, StateKey::Theme)?;
    app.set_status(format!("Theme: {mode}"));
    Ok(())
}

fn cmd_analyze(_args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    app.start_analysis();
    Ok(())
}

fn cmd_month(args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    if args.is_empty() || args.eq_ignore_ascii_case("clear") {
        app.highlighted_month = None;
        app.set_status("Month highlight cleared");
        return Ok(());
    }
    match parse_month(args) {
        Some(m) => {
            app.highlighted_month = Some(m);
            app.set_status(format!("Highlighting {}", MONTHS[m]));
        }
        None => app.set_status(format!("Unknown month: {args}")),
    }
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, _db: &Database) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/yearbudget-{}.csv", app.year)
    } else {
        crate::run::shellexpand(args)
    };

    match crate::export::export_plan(std::path::Path::new(&path), app.state.expenses()) {
        Ok(()) => app.set_status(format!(
            "Exported {} expenses to {path}",
            app.state.expenses().len()
        )),
        Err(e) => app.set_status(format!("Export failed: {e:#}")),
    }
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
