use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::config::Config;
use crate::db::{Database, StateKey};
use crate::engine::distribute;
use crate::input::{self, FieldArgs};
use crate::insight::{InsightClient, InsightRequest};
use crate::models::{parse_month, Frequency, IncomeSchedule, ThemeMode, MONTHS, SHORT_MONTHS};
use crate::state::BudgetState;
use crate::ui::commands::parse_income;
use crate::ui::util::{format_amount, format_percent, truncate};

const INCOME_RANGE: &str = "must be between 0 and 1,000,000,000,000,000";

/// Everything a one-shot command needs.
struct Session<'a> {
    db: &'a Database,
    state: BudgetState,
    config: &'a Config,
}

impl Session<'_> {
    fn money(&self, val: rust_decimal::Decimal) -> String {
        format_amount(val, &self.config.currency)
    }

    fn save(&self, key: StateKey) -> Result<()> {
        self.db.save(&self.state, key)
    }
}

pub(crate) fn as_cli(args: &[String], db: &Database, state: BudgetState, config: &Config) -> Result<()> {
    let mut ctx = Session { db, state, config };
    let rest = &args[2..];
    match args[1].as_str() {
        "list" | "ls" => cli_list(&ctx),
        "add" => cli_add(rest, &mut ctx),
        "edit" => cli_edit(rest, &mut ctx),
        "delete" | "rm" => cli_delete(rest, &mut ctx),
        "summary" | "s" => cli_summary(&ctx),
        "balance" | "b" => cli_balance(rest, &ctx),
        "income" => cli_income(rest, &mut ctx),
        "category" => cli_category(rest, &mut ctx),
        "categories" => cli_categories(&ctx),
        "theme" => cli_theme(rest, &mut ctx),
        "analyze" => cli_analyze(&ctx),
        "export" => cli_export(rest, &ctx),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("yearbudget {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    let frequencies: Vec<String> = Frequency::all()
        .iter()
        .map(|f| f.as_str().to_lowercase())
        .collect();
    println!("YearBudget: plan a year of expenses against your income");
    println!();
    println!("Usage: yearbudget [command]");
    println!();
    println!("Commands:");
    println!("  (none)                          Launch interactive dashboard");
    println!("  list                            List expenses");
    println!("  add <name> amount=<n> [fields]  Add an expense");
    println!(
        "      freq={}  category=<name>  month=<1-12|name>",
        frequencies.join("|")
    );
    println!("  edit <id> [fields]              Change fields of an expense (id prefix is fine)");
    println!("  delete <id> [--yes]             Delete an expense");
    println!("  summary                         Monthly and per-category totals");
    println!("  balance [--income <n>]          Income vs expenses per month");
    println!("  income                          Show monthly income");
    println!("  income <n>                      Set the same income for every month");
    println!("  income <month> <n>              Set income for one month");
    println!("  income copy                     Copy January's income to every month");
    println!("  category <name>                 Add a custom category");
    println!("  categories                      List categories");
    println!("  theme [light|dark]              Toggle or set the dashboard theme");
    println!("  analyze                         Ask for suggestions on the plan");
    println!("  export [path]                   Export the plan to CSV");
    println!("  --help, -h                      Show this help");
    println!("  --version, -V                   Show version");
}

fn cli_list(ctx: &Session) -> Result<()> {
    let expenses = ctx.state.expenses();
    if expenses.is_empty() {
        println!("No expenses");
        return Ok(());
    }

    println!(
        "{:<9} {:<24} {:<16} {:<10} {:<14} {:>12} {:>12}",
        "ID", "Name", "Category", "Frequency", "Month", "Amount", "Annual"
    );
    println!("{}", "─".repeat(103));
    for e in expenses {
        let annual: rust_decimal::Decimal = distribute(e).iter().sum();
        println!(
            "{:<9} {:<24} {:<16} {:<10} {:<14} {:>12} {:>12}",
            e.short_id(),
            truncate(&e.name, 24),
            truncate(&e.category, 16),
            e.frequency.as_str(),
            e.month_label(),
            ctx.money(e.amount),
            ctx.money(annual),
        );
    }
    Ok(())
}

fn cli_add(args: &[String], ctx: &mut Session) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: yearbudget add <name> amount=<n> [freq=..] [category=..] [month=..]");
    }
    let fields = FieldArgs::parse(args)?;
    let draft = input::build_draft(&fields, None, &ctx.state.categories())?;
    let expense = ctx.state.add_expense(draft).clone();
    ctx.save(StateKey::Expenses)?;
    println!(
        "Added {} ({}): {} {}",
        expense.name,
        expense.short_id(),
        ctx.money(expense.amount),
        expense.frequency
    );
    Ok(())
}

fn cli_edit(args: &[String], ctx: &mut Session) -> Result<()> {
    let Some((id, fields)) = args.split_first() else {
        anyhow::bail!("Usage: yearbudget edit <id> [name=..] [amount=..] [freq=..] [category=..] [month=..]");
    };
    let fields = FieldArgs::parse(fields)?;
    if fields.is_empty() {
        anyhow::bail!("Nothing to change. Give at least one field, e.g. amount=13000");
    }

    let base = ctx.state.find_expense(id)?.clone();
    let draft = input::build_draft(&fields, Some(&base), &ctx.state.categories())?;
    let updated = ctx.state.update_expense(&base.id, draft)?.clone();
    ctx.save(StateKey::Expenses)?;
    println!(
        "Updated {} ({}): {} {}",
        updated.name,
        updated.short_id(),
        ctx.money(updated.amount),
        updated.frequency
    );
    Ok(())
}

fn cli_delete(args: &[String], ctx: &mut Session) -> Result<()> {
    let Some(id) = args.iter().find(|a| !a.starts_with('-')) else {
        anyhow::bail!("Usage: yearbudget delete <id> [--yes]");
    };
    let skip_prompt = args.iter().any(|a| a == "--yes" || a == "-y");

    let expense = ctx.state.find_expense(id)?.clone();
    if !skip_prompt && !confirm(&format!("Delete '{}'?", expense.name))? {
        println!("Cancelled");
        return Ok(());
    }

    ctx.state.delete_expense(&expense.id);
    ctx.save(StateKey::Expenses)?;
    println!("Deleted {}", expense.name);
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read answer")?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn cli_summary(ctx: &Session) -> Result<()> {
    let summary = ctx.state.summary();

    println!("YearBudget: {} expenses", ctx.state.expenses().len());
    println!("{}", "─".repeat(40));
    println!("  Annual:       {}", ctx.money(summary.annual));
    println!("  Avg monthly:  {}", ctx.money(summary.average_monthly()));
    if let Some(m) = summary.peak_month() {
        println!("  Peak month:   {} ({})", MONTHS[m], ctx.money(summary.monthly[m]));
    }

    println!();
    println!("By Month:");
    for (m, amount) in summary.monthly.iter().enumerate() {
        println!("  {:<4} {:>14}", SHORT_MONTHS[m], ctx.money(*amount));
    }

    if !summary.categories.is_empty() {
        println!();
        println!("By Category:");
        for c in &summary.categories {
            println!(
                "  {:<24} {:>14} {:>7}",
                c.name,
                ctx.money(c.annual),
                format_percent(summary.share(c.annual))
            );
        }
    }
    Ok(())
}

fn cli_balance(args: &[String], ctx: &Session) -> Result<()> {
    // --income overrides the stored schedule with a flat figure
    let flat = match args.windows(2).find(|w| w[0] == "--income") {
        Some(w) => Some(IncomeSchedule::flat(parse_income(&w[1]).with_context(|| {
            format!("Invalid income '{}': {INCOME_RANGE}", w[1])
        })?)),
        None => None,
    };
    let balance = ctx.state.balance(flat.as_ref().unwrap_or(ctx.state.income()));

    println!("{:<10} {:>14} {:>14} {:>14}", "Month", "Income", "Expenses", "Balance");
    println!("{}", "─".repeat(55));
    for (m, row) in balance.months.iter().enumerate() {
        println!(
            "{:<10} {:>14} {:>14} {:>14}",
            MONTHS[m],
            ctx.money(row.income),
            ctx.money(row.expense),
            ctx.money(row.balance)
        );
    }
    println!("{}", "─".repeat(55));
    println!(
        "{:<10} {:>14} {:>14} {:>14}",
        "Year",
        ctx.money(balance.annual_income),
        ctx.money(balance.annual_expense),
        ctx.money(balance.annual_balance)
    );
    println!();
    println!("Savings rate: {}", format_percent(balance.savings_rate));

    let deficits: Vec<&str> = balance.deficit_months().map(|m| SHORT_MONTHS[m]).collect();
    if !deficits.is_empty() {
        println!("Deficit months: {}", deficits.join(", "));
    }
    Ok(())
}

fn cli_income(args: &[String], ctx: &mut Session) -> Result<()> {
    match args {
        [] => {
            for (m, amount) in ctx.state.income().months().iter().enumerate() {
                println!("  {:<10} {:>14}", MONTHS[m], ctx.money(*amount));
            }
            println!("  {:<10} {:>14}", "Year", ctx.money(ctx.state.income().annual()));
            return Ok(());
        }
        [copy] if copy == "copy" => {
            ctx.state.income_mut().copy_first_to_all();
            println!("Copied January income to every month");
        }
        [amount] => {
            let v = parse_income(amount)
                .with_context(|| format!("Invalid income '{amount}': {INCOME_RANGE}"))?;
            ctx.state.set_income(IncomeSchedule::flat(v));
            println!("Income set to {} for every month", ctx.money(v));
        }
        [month, amount] => {
            let m = parse_month(month).with_context(|| format!("Unknown month '{month}'"))?;
            let v = parse_income(amount)
                .with_context(|| format!("Invalid income '{amount}': {INCOME_RANGE}"))?;
            ctx.state.income_mut().set_month(m, v);
            println!("{} income set to {}", MONTHS[m], ctx.money(v));
        }
        _ => anyhow::bail!("Usage: yearbudget income [<n> | <month> <n> | copy]"),
    }
    ctx.save(StateKey::Incomes)
}

fn cli_category(args: &[String], ctx: &mut Session) -> Result<()> {
    let name = args.join(" ");
    if name.trim().is_empty() {
        anyhow::bail!("Usage: yearbudget category <name>");
    }
    if ctx.state.add_category(&name) {
        ctx.save(StateKey::Categories)?;
        println!("Added category: {}", name.trim());
    } else {
        println!("Category '{}' already exists", name.trim());
    }
    Ok(())
}

fn cli_categories(ctx: &Session) -> Result<()> {
    let totals = ctx.state.category_totals();
    for name in ctx.state.categories() {
        match totals.iter().find(|t| t.name == name) {
            Some(t) => println!("  {name:<24} {:>14}", ctx.money(t.annual)),
            None => println!("  {name}"),
        }
    }
    let unlisted = ctx.state.unlisted_categories();
    if !unlisted.is_empty() {
        println!("Used by expenses only:");
        for t in &unlisted {
            println!("  {:<24} {:>14}", t.name, ctx.money(t.annual));
        }
    }
    Ok(())
}

fn cli_theme(args: &[String], ctx: &mut Session) -> Result<()> {
    let mode = match args.first() {
        None => ctx.state.toggle_theme(),
        Some(arg) => {
            let mode = ThemeMode::parse(arg)
                .with_context(|| format!("Unknown theme '{arg}' (light, dark)"))?;
            ctx.state.set_theme(mode);
            mode
        }
    };
    ctx.save(StateKey::Theme)?;
    println!("Theme: {mode}");
    Ok(())
}

fn cli_analyze(ctx: &Session) -> Result<()> {
    if ctx.state.expenses().is_empty() {
        println!("No expenses to analyze");
        return Ok(());
    }
    let client = InsightClient::from_config(&ctx.config.insight, &ctx.config.currency);
    let request = InsightRequest::from_expenses(ctx.state.expenses());
    println!("{}", client.analyze(&request));
    Ok(())
}

fn cli_export(args: &[String], ctx: &Session) -> Result<()> {
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| super::shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/yearbudget-{}.csv", chrono::Local::now().format("%Y"))
        });

    let expenses = ctx.state.expenses();
    crate::export::export_plan(Path::new(&output_path), expenses)?;
    println!("Exported {} expenses to {output_path}", expenses.len());
    Ok(())
}
