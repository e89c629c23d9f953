use anyhow::Result;
use chrono::Datelike;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use crate::config::Config;
use crate::db::{Database, StateKey};
use crate::insight::InsightClient;
use crate::models::MONTHS;
use crate::state::BudgetState;
use crate::ui::app::{App, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

/// How long to wait for a key before checking on a running analysis.
const TICK: Duration = Duration::from_millis(200);

pub(crate) fn as_tui(db: &Database, state: BudgetState, config: &Config) -> Result<()> {
    let insight = InsightClient::from_config(&config.insight, &config.currency);
    let mut app = App::new(state, insight, &config.currency);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, db);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %format!("{e:#}"), "dashboard exited with an error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    db: &Database,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab + status + command bars, borders, table header and totals row
            let content_height = f.area().height.saturating_sub(7) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        app.poll_analysis();

        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, db)?,
                InputMode::Command => handle_command_input(key, app, db)?,
                InputMode::Editing => handle_editing_input(key, app, db)?,
                InputMode::Confirm => handle_confirm_input(key, app, db)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, db: &Database) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_up(app);
            }
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('h') | KeyCode::Left => shift_month(app, -1),
        KeyCode::Char('l') | KeyCode::Right => shift_month(app, 1),
        KeyCode::Char('1') => app.screen = Screen::Dashboard,
        KeyCode::Char('2') => app.screen = Screen::Expenses,
        KeyCode::Char('3') => app.screen = Screen::Categories,
        KeyCode::Char('4') => app.screen = Screen::Income,
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            app.screen = screens[(idx + 1) % screens.len()];
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            app.screen = screens[(idx + screens.len() - 1) % screens.len()];
        }
        KeyCode::Enter => handle_enter(app, db)?,
        KeyCode::Esc => handle_escape(app),
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('a') => {
            app.screen = Screen::Expenses;
            app.input_mode = InputMode::Command;
            app.command_input = "add ".to_string();
        }
        KeyCode::Char('e') if app.screen == Screen::Expenses => {
            commands::handle_command("edit", app, db)?;
        }
        KeyCode::Char('D') if app.screen == Screen::Expenses => {
            commands::handle_command("delete", app, db)?;
        }
        KeyCode::Char('t') => {
            commands::handle_command("theme", app, db)?;
        }
        KeyCode::Char('A') => {
            app.start_analysis();
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, db: &Database) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, db)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(key: event::KeyEvent, app: &mut App, db: &Database) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let line = std::mem::take(&mut app.command_input);
            app.input_mode = InputMode::Normal;
            if let Some(id) = app.editing_id.take() {
                if !line.trim().is_empty() {
                    commands::apply_edit(&id, &line, app, db)?;
                }
            }
        }
        KeyCode::Esc => {
            app.command_input.clear();
            app.editing_id = None;
            app.input_mode = InputMode::Normal;
            app.set_status("Edit cancelled");
        }
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            let keep = trimmed.rfind(' ').map_or(0, |pos| pos + 1);
            app.command_input.truncate(keep);
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, db: &Database) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                match action {
                    PendingAction::DeleteExpense { id, name } => {
                        if app.state.delete_expense(&id).is_some() {
                            app.commit(db, StateKey::Expenses)?;
                            app.set_status(format!("Deleted: {name}"));
                        } else {
                            app.set_status(format!("'{name}' was already removed"));
                        }
                    }
                }
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
        _ => {}
    }
    Ok(())
}

// ── Navigation helpers ───────────────────────────────────────

fn handle_move_down(app: &mut App) {
    let page = app.visible_rows;
    match app.screen {
        Screen::Expenses => {
            let len = app.state.expenses().len();
            scroll_down(&mut app.expense_index, &mut app.expense_scroll, len, page);
        }
        Screen::Categories => {
            let len = app.state.categories().len();
            scroll_down(&mut app.category_index, &mut app.category_scroll, len, page);
        }
        Screen::Income => {
            if app.income_index + 1 < MONTHS.len() {
                app.income_index += 1;
            }
        }
        Screen::Dashboard => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Expenses => scroll_up(&mut app.expense_index, &mut app.expense_scroll),
        Screen::Categories => scroll_up(&mut app.category_index, &mut app.category_scroll),
        Screen::Income => app.income_index = app.income_index.saturating_sub(1),
        Screen::Dashboard => {}
    }
}

/// Step the highlighted month, wrapping around the year.
fn shift_month(app: &mut App, delta: isize) {
    let len = MONTHS.len() as isize;
    let next = match app.highlighted_month {
        Some(m) => (m as isize + delta).rem_euclid(len),
        None if delta > 0 => 0,
        None => len - 1,
    };
    app.highlighted_month = Some(next as usize);
}

fn handle_enter(app: &mut App, db: &Database) -> Result<()> {
    match app.screen {
        Screen::Dashboard => {
            let current = chrono::Local::now().month0() as usize;
            app.toggle_month(app.highlighted_month.unwrap_or(current));
        }
        Screen::Expenses => commands::handle_command("edit", app, db)?,
        Screen::Income => {
            let m = app.income_index;
            let value = app.state.income().month(m).normalize();
            app.command_input = format!("income {} {value}", MONTHS[m]);
            app.input_mode = InputMode::Command;
        }
        Screen::Categories => {}
    }
    Ok(())
}

fn handle_escape(app: &mut App) {
    app.highlighted_month = None;
    app.status_message.clear();
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Expenses => scroll_to_top(&mut app.expense_index, &mut app.expense_scroll),
        Screen::Categories => scroll_to_top(&mut app.category_index, &mut app.category_scroll),
        Screen::Income => app.income_index = 0,
        Screen::Dashboard => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    let page = app.visible_rows;
    match app.screen {
        Screen::Expenses => {
            let len = app.state.expenses().len();
            scroll_to_bottom(&mut app.expense_index, &mut app.expense_scroll, len, page);
        }
        Screen::Categories => {
            let len = app.state.categories().len();
            scroll_to_bottom(&mut app.category_index, &mut app.category_scroll, len, page);
        }
        Screen::Income => app.income_index = MONTHS.len() - 1,
        Screen::Dashboard => {}
    }
}
