use anyhow::Result;
use chrono::Datelike;
use std::sync::mpsc;

use crate::db::{Database, StateKey};
use crate::engine::{Aggregate, Balance};
use crate::insight::{self, InsightClient, InsightRequest};
use crate::state::BudgetState;
use crate::ui::theme::{self, Palette};
use crate::ui::util::clamp_index;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Expenses,
    Categories,
    Income,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Expenses, Self::Categories, Self::Income]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Expenses => write!(f, "Expenses"),
            Self::Categories => write!(f, "Categories"),
            Self::Income => write!(f, "Income"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteExpense { id: String, name: String },
}

/// What the analysis panel shows.
#[derive(Debug, Default)]
pub(crate) enum Analysis {
    #[default]
    Idle,
    Pending(mpsc::Receiver<String>),
    Ready(String),
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) year: i32,
    pub(crate) currency: String,

    pub(crate) state: BudgetState,
    pub(crate) summary: Aggregate,
    pub(crate) balance: Balance,
    /// Month picked on the chart; highlighted on every screen.
    pub(crate) highlighted_month: Option<usize>,

    // Expenses
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,
    /// Id of the expense the edit line will replace.
    pub(crate) editing_id: Option<String>,

    // Categories
    pub(crate) category_index: usize,
    pub(crate) category_scroll: usize,

    // Income
    pub(crate) income_index: usize,

    pub(crate) insight: InsightClient,
    pub(crate) analysis: Analysis,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(state: BudgetState, insight: InsightClient, currency: &str) -> Self {
        let summary = state.summary();
        let balance = state.balance(state.income());
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            year: chrono::Local::now().year(),
            currency: currency.to_string(),

            state,
            summary,
            balance,
            highlighted_month: None,

            expense_index: 0,
            expense_scroll: 0,
            editing_id: None,

            category_index: 0,
            category_scroll: 0,

            income_index: 0,

            insight,
            analysis: Analysis::Idle,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn palette(&self) -> &'static Palette {
        theme::palette(self.state.theme())
    }

    /// Recompute derived totals and keep cursors inside their lists.
    pub(crate) fn refresh(&mut self) {
        self.summary = self.state.summary();
        self.balance = self.state.balance(self.state.income());
        clamp_index(
            &mut self.expense_index,
            &mut self.expense_scroll,
            self.state.expenses().len(),
        );
        clamp_index(
            &mut self.category_index,
            &mut self.category_scroll,
            self.state.categories().len(),
        );
    }

    /// Persist one key after a mutation and recompute. Data changes make
    /// any previous analysis stale.
    pub(crate) fn commit(&mut self, db: &Database, key: StateKey) -> Result<()> {
        db.save(&self.state, key)?;
        if key != StateKey::Theme {
            self.analysis = Analysis::Idle;
        }
        self.refresh();
        Ok(())
    }

    pub(crate) fn selected_expense(&self) -> Option<&crate::models::Expense> {
        self.state.expenses().get(self.expense_index)
    }

    /// Clicking the highlighted month again clears it.
    pub(crate) fn toggle_month(&mut self, month: usize) {
        self.highlighted_month = if self.highlighted_month == Some(month) {
            None
        } else {
            Some(month)
        };
    }

    pub(crate) fn start_analysis(&mut self) {
        if self.state.expenses().is_empty() {
            self.set_status("Add an expense before asking for an analysis");
            return;
        }
        if matches!(self.analysis, Analysis::Pending(_)) {
            self.set_status("Analysis already running");
            return;
        }
        let request = InsightRequest::from_expenses(self.state.expenses());
        self.analysis = Analysis::Pending(insight::spawn_analysis(self.insight.clone(), request));
        self.set_status("Analyzing expenses…");
    }

    /// Pick up a finished analysis, if any. Called once per event loop tick.
    pub(crate) fn poll_analysis(&mut self) {
        let Analysis::Pending(rx) = &self.analysis else {
            return;
        };
        match rx.try_recv() {
            Ok(text) => {
                self.analysis = Analysis::Ready(text);
                self.set_status("Analysis ready");
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                self.analysis = Analysis::Ready(insight::REQUEST_FAILED.to_string());
            }
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
