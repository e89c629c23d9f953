mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::models::{Expense, IncomeSchedule, ThemeMode};
use crate::state::BudgetState;

/// The documents the app keeps, one row each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StateKey {
    Expenses,
    Categories,
    Incomes,
    Theme,
}

impl StateKey {
    #[cfg(test)]
    pub(crate) const ALL: [StateKey; 4] = [
        StateKey::Expenses,
        StateKey::Categories,
        StateKey::Incomes,
        StateKey::Theme,
    ];

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Expenses => "expenses",
            Self::Categories => "categories",
            Self::Incomes => "incomes",
            Self::Theme => "theme",
        }
    }
}

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Raw key/value ─────────────────────────────────────────

    pub(crate) fn get_value(&self, key: StateKey) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![key.as_str()],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("Failed to read '{}'", key.as_str()))
    }

    pub(crate) fn put_value(&self, key: StateKey, value: &str) -> Result<()> {
        let now = chrono::Utc::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key.as_str(), value, now],
            )
            .with_context(|| format!("Failed to write '{}'", key.as_str()))?;
        debug!(key = key.as_str(), bytes = value.len(), "Stored value");
        Ok(())
    }

    /// Stored documents that fail to parse are logged and treated as absent.
    pub(crate) fn read_json<T: DeserializeOwned>(&self, key: StateKey) -> Result<Option<T>> {
        let Some(raw) = self.get_value(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(v) => Ok(Some(v)),
            Err(e) => {
                warn!(key = key.as_str(), error = %e, "Ignoring malformed stored data");
                Ok(None)
            }
        }
    }

    pub(crate) fn write_json<T: Serialize + ?Sized>(&self, key: StateKey, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)
            .with_context(|| format!("Failed to serialize '{}'", key.as_str()))?;
        self.put_value(key, &json)
    }

    // ── Application state ─────────────────────────────────────

    /// Load everything. Expenses stored without a category get
    /// `fallback_category` in memory; the stored row is left alone until
    /// the next save of that key.
    pub(crate) fn load_state(&self, fallback_category: &str) -> Result<BudgetState> {
        let mut expenses: Vec<Expense> = self.read_json(StateKey::Expenses)?.unwrap_or_default();
        let mut filled = 0;
        for expense in &mut expenses {
            if expense.category.trim().is_empty() {
                expense.category = fallback_category.to_string();
                filled += 1;
            }
        }

        let state = BudgetState {
            expenses,
            custom_categories: self.read_json(StateKey::Categories)?.unwrap_or_default(),
            income: self
                .read_json::<IncomeSchedule>(StateKey::Incomes)?
                .unwrap_or_default(),
            theme: self
                .read_json::<ThemeMode>(StateKey::Theme)?
                .unwrap_or_default(),
        };

        info!(
            expenses = state.expenses.len(),
            categories = state.custom_categories.len(),
            defaulted_categories = filled,
            theme = state.theme.as_str(),
            "Loaded budget"
        );
        Ok(state)
    }

    /// Write the document for `key` from `state`.
    pub(crate) fn save(&self, state: &BudgetState, key: StateKey) -> Result<()> {
        match key {
            StateKey::Expenses => self.write_json(key, state.expenses()),
            StateKey::Categories => self.write_json(key, &state.custom_categories),
            StateKey::Incomes => self.write_json(key, state.income()),
            StateKey::Theme => self.write_json(key, &state.theme()),
        }
    }

    #[cfg(test)]
    pub(crate) fn save_all(&self, state: &BudgetState) -> Result<()> {
        for key in StateKey::ALL {
            self.save(state, key)?;
        }
        Ok(())
    }
}
