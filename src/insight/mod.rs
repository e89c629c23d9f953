//! Narrative analysis of the plan from a Gemini-style `generateContent`
//! endpoint. Every failure becomes one of the fixed messages below; callers
//! only ever get text back.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::mpsc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::InsightConfig;
use crate::engine::annual_total;
use crate::models::{Expense, Frequency};

pub(crate) const MISSING_KEY: &str = "API Key is missing. Unable to fetch AI insights.";
pub(crate) const REQUEST_FAILED: &str = "Failed to analyze expenses. Please try again later.";
pub(crate) const NO_INSIGHTS: &str = "No insights available.";

/// What the model sees for each expense.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExpenseSummary {
    pub(crate) name: String,
    pub(crate) category: String,
    pub(crate) frequency: Frequency,
    pub(crate) amount: Decimal,
    pub(crate) annual_total: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct InsightRequest {
    pub(crate) expenses: Vec<ExpenseSummary>,
    pub(crate) annual_total: Decimal,
}

impl InsightRequest {
    pub(crate) fn from_expenses(expenses: &[Expense]) -> Self {
        let expenses: Vec<ExpenseSummary> = expenses
            .iter()
            .map(|e| ExpenseSummary {
                name: e.name.clone(),
                category: e.category.clone(),
                frequency: e.frequency,
                amount: e.amount,
                annual_total: annual_total(e),
            })
            .collect();
        let annual_total = expenses.iter().map(|e| e.annual_total).sum();
        Self {
            expenses,
            annual_total,
        }
    }

    pub(crate) fn prompt(&self, currency: &str) -> String {
        let listing = serde_json::to_string_pretty(&self.expenses).unwrap_or_default();
        format!(
            "You are a financial advisor. Analyze the following expense list for a personal budget.\n\
             Currency: {currency}\n\
             Total Annual Budget: {currency}{total}\n\
             Expenses: {listing}\n\
             \n\
             Please provide a concise analysis (max 3 bullet points) covering:\n\
             1. The biggest cost drivers and category breakdown.\n\
             2. Any unusual frequency patterns or potential optimization.\n\
             3. A brief tip for saving money based on these categories.\n\
             \n\
             Keep the tone professional yet encouraging.\n",
            total = self.annual_total.normalize(),
        )
    }
}

// ── Wire types ────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GenerateResponse {
    /// Text of the first candidate, parts joined. `None` when empty.
    fn text(&self) -> Option<String> {
        let text: String = self
            .candidates
            .first()?
            .content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

// ── Client ────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub(crate) struct InsightClient {
    api_key: Option<String>,
    model: String,
    endpoint: String,
    timeout: Duration,
    currency: String,
}

impl InsightClient {
    pub(crate) fn from_config(config: &InsightConfig, currency: &str) -> Self {
        Self {
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            model: config.model.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
            currency: currency.to_string(),
        }
    }

    pub(crate) fn has_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Blocking. Returns the analysis or one of the fallback messages.
    pub(crate) fn analyze(&self, request: &InsightRequest) -> String {
        let Some(key) = &self.api_key else {
            return MISSING_KEY.to_string();
        };
        info!(
            expenses = request.expenses.len(),
            model = %self.model,
            "Requesting insight"
        );
        match self.generate(key, &request.prompt(&self.currency)) {
            Ok(Some(text)) => text,
            Ok(None) => NO_INSIGHTS.to_string(),
            Err(e) => {
                warn!(error = %format!("{e:#}"), "Insight request failed");
                REQUEST_FAILED.to_string()
            }
        }
    }

    fn generate(&self, key: &str, prompt: &str) -> Result<Option<String>> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        let response: GenerateResponse = client
            .post(&url)
            .header("x-goog-api-key", key)
            .json(&body)
            .send()
            .context("Failed to reach insight endpoint")?
            .error_for_status()
            .context("Insight endpoint returned an error")?
            .json()
            .context("Failed to parse insight response")?;

        Ok(response.text())
    }
}

/// Run `analyze` on a worker thread. The receiver yields exactly one message.
pub(crate) fn spawn_analysis(client: InsightClient, request: InsightRequest) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        // The receiver may be gone if the app quit first.
        let _ = tx.send(client.analyze(&request));
    });
    rx
}

#[cfg(test)]
mod tests;
