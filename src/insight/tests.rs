#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;

fn expenses() -> Vec<Expense> {
    vec![
        Expense {
            id: "1".into(),
            name: "Rent".into(),
            category: "Housing".into(),
            amount: dec!(12000),
            frequency: Frequency::Monthly,
            specific_month: None,
        },
        Expense {
            id: "2".into(),
            name: "Car service".into(),
            category: "Transportation".into(),
            amount: dec!(300),
            frequency: Frequency::Quarterly,
            specific_month: Some(5),
        },
    ]
}

fn client(api_key: Option<&str>, endpoint: &str) -> InsightClient {
    let config = InsightConfig {
        api_key: api_key.map(String::from),
        endpoint: endpoint.into(),
        timeout_secs: 2,
        ..InsightConfig::default()
    };
    InsightClient::from_config(&config, "₹")
}

// ── Request ───────────────────────────────────────────────────

#[test]
fn test_summary_uses_distributed_totals() {
    let request = InsightRequest::from_expenses(&expenses());
    assert_eq!(request.expenses[0].annual_total, dec!(144000));
    // quarterly from June: Jun, Sep, Dec
    assert_eq!(request.expenses[1].annual_total, dec!(900));
    assert_eq!(request.annual_total, dec!(144900));
}

#[test]
fn test_summary_serializes_camel_case() {
    let request = InsightRequest::from_expenses(&expenses());
    let value = serde_json::to_value(&request.expenses[1]).unwrap();
    assert_eq!(value["annualTotal"].as_f64(), Some(900.0));
    assert_eq!(value["frequency"], "Quarterly");
    assert!(value.get("id").is_none());
}

#[test]
fn test_prompt_contents() {
    let prompt = InsightRequest::from_expenses(&expenses()).prompt("₹");
    assert!(prompt.starts_with("You are a financial advisor."));
    assert!(prompt.contains("Currency: ₹"));
    assert!(prompt.contains("Total Annual Budget: ₹144900"));
    assert!(prompt.contains("\"name\": \"Car service\""));
    assert!(prompt.contains("max 3 bullet points"));
    assert!(prompt.contains("A brief tip for saving money"));
}

// ── Client ────────────────────────────────────────────────────

#[test]
fn test_missing_key_fallback() {
    let request = InsightRequest::from_expenses(&expenses());
    let c = client(None, "http://127.0.0.1:9");
    assert!(!c.has_key());
    assert_eq!(c.analyze(&request), MISSING_KEY);

    let blank = client(Some("  "), "http://127.0.0.1:9");
    assert_eq!(blank.analyze(&request), MISSING_KEY);
}

#[test]
fn test_unreachable_endpoint_fallback() {
    let request = InsightRequest::from_expenses(&expenses());
    let c = client(Some("key"), "http://127.0.0.1:9/");
    assert_eq!(c.analyze(&request), REQUEST_FAILED);
}

#[test]
fn test_spawned_analysis_reports_back() {
    let rx = spawn_analysis(
        client(None, "http://127.0.0.1:9"),
        InsightRequest::from_expenses(&expenses()),
    );
    let text = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(text, MISSING_KEY);
}

// ── Response parsing ──────────────────────────────────────────

#[test]
fn test_response_text_joins_parts() {
    let json = r#"{"candidates":[{"content":{"parts":[{"text":"- Rent "},{"text":"dominates."}],"role":"model"}}]}"#;
    let response: GenerateResponse = serde_json::from_str(json).unwrap();
    assert_eq!(response.text().as_deref(), Some("- Rent dominates."));
}

#[test]
fn test_response_without_text() {
    let response: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
    assert_eq!(response.text(), None);

    let response: GenerateResponse =
        serde_json::from_str(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#).unwrap();
    assert_eq!(response.text(), None);

    let response: GenerateResponse = serde_json::from_str("{}").unwrap();
    assert_eq!(response.text(), None);
}

#[test]
fn test_request_body_shape() {
    let body = GenerateRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: Some("hi".into()),
            }],
        }],
    };
    let value = serde_json::to_value(&body).unwrap();
    assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
}
