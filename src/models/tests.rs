#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn make_expense(frequency: Frequency, specific_month: Option<i32>) -> Expense {
    Expense {
        id: "0f8fad5b-d9cb-469f-a165-70867728950e".into(),
        name: "Rent".into(),
        category: "Housing".into(),
        amount: dec!(12000),
        frequency,
        specific_month,
    }
}

// ── Frequency ─────────────────────────────────────────────────

#[test]
fn test_frequency_parse() {
    assert_eq!(Frequency::parse("monthly"), Some(Frequency::Monthly));
    assert_eq!(Frequency::parse("MONTHLY"), Some(Frequency::Monthly));
    assert_eq!(Frequency::parse("q"), Some(Frequency::Quarterly));
    assert_eq!(Frequency::parse("annual"), Some(Frequency::Yearly));
    assert_eq!(Frequency::parse("One-Time"), Some(Frequency::OneTime));
    assert_eq!(Frequency::parse("once"), Some(Frequency::OneTime));
    assert_eq!(Frequency::parse("weekly"), None);
}

#[test]
fn test_frequency_roundtrip() {
    for f in Frequency::all() {
        let s = f.as_str();
        assert_eq!(Frequency::parse(s), Some(*f), "Roundtrip failed for {s}");
    }
}

#[test]
fn test_frequency_serde_names() {
    assert_eq!(
        serde_json::to_string(&Frequency::OneTime).unwrap(),
        "\"One-Time\""
    );
    let parsed: Frequency = serde_json::from_str("\"OneTime\"").unwrap();
    assert_eq!(parsed, Frequency::OneTime);
    let parsed: Frequency = serde_json::from_str("\"Quarterly\"").unwrap();
    assert_eq!(parsed, Frequency::Quarterly);
}

#[test]
fn test_only_monthly_ignores_month() {
    assert!(!Frequency::Monthly.uses_month());
    assert!(Frequency::Quarterly.uses_month());
    assert!(Frequency::Yearly.uses_month());
    assert!(Frequency::OneTime.uses_month());
}

// ── Expense ───────────────────────────────────────────────────

#[test]
fn test_expense_deserializes_stored_shape() {
    let json = r#"{"id":"abc","name":"Gym","category":"Healthcare","amount":1500,
                   "frequency":"Quarterly","specificMonth":2}"#;
    let expense: Expense = serde_json::from_str(json).unwrap();
    assert_eq!(expense.amount, dec!(1500));
    assert_eq!(expense.frequency, Frequency::Quarterly);
    assert_eq!(expense.specific_month, Some(2));
}

#[test]
fn test_expense_missing_optional_fields() {
    let json = r#"{"id":"abc","name":"Gym","amount":99.5,"frequency":"Monthly"}"#;
    let expense: Expense = serde_json::from_str(json).unwrap();
    assert!(expense.category.is_empty());
    assert_eq!(expense.specific_month, None);
    assert_eq!(expense.amount, dec!(99.5));
}

#[test]
fn test_expense_null_category_is_blank() {
    let json = r#"{"id":"abc","name":"Gym","category":null,"amount":10,"frequency":"Monthly"}"#;
    let expense: Expense = serde_json::from_str(json).unwrap();
    assert!(expense.category.is_empty());
}

#[test]
fn test_expense_serializes_camel_case() {
    let value = serde_json::to_value(make_expense(Frequency::Yearly, Some(3))).unwrap();
    assert_eq!(value["specificMonth"], 3);
    assert_eq!(value["frequency"], "Yearly");
    assert_eq!(value["amount"].as_f64(), Some(12000.0));
}

#[test]
fn test_expense_start_month_defaults_to_january() {
    assert_eq!(make_expense(Frequency::Yearly, None).start_month(), 0);
    assert_eq!(make_expense(Frequency::Yearly, Some(7)).start_month(), 7);
}

#[test]
fn test_expense_new_generates_unique_ids() {
    let draft = ExpenseDraft::from(&make_expense(Frequency::Monthly, None));
    let a = Expense::new(draft.clone());
    let b = Expense::new(draft);
    assert_ne!(a.id, b.id);
    assert_eq!(a.name, "Rent");
}

#[test]
fn test_short_id() {
    let e = make_expense(Frequency::Monthly, None);
    assert_eq!(e.short_id(), "0f8fad5b");

    let mut short = e.clone();
    short.id = "x1".into();
    assert_eq!(short.short_id(), "x1");
}

#[test]
fn test_month_label() {
    assert_eq!(make_expense(Frequency::Monthly, Some(4)).month_label(), "every month");
    assert_eq!(make_expense(Frequency::Yearly, None).month_label(), "Default (Jan)");
    assert_eq!(make_expense(Frequency::OneTime, Some(11)).month_label(), "Dec");
    assert_eq!(make_expense(Frequency::Yearly, Some(14)).month_label(), "invalid (14)");
}

// ── Months ────────────────────────────────────────────────────

#[test]
fn test_parse_month() {
    assert_eq!(parse_month("1"), Some(0));
    assert_eq!(parse_month("12"), Some(11));
    assert_eq!(parse_month("0"), None);
    assert_eq!(parse_month("13"), None);
    assert_eq!(parse_month("march"), Some(2));
    assert_eq!(parse_month("Mar"), Some(2));
    assert_eq!(parse_month("may"), Some(4));
    assert_eq!(parse_month("jul"), Some(6));
    assert_eq!(parse_month("ju"), None);
    assert_eq!(parse_month("smarch"), None);
}

// ── Categories ────────────────────────────────────────────────

#[test]
fn test_default_category_is_builtin() {
    assert!(BUILTIN_CATEGORIES.contains(&DEFAULT_CATEGORY));
    assert_eq!(BUILTIN_CATEGORIES[BUILTIN_CATEGORIES.len() - 1], DEFAULT_CATEGORY);
}

#[test]
fn test_swatch_wraps_around_palette() {
    assert_eq!(swatch_for(0).name, "Indigo");
    assert_eq!(swatch_for(11).name, "Fuchsia");
    assert_eq!(swatch_for(12), swatch_for(0));
    assert_eq!(swatch_for(25), CATEGORY_PALETTE[1]);
}

#[test]
fn test_find_by_name_case_insensitive() {
    let cats = ["Housing", "Pets"];
    assert_eq!(find_by_name(&cats, "housing"), Some("Housing"));
    assert_eq!(find_by_name(&cats, " PETS "), Some("Pets"));
    assert_eq!(find_by_name(&cats, "Travel"), None);
}

// ── Income ────────────────────────────────────────────────────

#[test]
fn test_income_flat_broadcasts() {
    let income = IncomeSchedule::flat(dec!(50000));
    assert!(income.months().iter().all(|m| *m == dec!(50000)));
    assert_eq!(income.annual(), dec!(600000));
}

#[test]
fn test_income_set_month_and_copy() {
    let mut income = IncomeSchedule::default();
    assert!(income.is_zero());
    income.set_month(0, dec!(1000));
    income.set_month(5, dec!(2500));
    income.set_month(12, dec!(9999)); // ignored
    assert_eq!(income.month(5), dec!(2500));
    assert_eq!(income.annual(), dec!(3500));

    income.copy_first_to_all();
    assert_eq!(income, IncomeSchedule::flat(dec!(1000)));
}

#[test]
fn test_income_out_of_range_month_reads_zero() {
    let income = IncomeSchedule::flat(dec!(10));
    assert_eq!(income.month(40), Decimal::ZERO);
}

#[test]
fn test_income_serializes_as_array() {
    let income = IncomeSchedule::flat(dec!(100));
    let json = serde_json::to_string(&income).unwrap();
    assert!(json.starts_with('['));
    let back: IncomeSchedule = serde_json::from_str(&json).unwrap();
    assert_eq!(back, income);
}

#[test]
fn test_income_rejects_wrong_length() {
    assert!(serde_json::from_str::<IncomeSchedule>("[1,2,3]").is_err());
}

// ── Theme ─────────────────────────────────────────────────────

#[test]
fn test_theme_toggle_and_parse() {
    assert_eq!(ThemeMode::default(), ThemeMode::Dark);
    assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
    assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
    assert_eq!(ThemeMode::parse("LIGHT"), Some(ThemeMode::Light));
    assert_eq!(ThemeMode::parse("sepia"), None);
    assert_eq!(serde_json::to_string(&ThemeMode::Light).unwrap(), "\"light\"");
}
