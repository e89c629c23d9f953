#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::Frequency;

fn draft(name: &str, amount: Decimal) -> ExpenseDraft {
    ExpenseDraft {
        name: name.into(),
        category: "Housing".into(),
        amount,
        frequency: Frequency::Monthly,
        specific_month: None,
    }
}

fn with_ids(ids: &[&str]) -> BudgetState {
    let mut state = BudgetState::default();
    for id in ids {
        state
            .expenses
            .push(draft("x", dec!(1)).into_expense((*id).to_string()));
    }
    state
}

#[test]
fn test_add_expense_assigns_id() {
    let mut state = BudgetState::default();
    let id = state.add_expense(draft("Rent", dec!(12000))).id.clone();
    assert_eq!(id.len(), 36);
    assert_eq!(state.expenses().len(), 1);
    assert_eq!(state.expenses()[0].name, "Rent");
}

#[test]
fn test_update_keeps_id() {
    let mut state = BudgetState::default();
    let id = state.add_expense(draft("Rent", dec!(12000))).id.clone();

    let mut changed = draft("Rent (new flat)", dec!(14000));
    changed.frequency = Frequency::Quarterly;
    changed.specific_month = Some(1);
    let updated = state.update_expense(&id, changed).unwrap();

    assert_eq!(updated.id, id);
    assert_eq!(updated.amount, dec!(14000));
    assert_eq!(state.expenses().len(), 1);
    assert_eq!(state.monthly_totals()[1], dec!(14000));
    assert_eq!(state.monthly_totals()[0], Decimal::ZERO);
}

#[test]
fn test_update_unknown_id() {
    let mut state = BudgetState::default();
    let err = state.update_expense("nope", draft("a", dec!(1))).unwrap_err();
    assert_eq!(err, StateError::NotFound("nope".into()));
}

#[test]
fn test_delete_is_unconditional() {
    let mut state = with_ids(&["a1", "b2", "c3"]);
    let removed = state.delete_expense("b2").unwrap();
    assert_eq!(removed.id, "b2");
    let ids: Vec<&str> = state.expenses().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "c3"]);

    assert!(state.delete_expense("b2").is_none());
    assert_eq!(state.expenses().len(), 2);
}

#[test]
fn test_find_by_prefix() {
    let state = with_ids(&["abc123", "abd456", "abc"]);
    // exact match wins over prefix ambiguity
    assert_eq!(state.find_expense("abc").unwrap().id, "abc");
    assert_eq!(state.find_expense("abd").unwrap().id, "abd456");
    assert_eq!(
        state.find_expense("ab").unwrap_err(),
        StateError::Ambiguous("ab".into(), 3)
    );
    assert_eq!(
        state.find_expense("zz").unwrap_err(),
        StateError::NotFound("zz".into())
    );
    assert!(state.find_expense("  ").is_err());
}

#[test]
fn test_categories_builtin_then_custom() {
    let mut state = BudgetState::default();
    assert_eq!(state.categories().len(), 12);
    assert_eq!(state.categories()[0], "Housing");

    assert!(state.add_category("Pets"));
    assert_eq!(state.categories().last(), Some(&"Pets"));
}

#[test]
fn test_unlisted_categories_come_from_expenses() {
    let mut state = BudgetState::default();
    state.add_expense(ExpenseDraft {
        category: "Other".into(),
        ..draft("Mystery", dec!(10))
    });
    state.add_expense(draft("Rent", dec!(100)));

    let unlisted = state.unlisted_categories();
    assert_eq!(unlisted.len(), 1);
    assert_eq!(unlisted[0].name, "Other");
    assert_eq!(unlisted[0].annual, dec!(120));

    assert!(state.add_category("Other"));
    assert!(state.unlisted_categories().is_empty());
}

#[test]
fn test_add_category_noop_cases() {
    let mut state = BudgetState::default();
    assert!(!state.add_category(""));
    assert!(!state.add_category("   "));
    assert!(!state.add_category("Housing"));
    assert!(state.add_category("Pets"));
    assert!(!state.add_category("Pets"));
    // case-sensitive: a differently-cased name is a new category
    assert!(state.add_category("pets"));
    assert_eq!(state.custom_categories, vec!["Pets", "pets"]);
}

#[test]
fn test_summary_and_balance() {
    let mut state = BudgetState::default();
    state.add_expense(draft("Rent", dec!(10000)));
    let mut insurance = draft("Insurance", dec!(6000));
    insurance.category = "Insurance".into();
    insurance.frequency = Frequency::Yearly;
    insurance.specific_month = Some(2);
    state.add_expense(insurance);

    let summary = state.summary();
    assert_eq!(summary.annual, dec!(126000));
    assert_eq!(state.category_totals()[0].name, "Housing");

    state.set_income(IncomeSchedule::flat(dec!(12000)));
    let b = state.balance(state.income());
    assert_eq!(b.months[2].balance, dec!(-4000));
    assert_eq!(b.annual_balance, dec!(18000));
}

#[test]
fn test_income_mut_edits_one_month() {
    let mut state = BudgetState::default();
    state.income_mut().set_month(3, dec!(500));
    assert_eq!(state.income().annual(), dec!(500));
}

#[test]
fn test_theme_toggle() {
    let mut state = BudgetState::default();
    assert_eq!(state.theme(), ThemeMode::Dark);
    assert_eq!(state.toggle_theme(), ThemeMode::Light);
    state.set_theme(ThemeMode::Dark);
    assert_eq!(state.theme(), ThemeMode::Dark);
}
