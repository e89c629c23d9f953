#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::balance::savings_rate;
use super::*;
use crate::models::{Expense, Frequency, IncomeSchedule, CATEGORY_PALETTE};

fn expense(amount: Decimal, frequency: Frequency, month: Option<i32>) -> Expense {
    categorized("Misc", amount, frequency, month)
}

fn categorized(category: &str, amount: Decimal, frequency: Frequency, month: Option<i32>) -> Expense {
    Expense {
        id: format!("{category}-{amount}-{month:?}"),
        name: "test".into(),
        category: category.into(),
        amount,
        frequency,
        specific_month: month,
    }
}

fn hits(months: &MonthlyAllocation) -> Vec<usize> {
    months
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_zero())
        .map(|(i, _)| i)
        .collect()
}

// ── distribute ────────────────────────────────────────────────

#[test]
fn test_monthly_fills_every_month() {
    for month in [None, Some(0), Some(7), Some(42)] {
        let months = distribute(&expense(dec!(1200), Frequency::Monthly, month));
        assert!(months.iter().all(|m| *m == dec!(1200)), "month {month:?}");
    }
}

#[test]
fn test_yearly_and_one_time_land_once() {
    for freq in [Frequency::Yearly, Frequency::OneTime] {
        let months = distribute(&expense(dec!(20000), freq, Some(3)));
        assert_eq!(hits(&months), vec![3]);
        assert_eq!(months[3], dec!(20000));
    }
}

#[test]
fn test_missing_month_defaults_to_january() {
    let months = distribute(&expense(dec!(500), Frequency::Yearly, None));
    assert_eq!(hits(&months), vec![0]);

    let months = distribute(&expense(dec!(500), Frequency::Quarterly, None));
    assert_eq!(hits(&months), vec![0, 3, 6, 9]);
}

#[test]
fn test_quarterly_late_start_is_short() {
    let e = expense(dec!(300), Frequency::Quarterly, Some(5));
    let months = distribute(&e);
    assert_eq!(hits(&months), vec![5, 8, 11]);
    assert_eq!(annual_total(&e), dec!(900));
}

#[test]
fn test_quarterly_december_start() {
    let months = distribute(&expense(dec!(10), Frequency::Quarterly, Some(11)));
    assert_eq!(hits(&months), vec![11]);
}

#[test]
fn test_out_of_range_month_is_noop() {
    for freq in [Frequency::Yearly, Frequency::OneTime] {
        assert!(hits(&distribute(&expense(dec!(1), freq, Some(12)))).is_empty());
        assert!(hits(&distribute(&expense(dec!(1), freq, Some(-1)))).is_empty());
    }
    assert!(hits(&distribute(&expense(dec!(1), Frequency::Quarterly, Some(12)))).is_empty());
}

#[test]
fn test_quarterly_negative_start_steps_into_year() {
    // -1, 2, 5, 8, 11
    let months = distribute(&expense(dec!(7), Frequency::Quarterly, Some(-1)));
    assert_eq!(hits(&months), vec![2, 5, 8, 11]);
}

#[test]
fn test_distribute_is_pure() {
    let e = expense(dec!(99.99), Frequency::Quarterly, Some(1));
    assert_eq!(distribute(&e), distribute(&e));
}

// ── aggregate ─────────────────────────────────────────────────

#[test]
fn test_end_to_end_year() {
    let expenses = vec![
        expense(dec!(12000), Frequency::Monthly, None),
        expense(dec!(5000), Frequency::Quarterly, Some(0)),
        expense(dec!(20000), Frequency::Yearly, Some(3)),
    ];
    let agg = aggregate(&expenses);
    let expected = [
        17000, 12000, 12000, 32000, 12000, 12000, 17000, 12000, 12000, 17000, 12000, 12000,
    ]
    .map(Decimal::from);
    assert_eq!(agg.monthly, expected);
    assert_eq!(agg.annual, dec!(186000));
    assert_eq!(agg.peak_month(), Some(3));
    assert_eq!(agg.average_monthly(), dec!(15500));
}

#[test]
fn test_totals_agree() {
    let expenses = vec![
        categorized("Housing", dec!(15000), Frequency::Monthly, None),
        categorized("Insurance", dec!(2400.50), Frequency::Quarterly, Some(2)),
        categorized("Housing", dec!(8000), Frequency::Yearly, Some(10)),
        categorized("Education", dec!(45000), Frequency::OneTime, Some(5)),
        categorized("Debt", dec!(300), Frequency::Quarterly, Some(9)),
        categorized("Debt", dec!(1), Frequency::Yearly, Some(40)),
    ];
    let agg = aggregate(&expenses);

    let from_months: Decimal = agg.monthly.iter().sum();
    let from_categories: Decimal = agg.categories.iter().map(|c| c.annual).sum();
    let from_expenses: Decimal = expenses.iter().map(annual_total).sum();

    assert_eq!(from_months, agg.annual);
    assert_eq!(from_categories, agg.annual);
    assert_eq!(from_expenses, agg.annual);
}

#[test]
fn test_categories_sorted_descending() {
    let expenses = vec![
        categorized("Utilities", dec!(100), Frequency::Monthly, None),
        categorized("Housing", dec!(1000), Frequency::Monthly, None),
        categorized("Utilities", dec!(50), Frequency::Yearly, None),
        categorized("Shopping", dec!(2000), Frequency::OneTime, Some(10)),
    ];
    let agg = aggregate(&expenses);
    let names: Vec<&str> = agg.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Housing", "Shopping", "Utilities"]);
    assert_eq!(agg.categories[2].annual, dec!(1250));
}

#[test]
fn test_category_ties_keep_first_seen_order() {
    let expenses = vec![
        categorized("Zeta", dec!(100), Frequency::Yearly, None),
        categorized("Alpha", dec!(100), Frequency::OneTime, Some(4)),
        categorized("Mid", dec!(100), Frequency::Yearly, Some(8)),
    ];
    let names: Vec<String> = aggregate(&expenses)
        .categories
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
}

#[test]
fn test_swatch_follows_first_seen_position() {
    let expenses = vec![
        categorized("Small", dec!(1), Frequency::Yearly, None),
        categorized("Big", dec!(1000), Frequency::Yearly, None),
    ];
    let agg = aggregate(&expenses);
    // Big sorts first but was seen second
    assert_eq!(agg.categories[0].name, "Big");
    assert_eq!(agg.categories[0].swatch, CATEGORY_PALETTE[1]);
    assert_eq!(agg.categories[1].swatch, CATEGORY_PALETTE[0]);

    let reversed: Vec<Expense> = expenses.into_iter().rev().collect();
    let agg = aggregate(&reversed);
    assert_eq!(agg.categories[0].swatch, CATEGORY_PALETTE[0]);
}

#[test]
fn test_swatches_wrap_after_palette() {
    let expenses: Vec<Expense> = (0..14)
        .map(|i| categorized(&format!("c{i}"), Decimal::from(100 - i), Frequency::Yearly, None))
        .collect();
    let agg = aggregate(&expenses);
    assert_eq!(agg.categories.len(), 14);
    assert_eq!(agg.categories[12].swatch, CATEGORY_PALETTE[0]);
    assert_eq!(agg.categories[13].swatch, CATEGORY_PALETTE[1]);
}

#[test]
fn test_category_with_zero_on_calendar_still_listed() {
    let expenses = vec![categorized("Ghost", dec!(10), Frequency::OneTime, Some(99))];
    let agg = aggregate(&expenses);
    assert_eq!(agg.categories.len(), 1);
    assert_eq!(agg.categories[0].annual, Decimal::ZERO);
    assert_eq!(agg.annual, Decimal::ZERO);
}

#[test]
fn test_empty_aggregate() {
    let agg = aggregate(&[]);
    assert!(agg.monthly.iter().all(|m| m.is_zero()));
    assert!(agg.categories.is_empty());
    assert_eq!(agg.annual, Decimal::ZERO);
    assert_eq!(agg.share(dec!(10)), None);
    assert_eq!(agg.peak_month(), None);
}

#[test]
fn test_aggregate_is_pure() {
    let expenses = vec![
        categorized("A", dec!(5), Frequency::Monthly, None),
        categorized("B", dec!(5), Frequency::Quarterly, Some(1)),
    ];
    assert_eq!(aggregate(&expenses), aggregate(&expenses));
}

#[test]
fn test_share_of_total() {
    let expenses = vec![
        categorized("A", dec!(300), Frequency::Yearly, None),
        categorized("B", dec!(100), Frequency::Yearly, None),
    ];
    let agg = aggregate(&expenses);
    assert_eq!(agg.share(dec!(300)), Some(dec!(75)));
}

#[test]
fn test_oversized_stored_amounts_saturate() {
    let huge = dec!(10000000000000000000000000000);
    let expenses = vec![
        categorized("A", huge, Frequency::Monthly, None),
        categorized("A", huge, Frequency::Monthly, None),
    ];
    let agg = aggregate(&expenses);
    assert_eq!(agg.annual, Decimal::MAX);
    assert_eq!(agg.categories[0].annual, Decimal::MAX);
    assert_eq!(annual_total(&expenses[0]), Decimal::MAX);

    let b = balance(&agg.monthly, &IncomeSchedule::flat(dec!(0.01)));
    assert!(b.annual_balance.is_sign_negative());
}

// ── balance ───────────────────────────────────────────────────

#[test]
fn test_balance_per_month() {
    let expenses = vec![
        expense(dec!(12000), Frequency::Monthly, None),
        expense(dec!(20000), Frequency::Yearly, Some(3)),
    ];
    let agg = aggregate(&expenses);
    let b = balance(&agg.monthly, &IncomeSchedule::flat(dec!(25000)));

    assert_eq!(b.months[0].balance, dec!(13000));
    assert_eq!(b.months[3].expense, dec!(32000));
    assert_eq!(b.months[3].balance, dec!(-7000));
    assert_eq!(b.deficit_months().collect::<Vec<_>>(), vec![3]);
    assert_eq!(b.annual_income, dec!(300000));
    assert_eq!(b.annual_expense, dec!(164000));
    assert_eq!(b.annual_balance, dec!(136000));
}

#[test]
fn test_balance_uses_each_month_of_income() {
    let mut income = IncomeSchedule::default();
    income.set_month(6, dec!(90000));
    let monthly = [dec!(1000); 12];
    let b = balance(&monthly, &income);
    assert_eq!(b.months[6].income, dec!(90000));
    assert_eq!(b.months[6].balance, dec!(89000));
    assert_eq!(b.months[7].balance, dec!(-1000));
    assert_eq!(b.savings_rate, Some(dec!(78000) / dec!(90000) * dec!(100)));
}

#[test]
fn test_savings_rate_not_applicable_without_income() {
    assert_eq!(savings_rate(Decimal::ZERO, dec!(100)), None);
    assert_eq!(savings_rate(dec!(-5), dec!(100)), None);
    assert_eq!(savings_rate(Decimal::ZERO, Decimal::ZERO), None);
}

#[test]
fn test_savings_rate_values() {
    assert_eq!(savings_rate(dec!(1000), dec!(250)), Some(dec!(75)));
    assert_eq!(savings_rate(dec!(1000), dec!(1500)), Some(dec!(-50)));
}

#[test]
fn test_empty_plan_balance() {
    let agg = aggregate(&[]);
    let none = balance(&agg.monthly, &IncomeSchedule::default());
    assert_eq!(none.savings_rate, None);

    let some = balance(&agg.monthly, &IncomeSchedule::flat(dec!(100)));
    assert_eq!(some.savings_rate, Some(dec!(100)));
    assert_eq!(some.deficit_months().count(), 0);
}
