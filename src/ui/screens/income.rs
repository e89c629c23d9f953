use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::models::MONTHS;
use crate::ui::app::App;
use crate::ui::util::{format_amount, format_percent};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let cur = &app.currency;
    let balance = &app.balance;

    let header_cells = ["Month", "Income", "Expenses", "Balance"]
        .iter()
        .map(|h| Cell::from(*h).style(p.header_style()));
    let header = Row::new(header_cells).height(1);

    let mut rows: Vec<Row> = balance
        .months
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let month_style = if app.highlighted_month == Some(i) {
                p.highlight_style()
            } else {
                p.normal_style()
            };
            let bal_style = Style::default().fg(p.balance_color(m.balance >= Decimal::ZERO));

            let row = Row::new(vec![
                Cell::from(Span::styled(MONTHS[i], month_style)),
                Cell::from(Span::styled(format_amount(m.income, cur), p.income_style())),
                Cell::from(Span::styled(format_amount(m.expense, cur), p.expense_style())),
                Cell::from(Span::styled(format_amount(m.balance, cur), bal_style)),
            ]);
            if i == app.income_index {
                row.style(p.selected_style())
            } else if i % 2 == 1 {
                row.style(p.alt_row_style())
            } else {
                row
            }
        })
        .collect();

    rows.push(
        Row::new(vec![
            Cell::from("Year"),
            Cell::from(format_amount(balance.annual_income, cur)),
            Cell::from(format_amount(balance.annual_expense, cur)),
            Cell::from(format_amount(balance.annual_balance, cur)),
        ])
        .style(
            Style::default()
                .fg(p.balance_color(balance.annual_balance >= Decimal::ZERO))
                .bg(p.header_bg)
                .add_modifier(Modifier::BOLD),
        ),
    );

    let deficits = balance.deficit_months().count();
    let title = format!(
        " Income vs Expenses | savings rate {} | {deficits} deficit months | Enter edit month ",
        format_percent(balance.savings_rate)
    );

    let widths = [
        Constraint::Length(12),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(16),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(p.border_style())
            .title(Span::styled(title, p.title_style())),
    );
    f.render_widget(table, area);
}
