use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::engine::distribute;
use crate::models::SHORT_MONTHS;
use crate::ui::app::App;
use crate::ui::util::{compact_amount, format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let expenses = app.state.expenses();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(p.border_style())
        .title(Span::styled(
            format!(
                " Expenses ({}) | {} a year ",
                expenses.len(),
                format_amount(app.summary.annual, &app.currency)
            ),
            p.title_style(),
        ));

    if expenses.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No expenses yet", p.dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Press a, or :add Rent amount=12000 freq=monthly category=Housing",
                p.dim_style(),
            )),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let month_header = |i: usize, m: &'static str| {
        let style = if app.highlighted_month == Some(i) {
            p.header_style().fg(p.yellow)
        } else {
            p.header_style()
        };
        Cell::from(m).style(style)
    };

    let mut header_cells: Vec<Cell> = ["Name", "Category", "Freq", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(p.header_style()))
        .collect();
    header_cells.extend(SHORT_MONTHS.iter().enumerate().map(|(i, m)| month_header(i, *m)));
    header_cells.push(Cell::from("Annual").style(p.header_style()));
    let header = Row::new(header_cells).height(1);

    // Leave room for the header and the totals row
    let page = area.height.saturating_sub(4) as usize;

    let mut rows: Vec<Row> = expenses
        .iter()
        .enumerate()
        .skip(app.expense_scroll)
        .take(page)
        .map(|(i, expense)| {
            let months = distribute(expense);
            let mut cells = vec![
                Cell::from(truncate(&expense.name, 22)),
                Cell::from(truncate(&expense.category, 14)),
                Cell::from(expense.frequency.as_str()),
                Cell::from(format_amount(expense.amount, &app.currency)),
            ];
            cells.extend(months.iter().enumerate().map(|(m, amt)| {
                let text = if amt.is_zero() {
                    "·".to_string()
                } else {
                    compact_amount(*amt)
                };
                if app.highlighted_month == Some(m) && i != app.expense_index {
                    Cell::from(Span::styled(text, p.highlight_style()))
                } else {
                    Cell::from(text)
                }
            }));
            let annual: Decimal = months.iter().sum();
            cells.push(Cell::from(format_amount(annual, &app.currency)));

            let style = if i == app.expense_index {
                p.selected_style()
            } else if i % 2 == 1 {
                p.alt_row_style()
            } else {
                p.normal_style()
            };
            Row::new(cells).style(style)
        })
        .collect();

    let mut totals = vec![
        Cell::from("Total"),
        Cell::from(""),
        Cell::from(""),
        Cell::from(""),
    ];
    totals.extend(
        app.summary
            .monthly
            .iter()
            .map(|amt| Cell::from(compact_amount(*amt))),
    );
    totals.push(Cell::from(format_amount(app.summary.annual, &app.currency)));
    rows.push(
        Row::new(totals).style(
            Style::default()
                .fg(p.red)
                .bg(p.header_bg)
                .add_modifier(Modifier::BOLD),
        ),
    );

    let mut widths = vec![
        Constraint::Min(14),
        Constraint::Length(14),
        Constraint::Length(9),
        Constraint::Length(10),
    ];
    widths.extend(std::iter::repeat(Constraint::Length(6)).take(12));
    widths.push(Constraint::Length(11));

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}
