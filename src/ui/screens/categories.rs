use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::models::BUILTIN_CATEGORIES;
use crate::ui::app::App;
use crate::ui::theme::swatch_color;
use crate::ui::util::{format_amount, format_percent, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let categories = app.state.categories();

    let header_cells = ["", "Category", "Kind", "Annual", "Share"]
        .iter()
        .map(|h| Cell::from(*h).style(p.header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = categories
        .iter()
        .enumerate()
        .skip(app.category_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, name)| {
            let total = app.summary.categories.iter().find(|c| c.name == *name);
            let kind = if i < BUILTIN_CATEGORIES.len() {
                "built-in"
            } else {
                "custom"
            };

            let (marker, amount, share) = match total {
                Some(t) => (
                    Span::styled("■", Style::default().fg(swatch_color(t.swatch))),
                    format_amount(t.annual, &app.currency),
                    format_percent(app.summary.share(t.annual)),
                ),
                None => (Span::styled("·", p.dim_style()), "—".to_string(), String::new()),
            };

            let style = if i == app.category_index {
                p.selected_style()
            } else if total.is_some() {
                p.normal_style().add_modifier(Modifier::BOLD)
            } else {
                p.dim_style()
            };

            Row::new(vec![
                Cell::from(marker),
                Cell::from(truncate(name, 30)),
                Cell::from(kind),
                Cell::from(amount),
                Cell::from(share),
            ])
            .style(style)
        })
        .collect();

    // Expenses whose category was never registered still show up in totals
    let unlisted = app
        .summary
        .categories
        .iter()
        .filter(|c| !categories.contains(&c.name.as_str()))
        .count();
    let extra = if unlisted > 0 {
        format!("| {unlisted} unlisted ")
    } else {
        String::new()
    };

    let widths = [
        Constraint::Length(2),
        Constraint::Min(20),
        Constraint::Length(10),
        Constraint::Length(14),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(p.border_style())
            .title(Span::styled(
                format!(
                    " Categories ({}) {extra}| :category <name> to add ",
                    categories.len()
                ),
                p.title_style(),
            )),
    );
    f.render_widget(table, area);
}
