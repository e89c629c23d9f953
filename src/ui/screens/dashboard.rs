use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Wrap},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{MONTHS, SHORT_MONTHS};
use crate::ui::app::{Analysis, App};
use crate::ui::theme::{swatch_color, Palette};
use crate::ui::util::{compact_amount, format_amount, format_percent, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Summary cards
            Constraint::Min(10),   // Monthly chart + categories
            Constraint::Length(9), // Analysis
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(chunks[1]);
    render_monthly_chart(f, middle[0], app);
    render_category_breakdown(f, middle[1], app);

    render_analysis(f, chunks[2], app);
}

fn block<'a>(title: String, p: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(p.border_style())
        .title(Span::styled(title, p.title_style()))
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let cur = &app.currency;
    let summary = &app.summary;
    let balance = &app.balance;

    let peak = summary
        .peak_month()
        .map(|m| format!("peak {}", MONTHS[m]))
        .unwrap_or_default();

    render_card(
        f,
        cards[0],
        p,
        "Annual Budget",
        format_amount(summary.annual, cur),
        p.red,
        format!("{} expenses", app.state.expenses().len()),
    );
    render_card(
        f,
        cards[1],
        p,
        "Avg Monthly",
        format_amount(summary.average_monthly(), cur),
        p.yellow,
        peak,
    );
    render_card(
        f,
        cards[2],
        p,
        "Annual Income",
        format_amount(balance.annual_income, cur),
        p.green,
        if app.state.income().is_zero() {
            "set with :income".into()
        } else {
            String::new()
        },
    );
    render_card(
        f,
        cards[3],
        p,
        "Savings Rate",
        format_percent(balance.savings_rate),
        p.balance_color(balance.annual_balance >= Decimal::ZERO),
        format!("net {}", format_amount(balance.annual_balance, cur)),
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    p: &Palette,
    title: &str,
    display: String,
    color: Color,
    subtitle: String,
) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            display,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, p.dim_style())),
    ])
    .centered()
    .block(block(format!(" {title} "), p));

    f.render_widget(text, area);
}

fn render_monthly_chart(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let title = match app.highlighted_month {
        Some(m) => format!(
            " Monthly Spend | {} {} ",
            MONTHS[m],
            format_amount(app.summary.monthly[m], &app.currency)
        ),
        None => " Monthly Spend ".to_string(),
    };

    let bars: Vec<Bar> = app
        .summary
        .monthly
        .iter()
        .enumerate()
        .map(|(i, amt)| {
            let color = if app.highlighted_month == Some(i) {
                p.yellow
            } else {
                p.accent
            };
            Bar::default()
                .value(amt.to_u64().unwrap_or(0))
                .text_value(compact_amount(*amt))
                .label(Line::from(SHORT_MONTHS[i]))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(p.header_bg).bg(color))
        })
        .collect();

    // Fit twelve bars into the panel
    let inner = area.width.saturating_sub(2);
    let bar_width = (inner.saturating_sub(11) / 12).clamp(3, 8);

    let chart = BarChart::default()
        .block(block(title, p))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .label_style(p.dim_style());

    f.render_widget(chart, area);
}

fn render_category_breakdown(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let title = format!(" By Category ({}) ", app.summary.categories.len());

    if app.summary.categories.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No expenses yet", p.dim_style())),
            Line::from(Span::styled(
                ":add Rent amount=12000",
                Style::default().fg(p.accent),
            )),
        ])
        .centered()
        .block(block(title, p));
        f.render_widget(msg, area);
        return;
    }

    let name_width = (area.width as usize).saturating_sub(26).max(6);
    let lines: Vec<Line> = app
        .summary
        .categories
        .iter()
        .map(|c| {
            let share = format_percent(app.summary.share(c.annual));
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(swatch_color(c.swatch))),
                Span::styled(
                    format!("{:<name_width$}", truncate(&c.name, name_width)),
                    p.normal_style(),
                ),
                Span::styled(
                    format!("{:>12}", format_amount(c.annual, &app.currency)),
                    p.normal_style(),
                ),
                Span::styled(format!("{share:>8}"), p.dim_style()),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block(title, p)), area);
}

fn render_analysis(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let lines: Vec<Line> = match &app.analysis {
        Analysis::Idle if !app.insight.has_key() => vec![
            Line::from(Span::styled(
                "Press A (or :analyze) for suggestions on this plan",
                p.dim_style(),
            )),
            Line::from(Span::styled(
                "No API key configured: set GEMINI_API_KEY or insight.api_key in config.toml",
                Style::default().fg(p.yellow),
            )),
        ],
        Analysis::Idle => vec![Line::from(Span::styled(
            "Press A (or :analyze) for suggestions on this plan",
            p.dim_style(),
        ))],
        Analysis::Pending(_) => vec![Line::from(Span::styled(
            "Analyzing…",
            p.highlight_style(),
        ))],
        Analysis::Ready(text) => text
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), p.normal_style())))
            .collect(),
    };

    let para = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block(" Analysis ".to_string(), p));
    f.render_widget(para, area);
}
