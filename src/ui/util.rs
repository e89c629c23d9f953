use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

fn group_thousands(digits: &str) -> String {
    digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",")
}

/// Format a whole-unit amount with thousand separators, e.g.
/// `186000.4` → `"₹186,000"`. Halves round away from zero.
pub(crate) fn format_amount(val: Decimal, currency: &str) -> String {
    let rounded = val.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();
    let with_commas = group_thousands(&digits);

    if rounded < Decimal::ZERO {
        format!("-{currency}{with_commas}")
    } else {
        format!("{currency}{with_commas}")
    }
}

/// `"42.5%"`, or `"n/a"` when there is no rate.
pub(crate) fn format_percent(rate: Option<Decimal>) -> String {
    match rate {
        Some(r) => {
            let r = r.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
            format!("{}%", r.normalize())
        }
        None => "n/a".into(),
    }
}

/// Short label for chart bars: `950`, `12k`, `1.2M`.
pub(crate) fn compact_amount(val: Decimal) -> String {
    let v = val.abs().to_f64().unwrap_or(0.0);
    let sign = if val < Decimal::ZERO { "-" } else { "" };
    if v >= 1_000_000.0 {
        format!("{sign}{:.1}M", v / 1_000_000.0)
    } else if v >= 10_000.0 {
        format!("{sign}{:.0}k", v / 1_000.0)
    } else if v >= 1_000.0 {
        format!("{sign}{:.1}k", v / 1_000.0)
    } else {
        format!("{sign}{v:.0}")
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// The result is guaranteed to be at most `max` characters (counting "…" as one).
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Move a list cursor down by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
        if *index >= *scroll + page {
            *scroll = index.saturating_sub(page.saturating_sub(1));
        }
    }
}

/// Move a list cursor up by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}

pub(crate) fn scroll_to_top(index: &mut usize, scroll: &mut usize) {
    *index = 0;
    *scroll = 0;
}

pub(crate) fn scroll_to_bottom(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if len > 0 {
        *index = len - 1;
        *scroll = index.saturating_sub(page.saturating_sub(1));
    }
}

/// Pull `index` back inside a list that may have shrunk.
pub(crate) fn clamp_index(index: &mut usize, scroll: &mut usize, len: usize) {
    if *index >= len {
        *index = len.saturating_sub(1);
    }
    if *scroll > *index {
        *scroll = *index;
    }
}
