/// Categories offered before the user adds any of their own.
pub(crate) const BUILTIN_CATEGORIES: [&str; 12] = [
    "Housing",
    "Utilities",
    "Groceries",
    "Transportation",
    "Insurance",
    "Healthcare",
    "Entertainment",
    "Shopping",
    "Education",
    "Savings",
    "Debt",
    "Miscellaneous",
];

/// Label given to stored expenses that have no category.
pub(crate) const DEFAULT_CATEGORY: &str = "Miscellaneous";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Swatch {
    pub(crate) name: &'static str,
    pub(crate) rgb: (u8, u8, u8),
}

pub(crate) const CATEGORY_PALETTE: [Swatch; 12] = [
    Swatch { name: "Indigo", rgb: (99, 102, 241) },
    Swatch { name: "Pink", rgb: (236, 72, 153) },
    Swatch { name: "Violet", rgb: (139, 92, 246) },
    Swatch { name: "Emerald", rgb: (16, 185, 129) },
    Swatch { name: "Amber", rgb: (245, 158, 11) },
    Swatch { name: "Blue", rgb: (59, 130, 246) },
    Swatch { name: "Red", rgb: (239, 68, 68) },
    Swatch { name: "Teal", rgb: (20, 184, 166) },
    Swatch { name: "Lime", rgb: (132, 204, 22) },
    Swatch { name: "Orange", rgb: (249, 115, 22) },
    Swatch { name: "Cyan", rgb: (6, 182, 212) },
    Swatch { name: "Fuchsia", rgb: (217, 70, 239) },
];

/// Colour for the n-th distinct category seen during aggregation.
/// Positional, so the same category can change colour when the
/// order of expenses changes.
pub(crate) fn swatch_for(position: usize) -> Swatch {
    CATEGORY_PALETTE[position % CATEGORY_PALETTE.len()]
}

/// Find a category by name (case-insensitive), returning the canonical label.
pub(crate) fn find_by_name<'a>(categories: &[&'a str], name: &str) -> Option<&'a str> {
    let lower = name.trim().to_lowercase();
    categories
        .iter()
        .find(|c| c.to_lowercase() == lower)
        .copied()
}
