use serde::{Deserialize, Serialize};

use crate::cell::CellRange;
use crate::error::SheetError;
use crate::host::SheetHost;
use crate::style::{CellStyle, color};

/// How a category name is compared with lower-cased cell text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Text ends with the category name.
    #[default]
    Suffix,
    /// Text equals the category name.
    Exact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(flatten)]
    pub style: CellStyle,
}

impl Category {
    pub fn new(name: impl Into<String>, style: CellStyle) -> Self {
        Self {
            name: name.into().to_lowercase(),
            style,
        }
    }
}

/// Ordered category list. Lookup walks the list in declaration order and the
/// first match wins, even when a later name would match more of the text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTable {
    #[serde(default)]
    pub mode: MatchMode,
    pub categories: Vec<Category>,
}

impl CategoryTable {
    pub fn new(mode: MatchMode, categories: Vec<Category>) -> Self {
        Self { mode, categories }
    }

    /// Exchange colours for the description column, plus the total row.
    pub fn exchanges() -> Self {
        let on = |bg: &str| CellStyle::fill(color(bg)).with_font(color("white"));
        Self::new(
            MatchMode::Suffix,
            vec![
                Category::new("robinhood", on("#38761d")),
                Category::new("coinbase", on("#1155cc")),
                Category::new("coinbase_pro", on("#434343")),
                Category::new("kraken", on("#674ea7")),
                Category::new(
                    "total",
                    CellStyle::fill(color("#fce8b2")).with_font(color("black")).bold(),
                ),
            ],
        )
    }

    pub fn lookup(&self, text: &str) -> Option<&Category> {
        let text = text.to_lowercase();
        if text.is_empty() {
            return None;
        }
        self.categories.iter().find(|category| {
            let name = category.name.to_lowercase();
            !name.is_empty()
                && match self.mode {
                    MatchMode::Suffix => text.ends_with(&name),
                    MatchMode::Exact => text == name,
                }
        })
    }
}

/// Styles every cell in `range` whose text matches a category. Unmatched cells
/// keep whatever style they had. Returns the number of styled cells.
pub fn classify_rows<H: SheetHost + ?Sized>(
    host: &mut H,
    range: CellRange,
    table: &CategoryTable,
) -> Result<usize, SheetError> {
    let mut styled = 0;
    for cell in range.cells() {
        let text = host.value(cell)?.text();
        if let Some(category) = table.lookup(&text) {
            host.apply_style(cell, &category.style)?;
            styled += 1;
        }
    }
    Ok(styled)
}

/// Highlights every cell holding something: non-empty text or a non-zero
/// number.
pub fn highlight_present<H: SheetHost + ?Sized>(
    host: &mut H,
    range: CellRange,
    style: &CellStyle,
) -> Result<usize, SheetError> {
    let mut styled = 0;
    for cell in range.cells() {
        let value = host.value(cell)?;
        let present = match value.as_number() {
            Some(n) => n != 0.0,
            None => !value.is_empty(),
        };
        if present {
            host.apply_style(cell, style)?;
            styled += 1;
        }
    }
    Ok(styled)
}
