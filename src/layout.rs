//! Column roles of the two reports. Only the data differs between them; both
//! run through the same [`SheetFormatter`](crate::formatter::SheetFormatter).

use crate::classify::{Category, CategoryTable, MatchMode};
use crate::config::Config;
use crate::sign::SignRule;
use crate::style::{CellStyle, HorizontalAlign};

#[derive(Debug, Clone, PartialEq)]
pub struct AlignGroup {
    pub columns: Vec<u32>,
    pub align: HorizontalAlign,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormatGroup {
    pub columns: Vec<u32>,
    pub format: String,
    pub first_row: u32,
    /// Date text in these columns is converted to date serials first.
    pub dates: bool,
}

/// A classification pass over the data rows of one column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnRule {
    Categories { column: u32, table: CategoryTable },
    Signs { column: u32, rule: SignRule },
    Present { column: u32, style: CellStyle },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub name: &'static str,
    /// Width of the report; also the auto-sized column span.
    pub columns: u32,
    pub align: Vec<AlignGroup>,
    pub formats: Vec<FormatGroup>,
    /// Columns summed into the total row. Empty means no total row.
    pub totals: Vec<u32>,
    pub rules: Vec<ColumnRule>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    Form8949,
    GainsLosses,
}

impl LayoutKind {
    pub fn build(self, config: &Config) -> Layout {
        match self {
            LayoutKind::Form8949 => Layout::form_8949(config),
            LayoutKind::GainsLosses => Layout::gains_losses(config),
        }
    }
}

fn align(columns: &[u32], align: HorizontalAlign) -> AlignGroup {
    AlignGroup {
        columns: columns.to_vec(),
        align,
    }
}

fn format(columns: &[u32], format: &str, first_row: u32) -> FormatGroup {
    FormatGroup {
        columns: columns.to_vec(),
        format: format.to_string(),
        first_row,
        dates: false,
    }
}

fn dates(columns: &[u32], format: &str, first_row: u32) -> FormatGroup {
    FormatGroup {
        dates: true,
        ..self::format(columns, format, first_row)
    }
}

impl Layout {
    /// Description, Date Acquired, Date Sold, Proceeds, Cost Basis, Codes,
    /// Adjustment, Gain or (Loss).
    pub fn form_8949(config: &Config) -> Self {
        Self {
            name: "Form 8949",
            columns: 8,
            align: vec![
                align(&[1, 2, 3], HorizontalAlign::Left),
                align(&[4, 5, 7, 8], HorizontalAlign::Right),
            ],
            formats: vec![
                dates(&[2, 3], "M/d/yyyy", 2),
                format(&[4, 5, 7, 8], "$#,##0.00", 2),
            ],
            totals: vec![4, 5, 8],
            rules: vec![
                ColumnRule::Categories {
                    column: 1,
                    table: config.exchanges.clone(),
                },
                ColumnRule::Signs {
                    column: 8,
                    rule: SignRule::gain_loss(&config.palette),
                },
            ],
        }
    }

    /// Additional Description, Description, Date Acquired, Transaction Type,
    /// Order Size, Market Price, Exchange Fee, Cost Basis, ACB per Share,
    /// Date Sold, Sales Proceeds, Gain or Loss, Order Note.
    pub fn gains_losses(config: &Config) -> Self {
        let palette = &config.palette;
        let highlight = CellStyle::fill(palette.highlight.clone());
        let transaction_type = CategoryTable::new(
            MatchMode::Exact,
            vec![
                Category::new("buy", CellStyle::fill(palette.buy.clone())),
                Category::new("sell", CellStyle::fill(palette.sell.clone())),
            ],
        );
        Self {
            name: "gains and losses",
            columns: 13,
            align: vec![
                align(&[1, 2, 3, 10, 13], HorizontalAlign::Left),
                align(&[4], HorizontalAlign::Center),
                align(&[5, 6, 7, 8, 9, 11, 12], HorizontalAlign::Right),
            ],
            formats: vec![
                // Starts at the header row, as the ledger always has.
                dates(&[3, 10], "M/d/yyyy H:mm:ss", 1),
                format(&[5], "0.00000000", 2),
                format(&[6, 7, 8, 9, 11, 12], "$0.00", 2),
            ],
            totals: Vec::new(),
            rules: vec![
                ColumnRule::Categories {
                    column: 1,
                    table: config.exchanges.clone(),
                },
                ColumnRule::Categories {
                    column: 4,
                    table: transaction_type,
                },
                ColumnRule::Signs {
                    column: 11,
                    rule: SignRule::positive_only(highlight.clone()),
                },
                ColumnRule::Signs {
                    column: 12,
                    rule: SignRule::gain_loss(palette).without_zero(),
                },
                ColumnRule::Present {
                    column: 13,
                    style: highlight,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_form_8949_has_totals() {
        let config = Config::default();
        assert_eq!(LayoutKind::Form8949.build(&config).totals, vec![4, 5, 8]);
        assert!(LayoutKind::GainsLosses.build(&config).totals.is_empty());
    }

    #[test]
    fn every_column_is_aligned_once() {
        let config = Config::default();
        for layout in [Layout::form_8949(&config), Layout::gains_losses(&config)] {
            let mut seen: Vec<u32> = layout
                .align
                .iter()
                .flat_map(|group| group.columns.iter().copied())
                .collect();
            seen.sort_unstable();
            let before = seen.len();
            seen.dedup();
            assert_eq!(seen.len(), before, "{} aligns a column twice", layout.name);
            assert!(seen.iter().all(|&c| c <= layout.columns));
        }
    }

    #[test]
    fn rules_follow_the_configured_exchanges() {
        let mut config = Config::default();
        config.exchanges.mode = MatchMode::Exact;
        let layout = Layout::gains_losses(&config);
        let ColumnRule::Categories { table, .. } = &layout.rules[0] else {
            panic!("first rule should classify exchanges");
        };
        assert_eq!(table.mode, MatchMode::Exact);
    }
}
