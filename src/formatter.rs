use std::fmt;

use crate::cell::{CellRange, CellRef};
use crate::classify::{classify_rows, highlight_present};
use crate::error::SheetError;
use crate::host::{Extent, SheetHost};
use crate::layout::{ColumnRule, Layout};
use crate::sign::classify_signs;
use crate::styler::{HEADER_ROW, style_ranges};
use crate::totals::{TotalsOutcome, insert_totals};

/// What one formatting run did.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormatReport {
    pub extent: Option<Extent>,
    pub totals: Option<TotalsOutcome>,
    pub categorized: usize,
    pub signed: usize,
    pub highlighted: usize,
    pub dates_coerced: usize,
}

impl fmt::Display for FormatReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(extent) = self.extent else {
            return write!(f, "sheet is empty, nothing formatted");
        };
        writeln!(f, "rows: {}, columns: {}", extent.rows, extent.columns)?;
        match &self.totals {
            Some(TotalsOutcome::Inserted {
                row,
                appended,
                sums,
            }) => {
                let sums: Vec<String> = sums
                    .iter()
                    .map(|(column, sum)| format!("{}={sum:.2}", CellRef::column_letters(*column)))
                    .collect();
                let how = if *appended { "appended" } else { "inserted" };
                writeln!(f, "total row {how} at {row}: {}", sums.join(", "))?;
            }
            Some(TotalsOutcome::AlreadyTotaled { row }) => {
                writeln!(f, "total row already present at {row}, left unchanged")?;
            }
            None => {}
        }
        write!(
            f,
            "categorized: {}, sign-coloured: {}, highlighted: {}, dates converted: {}",
            self.categorized, self.signed, self.highlighted, self.dates_coerced
        )
    }
}

/// Runs a layout's passes against one sheet.
///
/// The extent is read once up front and every pass works against that
/// snapshot, so a total row appended below it is not restyled.
pub struct SheetFormatter<'a> {
    layout: &'a Layout,
}

impl<'a> SheetFormatter<'a> {
    pub fn new(layout: &'a Layout) -> Self {
        Self { layout }
    }

    pub fn run<H: SheetHost + ?Sized>(&self, host: &mut H) -> Result<FormatReport, SheetError> {
        let extent = host.extent();
        let mut report = FormatReport::default();
        if extent.rows == 0 || extent.columns == 0 {
            return Ok(report);
        }
        report.extent = Some(extent);

        report.dates_coerced = style_ranges(host, extent, self.layout)?;

        if !self.layout.totals.is_empty() {
            report.totals = Some(insert_totals(host, extent, &self.layout.totals)?);
        }

        let data_rows = |column| CellRange::column_span(column, HEADER_ROW + 1, extent.rows);
        for rule in &self.layout.rules {
            match rule {
                ColumnRule::Categories { column, table } => {
                    report.categorized += classify_rows(host, data_rows(*column), table)?;
                }
                ColumnRule::Signs { column, rule } => {
                    report.signed += classify_signs(host, data_rows(*column), rule)?;
                }
                ColumnRule::Present { column, style } => {
                    report.highlighted += highlight_present(host, data_rows(*column), style)?;
                }
            }
        }
        log::debug!("formatted {} sheet: {report:?}", self.layout.name);
        Ok(report)
    }
}
