use crate::cell::{CellRange, CellRef, CellValue};
use crate::error::SheetError;
use crate::host::{Extent, SheetHost};

pub const TOTAL_LABEL: &str = "total";

#[derive(Debug, Clone, PartialEq)]
pub enum TotalsOutcome {
    /// A total row was written. `appended` is set when the sheet had to grow.
    Inserted {
        row: u32,
        appended: bool,
        sums: Vec<(u32, f64)>,
    },
    /// Column 1 already carries the total label; nothing was written.
    AlreadyTotaled { row: u32 },
}

/// Writes a total row at the first fully blank row of `extent`, or on a new
/// row below it when every row has data.
///
/// Each designated column is summed over the data rows above the total row
/// (row 2 up to the row before it). Blank and non-numeric cells add nothing.
/// A sheet that already has a total row is left untouched, so a second run
/// cannot count the first total.
pub fn insert_totals<H: SheetHost + ?Sized>(
    host: &mut H,
    extent: Extent,
    columns: &[u32],
) -> Result<TotalsOutcome, SheetError> {
    let grid = host.values(CellRange::new(1, 1, extent.rows, extent.columns))?;

    for &column in columns {
        if column == 0 || column > extent.columns {
            return Err(SheetError::SheetAccess {
                cell: CellRef::new(1, column),
                reason: format!("total column is outside the sheet's {} columns", extent.columns),
            });
        }
    }

    if let Some(row) = existing_total_row(&grid) {
        log::warn!("sheet already has a total row at {row}; skipping totals");
        return Ok(TotalsOutcome::AlreadyTotaled { row });
    }

    let blank = grid
        .iter()
        .position(|row| row.iter().all(CellValue::is_empty))
        .map(|index| index as u32 + 1);
    let (row, appended) = match blank {
        Some(row) => (row, false),
        None => (host.append_row()?, true),
    };

    let sums: Vec<(u32, f64)> = columns
        .iter()
        .map(|&column| {
            let sum = grid
                .iter()
                .take(row as usize - 1)
                .skip(1)
                .map(|cells| cells[column as usize - 1].as_number().unwrap_or(0.0))
                .sum::<f64>();
            (column, sum)
        })
        .collect();

    host.set_value(CellRef::new(row, 1), CellValue::Text(TOTAL_LABEL.to_string()))?;
    for &(column, sum) in &sums {
        host.set_value(CellRef::new(row, column), CellValue::Number(sum))?;
    }
    log::debug!("wrote total row {row} (appended: {appended})");

    Ok(TotalsOutcome::Inserted {
        row,
        appended,
        sums,
    })
}

fn existing_total_row(grid: &[Vec<CellValue>]) -> Option<u32> {
    grid.iter()
        .enumerate()
        .skip(1)
        .find(|(_, cells)| {
            cells
                .first()
                .is_some_and(|cell| cell.text().trim().eq_ignore_ascii_case(TOTAL_LABEL))
        })
        .map(|(index, _)| index as u32 + 1)
}
