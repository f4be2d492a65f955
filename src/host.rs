//! The one external collaborator: a grid of cells the passes read and style.

use crate::cell::{CellRange, CellRef, CellValue};
use crate::error::SheetError;
use crate::style::{CellStyle, HorizontalAlign};

/// Hard row limit of an xlsx worksheet.
pub const MAX_ROWS: u32 = 1_048_576;

/// Hard column limit of an xlsx worksheet (`XFD`).
pub const MAX_COLUMNS: u32 = 16_384;

/// Current row/column extent of a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub rows: u32,
    pub columns: u32,
}

/// A spreadsheet addressed by 1-based `(row, column)`.
///
/// Every formatting pass takes the host explicitly; there is no ambient
/// "active sheet".
pub trait SheetHost {
    fn extent(&self) -> Extent;

    fn value(&self, cell: CellRef) -> Result<CellValue, SheetError>;

    fn set_value(&mut self, cell: CellRef, value: CellValue) -> Result<(), SheetError>;

    /// Applies the set fields of `style`; unset fields keep their current value.
    fn apply_style(&mut self, cell: CellRef, style: &CellStyle) -> Result<(), SheetError>;

    fn set_alignment(&mut self, range: CellRange, align: HorizontalAlign) -> Result<(), SheetError>;

    fn set_bold(&mut self, range: CellRange) -> Result<(), SheetError>;

    fn set_number_format(&mut self, range: CellRange, format: &str) -> Result<(), SheetError>;

    fn freeze_rows(&mut self, rows: u32) -> Result<(), SheetError>;

    fn auto_resize_columns(&mut self, first: u32, count: u32) -> Result<(), SheetError>;

    /// Grows the sheet by one row at the bottom and returns the new row index.
    fn append_row(&mut self) -> Result<u32, SheetError>;

    /// Reads a whole range row by row.
    fn values(&self, range: CellRange) -> Result<Vec<Vec<CellValue>>, SheetError> {
        let first = range.first;
        (first.row..first.row + range.rows)
            .map(|row| {
                (first.column..first.column + range.columns)
                    .map(|column| self.value(CellRef::new(row, column)))
                    .collect()
            })
            .collect()
    }
}

pub(crate) fn check_in_bounds(cell: CellRef) -> Result<(), SheetError> {
    if cell.row == 0 || cell.column == 0 {
        return Err(SheetError::SheetAccess {
            cell,
            reason: "rows and columns are 1-based".to_string(),
        });
    }
    if cell.row > MAX_ROWS {
        return Err(SheetError::SheetAccess {
            cell,
            reason: format!("row is past the {MAX_ROWS} row limit"),
        });
    }
    if cell.column > MAX_COLUMNS {
        return Err(SheetError::SheetAccess {
            cell,
            reason: format!("column is past the {MAX_COLUMNS} column limit"),
        });
    }
    Ok(())
}
