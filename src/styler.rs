use crate::cell::CellRange;
use crate::dates::coerce_dates;
use crate::error::SheetError;
use crate::host::{Extent, SheetHost};
use crate::layout::Layout;
use crate::style::HorizontalAlign;

pub const HEADER_ROW: u32 = 1;

/// Static presentation: column alignment, the header row, column widths and
/// number formats. Returns how many date cells were converted from text.
pub fn style_ranges<H: SheetHost + ?Sized>(
    host: &mut H,
    extent: Extent,
    layout: &Layout,
) -> Result<usize, SheetError> {
    for group in &layout.align {
        for &column in &group.columns {
            host.set_alignment(CellRange::new(HEADER_ROW, column, extent.rows, 1), group.align)?;
        }
    }

    let header = CellRange::new(HEADER_ROW, 1, 1, extent.columns);
    host.set_alignment(header, HorizontalAlign::Center)?;
    host.set_bold(header)?;
    host.freeze_rows(HEADER_ROW)?;
    host.auto_resize_columns(1, layout.columns)?;

    let mut coerced = 0;
    for group in &layout.formats {
        for &column in &group.columns {
            let range = CellRange::column_span(column, group.first_row, extent.rows);
            if group.dates {
                coerced += coerce_dates(host, range)?;
            }
            host.set_number_format(range, &group.format)?;
        }
    }
    log::debug!("styled {} layout over {}x{}", layout.name, extent.rows, extent.columns);
    Ok(coerced)
}
