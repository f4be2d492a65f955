use umya_spreadsheet::Worksheet;
use umya_spreadsheet::structs::{
    Coordinate, HorizontalAlignmentValues, Pane, PaneStateValues, PaneValues, PatternValues,
    SheetView,
};

use crate::cell::{CellRange, CellRef, CellValue};
use crate::error::SheetError;
use crate::host::{Extent, MAX_ROWS, SheetHost, check_in_bounds};
use crate::style::{CellStyle, Color, HorizontalAlign};

/// [`SheetHost`] over a umya-spreadsheet worksheet.
///
/// An xlsx sheet has no fixed grid, so its extent is the used range plus a
/// number of spare blank rows.
pub struct XlsxSheet<'a> {
    sheet: &'a mut Worksheet,
    rows: u32,
    columns: u32,
}

impl<'a> XlsxSheet<'a> {
    pub fn new(sheet: &'a mut Worksheet, spare_rows: u32) -> Self {
        let rows = sheet.get_highest_row().saturating_add(spare_rows).min(MAX_ROWS);
        let columns = sheet.get_highest_column();
        Self {
            sheet,
            rows,
            columns,
        }
    }

    fn address(&self, cell: CellRef) -> Result<String, SheetError> {
        check_in_bounds(cell)?;
        if cell.row > self.rows {
            return Err(SheetError::SheetAccess {
                cell,
                reason: format!("row is below the sheet's last row {}", self.rows),
            });
        }
        Ok(cell.to_a1())
    }

    fn each_style(
        &mut self,
        range: CellRange,
        mut f: impl FnMut(&mut umya_spreadsheet::Style),
    ) -> Result<(), SheetError> {
        for cell in range.cells() {
            let addr = self.address(cell)?;
            f(self.sheet.get_style_mut(addr.as_str()));
        }
        Ok(())
    }
}

fn solid_fill(style: &mut umya_spreadsheet::Style, color: &Color) {
    let argb = color.argb();
    let pattern = style.get_fill_mut().get_pattern_fill_mut();
    pattern.set_pattern_type(PatternValues::Solid);
    pattern.get_foreground_color_mut().set_argb(&argb);
    pattern.get_background_color_mut().set_argb(&argb);
}

fn horizontal(align: HorizontalAlign) -> HorizontalAlignmentValues {
    match align {
        HorizontalAlign::Left => HorizontalAlignmentValues::Left,
        HorizontalAlign::Center => HorizontalAlignmentValues::Center,
        HorizontalAlign::Right => HorizontalAlignmentValues::Right,
    }
}

impl SheetHost for XlsxSheet<'_> {
    fn extent(&self) -> Extent {
        Extent {
            rows: self.rows,
            columns: self.columns,
        }
    }

    fn value(&self, cell: CellRef) -> Result<CellValue, SheetError> {
        let addr = self.address(cell)?;
        Ok(CellValue::from_text(&self.sheet.get_value(addr.as_str())))
    }

    fn set_value(&mut self, cell: CellRef, value: CellValue) -> Result<(), SheetError> {
        let addr = self.address(cell)?;
        let target = self.sheet.get_cell_mut(addr.as_str());
        match value {
            CellValue::Number(n) => {
                target.set_value_number(n);
            }
            CellValue::Text(s) => {
                target.set_value_string(s);
            }
            CellValue::Empty => {
                target.set_value_string("");
            }
        }
        if cell.column > self.columns {
            self.columns = cell.column;
        }
        Ok(())
    }

    fn apply_style(&mut self, cell: CellRef, style: &CellStyle) -> Result<(), SheetError> {
        let addr = self.address(cell)?;
        let target = self.sheet.get_style_mut(addr.as_str());
        if let Some(background) = &style.background {
            solid_fill(target, background);
        }
        if let Some(font_color) = &style.font_color {
            target
                .get_font_mut()
                .get_color_mut()
                .set_argb(&font_color.argb());
        }
        if style.bold {
            target.get_font_mut().set_bold(true);
        }
        Ok(())
    }

    fn set_alignment(
        &mut self,
        range: CellRange,
        align: HorizontalAlign,
    ) -> Result<(), SheetError> {
        self.each_style(range, |style| {
            style.get_alignment_mut().set_horizontal(horizontal(align));
        })
    }

    fn set_bold(&mut self, range: CellRange) -> Result<(), SheetError> {
        self.each_style(range, |style| {
            style.get_font_mut().set_bold(true);
        })
    }

    fn set_number_format(&mut self, range: CellRange, format: &str) -> Result<(), SheetError> {
        self.each_style(range, |style| {
            style.get_number_format_mut().set_format_code(format);
        })
    }

    fn freeze_rows(&mut self, rows: u32) -> Result<(), SheetError> {
        let mut top_left = Coordinate::default();
        top_left.set_coordinate(CellRef::new(rows + 1, 1).to_a1());

        let mut pane = Pane::default();
        pane.set_vertical_split(f64::from(rows))
            .set_top_left_cell(top_left)
            .set_active_pane(PaneValues::BottomLeft)
            .set_state(PaneStateValues::Frozen);

        let views = self.sheet.get_sheet_views_mut().get_sheet_view_list_mut();
        if views.is_empty() {
            views.push(SheetView::default());
        }
        for view in views.iter_mut() {
            view.set_pane(pane.clone());
        }
        Ok(())
    }

    fn auto_resize_columns(&mut self, first: u32, count: u32) -> Result<(), SheetError> {
        for col in first..first + count {
            self.sheet
                .get_column_dimension_by_number_mut(&col)
                .set_auto_width(true);
        }
        self.sheet.calculation_auto_width();
        Ok(())
    }

    fn append_row(&mut self) -> Result<u32, SheetError> {
        if self.rows >= MAX_ROWS {
            return Err(SheetError::SheetGrowthLimit {
                rows: self.rows,
                limit: MAX_ROWS,
            });
        }
        // Rows past the used range are implicit in xlsx; growing is bookkeeping.
        self.rows += 1;
        Ok(self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book_with_rows(rows: &[&[&str]]) -> umya_spreadsheet::Spreadsheet {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_active_sheet_mut();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                let addr = CellRef::new(r as u32 + 1, c as u32 + 1).to_a1();
                sheet.get_cell_mut(addr.as_str()).set_value(*value);
            }
        }
        book
    }

    #[test]
    fn extent_includes_spare_rows() {
        let mut book = book_with_rows(&[&["header", "amount"], &["a", "10"]]);
        let host = XlsxSheet::new(book.get_active_sheet_mut(), 1);
        assert_eq!(host.extent(), Extent { rows: 3, columns: 2 });
        assert_eq!(host.value(CellRef::new(3, 1)).unwrap(), CellValue::Empty);
        assert_eq!(host.value(CellRef::new(2, 2)).unwrap(), CellValue::Number(10.0));
    }

    #[test]
    fn writes_past_the_extent_need_a_new_row() {
        let mut book = book_with_rows(&[&["header"], &["a"]]);
        let mut host = XlsxSheet::new(book.get_active_sheet_mut(), 0);
        let below = CellRef::new(3, 1);
        assert!(host.set_value(below, CellValue::Text("total".into())).is_err());
        assert_eq!(host.append_row().unwrap(), 3);
        host.set_value(below, CellValue::Text("total".into())).unwrap();
        assert_eq!(
            host.value(below).unwrap(),
            CellValue::Text("total".into())
        );
    }

    #[test]
    fn fill_and_font_land_in_the_style() {
        let mut book = book_with_rows(&[&["robinhood"]]);
        {
            let mut host = XlsxSheet::new(book.get_active_sheet_mut(), 0);
            let style = CellStyle::fill("#38761d".parse().unwrap())
                .with_font("white".parse().unwrap())
                .bold();
            host.apply_style(CellRef::new(1, 1), &style).unwrap();
        }
        let style = book.get_active_sheet_mut().get_style_mut("A1");
        assert!(*style.get_font_mut().get_bold());
        assert_eq!(style.get_font_mut().get_color_mut().get_argb(), "ffffffff");
        assert_eq!(
            style
                .get_fill_mut()
                .get_pattern_fill_mut()
                .get_foreground_color_mut()
                .get_argb(),
            "ff38761d"
        );
    }
}
