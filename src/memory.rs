use std::collections::{BTreeSet, HashMap};

use calamine::{Data, Range};

use crate::cell::{CellRange, CellRef, CellValue};
use crate::error::SheetError;
use crate::host::{Extent, MAX_ROWS, SheetHost, check_in_bounds};
use crate::style::{CellStyle, Color, HorizontalAlign};

/// Everything a formatting pass can set on one cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Appearance {
    pub background: Option<Color>,
    pub font_color: Option<Color>,
    pub bold: bool,
    pub align: Option<HorizontalAlign>,
    pub number_format: Option<String>,
}

/// In-memory sheet. Backs `--dry-run` and the unit tests.
#[derive(Debug, Clone)]
pub struct MemorySheet {
    rows: Vec<Vec<CellValue>>,
    columns: u32,
    row_limit: u32,
    looks: HashMap<CellRef, Appearance>,
    frozen_rows: u32,
    auto_sized: BTreeSet<u32>,
}

impl MemorySheet {
    /// Builds a sheet whose extent is exactly the given rows; short rows are
    /// padded with empty cells.
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0) as u32;
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(columns as usize, CellValue::Empty);
                row
            })
            .collect();
        Self {
            rows,
            columns,
            row_limit: MAX_ROWS,
            looks: HashMap::new(),
            frozen_rows: 0,
            auto_sized: BTreeSet::new(),
        }
    }

    /// Convenience for tests and CSV data: every field goes through
    /// [`CellValue::from_text`].
    pub fn from_text_rows<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_rows(
            rows.into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|field| CellValue::from_text(field.as_ref()))
                        .collect()
                })
                .collect(),
        )
    }

    /// Copies a calamine range, keeping absolute positions so a range that
    /// starts below A1 still lines up with sheet rows.
    pub fn from_range(range: &Range<Data>) -> Self {
        let Some((end_row, end_col)) = range.end() else {
            return Self::from_rows(Vec::new());
        };
        let rows = (0..=end_row)
            .map(|row| {
                (0..=end_col)
                    .map(|col| CellValue::from(range.get_value((row, col))))
                    .collect()
            })
            .collect();
        Self::from_rows(rows)
    }

    /// Adds `count` blank rows below the current extent.
    pub fn with_spare_rows(mut self, count: u32) -> Self {
        let available = MAX_ROWS.saturating_sub(self.rows.len() as u32);
        for _ in 0..count.min(available) {
            self.rows.push(vec![CellValue::Empty; self.columns as usize]);
        }
        self
    }

    /// Caps how far [`SheetHost::append_row`] may grow the sheet.
    pub fn with_row_limit(mut self, limit: u32) -> Self {
        self.row_limit = limit.min(MAX_ROWS);
        self
    }

    pub fn appearance(&self, cell: CellRef) -> Appearance {
        self.looks.get(&cell).cloned().unwrap_or_default()
    }

    pub fn frozen_rows(&self) -> u32 {
        self.frozen_rows
    }

    pub fn auto_sized_columns(&self) -> Vec<u32> {
        self.auto_sized.iter().copied().collect()
    }

    /// Rows are bounded by the extent; columns past the used ones are blank
    /// but addressable, as on an xlsx worksheet.
    fn slot(&self, cell: CellRef) -> Result<(usize, usize), SheetError> {
        check_in_bounds(cell)?;
        let rows = self.rows.len() as u32;
        if cell.row > rows {
            return Err(SheetError::SheetAccess {
                cell,
                reason: format!("row is below the sheet's last row {rows}"),
            });
        }
        Ok(((cell.row - 1) as usize, (cell.column - 1) as usize))
    }

    fn look_mut(&mut self, cell: CellRef) -> Result<&mut Appearance, SheetError> {
        self.slot(cell)?;
        Ok(self.looks.entry(cell).or_default())
    }

    fn each_look(
        &mut self,
        range: CellRange,
        mut f: impl FnMut(&mut Appearance),
    ) -> Result<(), SheetError> {
        for cell in range.cells() {
            f(self.look_mut(cell)?);
        }
        Ok(())
    }
}

impl SheetHost for MemorySheet {
    fn extent(&self) -> Extent {
        Extent {
            rows: self.rows.len() as u32,
            columns: self.columns,
        }
    }

    fn value(&self, cell: CellRef) -> Result<CellValue, SheetError> {
        let (row, col) = self.slot(cell)?;
        Ok(self.rows[row].get(col).cloned().unwrap_or_default())
    }

    fn set_value(&mut self, cell: CellRef, value: CellValue) -> Result<(), SheetError> {
        let (row, col) = self.slot(cell)?;
        if cell.column > self.columns {
            self.columns = cell.column;
            for cells in &mut self.rows {
                cells.resize(col + 1, CellValue::Empty);
            }
        }
        self.rows[row][col] = value;
        Ok(())
    }

    fn apply_style(&mut self, cell: CellRef, style: &CellStyle) -> Result<(), SheetError> {
        let look = self.look_mut(cell)?;
        if let Some(background) = &style.background {
            look.background = Some(background.clone());
        }
        if let Some(font_color) = &style.font_color {
            look.font_color = Some(font_color.clone());
        }
        if style.bold {
            look.bold = true;
        }
        Ok(())
    }

    fn set_alignment(
        &mut self,
        range: CellRange,
        align: HorizontalAlign,
    ) -> Result<(), SheetError> {
        self.each_look(range, |look| look.align = Some(align))
    }

    fn set_bold(&mut self, range: CellRange) -> Result<(), SheetError> {
        self.each_look(range, |look| look.bold = true)
    }

    fn set_number_format(&mut self, range: CellRange, format: &str) -> Result<(), SheetError> {
        self.each_look(range, |look| look.number_format = Some(format.to_string()))
    }

    fn freeze_rows(&mut self, rows: u32) -> Result<(), SheetError> {
        self.frozen_rows = rows;
        Ok(())
    }

    fn auto_resize_columns(&mut self, first: u32, count: u32) -> Result<(), SheetError> {
        self.auto_sized.extend(first..first + count);
        Ok(())
    }

    fn append_row(&mut self) -> Result<u32, SheetError> {
        let rows = self.rows.len() as u32;
        if rows >= self.row_limit {
            return Err(SheetError::SheetGrowthLimit {
                rows,
                limit: self.row_limit,
            });
        }
        self.rows.push(vec![CellValue::Empty; self.columns as usize]);
        Ok(rows + 1)
    }
}
