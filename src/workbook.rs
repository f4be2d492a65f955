use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use calamine::{Reader, open_workbook_auto};
use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::cell::{CellRef, CellValue};
use crate::memory::MemorySheet;

fn is_csv(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn read_csv(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("cannot open CSV: {}", path.display()))?;
    reader
        .records()
        .map(|record| -> Result<Vec<String>> {
            let record =
                record.with_context(|| format!("cannot read CSV: {}", path.display()))?;
            Ok(record.iter().map(str::to_string).collect())
        })
        .collect()
}

fn fill_sheet(sheet: &mut Worksheet, rows: &[Vec<String>]) {
    for (r, row) in rows.iter().enumerate() {
        for (c, field) in row.iter().enumerate() {
            let addr = CellRef::new(r as u32 + 1, c as u32 + 1).to_a1();
            match CellValue::from_text(field) {
                CellValue::Number(n) => {
                    sheet.get_cell_mut(addr.as_str()).set_value_number(n);
                }
                CellValue::Text(s) => {
                    sheet.get_cell_mut(addr.as_str()).set_value_string(s);
                }
                CellValue::Empty => {}
            }
        }
    }
}

/// Opens an xlsx workbook, or builds a one-sheet workbook from a CSV export.
pub fn open_book(path: &Path) -> Result<Spreadsheet> {
    if is_csv(path) {
        let rows = read_csv(path)?;
        let mut book = umya_spreadsheet::new_file();
        fill_sheet(book.get_active_sheet_mut(), &rows);
        return Ok(book);
    }
    umya_spreadsheet::reader::xlsx::read(path)
        .with_context(|| format!("cannot open workbook: {}", path.display()))
}

/// Picks the named sheet, or the first one.
pub fn select_sheet<'a>(
    book: &'a mut Spreadsheet,
    name: Option<&str>,
) -> Result<&'a mut Worksheet> {
    match name {
        Some(name) => book
            .get_sheet_by_name_mut(name)
            .ok_or_else(|| anyhow!("sheet not found: {name}")),
        None => book
            .get_sheet_mut(&0)
            .ok_or_else(|| anyhow!("workbook has no sheets")),
    }
}

pub fn save_book(book: &Spreadsheet, path: &Path) -> Result<()> {
    umya_spreadsheet::writer::xlsx::write(book, path)
        .with_context(|| format!("cannot save workbook: {}", path.display()))
}

/// Read-only snapshot of one sheet for `--dry-run`.
pub fn load_snapshot(path: &Path, name: Option<&str>) -> Result<MemorySheet> {
    if is_csv(path) {
        return Ok(MemorySheet::from_text_rows(read_csv(path)?));
    }

    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("cannot open workbook: {}", path.display()))?;

    let sheet_name = match name {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| anyhow!("workbook has no sheets"))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("cannot read sheet: {sheet_name}"))?;

    Ok(MemorySheet::from_range(&range))
}

/// `formatted_<stem>.xlsx` in the working directory.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    PathBuf::from(format!("formatted_{stem}.xlsx"))
}
