use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::cell::{CellRange, CellValue};
use crate::error::SheetError;
use crate::host::SheetHost;

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}(?:[ T]\d{2}:\d{2}(?::\d{2}(?:\.\d+)?)?)?$")
        .expect("valid regex")
});

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses the ISO-style date text the ledger builders write.
pub fn parse_iso(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if !ISO_DATE.is_match(text) {
        return None;
    }
    if text.len() == 10 {
        return NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0));
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
}

/// Spreadsheet date serial: days since 1899-12-30, time as the fraction.
pub fn to_serial(dt: NaiveDateTime) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid epoch");
    (dt - epoch).num_milliseconds() as f64 / 86_400_000.0
}

/// Rewrites date text in `range` as date serials so a date number format
/// renders it. Returns how many cells were converted; anything else is left
/// as it was.
pub fn coerce_dates<H: SheetHost + ?Sized>(
    host: &mut H,
    range: CellRange,
) -> Result<usize, SheetError> {
    let mut converted = 0;
    for cell in range.cells() {
        let CellValue::Text(text) = host.value(cell)? else {
            continue;
        };
        if let Some(dt) = parse_iso(&text) {
            host.set_value(cell, CellValue::Number(to_serial(dt)))?;
            converted += 1;
        }
    }
    Ok(converted)
}
