use std::fmt;

use calamine::Data;

/// A 1-based `(row, column)` position on a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
    pub row: u32,
    pub column: u32,
}

impl CellRef {
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Column letters for a 1-based column: 1 is `A`, 27 is `AA`.
    pub fn column_letters(column: u32) -> String {
        let mut letters = Vec::new();
        let mut rest = column;
        while rest > 0 {
            rest -= 1;
            letters.push(b'A' + (rest % 26) as u8);
            rest /= 26;
        }
        letters.reverse();
        String::from_utf8(letters).unwrap_or_default()
    }

    pub fn to_a1(self) -> String {
        format!("{}{}", Self::column_letters(self.column), self.row)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}

/// A rectangular block of cells, `rows × columns` starting at `first`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub first: CellRef,
    pub rows: u32,
    pub columns: u32,
}

impl CellRange {
    pub fn new(row: u32, column: u32, rows: u32, columns: u32) -> Self {
        Self {
            first: CellRef::new(row, column),
            rows,
            columns,
        }
    }

    /// A single column from `first_row` down to `last_row` inclusive.
    /// Empty when `last_row < first_row`.
    pub fn column_span(column: u32, first_row: u32, last_row: u32) -> Self {
        let rows = (last_row + 1).saturating_sub(first_row);
        Self::new(first_row, column, rows, 1)
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.columns == 0
    }

    /// Row-major iteration over every cell of the range.
    pub fn cells(self) -> impl Iterator<Item = CellRef> {
        let CellRef { row, column } = self.first;
        (row..row + self.rows)
            .flat_map(move |r| (column..column + self.columns).map(move |c| CellRef::new(r, c)))
    }
}

/// Value of a single cell as the formatting passes see it.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Builds a value from raw cell text: empty stays empty, anything
    /// that parses as a float becomes a number.
    pub fn from_text(raw: &str) -> Self {
        if raw.is_empty() {
            return CellValue::Empty;
        }
        match raw.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::Text(raw.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Display text, the way the sheet would render it without a number format.
    pub fn text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 {
                    format!("{:.0}", n)
                } else {
                    n.to_string()
                }
            }
        }
    }
}

impl From<Option<&Data>> for CellValue {
    fn from(cell: Option<&Data>) -> Self {
        match cell {
            None | Some(Data::Empty) => CellValue::Empty,
            Some(Data::String(s)) if s.is_empty() => CellValue::Empty,
            Some(Data::String(s)) => CellValue::Text(s.clone()),
            Some(Data::Float(n)) => CellValue::Number(*n),
            Some(Data::Int(n)) => CellValue::Number(*n as f64),
            Some(Data::Bool(b)) => CellValue::Text(b.to_string()),
            Some(Data::DateTime(dt)) => CellValue::Number(dt.as_f64()),
            Some(Data::DateTimeIso(s)) => CellValue::Text(s.clone()),
            Some(Data::Error(e)) => CellValue::Text(format!("{e:?}")),
            Some(other) => CellValue::Text(format!("{other:?}")),
        }
    }
}
