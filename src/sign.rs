use crate::cell::{CellRange, CellValue};
use crate::error::SheetError;
use crate::host::SheetHost;
use crate::style::{CellStyle, Palette};

/// Style per sign of a numeric cell. A sign without a style is left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignRule {
    pub positive: Option<CellStyle>,
    pub negative: Option<CellStyle>,
    pub zero: Option<CellStyle>,
}

impl SignRule {
    /// Gains buy-green, losses sell-red, break-even highlighted.
    pub fn gain_loss(palette: &Palette) -> Self {
        Self {
            positive: Some(CellStyle::fill(palette.buy.clone())),
            negative: Some(CellStyle::fill(palette.sell.clone())),
            zero: Some(CellStyle::fill(palette.highlight.clone())),
        }
    }

    pub fn without_zero(mut self) -> Self {
        self.zero = None;
        self
    }

    pub fn positive_only(style: CellStyle) -> Self {
        Self {
            positive: Some(style),
            ..Self::default()
        }
    }

    /// Blank and non-numeric values get no style. Zero is compared exactly.
    pub fn style_for(&self, value: &CellValue) -> Option<&CellStyle> {
        let n = value.as_number()?;
        if n > 0.0 {
            self.positive.as_ref()
        } else if n < 0.0 {
            self.negative.as_ref()
        } else {
            self.zero.as_ref()
        }
    }
}

pub fn classify_signs<H: SheetHost + ?Sized>(
    host: &mut H,
    range: CellRange,
    rule: &SignRule,
) -> Result<usize, SheetError> {
    let mut styled = 0;
    for cell in range.cells() {
        let value = host.value(cell)?;
        if let Some(style) = rule.style_for(&value) {
            host.apply_style(cell, style)?;
            styled += 1;
        }
    }
    Ok(styled)
}
