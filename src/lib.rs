//! Formatting passes for Form 8949 and gains/losses worksheets: alignment,
//! number formats, exchange and sign colouring, and a computed total row.

pub mod cell;
pub mod classify;
pub mod cli;
pub mod config;
pub mod dates;
pub mod error;
pub mod formatter;
pub mod host;
pub mod layout;
pub mod memory;
pub mod sign;
pub mod style;
pub mod styler;
pub mod totals;
pub mod workbook;
pub mod xlsx;

pub use error::{ConfigError, SheetError};
pub use formatter::{FormatReport, SheetFormatter};
pub use host::SheetHost;
