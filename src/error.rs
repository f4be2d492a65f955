use std::path::PathBuf;

use thiserror::Error;

use crate::cell::CellRef;

/// Failures raised by a [`SheetHost`](crate::host::SheetHost). Any of these
/// aborts the formatting run; nothing is retried.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("cannot access cell {cell}: {reason}")]
    SheetAccess { cell: CellRef, reason: String },

    #[error("sheet cannot grow past {limit} rows (currently {rows})")]
    SheetGrowthLimit { rows: u32, limit: u32 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid colour {0:?}")]
    InvalidColor(String),

    #[error("cannot read config {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
