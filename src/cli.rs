use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::Config;
use crate::formatter::{FormatReport, SheetFormatter};
use crate::layout::LayoutKind;
use crate::workbook::{default_output_path, load_snapshot, open_book, save_book, select_sheet};
use crate::xlsx::XlsxSheet;

/// Arguments shared by the `format8949` and `formatgl` binaries.
#[derive(Parser, Debug)]
#[command(about = "Colour, align and total a tax-report worksheet.")]
pub struct Args {
    /// Workbook (.xlsx) or CSV export to format.
    input: PathBuf,

    /// Where to write the formatted workbook. Defaults to
    /// `formatted_<input stem>.xlsx` in the working directory.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Sheet to format. Defaults to the first sheet.
    #[arg(long)]
    sheet: Option<String>,

    /// JSON file overriding the colour tables. Defaults to `ledgerfmt.json`
    /// in the working directory when present.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Blank rows assumed below the used range, where the total row can land.
    #[arg(long, default_value_t = 1)]
    spare_rows: u32,

    /// Run every pass against a read-only copy and print the report.
    #[arg(long)]
    dry_run: bool,
}

fn format_file(kind: LayoutKind, args: &Args) -> Result<FormatReport> {
    let config = Config::load(args.config.as_deref())?;
    let layout = kind.build(&config);
    let formatter = SheetFormatter::new(&layout);

    if args.dry_run {
        let mut sheet = load_snapshot(&args.input, args.sheet.as_deref())?
            .with_spare_rows(args.spare_rows);
        return formatter
            .run(&mut sheet)
            .with_context(|| format!("cannot format {}", args.input.display()));
    }

    let mut book = open_book(&args.input)?;
    let report = {
        let sheet = select_sheet(&mut book, args.sheet.as_deref())?;
        let mut host = XlsxSheet::new(sheet, args.spare_rows);
        formatter
            .run(&mut host)
            .with_context(|| format!("cannot format {}", args.input.display()))?
    };

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    save_book(&book, &output)?;
    println!("formatted {} sheet saved as: {}", layout.name, output.display());
    Ok(report)
}

pub fn run(kind: LayoutKind, args: impl IntoIterator<Item = OsString>) -> Result<()> {
    let args = match Args::try_parse_from(args) {
        Ok(args) => args,
        Err(err) => err.exit(),
    };
    let report = format_file(kind, &args)?;
    println!("{report}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(args).unwrap()
    }

    #[test]
    fn defaults() {
        let args = parse(&["format8949", "form-8949.csv"]);
        assert_eq!(args.input, PathBuf::from("form-8949.csv"));
        assert_eq!(args.spare_rows, 1);
        assert!(!args.dry_run);
        assert!(args.output.is_none());
    }

    #[test]
    fn options() {
        let args = parse(&[
            "formatgl",
            "ledger.xlsx",
            "-o",
            "out.xlsx",
            "--sheet",
            "Ledger",
            "--spare-rows",
            "0",
            "--dry-run",
        ]);
        assert_eq!(args.output, Some(PathBuf::from("out.xlsx")));
        assert_eq!(args.sheet.as_deref(), Some("Ledger"));
        assert_eq!(args.spare_rows, 0);
        assert!(args.dry_run);
    }

    #[test]
    fn input_is_required() {
        assert!(Args::try_parse_from(["format8949"]).is_err());
    }

    #[test]
    fn dry_run_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("f8949.csv");
        let output = dir.path().join("out.xlsx");
        std::fs::write(
            &input,
            "Description,Acquired,Sold,Proceeds,Basis,Codes,Adjustment,Gain\n\
             BTC kraken,2021-01-01,2021-02-01,10,4,,0,6\n",
        )
        .unwrap();

        let args = parse(&[
            "format8949",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--dry-run",
        ]);
        let report = format_file(LayoutKind::Form8949, &args).unwrap();
        assert!(report.totals.is_some());
        assert!(!output.exists());
    }
}
