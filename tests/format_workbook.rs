use calamine::{Data, Reader, open_workbook_auto};
use ledgerfmt::SheetFormatter;
use ledgerfmt::cell::CellRef;
use ledgerfmt::config::Config;
use ledgerfmt::layout::Layout;
use ledgerfmt::memory::MemorySheet;
use ledgerfmt::totals::TotalsOutcome;
use ledgerfmt::workbook::{open_book, save_book, select_sheet};
use ledgerfmt::xlsx::XlsxSheet;
use umya_spreadsheet::structs::PaneStateValues;

const F8949: &str = "\
Description of property,Date Acquired,Date Sold or Disposed of,Sales Proceeds,Cost or Other Basis,Codes,Adjustments to Gain or (Loss),Gain or (Loss)
0.5 BTC robinhood,2021-01-01,2021-06-30,100,80,,0,20
1 ETH kraken,2021-02-01,2021-07-01,50,70,,0,-20
";

fn write_sample(rows: &[&[&str]], path: &std::path::Path) {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_active_sheet_mut();
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            let addr = CellRef::new(r as u32 + 1, c as u32 + 1).to_a1();
            sheet.get_cell_mut(addr.as_str()).set_value(*value);
        }
    }
    umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
}

#[test]
fn csv_export_becomes_a_totaled_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("form-8949-bitcoin.csv");
    let output = dir.path().join("formatted.xlsx");
    std::fs::write(&input, F8949).unwrap();

    let layout = Layout::form_8949(&Config::default());
    let mut book = open_book(&input).unwrap();
    let report = {
        let sheet = select_sheet(&mut book, None).unwrap();
        let mut host = XlsxSheet::new(sheet, 1);
        SheetFormatter::new(&layout).run(&mut host).unwrap()
    };
    assert_eq!(
        report.totals,
        Some(TotalsOutcome::Inserted {
            row: 4,
            appended: false,
            sums: vec![(4, 150.0), (5, 150.0), (8, 0.0)],
        })
    );
    save_book(&book, &output).unwrap();

    let mut workbook = open_workbook_auto(&output).unwrap();
    let name = workbook.sheet_names()[0].clone();
    let range = workbook.worksheet_range(&name).unwrap();
    assert_eq!(range.get_value((3, 0)), Some(&Data::String("total".into())));
    let proceeds = match range.get_value((3, 3)) {
        Some(Data::Float(n)) => *n,
        Some(Data::Int(n)) => *n as f64,
        other => panic!("unexpected proceeds total: {other:?}"),
    };
    assert_eq!(proceeds, 150.0);
    // Date text was stored as a serial.
    assert!(!matches!(range.get_value((1, 1)), Some(Data::String(_))));
}

#[test]
fn styles_survive_a_save() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("ledger.xlsx");
    let output = dir.path().join("formatted.xlsx");
    write_sample(
        &[
            &[
                "Additional Description",
                "Description",
                "Date Acquired",
                "Transaction Type",
                "Order Size",
                "Market Price",
                "Exchange Fee",
                "Cost or Other Basis",
                "ACB per Share",
                "Date Sold",
                "Sales Proceeds",
                "Gain or Loss",
                "Order Note",
            ],
            &[
                "kraken", "ETH", "2021-01-01 10:00:00", "buy", "1", "700", "1", "701", "701", "",
                "", "", "",
            ],
            &[
                "kraken", "ETH", "", "sell", "1", "900", "1", "701", "701",
                "2021-03-01 10:00:00", "899", "198", "",
            ],
        ],
        &input,
    );

    let layout = Layout::gains_losses(&Config::default());
    let mut book = open_book(&input).unwrap();
    {
        let sheet = select_sheet(&mut book, None).unwrap();
        let mut host = XlsxSheet::new(sheet, 0);
        let report = SheetFormatter::new(&layout).run(&mut host).unwrap();
        assert_eq!(report.totals, None);
        assert_eq!(report.categorized, 4);
    }
    save_book(&book, &output).unwrap();

    let mut reread = umya_spreadsheet::reader::xlsx::read(&output).unwrap();
    let sheet = reread.get_sheet_mut(&0).unwrap();

    let header = sheet.get_style_mut("A1");
    assert!(*header.get_font_mut().get_bold());

    let exchange = sheet.get_style_mut("A2");
    assert_eq!(
        exchange
            .get_fill_mut()
            .get_pattern_fill_mut()
            .get_foreground_color_mut()
            .get_argb(),
        "ff674ea7"
    );

    let sell = sheet.get_style_mut("D3");
    assert_eq!(
        sell.get_fill_mut()
            .get_pattern_fill_mut()
            .get_foreground_color_mut()
            .get_argb(),
        "fff4c7c3"
    );

    let quantity = sheet.get_style_mut("E2");
    assert_eq!(
        quantity.get_number_format_mut().get_format_code(),
        "0.00000000"
    );

    let view = &sheet.get_sheets_views().get_sheet_view_list()[0];
    let pane = view.get_pane().expect("header row should be frozen");
    assert_eq!(*pane.get_vertical_split(), 1.0);
    assert_eq!(pane.get_top_left_cell().get_coordinate(), "A2");
    assert!(matches!(pane.get_state(), PaneStateValues::Frozen));

    // "Additional Description" is far wider than the 8.38 default.
    let width = sheet
        .get_column_dimension_by_number(&1)
        .map(|column| *column.get_width())
        .expect("column A should have a dimension");
    assert!(width > 12.0, "column A width {width}");
}

#[test]
fn dry_run_and_workbook_agree_on_a_narrow_ledger() {
    // No "Order Note" column: the ledger layout still reaches column 13.
    let rows: &[&[&str]] = &[
        &[
            "Additional Description",
            "Description",
            "Date Acquired",
            "Transaction Type",
            "Order Size",
            "Market Price",
            "Exchange Fee",
            "Cost or Other Basis",
            "ACB per Share",
            "Date Sold",
            "Sales Proceeds",
            "Gain or Loss",
        ],
        &["coinbase", "BTC", "", "buy", "1", "100", "1", "101", "101", "", "", ""],
        &["coinbase", "BTC", "", "sell", "1", "90", "1", "101", "101", "", "89", "-12"],
    ];
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("narrow.xlsx");
    write_sample(rows, &input);
    let layout = Layout::gains_losses(&Config::default());

    let mut book = open_book(&input).unwrap();
    let from_workbook = {
        let sheet = select_sheet(&mut book, None).unwrap();
        let mut host = XlsxSheet::new(sheet, 0);
        SheetFormatter::new(&layout).run(&mut host).unwrap()
    };

    let mut snapshot = MemorySheet::from_text_rows(rows.iter().map(|row| row.iter()));
    let from_memory = SheetFormatter::new(&layout).run(&mut snapshot).unwrap();

    assert_eq!(from_memory, from_workbook);
    assert_eq!(from_memory.highlighted, 0);
    assert_eq!(from_memory.signed, 2);
}
