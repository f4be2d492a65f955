use ledgerfmt::layout::LayoutKind;

fn main() {
    if let Err(err) = ledgerfmt::cli::run(LayoutKind::Form8949, std::env::args_os()) {
        eprintln!("error formatting Form 8949 sheet: {err:#}");
        std::process::exit(1);
    }
}
