use ledgerfmt::layout::LayoutKind;

fn main() {
    if let Err(err) = ledgerfmt::cli::run(LayoutKind::GainsLosses, std::env::args_os()) {
        eprintln!("error formatting gains and losses sheet: {err:#}");
        std::process::exit(1);
    }
}
