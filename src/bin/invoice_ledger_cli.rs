fn main() {
    if let Err(err) = invoice_ledger::cli::run_cli() {
        eprintln!("invoice_ledger_cli: {err}");
        std::process::exit(1);
    }
}
