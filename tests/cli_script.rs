use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("invoice_ledger_cli").unwrap();
    cmd.env("INVOICE_LEDGER_CLI_SCRIPT", "1")
        .env("INVOICE_LEDGER_HOME", home.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn script_mode_runs_payment_flow() {
    let home = TempDir::new().unwrap();
    let input = "create Acme 1000 \"Website redesign\"\n\
                 partial 1 400\n\
                 partial 1 600\n\
                 summary\n\
                 exit\n";

    cli(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains(
            "Invoice #1 for Acme ($1000.00) has been recorded as Pending.",
        ))
        .stdout(contains("Remaining balance: $600.00."))
        .stdout(contains("Invoice #1 is now fully Paid."))
        .stdout(contains("=== Financial Overview ==="))
        .stdout(contains("- Total Paid: $1000.00"))
        .stdout(contains("- Outstanding Invoices: 0"));

    let json = std::fs::read_to_string(home.path().join("invoices.json")).unwrap();
    assert!(json.contains("\"Website redesign\""));
    assert!(json.contains("\"Paid\""));
}

#[test]
fn script_mode_reports_recoverable_errors_and_continues() {
    let home = TempDir::new().unwrap();
    let input = "delete 999\npay abc\nlst\ncreate Acme 50\nlist\n";

    cli(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Invoice #999 not found"))
        .stdout(contains("invalid invoice id `abc`"))
        .stdout(contains("Did you mean `list`?"))
        .stdout(contains("Acme"))
        .stdout(contains("Pending"));
}

#[test]
fn script_mode_dedupes_without_prompting() {
    let home = TempDir::new().unwrap();
    let input = "create Acme 500 Logo\ncreate Acme 500 Logo\ndedupe\ndedupe\ndelete 1\nlist\n";

    cli(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Removed 1 duplicate entries."))
        .stdout(contains("Removed 0 duplicate entries."))
        .stdout(contains("Invoice #1 has been deleted."))
        .stdout(contains("No invoices yet."));
}

#[test]
fn config_changes_currency_symbol() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .write_stdin("config currency_symbol €\ncreate Acme 20\n")
        .assert()
        .success()
        .stdout(contains("Saved `currency_symbol`."))
        .stdout(contains("(€20.00)"));

    let config = std::fs::read_to_string(home.path().join("config.json")).unwrap();
    assert!(config.contains("€"));
}

#[test]
fn corrupt_ledger_ends_session_with_failure() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("invoices.json"), "{ nope").unwrap();

    cli(&home)
        .write_stdin("list\n")
        .assert()
        .failure()
        .stderr(contains("corrupt"))
        .stdout(contains("Pending").not());
}
