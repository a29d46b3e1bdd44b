mod common;

use std::{sync::Arc, thread};

use invoice_ledger::{
    core::{FixedClock, LedgerStore},
    domain::InvoiceStatus,
    errors::LedgerError,
    storage::MemoryStorage,
};

use common::{fixed_date, open_store, setup_json_store};

fn memory_store() -> (LedgerStore, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let store = LedgerStore::with_clock(
        Box::new(Arc::clone(&storage)),
        Arc::new(FixedClock(fixed_date())),
    );
    (store, storage)
}

#[test]
fn partial_payments_settle_invoice() {
    let (store, _path) = setup_json_store();

    let invoice = store.create_invoice("Acme", 1000.0, "Website").unwrap();
    assert_eq!(invoice.id, 1);
    assert_eq!(invoice.status, InvoiceStatus::Pending);
    assert_eq!(invoice.paid_amount, 0.0);

    let balance = store.record_partial_payment(1, 400.0).unwrap();
    assert_eq!(balance, 600.0);
    assert_eq!(store.get_invoice(1).unwrap().status, InvoiceStatus::Pending);

    let balance = store.record_partial_payment(1, 600.0).unwrap();
    assert_eq!(balance, 0.0);
    assert_eq!(store.get_invoice(1).unwrap().status, InvoiceStatus::Paid);

    let summary = store.get_financial_summary().unwrap();
    assert_eq!(summary.total_paid, 1000.0);
    assert_eq!(summary.total_pending, 0.0);
    assert_eq!(summary.pending_count, 0);
}

#[test]
fn payments_never_exceed_amount() {
    let (store, _path) = setup_json_store();
    store.create_invoice("Acme", 100.0, "").unwrap();

    store.record_partial_payment(1, 70.0).unwrap();
    let err = store.record_partial_payment(1, 30.01).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAmount(_)));
    assert!(matches!(
        store.record_partial_payment(1, 0.0),
        Err(LedgerError::InvalidAmount(_))
    ));

    let invoice = store.get_invoice(1).unwrap();
    assert_eq!(invoice.paid_amount, 70.0);
    assert_eq!(invoice.status, InvoiceStatus::Pending);
}

#[test]
fn float_noise_still_settles_invoice() {
    let (store, _path) = setup_json_store();
    store.create_invoice("Acme", 0.3, "").unwrap();
    store.record_partial_payment(1, 0.1).unwrap();
    let balance = store.record_partial_payment(1, 0.2).unwrap();
    assert_eq!(balance, 0.0);

    let invoice = store.get_invoice(1).unwrap();
    assert!(invoice.is_paid());
    assert_eq!(invoice.paid_amount, invoice.amount);
}

#[test]
fn nth_invoice_gets_id_n() {
    let (store, _path) = setup_json_store();
    for expected in 1..=5 {
        let invoice = store
            .create_invoice(&format!("Client {expected}"), 10.0 * expected as f64, "")
            .unwrap();
        assert_eq!(invoice.id, expected);
    }
}

#[test]
fn deleted_ids_are_never_reused() {
    let (store, path) = setup_json_store();
    store.create_invoice("Acme", 100.0, "").unwrap();
    store.create_invoice("Globex", 200.0, "").unwrap();
    store.delete_invoice(2).unwrap();

    let invoice = store.create_invoice("Initech", 300.0, "").unwrap();
    assert_eq!(invoice.id, 3);

    // The counter survives a fresh store over the same file.
    store.delete_invoice(3).unwrap();
    let reopened = open_store(&path);
    assert_eq!(reopened.create_invoice("Umbrella", 5.0, "").unwrap().id, 4);
}

#[test]
fn delete_removes_only_target_and_summary_follows() {
    let (store, _path) = setup_json_store();
    store.create_invoice("Acme", 100.0, "").unwrap();
    store.create_invoice("Globex", 250.0, "").unwrap();
    store.create_invoice("Initech", 75.0, "").unwrap();
    store.mark_invoice_as_paid(3).unwrap();

    store.delete_invoice(2).unwrap();

    let ids: Vec<_> = store
        .list_invoices()
        .unwrap()
        .iter()
        .map(|invoice| invoice.id)
        .collect();
    assert_eq!(ids, vec![1, 3]);

    let summary = store.get_financial_summary().unwrap();
    assert_eq!(summary.total_pending, 100.0);
    assert_eq!(summary.total_paid, 75.0);
    assert_eq!(summary.pending_count, 1);
    assert_eq!(summary.invoice_count, 2);
}

#[test]
fn delete_unknown_id_leaves_ledger_alone() {
    let (store, _path) = setup_json_store();
    assert!(matches!(
        store.delete_invoice(999),
        Err(LedgerError::NotFound(999))
    ));
    assert!(store.list_invoices().unwrap().is_empty());

    store.create_invoice("Acme", 100.0, "").unwrap();
    assert!(store.delete_invoice(999).is_err());
    assert_eq!(store.list_invoices().unwrap().len(), 1);
}

#[test]
fn dedupe_keeps_first_and_is_idempotent() {
    let (store, _path) = setup_json_store();
    store.create_invoice("Acme", 500.0, "Logo").unwrap();
    store.create_invoice("Acme", 500.0, "Logo").unwrap();
    store.create_invoice("Acme", 500.0, "Logo v2").unwrap();

    assert_eq!(store.remove_duplicate_invoices().unwrap(), 1);
    let survivors = store.list_invoices().unwrap();
    let ids: Vec<_> = survivors.iter().map(|invoice| invoice.id).collect();
    assert_eq!(ids, vec![1, 3]);

    assert_eq!(store.remove_duplicate_invoices().unwrap(), 0);
    assert_eq!(store.list_invoices().unwrap(), survivors);
}

#[test]
fn pending_total_counts_full_amount() {
    let (store, _path) = setup_json_store();
    store.create_invoice("Acme", 1000.0, "").unwrap();
    store.record_partial_payment(1, 250.0).unwrap();

    let summary = store.get_financial_summary().unwrap();
    assert_eq!(summary.total_pending, 1000.0);
    assert_eq!(summary.total_received, 250.0);
    assert_eq!(summary.outstanding_balance, 750.0);
}

#[test]
fn pay_and_partial_on_missing_invoice_are_not_found() {
    let (store, _path) = setup_json_store();
    assert!(matches!(
        store.mark_invoice_as_paid(7),
        Err(LedgerError::NotFound(7))
    ));
    assert!(matches!(
        store.record_partial_payment(7, 10.0),
        Err(LedgerError::NotFound(7))
    ));
}

#[test]
fn failed_save_is_fatal_and_keeps_previous_state() {
    let (store, storage) = memory_store();
    store.create_invoice("Acme", 100.0, "").unwrap();

    storage.set_fail_writes(true);
    let err = store.record_partial_payment(1, 40.0).unwrap_err();
    assert!(err.is_fatal());

    storage.set_fail_writes(false);
    assert_eq!(store.get_invoice(1).unwrap().paid_amount, 0.0);
    assert_eq!(storage.save_count(), 1);
}

#[test]
fn concurrent_creates_get_distinct_ids() {
    let (store, storage) = memory_store();
    let store = Arc::new(store);

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for n in 0..5 {
                    store
                        .create_invoice(&format!("Client {worker}"), 10.0 + n as f64, "")
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let mut ids: Vec<_> = store
        .list_invoices()
        .unwrap()
        .iter()
        .map(|invoice| invoice.id)
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, (1..=40).collect::<Vec<_>>());
    assert_eq!(storage.snapshot().unwrap().next_id, 41);
}

#[test]
fn rejected_operations_write_nothing() {
    let (store, storage) = memory_store();
    store.create_invoice("Acme", 100.0, "").unwrap();
    let saves = storage.save_count();

    assert!(matches!(
        store.mark_invoice_as_paid(42),
        Err(LedgerError::NotFound(42))
    ));
    assert!(matches!(
        store.record_partial_payment(1, 150.0),
        Err(LedgerError::InvalidAmount(_))
    ));
    assert!(matches!(
        store.record_partial_payment(42, 10.0),
        Err(LedgerError::NotFound(42))
    ));
    assert!(matches!(
        store.delete_invoice(42),
        Err(LedgerError::NotFound(42))
    ));

    assert_eq!(storage.save_count(), saves);
    assert_eq!(store.get_invoice(1).unwrap().paid_amount, 0.0);
}

#[test]
fn sub_cent_amounts_are_distinct_invoices() {
    let (store, _path) = setup_json_store();
    store.create_invoice("Acme", 100.0, "Logo").unwrap();
    store.create_invoice("Acme", 100.004, "Logo").unwrap();

    assert_eq!(store.remove_duplicate_invoices().unwrap(), 0);
    let amounts: Vec<_> = store
        .list_invoices()
        .unwrap()
        .iter()
        .map(|invoice| invoice.amount)
        .collect();
    assert_eq!(amounts, vec![100.0, 100.004]);
}
