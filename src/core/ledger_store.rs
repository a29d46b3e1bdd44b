//! The ledger store: every read and mutation of the invoice collection.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{
    core::clock::{Clock, SystemClock},
    domain::{FinancialSummary, Invoice, InvoiceBook, InvoiceId, PaymentRejection},
    errors::{LedgerError, Result},
    storage::{LedgerStorage, LoadReport},
};

/// Facade that owns the persisted invoice book.
///
/// Every operation loads the whole book, applies its change in memory and
/// writes the whole book back before returning. Operations on one store are
/// serialized by an internal lock; two processes writing the same file are not
/// coordinated and the last save wins.
pub struct LedgerStore {
    storage: Box<dyn LedgerStorage>,
    clock: Arc<dyn Clock>,
    lock: Mutex<()>,
}

impl LedgerStore {
    pub fn new(storage: Box<dyn LedgerStorage>) -> Self {
        Self::with_clock(storage, Arc::new(SystemClock))
    }

    pub fn with_clock(storage: Box<dyn LedgerStorage>, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            clock,
            lock: Mutex::new(()),
        }
    }

    pub fn storage(&self) -> &dyn LedgerStorage {
        self.storage.as_ref()
    }

    /// Loads the book without mutating it, exposing migrations and warnings.
    pub fn inspect(&self) -> Result<LoadReport> {
        let _guard = self.serialize();
        self.storage.load()
    }

    pub fn create_invoice(&self, client: &str, amount: f64, description: &str) -> Result<Invoice> {
        let client = client.trim();
        if client.is_empty() {
            return Err(LedgerError::InvalidInput("client name is required".into()));
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(LedgerError::InvalidAmount(format!(
                "invoice amount must be greater than zero (got {amount})"
            )));
        }

        let _guard = self.serialize();
        let mut book = self.load_book()?;
        let id = book.allocate_id()?;
        let invoice = Invoice::new(id, client, amount, description, self.clock.today());
        book.push(invoice.clone())?;
        self.storage.save(&book)?;

        tracing::info!(id, client, amount, "invoice created");
        Ok(invoice)
    }

    /// Settles an invoice in full, whatever was paid before.
    pub fn mark_invoice_as_paid(&self, id: InvoiceId) -> Result<Invoice> {
        let _guard = self.serialize();
        let mut book = self.load_book()?;
        let invoice = match book.invoice_mut(id) {
            Some(invoice) => {
                invoice.mark_paid();
                invoice.clone()
            }
            None => return Err(not_found(id)),
        };
        self.storage.save(&book)?;

        tracing::info!(id, amount = invoice.amount, "invoice marked as paid");
        Ok(invoice)
    }

    /// Applies a payment and returns the remaining balance.
    pub fn record_partial_payment(&self, id: InvoiceId, payment: f64) -> Result<f64> {
        let _guard = self.serialize();
        let mut book = self.load_book()?;
        let invoice = book.invoice_mut(id).ok_or_else(|| not_found(id))?;
        let balance = invoice.apply_payment(payment).map_err(|rejection| {
            tracing::warn!(id, payment, %rejection, "payment rejected");
            invalid_payment(payment, rejection)
        })?;
        let settled = invoice.is_paid();
        self.storage.save(&book)?;

        tracing::info!(id, payment, balance, settled, "payment recorded");
        Ok(balance)
    }

    /// Permanently removes the invoice and returns it.
    pub fn delete_invoice(&self, id: InvoiceId) -> Result<Invoice> {
        let _guard = self.serialize();
        let mut book = self.load_book()?;
        let mut removed = book.remove(id);
        if removed.is_empty() {
            return Err(not_found(id));
        }
        self.storage.save(&book)?;

        tracing::info!(id, removed = removed.len(), "invoice deleted");
        Ok(removed.swap_remove(0))
    }

    pub fn get_financial_summary(&self) -> Result<FinancialSummary> {
        let _guard = self.serialize();
        Ok(self.load_book()?.summary())
    }

    /// Drops every invoice whose (client, amount, description) matches an
    /// earlier one and returns how many were removed.
    pub fn remove_duplicate_invoices(&self) -> Result<usize> {
        let _guard = self.serialize();
        let mut book = self.load_book()?;
        let removed = book.dedupe();
        self.storage.save(&book)?;

        tracing::info!(removed, remaining = book.len(), "duplicate cleanup finished");
        Ok(removed)
    }

    pub fn list_invoices(&self) -> Result<Vec<Invoice>> {
        let _guard = self.serialize();
        Ok(self.load_book()?.invoices)
    }

    pub fn get_invoice(&self, id: InvoiceId) -> Result<Invoice> {
        let _guard = self.serialize();
        self.load_book()?
            .invoice(id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    fn load_book(&self) -> Result<InvoiceBook> {
        self.storage.load().map(|report| report.book)
    }

    // The lock guards no in-memory data, so a poisoned lock is still usable.
    fn serialize(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn not_found(id: InvoiceId) -> LedgerError {
    tracing::warn!(id, "invoice not found");
    LedgerError::NotFound(id)
}

fn invalid_payment(payment: f64, rejection: PaymentRejection) -> LedgerError {
    LedgerError::InvalidAmount(format!("{payment}: {rejection}"))
}
