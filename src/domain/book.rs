use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

use super::{
    common::amounts_match,
    invoice::{Invoice, InvoiceId, InvoiceStatus},
    summary::FinancialSummary,
};

pub const CURRENT_SCHEMA_VERSION: u8 = 2;

/// The id after `id`, or a storage error once the counter cannot grow.
pub fn next_invoice_id(id: InvoiceId) -> Result<InvoiceId> {
    id.checked_add(1)
        .ok_or_else(|| LedgerError::Storage("id counter exhausted".into()))
}

/// Persisted snapshot of every invoice plus the identifier counter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceBook {
    #[serde(default = "InvoiceBook::schema_version_default")]
    pub schema_version: u8,
    #[serde(default)]
    pub next_id: InvoiceId,
    #[serde(default)]
    pub invoices: Vec<Invoice>,
}

impl Default for InvoiceBook {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceBook {
    pub fn new() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            next_id: 1,
            invoices: Vec::new(),
        }
    }

    fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }

    pub fn len(&self) -> usize {
        self.invoices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty()
    }

    fn max_id(&self) -> InvoiceId {
        self.invoices.iter().map(|inv| inv.id).max().unwrap_or(0)
    }

    /// Reserves the next identifier. Identifiers only ever grow, so an id freed
    /// by a deletion is never handed out again.
    pub fn allocate_id(&mut self) -> Result<InvoiceId> {
        let id = self.next_id.max(next_invoice_id(self.max_id())?).max(1);
        self.next_id = next_invoice_id(id)?;
        Ok(id)
    }

    pub fn push(&mut self, invoice: Invoice) -> Result<()> {
        self.next_id = self.next_id.max(next_invoice_id(invoice.id)?);
        self.invoices.push(invoice);
        Ok(())
    }

    pub fn invoice(&self, id: InvoiceId) -> Option<&Invoice> {
        self.invoices.iter().find(|inv| inv.id == id)
    }

    pub fn invoice_mut(&mut self, id: InvoiceId) -> Option<&mut Invoice> {
        self.invoices.iter_mut().find(|inv| inv.id == id)
    }

    /// Removes every invoice carrying `id` and returns what was removed.
    pub fn remove(&mut self, id: InvoiceId) -> Vec<Invoice> {
        let (removed, kept): (Vec<_>, Vec<_>) =
            self.invoices.drain(..).partition(|inv| inv.id == id);
        self.invoices = kept;
        removed
    }

    /// Keeps the first invoice of each signature in stored order and returns how
    /// many later ones were dropped.
    pub fn dedupe(&mut self) -> usize {
        let original = self.invoices.len();
        let mut seen = HashSet::new();
        self.invoices.retain(|inv| seen.insert(inv.signature()));
        original - self.invoices.len()
    }

    pub fn summary(&self) -> FinancialSummary {
        FinancialSummary::from_invoices(&self.invoices)
    }

    /// Restores the ledger invariants on a freshly loaded snapshot and returns a
    /// human-readable line for every repair or anomaly found.
    pub fn reconcile(&mut self) -> Result<Vec<String>> {
        let mut warnings = Vec::new();
        let mut seen_ids = HashSet::new();

        for inv in &mut self.invoices {
            if !seen_ids.insert(inv.id) {
                warnings.push(format!(
                    "invoice #{} shares its id with another record",
                    inv.id
                ));
            }
            if inv.id == 0 {
                warnings.push("invoice with id 0 found".to_string());
            }
            if !inv.amount.is_finite() || inv.amount < 0.0 {
                warnings.push(format!(
                    "invoice #{} had invalid amount {}; reset to 0",
                    inv.id, inv.amount
                ));
                inv.amount = 0.0;
            }
            if !inv.paid_amount.is_finite() || inv.paid_amount < 0.0 {
                warnings.push(format!(
                    "invoice #{} had invalid paid amount {}; reset to 0",
                    inv.id, inv.paid_amount
                ));
                inv.paid_amount = 0.0;
            }
            if inv.paid_amount > inv.amount && !amounts_match(inv.paid_amount, inv.amount) {
                warnings.push(format!(
                    "invoice #{} was overpaid ({:.2} of {:.2}); clamped",
                    inv.id, inv.paid_amount, inv.amount
                ));
                inv.paid_amount = inv.amount;
            }

            match inv.status {
                InvoiceStatus::Paid if !amounts_match(inv.paid_amount, inv.amount) => {
                    warnings.push(format!(
                        "invoice #{} marked Paid with {:.2} of {:.2} received; settled in full",
                        inv.id, inv.paid_amount, inv.amount
                    ));
                    inv.mark_paid();
                }
                InvoiceStatus::Pending if amounts_match(inv.paid_amount, inv.amount) => {
                    warnings.push(format!(
                        "invoice #{} fully paid but still Pending; marked Paid",
                        inv.id
                    ));
                    inv.mark_paid();
                }
                _ => {}
            }
        }

        let floor = next_invoice_id(self.max_id())?;
        if self.next_id < floor {
            self.next_id = floor;
        }
        Ok(warnings)
    }
}
