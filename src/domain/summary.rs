use serde::{Deserialize, Serialize};

use super::invoice::{Invoice, InvoiceStatus};

/// Aggregate totals across the whole ledger.
///
/// `total_pending` sums the full amount of every Pending invoice, including the
/// part already received on partially paid ones. `outstanding_balance` carries
/// the amount actually still owed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub total_paid: f64,
    pub total_pending: f64,
    pub pending_count: usize,
    pub paid_count: usize,
    pub invoice_count: usize,
    pub total_received: f64,
    pub outstanding_balance: f64,
}

impl FinancialSummary {
    pub fn from_invoices(invoices: &[Invoice]) -> Self {
        invoices
            .iter()
            .fold(Self::default(), |mut summary, inv| {
                summary.invoice_count += 1;
                summary.total_received += inv.paid_amount;
                match inv.status {
                    InvoiceStatus::Paid => {
                        summary.total_paid += inv.amount;
                        summary.paid_count += 1;
                    }
                    InvoiceStatus::Pending => {
                        summary.total_pending += inv.amount;
                        summary.pending_count += 1;
                        summary.outstanding_balance += inv.balance();
                    }
                }
                summary
            })
    }
}
