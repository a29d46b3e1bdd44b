//! Domain model for a single freelance invoice and its payment lifecycle.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{amount_key, amounts_match, Displayable, MONEY_EPSILON};

/// Positive, sequential identifier assigned by the ledger.
pub type InvoiceId = u64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    pub id: InvoiceId,
    pub client: String,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    pub status: InvoiceStatus,
    #[serde(default)]
    pub paid_amount: f64,
}

impl Invoice {
    pub fn new(
        id: InvoiceId,
        client: impl Into<String>,
        amount: f64,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            client: client.into(),
            amount,
            description: description.into(),
            date,
            status: InvoiceStatus::Pending,
            paid_amount: 0.0,
        }
    }

    /// Amount still owed on this invoice.
    pub fn balance(&self) -> f64 {
        (self.amount - self.paid_amount).max(0.0)
    }

    pub fn is_paid(&self) -> bool {
        self.status == InvoiceStatus::Paid
    }

    /// Settles the invoice in full regardless of prior partial payments.
    pub fn mark_paid(&mut self) {
        self.paid_amount = self.amount;
        self.status = InvoiceStatus::Paid;
    }

    /// Applies a payment toward the balance and returns the new balance.
    ///
    /// The payment must be positive and no larger than the remaining balance.
    /// A balance left within [`MONEY_EPSILON`] of zero settles the invoice.
    pub fn apply_payment(&mut self, payment: f64) -> Result<f64, PaymentRejection> {
        if !payment.is_finite() || payment <= 0.0 {
            return Err(PaymentRejection::NotPositive);
        }
        let balance = self.balance();
        if payment > balance + MONEY_EPSILON {
            return Err(PaymentRejection::ExceedsBalance { balance });
        }

        self.paid_amount += payment;
        if amounts_match(self.paid_amount, self.amount) || self.paid_amount > self.amount {
            self.mark_paid();
        }
        Ok(self.balance())
    }

    /// Tuple used to detect duplicate entries.
    pub fn signature(&self) -> Signature {
        Signature {
            client: self.client.clone(),
            amount_bits: amount_key(self.amount),
            description: self.description.clone(),
        }
    }
}

impl Displayable for Invoice {
    fn display_label(&self) -> String {
        format!("#{} {} [{}]", self.id, self.client, self.status)
    }
}

/// Reason a payment could not be applied to an invoice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaymentRejection {
    NotPositive,
    ExceedsBalance { balance: f64 },
}

impl fmt::Display for PaymentRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentRejection::NotPositive => f.write_str("payment must be greater than zero"),
            PaymentRejection::ExceedsBalance { balance } => {
                write!(f, "payment exceeds remaining balance of {balance:.2}")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
/// Enumerates the lifecycle state of an invoice.
pub enum InvoiceStatus {
    #[default]
    Pending,
    Paid,
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InvoiceStatus::Pending => "Pending",
            InvoiceStatus::Paid => "Paid",
        };
        f.write_str(label)
    }
}

/// The (client, amount, description) fingerprint of an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    pub client: String,
    pub amount_bits: u64,
    pub description: String,
}
