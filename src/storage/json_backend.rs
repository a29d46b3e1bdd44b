use chrono::NaiveDate;
use serde::Deserialize;
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    domain::{
        next_invoice_id, Invoice, InvoiceBook, InvoiceId, InvoiceStatus, CURRENT_SCHEMA_VERSION,
    },
    errors::{LedgerError, Result},
    utils::paths::ensure_dir,
};

use super::{LedgerStorage, LoadReport};

const TMP_SUFFIX: &str = "tmp";

/// Flat-file JSON persistence for the invoice book.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStorage for JsonStorage {
    fn load(&self) -> Result<LoadReport> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no ledger file yet; starting empty");
            return Ok(LoadReport::clean(InvoiceBook::new()));
        }
        load_book_from_path(&self.path)
    }

    fn save(&self, book: &InvoiceBook) -> Result<()> {
        save_book_to_path(book, &self.path)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

pub fn save_book_to_path(book: &InvoiceBook, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(book)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    tracing::debug!(path = %path.display(), invoices = book.len(), "ledger saved");
    Ok(())
}

/// Reads a ledger file, upgrading older layouts and reconciling invariants.
pub fn load_book_from_path(path: &Path) -> Result<LoadReport> {
    let data = fs::read_to_string(path)?;
    let stored: StoredBook = serde_json::from_str(&data).map_err(|err| {
        LedgerError::Storage(format!("ledger `{}` is corrupt: {}", path.display(), err))
    })?;
    let mut report = stored.upgrade()?;
    let repairs = report.book.reconcile()?;
    report.warnings.extend(repairs);
    for warning in &report.warnings {
        tracing::warn!(path = %path.display(), "{warning}");
    }
    Ok(report)
}

/// On-disk shape accepted by the loader. Every field added after the first
/// release is optional so files written by older versions still parse.
#[derive(Debug, Deserialize)]
struct StoredBook {
    #[serde(default)]
    schema_version: Option<u8>,
    #[serde(default)]
    next_id: Option<InvoiceId>,
    #[serde(default)]
    invoices: Vec<StoredInvoice>,
}

#[derive(Debug, Deserialize)]
struct StoredInvoice {
    id: InvoiceId,
    client: String,
    amount: f64,
    #[serde(default)]
    description: String,
    date: NaiveDate,
    #[serde(default)]
    status: Option<InvoiceStatus>,
    #[serde(default)]
    paid_amount: Option<f64>,
}

impl StoredBook {
    fn upgrade(self) -> Result<LoadReport> {
        let version = self.schema_version.unwrap_or(1);
        if version > CURRENT_SCHEMA_VERSION {
            return Err(LedgerError::Storage(format!(
                "ledger schema v{} is newer than supported v{}",
                version, CURRENT_SCHEMA_VERSION
            )));
        }

        let mut migrations = Vec::new();
        if version < CURRENT_SCHEMA_VERSION {
            migrations.push(format!(
                "schema v{} upgraded to v{}",
                version, CURRENT_SCHEMA_VERSION
            ));
        }

        let mut missing_status = 0;
        let mut missing_paid = 0;
        let invoices: Vec<Invoice> = self
            .invoices
            .into_iter()
            .map(|stored| {
                let status = stored.status.unwrap_or_else(|| {
                    missing_status += 1;
                    InvoiceStatus::Pending
                });
                let paid_amount = stored.paid_amount.unwrap_or_else(|| {
                    missing_paid += 1;
                    match status {
                        InvoiceStatus::Paid => stored.amount,
                        InvoiceStatus::Pending => 0.0,
                    }
                });
                Invoice {
                    id: stored.id,
                    client: stored.client,
                    amount: stored.amount,
                    description: stored.description,
                    date: stored.date,
                    status,
                    paid_amount,
                }
            })
            .collect();

        if missing_status > 0 {
            migrations.push(format!(
                "defaulted status to Pending on {missing_status} record(s)"
            ));
        }
        if missing_paid > 0 {
            migrations.push(format!(
                "derived paid_amount from status on {missing_paid} record(s)"
            ));
        }

        let max_id = invoices.iter().map(|inv| inv.id).max().unwrap_or(0);
        let next_id = match self.next_id {
            Some(next) => next,
            None => {
                let next = next_invoice_id(max_id)?;
                migrations.push(format!("initialized id counter at {next}"));
                next
            }
        };

        Ok(LoadReport {
            book: InvoiceBook {
                schema_version: CURRENT_SCHEMA_VERSION,
                next_id,
                invoices,
            },
            warnings: Vec::new(),
            migrations,
        })
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}
