use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    RwLock,
};

use crate::{
    domain::InvoiceBook,
    errors::{LedgerError, Result},
};

use super::{LedgerStorage, LoadReport};

/// Volatile backend that keeps the book in process memory.
///
/// Writes can be forced to fail to exercise the fatal storage path.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    book: RwLock<InvoiceBook>,
    fail_writes: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves since creation.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Result<InvoiceBook> {
        self.book
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| LedgerError::Storage("memory store poisoned".into()))
    }
}

impl LedgerStorage for MemoryStorage {
    fn load(&self) -> Result<LoadReport> {
        self.snapshot().map(LoadReport::clean)
    }

    fn save(&self, book: &InvoiceBook) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LedgerError::Storage("memory store rejected write".into()));
        }
        let mut guard = self
            .book
            .write()
            .map_err(|_| LedgerError::Storage("memory store poisoned".into()))?;
        *guard = book.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
