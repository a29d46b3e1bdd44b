pub mod json_backend;
pub mod memory;

use std::sync::Arc;

use crate::{domain::InvoiceBook, errors::Result};

/// Abstraction over persistence backends capable of storing the invoice book.
///
/// Both calls operate on the whole collection: `save` replaces whatever was
/// stored before and `load` of a store that does not exist yet yields an empty
/// book. Only unreadable or corrupt data is an error.
pub trait LedgerStorage: Send + Sync {
    fn load(&self) -> Result<LoadReport>;
    fn save(&self, book: &InvoiceBook) -> Result<()>;

    /// Human-readable location used in logs and the CLI banner.
    fn location(&self) -> String;
}

impl<T: LedgerStorage + ?Sized> LedgerStorage for Arc<T> {
    fn load(&self) -> Result<LoadReport> {
        (**self).load()
    }

    fn save(&self, book: &InvoiceBook) -> Result<()> {
        (**self).save(book)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}

/// Outcome of a load: the reconciled book plus what had to be changed.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub book: InvoiceBook,
    pub warnings: Vec<String>,
    pub migrations: Vec<String>,
}

impl LoadReport {
    pub fn clean(book: InvoiceBook) -> Self {
        Self {
            book,
            warnings: Vec::new(),
            migrations: Vec::new(),
        }
    }
}

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;
