pub mod book;
pub mod common;
pub mod invoice;
pub mod summary;

pub use book::{next_invoice_id, InvoiceBook, CURRENT_SCHEMA_VERSION};
pub use common::{amounts_match, Displayable, MONEY_EPSILON};
pub use invoice::{Invoice, InvoiceId, InvoiceStatus, PaymentRejection, Signature};
pub use summary::FinancialSummary;
