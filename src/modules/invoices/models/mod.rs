pub mod invoice;
pub mod line_item;

pub use invoice::{DiscountType, InvoiceDraft, InvoiceStatus, InvoiceSubmission};
pub use line_item::{ItemType, LineItem, LineItemPatch};
