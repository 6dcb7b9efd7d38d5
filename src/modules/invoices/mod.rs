// Invoices module

pub mod controllers;
pub mod models;
pub mod services;

pub use models::{DiscountType, InvoiceDraft, InvoiceStatus, InvoiceSubmission, ItemType, LineItem, LineItemPatch};
pub use services::{InvoiceValidator, Totals, TotalsCalculator, ValidationError};
