pub mod invoice_validator;
pub mod totals_calculator;

pub use invoice_validator::{InvoiceValidator, ValidationError};
pub use totals_calculator::{Totals, TotalsCalculator};
