pub mod currency;
pub mod error;
pub mod numeric;

pub use currency::{Currency, FormatStyle};
pub use error::{AppError, Result};
pub use numeric::parse_numeric_or_zero;
