use serde::Serialize;

use crate::core::numeric::finite_or_zero;
use crate::modules::invoices::models::{DiscountType, InvoiceDraft, LineItem};

/// Computed invoice totals, all unrounded f64.
///
/// Rounding happens only at display formatting, never here, so the client
/// and server derive bit-identical values from identical inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub subtotal: f64,
    pub taxable_amount: f64,
    pub tax_amount: f64,
    pub discount: f64,
    pub total: f64,
}

/// TotalsCalculator derives invoice totals from line items plus the tax and
/// discount configuration.
pub struct TotalsCalculator;

impl TotalsCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Compute subtotal, tax, discount, and total.
    ///
    /// - subtotal sums every item's amount, including non-taxable rows and
    ///   rows whose description is still empty (description filtering is a
    ///   submission-time concern, not a totals concern)
    /// - tax applies only to the taxable subset: taxable_amount * percent / 100
    /// - a percent discount is taken on the subtotal, a fixed discount as-is
    /// - total = subtotal + tax_amount - discount, NOT clamped at zero: a
    ///   fixed discount larger than subtotal plus tax yields a negative total
    ///
    /// Pure function of its inputs; degenerate input (empty items, zero tax,
    /// zero discount) yields zeroed totals rather than an error.
    pub fn compute(
        &self,
        items: &[LineItem],
        tax_percent: f64,
        discount_amount: f64,
        discount_type: DiscountType,
    ) -> Totals {
        let subtotal: f64 = items.iter().map(|item| finite_or_zero(item.amount)).sum();

        let taxable_amount: f64 = items
            .iter()
            .filter(|item| item.taxable)
            .map(|item| finite_or_zero(item.amount))
            .sum();

        let tax_percent = finite_or_zero(tax_percent);
        let discount_amount = finite_or_zero(discount_amount);

        // Kept in this exact form (multiply first, then divide by 100) so
        // the server reproduces the client's IEEE-754 results bit-for-bit.
        let tax_amount = taxable_amount * tax_percent / 100.0;

        let discount = match discount_type {
            DiscountType::Percent => subtotal * discount_amount / 100.0,
            DiscountType::Fixed => discount_amount,
        };

        let total = subtotal + tax_amount - discount;

        Totals {
            subtotal,
            taxable_amount,
            tax_amount,
            discount,
            total,
        }
    }

    /// Compute totals for a draft's current state
    pub fn compute_for_draft(&self, draft: &InvoiceDraft) -> Totals {
        self.compute(
            &draft.items,
            draft.tax_percent,
            draft.discount_amount,
            draft.discount_type,
        )
    }
}

impl Default for TotalsCalculator {
    fn default() -> Self {
        Self::new()
    }
}
