// Invoice draft model.
//
// A draft is the editable form state behind the invoice editor: client
// fields, line items, tax and discount configuration. Totals are never
// stored on the draft; they are recomputed from scratch on every change
// (see services::totals_calculator), so there is no cached value to go
// stale between edits.

use serde::{Deserialize, Serialize};

use super::line_item::{LineItem, LineItemPatch};
use crate::core::numeric::numeric_or_zero;
use crate::core::Currency;

/// Whether a discount is a flat currency amount or a percentage of subtotal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    #[default]
    Fixed,
    Percent,
}

/// Invoice status lifecycle, owned by the backend API; carried here so
/// submission payloads match its record shape field-for-field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Viewed,
    Partial,
    Paid,
    Overdue,
    Cancelled,
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceStatus::Draft => write!(f, "draft"),
            InvoiceStatus::Sent => write!(f, "sent"),
            InvoiceStatus::Viewed => write!(f, "viewed"),
            InvoiceStatus::Partial => write!(f, "partial"),
            InvoiceStatus::Paid => write!(f, "paid"),
            InvoiceStatus::Overdue => write!(f, "overdue"),
            InvoiceStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(InvoiceStatus::Draft),
            "sent" => Ok(InvoiceStatus::Sent),
            "viewed" => Ok(InvoiceStatus::Viewed),
            "partial" => Ok(InvoiceStatus::Partial),
            "paid" => Ok(InvoiceStatus::Paid),
            "overdue" => Ok(InvoiceStatus::Overdue),
            "cancelled" => Ok(InvoiceStatus::Cancelled),
            _ => Err(format!("Invalid invoice status: {}", s)),
        }
    }
}

/// Editable invoice form state
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InvoiceDraft {
    /// Required relation; submission is rejected without it
    #[serde(default)]
    pub project_id: Option<i64>,

    #[serde(default)]
    pub contact_id: Option<i64>,

    #[serde(default)]
    pub client_name: String,

    #[serde(default)]
    pub client_email: String,

    /// Ordered for display; ordering does not affect totals
    #[serde(default)]
    pub items: Vec<LineItem>,

    /// Percent in [0, 100], applied to the taxable subset only
    #[serde(default, deserialize_with = "numeric_or_zero")]
    pub tax_percent: f64,

    #[serde(default, deserialize_with = "numeric_or_zero")]
    pub discount_amount: f64,

    #[serde(default)]
    pub discount_type: DiscountType,

    #[serde(default)]
    pub currency: Currency,

    #[serde(default)]
    pub status: InvoiceStatus,

    #[serde(default)]
    pub notes: String,
}

impl InvoiceDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fresh row with editing defaults
    pub fn add_item(&mut self) -> &LineItem {
        let index = self.items.len();
        self.items.push(LineItem::new(index as i32));
        &self.items[index]
    }

    /// Apply a field patch to the row at `index`, re-deriving its amount.
    /// Out-of-range indexes are a no-op returning `None`, never a panic.
    pub fn update_item(&mut self, index: usize, patch: &LineItemPatch) -> Option<&LineItem> {
        let updated = self.items.get(index)?.apply_patch(patch);
        self.items[index] = updated;
        self.items.get(index)
    }

    /// Remove the row at `index` and renumber the remaining sort keys.
    /// Out-of-range indexes are a no-op.
    pub fn remove_item(&mut self, index: usize) -> Option<LineItem> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);
        for (i, item) in self.items.iter_mut().enumerate() {
            item.sort_order = i as i32;
        }
        Some(removed)
    }

    /// Rows that survive the submission-boundary filter. Editing never
    /// drops a half-typed row; only submission does.
    pub fn submission_items(&self) -> Vec<LineItem> {
        self.items
            .iter()
            .filter(|item| item.has_description())
            .cloned()
            .collect()
    }
}

/// The payload shape the backend invoice API expects. Produced only by the
/// validator, with line items already filtered to non-empty descriptions.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceSubmission {
    pub project_id: i64,
    pub contact_id: Option<i64>,
    pub client_name: String,
    pub client_email: String,
    pub items: Vec<LineItem>,
    pub tax_percent: f64,
    pub discount_amount: f64,
    pub discount_type: DiscountType,
    pub currency: Currency,
    pub status: InvoiceStatus,
    pub notes: String,
}
