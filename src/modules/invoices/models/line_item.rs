// Line item model with amount derivation.
//
// A line item is one billable row on an invoice: a service, product,
// tracked time, or expense. Time rows derive their amount from hours and
// rate; everything else from quantity and unit price. The derivation runs
// on every edit so the stored amount never goes stale.

use serde::{Deserialize, Serialize};

use crate::core::numeric::{finite_or_zero, numeric_or_zero, opt_numeric_or_zero};

/// Billable row kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    #[default]
    Service,
    Product,
    Time,
    Expense,
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemType::Service => write!(f, "service"),
            ItemType::Product => write!(f, "product"),
            ItemType::Time => write!(f, "time"),
            ItemType::Expense => write!(f, "expense"),
        }
    }
}

/// One billable row on an invoice
///
/// Numeric fields accept JSON numbers or strings at the wire boundary;
/// invalid input coerces to 0 so a half-typed row never breaks a preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub item_type: ItemType,

    /// Rows with an empty description still count toward totals while
    /// editing; they are filtered out only at the submission boundary.
    #[serde(default)]
    pub description: String,

    #[serde(default = "default_quantity", deserialize_with = "numeric_or_zero")]
    pub quantity: f64,

    /// Hours worked, used only for time rows
    #[serde(default, deserialize_with = "numeric_or_zero")]
    pub hours: f64,

    /// Hourly rate, used only for time rows
    #[serde(default, deserialize_with = "numeric_or_zero")]
    pub rate: f64,

    #[serde(default, deserialize_with = "numeric_or_zero")]
    pub unit_price: f64,

    /// Derived on every edit; never entered directly
    #[serde(default, deserialize_with = "numeric_or_zero")]
    pub amount: f64,

    #[serde(default = "default_taxable")]
    pub taxable: bool,

    /// Stable display ordering key
    #[serde(default)]
    pub sort_order: i32,
}

fn default_quantity() -> f64 {
    1.0
}

fn default_taxable() -> bool {
    true
}

/// Partial update for a line item, mirroring a single form-field edit.
/// Absent fields leave the item untouched; present-but-invalid numeric
/// values coerce to 0.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LineItemPatch {
    #[serde(default)]
    pub item_type: Option<ItemType>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "opt_numeric_or_zero")]
    pub quantity: Option<f64>,
    #[serde(default, deserialize_with = "opt_numeric_or_zero")]
    pub hours: Option<f64>,
    #[serde(default, deserialize_with = "opt_numeric_or_zero")]
    pub rate: Option<f64>,
    #[serde(default, deserialize_with = "opt_numeric_or_zero")]
    pub unit_price: Option<f64>,
    #[serde(default)]
    pub taxable: Option<bool>,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

impl LineItem {
    /// Create a fresh row with editing defaults: one unit, taxable, no
    /// amount until the first edit derives it.
    pub fn new(sort_order: i32) -> Self {
        Self {
            item_type: ItemType::Service,
            description: String::new(),
            quantity: 1.0,
            hours: 0.0,
            rate: 0.0,
            unit_price: 0.0,
            amount: 0.0,
            taxable: true,
            sort_order,
        }
    }

    /// Merge a patch into this item and re-derive the amount.
    ///
    /// Returns a new item; the original is untouched so callers can diff
    /// old and new state.
    pub fn apply_patch(&self, patch: &LineItemPatch) -> LineItem {
        let mut item = self.clone();

        if let Some(item_type) = patch.item_type {
            item.item_type = item_type;
        }
        if let Some(description) = &patch.description {
            item.description = description.clone();
        }
        if let Some(quantity) = patch.quantity {
            item.quantity = quantity;
        }
        if let Some(hours) = patch.hours {
            item.hours = hours;
        }
        if let Some(rate) = patch.rate {
            item.rate = rate;
        }
        if let Some(unit_price) = patch.unit_price {
            item.unit_price = unit_price;
        }
        if let Some(taxable) = patch.taxable {
            item.taxable = taxable;
        }
        if let Some(sort_order) = patch.sort_order {
            item.sort_order = sort_order;
        }

        item.recalculate_amount();
        item
    }

    /// Re-derive `amount` from the current fields.
    ///
    /// Time rows: `amount = hours * rate`, with `unit_price` mirrored to the
    /// rate and `quantity` mirrored to the hours so consumers that read only
    /// quantity/unit_price stay consistent regardless of row type.
    /// Other rows: `amount = quantity * unit_price`.
    /// Non-finite inputs count as 0; this never fails.
    pub fn recalculate_amount(&mut self) {
        if self.item_type == ItemType::Time {
            let hours = finite_or_zero(self.hours);
            let rate = finite_or_zero(self.rate);
            self.amount = hours * rate;
            self.unit_price = rate;
            self.quantity = hours;
        } else {
            self.amount = finite_or_zero(self.quantity) * finite_or_zero(self.unit_price);
        }
    }

    /// Whether this row survives the submission-boundary filter
    pub fn has_description(&self) -> bool {
        !self.description.trim().is_empty()
    }
}
