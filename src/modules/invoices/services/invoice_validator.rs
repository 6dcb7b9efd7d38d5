use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::modules::invoices::models::{InvoiceDraft, InvoiceSubmission};

/// A submission rule violation.
///
/// The validator reports every violated rule, not just the first, so the
/// editor can aggregate them into a single message or list them all.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Select a project before sending the invoice")]
    MissingProject,

    #[error("Client name and email are required")]
    MissingClientInfo,

    #[error("Add at least one line item with a description")]
    NoLineItems,
}

impl ValidationError {
    /// Stable machine-readable code carried on the wire
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingProject => "MISSING_PROJECT",
            ValidationError::MissingClientInfo => "MISSING_CLIENT_INFO",
            ValidationError::NoLineItems => "NO_LINE_ITEMS",
        }
    }
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationError", 2)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// InvoiceValidator gates the submission boundary: a draft becomes an
/// [`InvoiceSubmission`] only once every rule passes.
pub struct InvoiceValidator;

impl InvoiceValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a draft for submission.
    ///
    /// Checks, in order: a project is selected, client name and email are
    /// both present, and at least one line item has a non-empty description.
    /// All violations are collected before returning. On success the draft
    /// is turned into the backend payload shape with empty-description rows
    /// filtered out; the draft itself is never mutated, so half-typed rows
    /// survive in the editor.
    pub fn validate_for_submit(
        &self,
        draft: &InvoiceDraft,
    ) -> Result<InvoiceSubmission, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let project_id = match draft.project_id {
            Some(id) => id,
            None => {
                errors.push(ValidationError::MissingProject);
                0
            }
        };

        if draft.client_name.trim().is_empty() || draft.client_email.trim().is_empty() {
            errors.push(ValidationError::MissingClientInfo);
        }

        let items = draft.submission_items();
        if items.is_empty() {
            errors.push(ValidationError::NoLineItems);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(InvoiceSubmission {
            project_id,
            contact_id: draft.contact_id,
            client_name: draft.client_name.clone(),
            client_email: draft.client_email.clone(),
            items,
            tax_percent: draft.tax_percent,
            discount_amount: draft.discount_amount,
            discount_type: draft.discount_type,
            currency: draft.currency,
            status: draft.status,
            notes: draft.notes.clone(),
        })
    }
}

impl Default for InvoiceValidator {
    fn default() -> Self {
        Self::new()
    }
}
