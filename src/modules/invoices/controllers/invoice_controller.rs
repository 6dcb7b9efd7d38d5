use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::core::error::AppError;
use crate::core::FormatStyle;
use crate::modules::invoices::models::{InvoiceDraft, LineItem, LineItemPatch};
use crate::modules::invoices::services::invoice_validator::InvoiceValidator;
use crate::modules::invoices::services::totals_calculator::{Totals, TotalsCalculator};

/// Display strings for the editor, rendered at the engine's single rounding
/// point. `total_summary` uses the 0-decimal summary-card style; everything
/// else uses the full-scale detail style.
#[derive(Debug, Serialize)]
pub struct FormattedTotals {
    pub subtotal: String,
    pub tax_amount: String,
    pub discount: String,
    pub total: String,
    pub total_summary: String,
}

#[derive(Debug, Serialize)]
pub struct PreviewItem {
    pub sort_order: i32,
    pub amount: f64,
    pub formatted_amount: String,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    #[serde(flatten)]
    pub totals: Totals,
    pub formatted: FormattedTotals,
    pub items: Vec<PreviewItem>,
}

/// Request body for per-row normalization parity checks
#[derive(Debug, Deserialize)]
pub struct NormalizeItemRequest {
    pub item: LineItem,
    #[serde(default)]
    pub patch: LineItemPatch,
}

/// Compute totals for an invoice draft
/// POST /invoices/preview
///
/// The dashboard derives the same figures client-side on every keystroke;
/// this endpoint exists so persisted totals can never drift from the
/// preview. Item amounts are re-derived before aggregation.
pub async fn preview_totals(
    request: web::Json<InvoiceDraft>,
) -> Result<HttpResponse, AppError> {
    let mut draft = request.into_inner();
    for item in &mut draft.items {
        item.recalculate_amount();
    }

    let totals = TotalsCalculator::new().compute_for_draft(&draft);
    let currency = draft.currency;

    tracing::debug!(
        item_count = draft.items.len(),
        subtotal = totals.subtotal,
        total = totals.total,
        "Computed totals preview"
    );

    let response = PreviewResponse {
        totals,
        formatted: FormattedTotals {
            subtotal: currency.format(totals.subtotal, FormatStyle::Detail),
            tax_amount: currency.format(totals.tax_amount, FormatStyle::Detail),
            discount: currency.format(totals.discount, FormatStyle::Detail),
            total: currency.format(totals.total, FormatStyle::Detail),
            total_summary: currency.format(totals.total, FormatStyle::Summary),
        },
        items: draft
            .items
            .iter()
            .map(|item| PreviewItem {
                sort_order: item.sort_order,
                amount: item.amount,
                formatted_amount: currency.format(item.amount, FormatStyle::Detail),
            })
            .collect(),
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Validate a draft at the submission boundary
/// POST /invoices/validate
///
/// Returns the cleaned backend payload when every rule passes, or 422 with
/// the full list of violations so the editor can aggregate its message.
pub async fn validate_draft(request: web::Json<InvoiceDraft>) -> Result<HttpResponse, AppError> {
    let draft = request.into_inner();

    match InvoiceValidator::new().validate_for_submit(&draft) {
        Ok(submission) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "valid": true,
            "invoice": submission,
        }))),
        Err(errors) => {
            tracing::debug!(violations = errors.len(), "Draft failed submission validation");
            Ok(HttpResponse::UnprocessableEntity().json(serde_json::json!({
                "valid": false,
                "errors": errors,
            })))
        }
    }
}

/// Normalize a single line item against a field patch
/// POST /invoices/normalize-item
///
/// Mirrors the client's per-edit derivation: merge the patch, re-derive the
/// amount, mirror quantity/unit_price for time rows.
pub async fn normalize_item(
    request: web::Json<NormalizeItemRequest>,
) -> Result<HttpResponse, AppError> {
    let NormalizeItemRequest { item, patch } = request.into_inner();
    Ok(HttpResponse::Ok().json(item.apply_patch(&patch)))
}

/// Configure invoice routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/invoices")
            .route("/preview", web::post().to(preview_totals))
            .route("/validate", web::post().to(validate_draft))
            .route("/normalize-item", web::post().to(normalize_item)),
    );
}
