// Contract tests for the invoice engine endpoints.
//
// These validate the JSON shape of the preview/validate/normalize surface
// the dashboard depends on:
// - numeric totals are plain JSON numbers, unrounded
// - formatted strings follow the detail/summary split
// - validation failures return 422 with the full violation list

use actix_web::{test, web, App};
use serde_json::json;

use peanut_invoicing::invoices::controllers::invoice_controller;
use peanut_invoicing::modules::health::health_controller;

fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.configure(health_controller::configure)
        .service(web::scope("/api").configure(invoice_controller::configure));
}

#[actix_web::test]
async fn test_preview_response_schema() {
    let app = test::init_service(App::new().configure(app_config)).await;

    let req = test::TestRequest::post()
        .uri("/api/invoices/preview")
        .set_json(json!({
            "items": [
                {"description": "Design", "quantity": 2, "unit_price": 50, "taxable": true},
                {"item_type": "time", "description": "Dev", "hours": 2, "rate": 75}
            ],
            "tax_percent": 8,
            "discount_amount": 25,
            "discount_type": "fixed",
            "currency": "USD"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;

    // Raw totals are numbers
    assert_eq!(body["subtotal"], 250.0);
    assert_eq!(body["taxable_amount"], 250.0);
    assert_eq!(body["tax_amount"], 20.0);
    assert_eq!(body["discount"], 25.0);
    assert_eq!(body["total"], 245.0);

    // Formatted block follows the detail/summary split
    let formatted = &body["formatted"];
    assert_eq!(formatted["subtotal"], "$250.00");
    assert_eq!(formatted["tax_amount"], "$20.00");
    assert_eq!(formatted["discount"], "$25.00");
    assert_eq!(formatted["total"], "$245.00");
    assert_eq!(formatted["total_summary"], "$245");

    // Per-item amounts are re-derived server-side
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["amount"], 100.0);
    assert_eq!(items[1]["amount"], 150.0);
    assert_eq!(items[1]["formatted_amount"], "$150.00");
}

#[actix_web::test]
async fn test_preview_accepts_string_numerics() {
    let app = test::init_service(App::new().configure(app_config)).await;

    let req = test::TestRequest::post()
        .uri("/api/invoices/preview")
        .set_json(json!({
            "items": [
                {"description": "Hosting", "quantity": "3", "unit_price": "20"}
            ],
            "tax_percent": "10"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["subtotal"], 60.0);
    assert_eq!(body["tax_amount"], 6.0);
}

#[actix_web::test]
async fn test_preview_with_empty_draft() {
    let app = test::init_service(App::new().configure(app_config)).await;

    let req = test::TestRequest::post()
        .uri("/api/invoices/preview")
        .set_json(json!({}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["subtotal"], 0.0);
    assert_eq!(body["total"], 0.0);
    assert_eq!(body["formatted"]["total"], "$0.00");
}

#[actix_web::test]
async fn test_preview_negative_total_not_clamped() {
    let app = test::init_service(App::new().configure(app_config)).await;

    let req = test::TestRequest::post()
        .uri("/api/invoices/preview")
        .set_json(json!({
            "items": [{"description": "Small job", "quantity": 1, "unit_price": 50, "taxable": false}],
            "discount_amount": 100,
            "discount_type": "fixed"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;

    assert_eq!(body["total"], -50.0);
    assert_eq!(body["formatted"]["total"], "-$50.00");
}

#[actix_web::test]
async fn test_validate_success_payload_shape() {
    let app = test::init_service(App::new().configure(app_config)).await;

    let req = test::TestRequest::post()
        .uri("/api/invoices/validate")
        .set_json(json!({
            "project_id": 12,
            "contact_id": 4,
            "client_name": "Acme Co",
            "client_email": "billing@acme.test",
            "items": [
                {"description": "Retainer", "quantity": 1, "unit_price": 500},
                {"description": "", "quantity": 1, "unit_price": 100}
            ]
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["valid"], true);

    let invoice = &body["invoice"];
    assert_eq!(invoice["project_id"], 12);
    assert_eq!(invoice["client_name"], "Acme Co");
    assert_eq!(invoice["status"], "draft");
    assert_eq!(invoice["currency"], "USD");
    // the empty-description row is filtered at the submission boundary
    assert_eq!(invoice["items"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_validate_failure_lists_all_violations() {
    let app = test::init_service(App::new().configure(app_config)).await;

    let req = test::TestRequest::post()
        .uri("/api/invoices/validate")
        .set_json(json!({"items": []}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["valid"], false);

    let errors = body["errors"].as_array().unwrap();
    let codes: Vec<&str> = errors.iter().map(|e| e["code"].as_str().unwrap()).collect();
    assert_eq!(
        codes,
        vec!["MISSING_PROJECT", "MISSING_CLIENT_INFO", "NO_LINE_ITEMS"]
    );
    for error in errors {
        assert!(error["message"].is_string(), "each violation carries a message");
    }
}

#[actix_web::test]
async fn test_normalize_item_schema() {
    let app = test::init_service(App::new().configure(app_config)).await;

    let req = test::TestRequest::post()
        .uri("/api/invoices/normalize-item")
        .set_json(json!({
            "item": {"item_type": "time", "description": "Dev", "sort_order": 1},
            "patch": {"hours": 3, "rate": 50}
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["amount"], 150.0);
    assert_eq!(body["quantity"], 3.0);
    assert_eq!(body["unit_price"], 50.0);
    assert_eq!(body["sort_order"], 1);
    assert_eq!(body["item_type"], "time");
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app = test::init_service(App::new().configure(app_config)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "peanut-invoicing");
}
