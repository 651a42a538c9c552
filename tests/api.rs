use actix_web::{test, web, App};
use serde_json::{json, Value};
use std::path::Path;

use quotation_generator::api::handlers::XLSX_CONTENT_TYPE;
use quotation_generator::api::{configure_routes, ApiState};
use quotation_generator::models::{Product, StampLayout};
use quotation_generator::{AppConfig, ProductCatalog, QuotationGenerator};

fn state_in(dir: &Path) -> ApiState {
    let mut config = AppConfig::default();
    config.output.dir = dir.join("downloads");
    config.stamp = StampLayout {
        path: dir.join("absent-stamp.png"),
        ..StampLayout::default()
    };

    let catalog = ProductCatalog::from_products(vec![
        Product { name: "실버볼 슬림컵".into(), price: 70000, category: Some("컵".into()) },
        Product { name: "실버볼 컵".into(), price: 60000, category: Some("컵".into()) },
    ]);

    ApiState::with_parts(QuotationGenerator::from_config(&config), catalog, config)
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn health_is_ok() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(state_in(dir.path()));

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn lists_catalog_products() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(state_in(dir.path()));

    let req = test::TestRequest::get().uri("/api/v1/products").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["products"][0]["name"], "실버볼 슬림컵");
    assert_eq!(body["products"][1]["price"], 60000);
}

#[actix_web::test]
async fn generates_xlsx_download_with_catalog_prices() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(state_in(dir.path()));

    let req = test::TestRequest::post()
        .uri("/api/v1/quotations")
        .set_json(json!({
            "recipient_name": "레퍼토리 성수",
            "items": [
                {"name": "실버볼 슬림컵", "quantity": 9},
                {"name": "실버볼 컵", "quantity": 6, "unit_price": 60000}
            ]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let headers = resp.headers();
    assert_eq!(headers.get("content-type").unwrap(), XLSX_CONTENT_TYPE);
    assert_eq!(headers.get("x-grand-total").unwrap(), "594000");
    assert_eq!(headers.get("x-stamp").unwrap(), "missing");
    let disposition = headers.get("content-disposition").unwrap().to_str().unwrap();
    assert!(disposition.starts_with("attachment"));

    let body = test::read_body(resp).await;
    assert_eq!(&body[..2], b"PK");
}

#[actix_web::test]
async fn rejects_zero_quantity() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(state_in(dir.path()));

    let req = test::TestRequest::post()
        .uri("/api/v1/quotations")
        .set_json(json!({
            "recipient_name": "x",
            "items": [{"name": "실버볼 컵", "quantity": 0}]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn rejects_unknown_product_without_price() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(state_in(dir.path()));

    let req = test::TestRequest::post()
        .uri("/api/v1/quotations")
        .set_json(json!({
            "recipient_name": "x",
            "items": [{"name": "없는 상품", "quantity": 1}]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("없는 상품"));
}

#[actix_web::test]
async fn rejects_too_many_items() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(state_in(dir.path()));

    let items: Vec<Value> = (0..17)
        .map(|i| json!({"name": format!("품목 {}", i), "quantity": 1, "unit_price": 1000}))
        .collect();
    let req = test::TestRequest::post()
        .uri("/api/v1/quotations")
        .set_json(json!({"recipient_name": "x", "items": items}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 422);
}

#[actix_web::test]
async fn save_writes_into_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(state_in(dir.path()));

    let req = test::TestRequest::post()
        .uri("/api/v1/quotations/save")
        .set_json(json!({
            "recipient_name": "레퍼토리 성수",
            "items": [{"name": "실버볼 컵", "quantity": 6}]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["grand_total"], 216000);
    assert_eq!(body["stamp"], "missing");
    let file_name = body["file_name"].as_str().unwrap();
    assert!(file_name.starts_with("견적서_레퍼토리 성수_"));
    assert!(file_name.ends_with(".xlsx"));

    let path = dir.path().join("downloads").join(file_name);
    assert!(path.exists());
}

#[actix_web::test]
async fn metrics_count_generations() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(state_in(dir.path()));

    let req = test::TestRequest::post()
        .uri("/api/v1/quotations")
        .set_json(json!({"recipient_name": "x", "items": []}))
        .to_request();
    assert!(test::call_service(&app, req).await.status().is_success());

    let req = test::TestRequest::get().uri("/metrics").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("quotations_generated_total"));
    assert!(text.contains("outcome=\"missing\""));
}
