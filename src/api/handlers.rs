use actix_web::http::header::{
    Charset, ContentDisposition, DispositionParam, DispositionType, ExtendedValue,
};
use actix_web::{web, HttpResponse};
use chrono::Local;
use serde_json::json;

use crate::core::quotation_file_name;
use crate::metrics;
use crate::models::{LineItem, QuotationRequest};
use super::error::ApiResult;
use super::state::ApiState;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// List the product catalog used to price items sent without `unit_price`
pub async fn list_products(state: web::Data<ApiState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "count": state.catalog.len(),
        "products": state.catalog.products(),
    }))
}

/// Generate a quotation and return it as a download
pub async fn generate_quotation(
    body: web::Json<QuotationRequest>,
    state: web::Data<ApiState>,
) -> ApiResult<HttpResponse> {
    let request = body.into_inner();
    let items = prepare_items(&request, &state)?;

    let generator = state.generator.clone();
    let recipient = request.recipient_name.clone();

    // Workbook assembly is CPU bound; keep it off the async workers
    let (buffer, summary) = tokio::task::spawn_blocking(move || {
        generator.generate_to_buffer(&recipient, &items)
    })
    .await??;

    metrics::record_generation(summary.stamp);

    let file_name = quotation_file_name(&request.recipient_name, Local::now().naive_local());
    tracing::info!(
        file_name = %file_name,
        grand_total = summary.grand_total,
        stamp = summary.stamp.as_str(),
        "Quotation generated"
    );

    Ok(HttpResponse::Ok()
        .content_type(XLSX_CONTENT_TYPE)
        .insert_header(attachment(&file_name))
        .insert_header(("X-Grand-Total", summary.grand_total.to_string()))
        .insert_header(("X-Stamp", summary.stamp.as_str()))
        .body(buffer))
}

/// Generate a quotation into the configured output directory
pub async fn save_quotation(
    body: web::Json<QuotationRequest>,
    state: web::Data<ApiState>,
) -> ApiResult<HttpResponse> {
    let request = body.into_inner();
    let items = prepare_items(&request, &state)?;

    let file_name = quotation_file_name(&request.recipient_name, Local::now().naive_local());
    let path = state.config.output.dir.join(&file_name);

    let generator = state.generator.clone();
    let recipient = request.recipient_name.clone();
    let target = path.clone();
    let summary = tokio::task::spawn_blocking(move || {
        generator.generate(&recipient, &items, &target)
    })
    .await??;

    metrics::record_generation(summary.stamp);

    Ok(HttpResponse::Created().json(json!({
        "path": path.display().to_string(),
        "file_name": file_name,
        "grand_total": summary.grand_total,
        "line_count": summary.line_count,
        "stamp": summary.stamp,
    })))
}

fn prepare_items(request: &QuotationRequest, state: &ApiState) -> ApiResult<Vec<LineItem>> {
    request.validate()?;
    Ok(request.resolve(&state.catalog)?)
}

fn attachment(file_name: &str) -> ContentDisposition {
    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![
            DispositionParam::Filename("quotation.xlsx".to_string()),
            DispositionParam::FilenameExt(ExtendedValue {
                charset: Charset::Ext("UTF-8".to_string()),
                language_tag: None,
                value: file_name.as_bytes().to_vec(),
            }),
        ],
    }
}
