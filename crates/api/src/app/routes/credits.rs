use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use creditapp_core::{CreditCode, CustomerId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(request_credit).get(list_credits))
        .route("/:credit_code", get(get_credit))
}

pub async fn request_credit(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreditCreateRequest>,
) -> axum::response::Response {
    match services.credits.request(body.into_credit_request()).await {
        Ok(credit) => {
            (StatusCode::CREATED, Json(dto::credit_created_to_json(&credit))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_credits(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::CreditOwnerQuery>,
) -> axum::response::Response {
    let customer_id = CustomerId::new(query.customer_id);
    match services.credits.find_all_by_customer(customer_id).await {
        Ok(credits) => {
            let items = credits
                .iter()
                .map(dto::credit_summary_to_json)
                .collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_credit(
    Extension(services): Extension<Arc<AppServices>>,
    Path(credit_code): Path<String>,
    Query(query): Query<dto::CreditOwnerQuery>,
) -> axum::response::Response {
    let code: CreditCode = match credit_code.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid credit code");
        }
    };
    let customer_id = CustomerId::new(query.customer_id);

    match services.credits.find_by_credit_code(customer_id, code).await {
        Ok(details) => (StatusCode::OK, Json(dto::credit_view_to_json(&details))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
