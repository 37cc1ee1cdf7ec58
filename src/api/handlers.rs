//! HTTP request handlers for the print pricing API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_broker_price, calculate_price};
use crate::error::EngineError;
use crate::models::{BrokerPricingInput, PriceQuote};

use super::request::PriceRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/calculate/broker", post(broker_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(err: EngineError) -> Response {
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Converts a JSON extraction failure into a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's message, including the field path
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /calculate endpoint.
///
/// Resolves the catalog ids, prices the configuration and returns the
/// breakdown wrapped in a [`PriceQuote`].
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<PriceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing price calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let configuration = match request.into_configuration(state.config()) {
        Ok(configuration) => configuration,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Catalog lookup failed"
            );
            return error_response(err);
        }
    };

    let start_time = Instant::now();
    match calculate_price(&configuration) {
        Ok(calculation) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                paper_stock = %configuration.paper_stock.id,
                quantity = configuration.quantity,
                subtotal = %calculation.calculated_product_subtotal_before_shipping_tax,
                duration_us = duration.as_micros(),
                "Price calculation completed successfully"
            );
            let quote = PriceQuote::new(calculation, duration.as_micros() as u64);
            json_response(StatusCode::OK, quote)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Price calculation failed"
            );
            error_response(err)
        }
    }
}

/// Handler for POST /calculate/broker endpoint.
async fn broker_handler(
    State(state): State<AppState>,
    payload: Result<Json<BrokerPricingInput>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing broker pricing request");

    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    match calculate_broker_price(&input, state.config().broker_program()) {
        Ok(calculation) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                quantity = input.quantity,
                broker_tier = ?calculation.broker_tier,
                final_price = %calculation.final_price,
                duration_us = duration.as_micros(),
                "Broker pricing completed successfully"
            );
            let quote = PriceQuote::new(calculation, duration.as_micros() as u64);
            json_response(StatusCode::OK, quote)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Broker pricing failed"
            );
            error_response(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::DocumentationPriceCalculation;
    use axum::{body::Body, http::Request};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/catalog").expect("Failed to load config");
        AppState::new(config)
    }

    fn post_json(uri: &str, body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(body.into())
            .unwrap()
    }

    const BUSINESS_CARD_REQUEST: &str = r#"{
        "paper_stock_id": "16pt_c2s",
        "print_size_id": "business_card",
        "quantity": 500,
        "sides": "double",
        "turnaround_id": "standard"
    }"#;

    #[tokio::test]
    async fn test_api_001_valid_request_returns_200() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/calculate", BUSINESS_CARD_REQUEST))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let quote: PriceQuote<DocumentationPriceCalculation> =
            serde_json::from_slice(&body).unwrap();

        assert_eq!(
            quote.calculation.base_paper_print_price,
            Decimal::from_str("36.40").unwrap()
        );
        assert_eq!(quote.engine_version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_api_002_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/calculate", "{invalid json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_api_003_missing_quantity_returns_400() {
        let router = create_router(create_test_state());
        let body = r#"{
            "paper_stock_id": "16pt_c2s",
            "print_size_id": "business_card",
            "sides": "double",
            "turnaround_id": "standard"
        }"#;

        let response = router.oneshot(post_json("/calculate", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(
            error.message.contains("quantity"),
            "Expected error message to mention quantity, got: {}",
            error.message
        );
    }

    #[tokio::test]
    async fn test_api_004_unknown_paper_stock_returns_400() {
        let router = create_router(create_test_state());
        let body = BUSINESS_CARD_REQUEST.replace("16pt_c2s", "vellum");

        let response = router.oneshot(post_json("/calculate", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "CATALOG_ENTRY_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_broker_endpoint_returns_quote() {
        let router = create_router(create_test_state());
        let body = r#"{"base_price": "0.50", "quantity": 1000}"#;

        let response = router
            .oneshot(post_json("/calculate/broker", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let final_price = value["calculation"]["final_price"].as_str().unwrap();
        assert_eq!(Decimal::from_str(final_price).unwrap(), Decimal::from(460));
    }

    #[tokio::test]
    async fn test_api_005_oversized_custom_dimensions_return_422() {
        let router = create_router(create_test_state());
        let body = r#"{
            "paper_stock_id": "16pt_c2s",
            "print_size_id": "custom",
            "custom_dimensions": {"width": "100000000000000000", "height": "100000000000000000"},
            "quantity": 500,
            "sides": "double",
            "turnaround_id": "standard"
        }"#;

        let response = router.oneshot(post_json("/calculate", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "CALCULATION_ERROR");
    }

    #[tokio::test]
    async fn test_broker_endpoint_overflow_returns_422() {
        let router = create_router(create_test_state());
        let body = r#"{"base_price": "10000000000000000000000000", "quantity": 100000}"#;

        let response = router
            .oneshot(post_json("/calculate/broker", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "CALCULATION_ERROR");
    }
}
