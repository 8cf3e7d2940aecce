//! AWS Lambda handler for policy valuations
//!
//! Accepts a JSON `ValuationRequest` and returns the full `ValuationResult`
//! along with timing metadata.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::Serialize;
use std::sync::Arc;

use valuation_system::{ValuationEngine, ValuationError, ValuationRequest, ValuationResult};

/// Response envelope around the valuation result
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValuationResponse {
    #[serde(flatten)]
    result: ValuationResult,
    execution_time_ms: u64,
}

fn error_response(status: u16, message: &str) -> Response<Body> {
    let body = serde_json::json!({ "error": message }).to_string();
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::Text(body))
        .unwrap()
}

fn json_response(body: &ValuationResponse) -> Response<Body> {
    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Text(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Lambda handler function
fn handler(engine: &ValuationEngine, event: Request) -> Response<Body> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)
            .unwrap();
    }

    // Parse request body
    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: ValuationRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => {
            return error_response(400, &format!("Invalid JSON: {e}"));
        }
    };

    match engine.value_policy(&request) {
        Ok(result) => {
            let execution_time_ms = start.elapsed().as_millis() as u64;
            json_response(&ValuationResponse {
                result,
                execution_time_ms,
            })
        }
        Err(err @ ValuationError::InvalidInput { .. }) => error_response(422, &err.to_string()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    // One engine for the lifetime of the runtime so concurrent invocations
    // share the market cache
    let engine = Arc::new(ValuationEngine::with_defaults());

    run(service_fn(move |event: Request| {
        let engine = Arc::clone(&engine);
        async move { Ok::<_, Error>(handler(&engine, event)) }
    }))
    .await
}
