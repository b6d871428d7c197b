//! Route handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::http::response::{CreatedRecord, RelayError};
use crate::http::server::AppState;

pub const LIVENESS_MESSAGE: &str = "VMS is Up and Running ✅";

pub async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}

/// `GET /netsuite/driver`: relay the configured driver record.
pub async fn fetch_driver(State(state): State<AppState>) -> Response {
    match state.records.fetch(&state.driver_id).await {
        Ok(record) => Json(record).into_response(),
        Err(e) => {
            tracing::error!(
                error = %e,
                detail = %e.detail(),
                driver_id = %state.driver_id,
                "Error fetching driver"
            );
            RelayError::Fetch(e).into_response()
        }
    }
}

/// `POST /netsuite/driver`: relay the JSON body as a new driver record.
///
/// A body not labelled as JSON is relayed as `{}`; JSON that fails to parse
/// is still rejected.
pub async fn create_driver(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        Err(JsonRejection::MissingJsonContentType(_)) => json!({}),
        Err(rejection) => return rejection.into_response(),
    };
    match state.records.create(&body).await {
        Ok(result) => CreatedRecord::new(result).into_response(),
        Err(e) => {
            tracing::error!(error = %e, detail = %e.detail(), "Error posting driver record");
            RelayError::Create(e).into_response()
        }
    }
}
