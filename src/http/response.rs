//! Relay response bodies.
//!
//! # Responsibilities
//! - Shape successful create responses
//! - Map upstream failures to HTTP 500 with best-effort detail
//!
//! # Design Decisions
//! - The two driver routes keep distinct failure shapes: fetch answers
//!   with plain text, create answers with a JSON envelope
//! - Upstream status codes are never passed through; every failure is a 500

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::upstream::UpstreamError;

pub const FETCH_FAILED: &str = "Failed to fetch driver data";
pub const CREATE_SUCCEEDED: &str = "Driver record created successfully";
pub const CREATE_FAILED: &str = "Failed to create driver record";

/// Body of a successful `POST /netsuite/driver`.
#[derive(Debug, Serialize)]
pub struct CreatedRecord {
    pub message: &'static str,
    pub result: Value,
}

impl CreatedRecord {
    pub fn new(result: Value) -> Self {
        Self {
            message: CREATE_SUCCEEDED,
            result,
        }
    }
}

impl IntoResponse for CreatedRecord {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Body of a failed `POST /netsuite/driver`.
#[derive(Debug, Serialize)]
pub struct FailureBody {
    pub message: &'static str,
    pub error: Value,
}

/// An upstream failure, tagged with the route it surfaced on.
#[derive(Debug)]
pub enum RelayError {
    Fetch(UpstreamError),
    Create(UpstreamError),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match self {
            RelayError::Fetch(_) => (StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED).into_response(),
            RelayError::Create(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FailureBody {
                    message: CREATE_FAILED,
                    error: e.detail(),
                }),
            )
                .into_response(),
        }
    }
}
