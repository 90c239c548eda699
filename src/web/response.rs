// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::Json;
use axum::http::Method;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Serialize;

use crate::error::ErrorKind;
use crate::error::ErrorReport;

pub const FETCH_FAILED: &str = "Failed to fetch data";
pub const UPDATE_FAILED: &str = "Failed to update data";

#[derive(Serialize)]
pub struct Success {
    pub message: &'static str,
}

impl Success {
    pub fn ok() -> Self {
        Self { message: "Success" }
    }
}

#[derive(Serialize)]
struct Failure {
    message: &'static str,
    error: String,
}

/// An error on its way out of a handler, tagged with what the request
/// was trying to do.
#[derive(Debug)]
pub struct ApiError {
    message: &'static str,
    report: ErrorReport,
}

impl ApiError {
    pub fn fetch(report: ErrorReport) -> Self {
        Self {
            message: FETCH_FAILED,
            report,
        }
    }

    pub fn update(report: ErrorReport) -> Self {
        Self {
            message: UPDATE_FAILED,
            report,
        }
    }

    /// Label by method: reads fetch, everything else updates.
    pub fn for_method(method: &Method, report: ErrorReport) -> Self {
        if *method == Method::GET || *method == Method::HEAD {
            Self::fetch(report)
        } else {
            Self::update(report)
        }
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Invalid => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Rejected => StatusCode::CONFLICT,
        ErrorKind::Unsupported => StatusCode::METHOD_NOT_ALLOWED,
        ErrorKind::StoreUnavailable | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.report.kind());
        if status.is_server_error() {
            log::error!("{}: {}", self.message, self.report);
        } else {
            log::debug!("{}: {}", self.message, self.report);
        }
        let body = Failure {
            message: self.message,
            error: self.report.message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
