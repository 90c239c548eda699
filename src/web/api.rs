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
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::HeaderName;
use axum::http::Method;
use axum::http::header::CONTENT_DISPOSITION;
use axum::http::header::CONTENT_TYPE;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorKind;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::persist::mutate;
use crate::persist::read_roster;
use crate::report::DailyReport;
use crate::report::StudentProfile;
use crate::types::action::Action;
use crate::types::date::Date;
use crate::types::student::Roster;
use crate::web::response::ApiError;
use crate::web::response::Success;
use crate::web::state::ServerState;

#[derive(Serialize)]
pub struct DataResponse {
    students: Roster,
}

pub async fn get_data(State(state): State<ServerState>) -> Result<Json<DataResponse>, ApiError> {
    let students = read_roster(state.store.as_ref()).map_err(ApiError::fetch)?;
    Ok(Json(DataResponse { students }))
}

/// Takes the raw body so that malformed JSON gets the same failure shape
/// as every other error.
pub async fn post_data(
    State(state): State<ServerState>,
    body: String,
) -> Result<Json<Success>, ApiError> {
    let action: Action = serde_json::from_str(&body)
        .map_err(|e| ApiError::update(ErrorReport::invalid(&format!("invalid action: {e}"))))?;
    log::debug!("Received {}", action.tag());
    apply_action(&state, action).map_err(ApiError::update)?;
    Ok(Json(Success::ok()))
}

fn apply_action(state: &ServerState, action: Action) -> Fallible<()> {
    let _guard = state
        .write_lock
        .lock()
        .map_err(|_| ErrorReport::new("write lock poisoned"))?;
    mutate(state.store.as_ref(), action, state.duplicate_policy)?;
    Ok(())
}

#[derive(Deserialize)]
pub struct ReportQuery {
    date: Option<String>,
}

pub async fn get_report(
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<DailyReport>, ApiError> {
    let date = match query.date {
        Some(date) => Date::parse(&date).map_err(ApiError::fetch)?,
        None => Date::today(),
    };
    let roster = read_roster(state.store.as_ref()).map_err(ApiError::fetch)?;
    Ok(Json(DailyReport::build(&roster, date, &state.class_name)))
}

pub async fn get_student(
    State(state): State<ServerState>,
    Path(student_id): Path<String>,
) -> Result<Json<StudentProfile>, ApiError> {
    let roster = read_roster(state.store.as_ref()).map_err(ApiError::fetch)?;
    let student = roster
        .iter()
        .find(|s| s.id == student_id)
        .ok_or_else(|| {
            ApiError::fetch(ErrorReport::with_kind(
                ErrorKind::NotFound,
                &format!("no student with id {student_id:?}"),
            ))
        })?;
    Ok(Json(StudentProfile::build(student, Date::today())))
}

/// The roster as a pretty-printed JSON attachment.
pub async fn get_export(
    State(state): State<ServerState>,
) -> Result<([(HeaderName, String); 2], String), ApiError> {
    let roster = read_roster(state.store.as_ref()).map_err(ApiError::fetch)?;
    let json = serde_json::to_string_pretty(&roster).map_err(|e| {
        ApiError::fetch(ErrorReport::new(&format!("could not serialize roster: {e}")))
    })?;
    let disposition = format!("attachment; filename=\"{}\"", backup_file_name(Date::today()));
    let headers = [
        (CONTENT_TYPE, "application/json".to_string()),
        (CONTENT_DISPOSITION, disposition),
    ];
    Ok((headers, json))
}

pub fn backup_file_name(today: Date) -> String {
    format!("attend-backup-{today}.json")
}

pub async fn not_found_handler(method: Method) -> ApiError {
    let report = ErrorReport::with_kind(ErrorKind::NotFound, "no such route");
    ApiError::for_method(&method, report)
}

pub async fn method_not_allowed_handler(method: Method) -> ApiError {
    let report = ErrorReport::with_kind(
        ErrorKind::Unsupported,
        &format!("method {method} is not allowed here"),
    );
    ApiError::for_method(&method, report)
}
