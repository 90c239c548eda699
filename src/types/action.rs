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

use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::types::date::Date;
use crate::types::student::Student;

/// One requested change to the roster. On the wire this is
/// `{ "type": "TOGGLE_ATTENDANCE", "payload": { ... } }`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    AddStudent(Student),
    DeleteStudent {
        student_id: String,
    },
    ToggleAttendance {
        student_id: String,
        date: Date,
        present: bool,
    },
    UpdateBatchAttendance {
        student_ids: HashSet<String>,
        date: Date,
        present: bool,
    },
}

impl Action {
    pub fn tag(&self) -> &'static str {
        match self {
            Action::AddStudent(_) => "ADD_STUDENT",
            Action::DeleteStudent { .. } => "DELETE_STUDENT",
            Action::ToggleAttendance { .. } => "TOGGLE_ATTENDANCE",
            Action::UpdateBatchAttendance { .. } => "UPDATE_BATCH_ATTENDANCE",
        }
    }
}
