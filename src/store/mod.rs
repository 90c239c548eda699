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

//! The tabular store: two flat record sets that can only be read in full
//! or cleared and rewritten in full.

pub mod memory;
pub mod sqlite;

use crate::error::Fallible;

/// A row of the students table. Fields are optional because the store
/// enforces nothing: a row may have blank cells.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct StudentRow {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// A row of the attendance table: one attended date for one student.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct AttendanceRow {
    pub student_id: Option<String>,
    pub date: Option<String>,
}

/// The full contents of the store.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Tables {
    pub students: Vec<StudentRow>,
    pub attendance: Vec<AttendanceRow>,
}

pub trait Store: Send + Sync {
    /// Name of the backend, for logs.
    fn backend(&self) -> &'static str;

    /// Read both tables in full, in row order.
    fn read(&self) -> Fallible<Tables>;

    /// Delete every data row from both tables.
    fn clear(&self) -> Fallible<()>;

    /// Append `tables` to the (normally just cleared) tables.
    fn write(&self, tables: &Tables) -> Fallible<()>;
}
