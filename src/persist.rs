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

//! Moves rosters in and out of a [`Store`]. Reads join the attendance
//! table onto the students table; writes flatten the roster back into the
//! two tables and overwrite them wholesale.

use std::collections::HashMap;
use std::time::Instant;

use crate::error::ErrorKind;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::reducer::DuplicatePolicy;
use crate::reducer::apply;
use crate::store::AttendanceRow;
use crate::store::Store;
use crate::store::StudentRow;
use crate::store::Tables;
use crate::types::action::Action;
use crate::types::date::Date;
use crate::types::student::Roster;
use crate::types::student::Student;

/// Read the whole roster from the store.
pub fn read_roster(store: &dyn Store) -> Fallible<Roster> {
    let start = Instant::now();
    let tables = store.read().map_err(|e| context(e, "could not read from store"))?;
    let roster = join(tables);
    let duration = start.elapsed().as_millis();
    log::debug!(
        "Read {} students from {} store in {duration}ms.",
        roster.len(),
        store.backend()
    );
    Ok(roster)
}

/// Replace the store's contents with `roster`.
///
/// This clears first and writes second. If the write fails the store is
/// left empty; there is no rollback.
pub fn overwrite_roster(store: &dyn Store, roster: &[Student]) -> Fallible<()> {
    let tables = flatten(roster);
    log::debug!(
        "Overwriting {} store with {} students, {} attendance rows.",
        store.backend(),
        tables.students.len(),
        tables.attendance.len()
    );
    store.clear().map_err(|e| context(e, "could not clear store"))?;
    store
        .write(&tables)
        .map_err(|e| context(e, "could not write to store"))?;
    Ok(())
}

/// Read, apply one action, and overwrite.
pub fn mutate(store: &dyn Store, action: Action, policy: DuplicatePolicy) -> Fallible<Roster> {
    let tag = action.tag();
    let current = read_roster(store)?;
    let next = apply(current, action, policy)?;
    overwrite_roster(store, &next)?;
    log::debug!("Applied {tag}.");
    Ok(next)
}

/// Flatten a roster into table rows: one student row per student, one
/// attendance row per attended date.
pub fn flatten(roster: &[Student]) -> Tables {
    let students = roster
        .iter()
        .map(|s| StudentRow {
            id: Some(s.id.clone()),
            name: Some(s.name.clone()),
        })
        .collect();
    let attendance = roster
        .iter()
        .flat_map(|s| {
            s.attendance_dates.iter().map(|d| AttendanceRow {
                student_id: Some(s.id.clone()),
                date: Some(d.to_string()),
            })
        })
        .collect();
    Tables {
        students,
        attendance,
    }
}

/// Rebuild a roster from table rows.
///
/// Malformed rows are dropped rather than failing the read: students
/// without an id, attendance without a parseable date, and attendance
/// for unknown students.
pub fn join(tables: Tables) -> Roster {
    let mut roster: Roster = Vec::with_capacity(tables.students.len());
    let mut index: HashMap<String, usize> = HashMap::new();
    for row in tables.students {
        let id = match row.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => {
                log::warn!("Dropping student row without an id: {:?}", row.name);
                continue;
            }
        };
        let name = row.name.unwrap_or_default();
        match index.get(&id) {
            // A repeated id keeps the later row, at the earlier position.
            Some(&i) => roster[i] = Student::new(&id, &name),
            None => {
                index.insert(id.clone(), roster.len());
                roster.push(Student::new(&id, &name));
            }
        }
    }
    for row in tables.attendance {
        let (Some(student_id), Some(date)) = (row.student_id, row.date) else {
            log::warn!("Dropping incomplete attendance row.");
            continue;
        };
        let Some(&i) = index.get(&student_id) else {
            continue;
        };
        match Date::parse(&date) {
            Ok(date) => roster[i].attendance_dates.push(date),
            Err(_) => log::warn!("Dropping attendance row for {student_id} with bad date {date:?}"),
        }
    }
    roster
}

fn context(err: ErrorReport, what: &str) -> ErrorReport {
    let kind = match err.kind() {
        ErrorKind::Internal => ErrorKind::StoreUnavailable,
        kind => kind,
    };
    ErrorReport::with_kind(kind, &format!("{what}: {}", err.message()))
}
