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

use chrono::Utc;

use crate::cmd::date_or_today;
use crate::config::Config;
use crate::error::Fallible;
use crate::error::fail;
use crate::persist::mutate;
use crate::persist::read_roster;
use crate::reducer::DuplicatePolicy;
use crate::store::Store;
use crate::types::action::Action;
use crate::types::date::Date;
use crate::types::student::Student;

#[derive(Debug, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// A student with the same name or id already exists.
    Skipped,
}

pub fn add(config: &Config, name: &str) -> Fallible<()> {
    let store = config.open_store()?;
    let id = new_student_id();
    match add_student(&store, config.duplicate_policy, &id, name)? {
        AddOutcome::Added => println!("Added {} as {id}.", name.trim()),
        AddOutcome::Skipped => println!("A student named {:?} already exists.", name.trim()),
    }
    Ok(())
}

pub fn delete(config: &Config, student_id: &str) -> Fallible<()> {
    let store = config.open_store()?;
    if delete_student(&store, config.duplicate_policy, student_id)? {
        println!("Deleted {student_id}.");
    } else {
        println!("No student with id {student_id}.");
    }
    Ok(())
}

pub fn mark(
    config: &Config,
    student_ids: Vec<String>,
    date: Option<String>,
    present: bool,
) -> Fallible<()> {
    let date = date_or_today(date)?;
    let store = config.open_store()?;
    let count = mark_students(&store, config.duplicate_policy, student_ids, date, present)?;
    let state = if present { "present" } else { "absent" };
    println!("Marked {count} student(s) {state} on {date}.");
    Ok(())
}

/// Ids look like `s_<milliseconds since the epoch>`.
fn new_student_id() -> String {
    format!("s_{}", Utc::now().timestamp_millis())
}

/// Add a student, telling apart a real add from a skipped duplicate,
/// which the reducer alone does not.
pub fn add_student(
    store: &dyn Store,
    policy: DuplicatePolicy,
    id: &str,
    name: &str,
) -> Fallible<AddOutcome> {
    let name = name.trim();
    if name.is_empty() {
        return fail("student name cannot be empty.");
    }
    let roster = read_roster(store)?;
    let taken = roster.iter().any(|s| s.id == id || s.has_name(name));
    if policy == DuplicatePolicy::SilentSkip && taken {
        return Ok(AddOutcome::Skipped);
    }
    mutate(store, Action::AddStudent(Student::new(id, name)), policy)?;
    Ok(AddOutcome::Added)
}

/// Returns whether a student was removed.
pub fn delete_student(store: &dyn Store, policy: DuplicatePolicy, student_id: &str) -> Fallible<bool> {
    let action = Action::DeleteStudent {
        student_id: student_id.to_string(),
    };
    let before = read_roster(store)?.len();
    let after = mutate(store, action, policy)?.len();
    Ok(after < before)
}

/// Returns how many of the ids matched a student.
pub fn mark_students(
    store: &dyn Store,
    policy: DuplicatePolicy,
    student_ids: Vec<String>,
    date: Date,
    present: bool,
) -> Fallible<usize> {
    let requested: HashSet<String> = student_ids.into_iter().collect();
    let action = match requested.iter().next() {
        Some(id) if requested.len() == 1 => Action::ToggleAttendance {
            student_id: id.clone(),
            date,
            present,
        },
        _ => Action::UpdateBatchAttendance {
            student_ids: requested.clone(),
            date,
            present,
        },
    };
    let roster = mutate(store, action, policy)?;
    let mut count = 0;
    for id in &requested {
        if roster.iter().any(|s| &s.id == id) {
            count += 1;
        } else {
            log::warn!("No student with id {id}, ignoring.");
        }
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::store::memory::MemoryStore;

    const SKIP: DuplicatePolicy = DuplicatePolicy::SilentSkip;

    #[test]
    fn test_add_and_skip() -> Fallible<()> {
        let store = MemoryStore::new();
        assert_eq!(add_student(&store, SKIP, "s1", "  Alice ")?, AddOutcome::Added);
        assert_eq!(add_student(&store, SKIP, "s2", "ALICE")?, AddOutcome::Skipped);
        let roster = read_roster(&store)?;
        assert_eq!(roster, vec![Student::new("s1", "Alice")]);
        Ok(())
    }

    #[test]
    fn test_add_rejects_under_strict_policy() -> Fallible<()> {
        let store = MemoryStore::new();
        let strict = DuplicatePolicy::RejectWithError;
        add_student(&store, strict, "s1", "Alice")?;
        let err = add_student(&store, strict, "s2", "alice").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Rejected);
        Ok(())
    }

    #[test]
    fn test_add_taken_id_is_skipped() -> Fallible<()> {
        let store = MemoryStore::new();
        add_student(&store, SKIP, "s1", "Alice")?;
        assert_eq!(add_student(&store, SKIP, "s1", "Bob")?, AddOutcome::Skipped);
        assert_eq!(read_roster(&store)?, vec![Student::new("s1", "Alice")]);
        Ok(())
    }

    #[test]
    fn test_add_empty_name() {
        let store = MemoryStore::new();
        assert!(add_student(&store, SKIP, "s1", "   ").is_err());
    }

    #[test]
    fn test_delete() -> Fallible<()> {
        let store = MemoryStore::new();
        add_student(&store, SKIP, "s1", "Alice")?;
        assert!(!delete_student(&store, SKIP, "s2")?);
        assert!(delete_student(&store, SKIP, "s1")?);
        assert!(read_roster(&store)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_mark() -> Fallible<()> {
        let store = MemoryStore::new();
        add_student(&store, SKIP, "s1", "Alice")?;
        add_student(&store, SKIP, "s2", "Bob")?;
        let date = Date::parse("2024-01-01")?;

        let ids = vec!["s1".to_string(), "s2".to_string(), "s3".to_string()];
        assert_eq!(mark_students(&store, SKIP, ids, date, true)?, 2);
        assert!(read_roster(&store)?.iter().all(|s| s.attended(date)));

        assert_eq!(mark_students(&store, SKIP, vec!["s2".to_string()], date, false)?, 1);
        let roster = read_roster(&store)?;
        assert!(roster[0].attended(date));
        assert!(!roster[1].attended(date));
        Ok(())
    }

    #[test]
    fn test_new_student_id() {
        let id = new_student_id();
        assert!(id.starts_with("s_"));
        assert!(id[2..].parse::<i64>().is_ok());
    }
}
