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

//! The roster reducer: a pure function from the current roster and one
//! action to the next roster. Persistence happens elsewhere.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::ErrorKind;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::action::Action;
use crate::types::date::Date;
use crate::types::student::Roster;
use crate::types::student::Student;

/// What to do when a new student's name collides, ignoring case, with an
/// existing one, or when its id is already taken.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Drop the new student and report success.
    #[default]
    SilentSkip,
    /// Refuse the action with a `Rejected` error.
    RejectWithError,
}

/// Apply `action` to `roster`, returning the next roster.
///
/// Actions naming unknown student ids are no-ops. Adding a student with a
/// blank id is `Invalid`. Adding a duplicate name or id is `Rejected`
/// under [`DuplicatePolicy::RejectWithError`].
pub fn apply(roster: Roster, action: Action, policy: DuplicatePolicy) -> Fallible<Roster> {
    match action {
        Action::AddStudent(student) => add_student(roster, student, policy),
        Action::DeleteStudent { student_id } => Ok(roster
            .into_iter()
            .filter(|s| s.id != student_id)
            .collect()),
        Action::ToggleAttendance {
            student_id,
            date,
            present,
        } => Ok(set_presence(roster, |id| id == student_id, date, present)),
        Action::UpdateBatchAttendance {
            student_ids,
            date,
            present,
        } => Ok(set_presence(
            roster,
            |id| student_ids.contains(id),
            date,
            present,
        )),
    }
}

fn add_student(mut roster: Roster, student: Student, policy: DuplicatePolicy) -> Fallible<Roster> {
    if student.id.trim().is_empty() {
        return Err(ErrorReport::invalid("student id cannot be blank"));
    }
    let clash = if roster.iter().any(|s| s.id == student.id) {
        Some(format!("a student with id {:?} already exists", student.id))
    } else if roster.iter().any(|s| s.has_name(&student.name)) {
        Some(format!("a student named {:?} already exists", student.name))
    } else {
        None
    };
    if let Some(clash) = clash {
        return match policy {
            DuplicatePolicy::SilentSkip => {
                log::debug!("Skipping new student: {clash}");
                Ok(roster)
            }
            DuplicatePolicy::RejectWithError => {
                Err(ErrorReport::with_kind(ErrorKind::Rejected, &clash))
            }
        };
    }
    let attendance_dates = dedup(&student.attendance_dates);
    roster.push(Student {
        attendance_dates,
        ..student
    });
    Ok(roster)
}

fn set_presence(
    roster: Roster,
    selected: impl Fn(&str) -> bool,
    date: Date,
    present: bool,
) -> Roster {
    roster
        .into_iter()
        .map(|student| {
            if !selected(&student.id) {
                return student;
            }
            let mut attendance_dates: Vec<Date> = student
                .attendance_dates
                .iter()
                .copied()
                .filter(|d| present || *d != date)
                .collect();
            if present {
                attendance_dates.push(date);
            }
            Student {
                attendance_dates: dedup(&attendance_dates),
                ..student
            }
        })
        .collect()
}

/// Drop repeated dates, keeping the first occurrence of each.
fn dedup(dates: &[Date]) -> Vec<Date> {
    let mut seen: HashSet<Date> = HashSet::new();
    dates.iter().copied().filter(|d| seen.insert(*d)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    fn student(id: &str, name: &str, dates: &[&str]) -> Student {
        Student {
            id: id.to_string(),
            name: name.to_string(),
            attendance_dates: dates.iter().map(|d| date(d)).collect(),
        }
    }

    fn toggle(id: &str, d: &str, present: bool) -> Action {
        Action::ToggleAttendance {
            student_id: id.to_string(),
            date: date(d),
            present,
        }
    }

    fn batch(ids: &[&str], d: &str, present: bool) -> Action {
        Action::UpdateBatchAttendance {
            student_ids: ids.iter().map(|s| s.to_string()).collect(),
            date: date(d),
            present,
        }
    }

    fn sample() -> Roster {
        vec![
            student("s1", "Alice", &["2024-01-01", "2024-01-02"]),
            student("s2", "Bob", &[]),
            student("s3", "Carol", &["2024-01-02"]),
        ]
    }

    const SKIP: DuplicatePolicy = DuplicatePolicy::SilentSkip;

    #[test]
    fn test_toggle_present() -> Fallible<()> {
        let roster = vec![student("s1", "Bob", &[])];
        let roster = apply(roster, toggle("s1", "2024-01-01", true), SKIP)?;
        assert_eq!(roster, vec![student("s1", "Bob", &["2024-01-01"])]);
        let roster = apply(roster, toggle("s1", "2024-01-01", false), SKIP)?;
        assert_eq!(roster, vec![student("s1", "Bob", &[])]);
        Ok(())
    }

    #[test]
    fn test_toggle_collapses_duplicate_input() -> Fallible<()> {
        let roster = vec![student("s1", "Bob", &["2024-01-01", "2024-01-01"])];
        let result = apply(roster.clone(), toggle("s1", "2024-01-01", true), SKIP)?;
        assert_eq!(result, vec![student("s1", "Bob", &["2024-01-01"])]);
        // Toggling an unrelated date still cleans up the student.
        let result = apply(roster, toggle("s1", "2024-02-01", false), SKIP)?;
        assert_eq!(result, vec![student("s1", "Bob", &["2024-01-01"])]);
        Ok(())
    }

    #[test]
    fn test_toggle_is_idempotent() -> Fallible<()> {
        for present in [true, false] {
            let action = toggle("s1", "2024-01-01", present);
            let once = apply(sample(), action.clone(), SKIP)?;
            let twice = apply(once.clone(), action, SKIP)?;
            assert_eq!(once, twice);

            let action = batch(&["s1", "s2"], "2024-01-03", present);
            let once = apply(sample(), action.clone(), SKIP)?;
            let twice = apply(once.clone(), action, SKIP)?;
            assert_eq!(once, twice);
        }
        Ok(())
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() -> Fallible<()> {
        let result = apply(sample(), toggle("nobody", "2024-01-01", true), SKIP)?;
        assert_eq!(result, sample());
        Ok(())
    }

    #[test]
    fn test_toggle_leaves_other_students_alone() -> Fallible<()> {
        let result = apply(sample(), toggle("s2", "2024-01-02", true), SKIP)?;
        assert_eq!(result[0], sample()[0]);
        assert_eq!(result[2], sample()[2]);
        assert_eq!(result[1].attendance_dates, vec![date("2024-01-02")]);
        Ok(())
    }

    #[test]
    fn test_batch_matches_individual_toggles() -> Fallible<()> {
        let batched = apply(sample(), batch(&["s1", "s2"], "2024-01-05", true), SKIP)?;
        let mut individually = sample();
        for id in ["s2", "s1"] {
            individually = apply(individually, toggle(id, "2024-01-05", true), SKIP)?;
        }
        assert_eq!(batched, individually);
        assert_eq!(batched[2], sample()[2]);
        Ok(())
    }

    #[test]
    fn test_batch_splits_over_disjoint_sets() -> Fallible<()> {
        for present in [true, false] {
            let union = apply(sample(), batch(&["s1", "s3"], "2024-01-02", present), SKIP)?;
            let split = apply(sample(), batch(&["s1"], "2024-01-02", present), SKIP)?;
            let split = apply(split, batch(&["s3"], "2024-01-02", present), SKIP)?;
            assert_eq!(union, split);
        }
        Ok(())
    }

    #[test]
    fn test_batch_ignores_unknown_ids() -> Fallible<()> {
        let result = apply(sample(), batch(&["s2", "ghost"], "2024-01-01", true), SKIP)?;
        assert_eq!(result[1].attendance_dates, vec![date("2024-01-01")]);
        assert_eq!(result.len(), 3);
        Ok(())
    }

    #[test]
    fn test_add_appends() -> Fallible<()> {
        let new = student("s4", "Dave", &["2024-01-01", "2024-01-01"]);
        let result = apply(sample(), Action::AddStudent(new), SKIP)?;
        assert_eq!(result.len(), 4);
        assert_eq!(result[3], student("s4", "Dave", &["2024-01-01"]));
        Ok(())
    }

    #[test]
    fn test_add_duplicate_name_is_skipped() -> Fallible<()> {
        let new = student("s9", "alice", &[]);
        let result = apply(sample(), Action::AddStudent(new), SKIP)?;
        assert_eq!(result, sample());
        Ok(())
    }

    #[test]
    fn test_add_duplicate_name_is_rejected_under_strict_policy() {
        let new = student("s9", "ALICE", &[]);
        let result = apply(
            sample(),
            Action::AddStudent(new),
            DuplicatePolicy::RejectWithError,
        );
        let err = result.err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Rejected);
    }

    #[test]
    fn test_add_taken_id_is_skipped() -> Fallible<()> {
        let new = student("s1", "Zed", &["2024-03-01"]);
        let result = apply(sample(), Action::AddStudent(new), SKIP)?;
        assert_eq!(result, sample());
        Ok(())
    }

    #[test]
    fn test_add_taken_id_is_rejected_under_strict_policy() {
        let new = student("s2", "Zed", &[]);
        let result = apply(
            sample(),
            Action::AddStudent(new),
            DuplicatePolicy::RejectWithError,
        );
        let err = result.err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Rejected);
        assert!(err.message().contains("\"s2\""));
    }

    #[test]
    fn test_add_blank_id_is_invalid() {
        for id in ["", "   "] {
            for policy in [SKIP, DuplicatePolicy::RejectWithError] {
                let new = student(id, "Zed", &[]);
                let err = apply(sample(), Action::AddStudent(new), policy).err().unwrap();
                assert_eq!(err.kind(), ErrorKind::Invalid);
            }
        }
    }

    #[test]
    fn test_added_students_keep_unique_ids() -> Fallible<()> {
        let mut roster = Roster::new();
        for (id, name) in [("s1", "Alice"), ("s1", "Bob"), ("s2", "Bob")] {
            roster = apply(roster, Action::AddStudent(student(id, name, &[])), SKIP)?;
        }
        let ids: HashSet<&str> = roster.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), roster.len());
        assert_eq!(roster, vec![student("s1", "Alice", &[]), student("s2", "Bob", &[])]);
        Ok(())
    }

    #[test]
    fn test_delete() -> Fallible<()> {
        let action = Action::DeleteStudent {
            student_id: "s1".to_string(),
        };
        let result = apply(sample(), action, SKIP)?;
        assert_eq!(result, sample()[1..].to_vec());
        Ok(())
    }

    #[test]
    fn test_delete_unknown_is_noop() -> Fallible<()> {
        let action = Action::DeleteStudent {
            student_id: "s42".to_string(),
        };
        assert_eq!(apply(sample(), action, SKIP)?, sample());
        Ok(())
    }
}
