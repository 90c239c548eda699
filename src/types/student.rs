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

/// The full in-memory list of students, in store order.
pub type Roster = Vec<Student>;

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Assigned by whoever creates the student; never generated by the
    /// store.
    pub id: String,
    pub name: String,
    /// Dates the student was present. Treated as a set: order only
    /// matters for display.
    #[serde(default)]
    pub attendance_dates: Vec<Date>,
}

impl Student {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            attendance_dates: Vec::new(),
        }
    }

    pub fn attended(&self, date: Date) -> bool {
        self.attendance_dates.contains(&date)
    }

    /// Case-insensitive name comparison, the uniqueness rule for names.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    pub fn date_set(&self) -> HashSet<Date> {
        self.attendance_dates.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_has_name_ignores_case() {
        let student = Student::new("s1", "Alice");
        assert!(student.has_name("alice"));
        assert!(student.has_name("ALICE"));
        assert!(!student.has_name("Alicia"));
    }

    #[test]
    fn test_json_shape() -> Fallible<()> {
        let json = r#"{"id":"s1","name":"Bob","attendanceDates":["2024-01-01"]}"#;
        let student: Student = serde_json::from_str(json)?;
        assert_eq!(student.attendance_dates, vec![Date::parse("2024-01-01")?]);
        assert_eq!(serde_json::to_string(&student)?, json);
        Ok(())
    }

    #[test]
    fn test_missing_dates_default_to_empty() -> Fallible<()> {
        let student: Student = serde_json::from_str(r#"{"id":"s1","name":"Bob"}"#)?;
        assert!(student.attendance_dates.is_empty());
        Ok(())
    }
}
