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

use crate::config::Config;
use crate::error::Fallible;
use crate::persist::read_roster;
use crate::types::student::Student;

pub fn list_roster(config: &Config) -> Fallible<()> {
    let store = config.open_store()?;
    let roster = read_roster(&store)?;
    if roster.is_empty() {
        println!("No students yet.");
        return Ok(());
    }
    for student in &roster {
        println!("{}", format_line(student));
    }
    Ok(())
}

fn format_line(student: &Student) -> String {
    let days = student.date_set().len();
    let unit = if days == 1 { "day" } else { "days" };
    format!("{}\t{}\t{days} {unit}", student.id, student.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::date::Date;

    #[test]
    fn test_format_line() -> Fallible<()> {
        let mut student = Student::new("s1", "Alice");
        assert_eq!(format_line(&student), "s1\tAlice\t0 days");
        student.attendance_dates.push(Date::parse("2024-01-01")?);
        student.attendance_dates.push(Date::parse("2024-01-01")?);
        assert_eq!(format_line(&student), "s1\tAlice\t1 day");
        Ok(())
    }
}
