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

use serde::Serialize;

use crate::types::date::Date;
use crate::types::student::Student;

/// Who was present and absent on one date.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub date: Date,
    pub class_name: String,
    pub present: Vec<String>,
    pub absent: Vec<String>,
    pub total: usize,
    /// Share of students present, rounded to a whole percent.
    pub percentage: u32,
    pub text: String,
}

impl DailyReport {
    pub fn build(roster: &[Student], date: Date, class_name: &str) -> Self {
        let (present, absent): (Vec<&Student>, Vec<&Student>) =
            roster.iter().partition(|s| s.attended(date));
        let present: Vec<String> = present.into_iter().map(|s| s.name.clone()).collect();
        let absent: Vec<String> = absent.into_iter().map(|s| s.name.clone()).collect();
        let total = roster.len();
        let percentage = if total == 0 {
            0
        } else {
            ((present.len() as f64 / total as f64) * 100.0).round() as u32
        };
        let text = render_text(date, class_name, &present, &absent, total);
        Self {
            date,
            class_name: class_name.to_string(),
            present,
            absent,
            total,
            percentage,
            text,
        }
    }
}

fn render_text(
    date: Date,
    class_name: &str,
    present: &[String],
    absent: &[String],
    total: usize,
) -> String {
    if total == 0 {
        return String::new();
    }
    let names = |names: &[String]| {
        if names.is_empty() {
            "None".to_string()
        } else {
            names.join("\n")
        }
    };
    let mut text = String::new();
    text.push_str(&format!("*Attendance Report: {class_name}*\n"));
    text.push_str(&format!("*Date: {}*\n\n", date.dotted()));
    text.push_str("*Summary:*\n");
    text.push_str(&format!("Present: {}/{total}\n", present.len()));
    text.push_str(&format!("Absent: {}/{total}\n\n", absent.len()));
    text.push_str("---\n\n");
    text.push_str("*Present Students:*\n");
    text.push_str(&names(present));
    text.push_str("\n\n---\n\n");
    text.push_str("*Absent Students:*\n");
    text.push_str(&names(absent));
    text.push('\n');
    text
}

/// Summary of one student's history.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub student: Student,
    pub total_days: usize,
    pub current_streak: usize,
}

impl StudentProfile {
    pub fn build(student: &Student, today: Date) -> Self {
        let dates = student.date_set();
        Self {
            student: student.clone(),
            total_days: dates.len(),
            current_streak: current_streak(&dates, today),
        }
    }
}

/// Consecutive attended days ending today, or ending yesterday if today
/// has not been marked yet.
fn current_streak(dates: &HashSet<Date>, today: Date) -> usize {
    let mut day = if dates.contains(&today) {
        today
    } else {
        today.yesterday()
    };
    let mut streak = 0;
    while dates.contains(&day) {
        streak += 1;
        let prev = day.yesterday();
        if prev == day {
            break;
        }
        day = prev;
    }
    streak
}
