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

pub mod edit;
pub mod export;
pub mod list;
pub mod report;
pub mod serve;

use crate::error::Fallible;
use crate::types::date::Date;

/// Parse an optional `--date` argument, defaulting to today.
fn date_or_today(date: Option<String>) -> Fallible<Date> {
    match date {
        Some(date) => Date::parse(&date),
        None => Ok(Date::today()),
    }
}
