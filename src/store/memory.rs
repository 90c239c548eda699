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

use std::sync::Mutex;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::store::Store;
use crate::store::Tables;

/// A store that lives in process memory. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    fn read(&self) -> Fallible<Tables> {
        let tables = self
            .tables
            .lock()
            .map_err(|_| ErrorReport::store_unavailable("memory store lock poisoned"))?;
        Ok(tables.clone())
    }

    fn clear(&self) -> Fallible<()> {
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| ErrorReport::store_unavailable("memory store lock poisoned"))?;
        *tables = Tables::default();
        Ok(())
    }

    fn write(&self, new: &Tables) -> Fallible<()> {
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| ErrorReport::store_unavailable("memory store lock poisoned"))?;
        tables.students.extend(new.students.iter().cloned());
        tables.attendance.extend(new.attendance.iter().cloned());
        Ok(())
    }
}
