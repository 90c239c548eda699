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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use rusqlite::Connection;
use rusqlite::Transaction;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::store::AttendanceRow;
use crate::store::Store;
use crate::store::StudentRow;
use crate::store::Tables;

#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn new(database_path: &str) -> Fallible<Self> {
        log::debug!("Opening store at {database_path}");
        let conn = Connection::open(database_path).map_err(|e| {
            ErrorReport::store_unavailable(&format!(
                "could not open store at {database_path}: {e}"
            ))
        })?;
        Self::from_connection(conn)
    }

    #[cfg(test)]
    pub fn in_memory() -> Fallible<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> Fallible<Self> {
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        let conn = Arc::new(Mutex::new(conn));
        Ok(Self { conn })
    }

    fn acquire(&self) -> Fallible<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| ErrorReport::store_unavailable("store connection lock poisoned"))
    }
}

impl Store for SqliteStore {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    fn read(&self) -> Fallible<Tables> {
        let conn = self.acquire()?;
        let mut students = Vec::new();
        let mut stmt = conn.prepare("select id, name from students order by row_id;")?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            students.push(StudentRow {
                id: row.get(0)?,
                name: row.get(1)?,
            });
        }
        let mut attendance = Vec::new();
        let mut stmt = conn.prepare("select student_id, date from attendance order by row_id;")?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            attendance.push(AttendanceRow {
                student_id: row.get(0)?,
                date: row.get(1)?,
            });
        }
        Ok(Tables {
            students,
            attendance,
        })
    }

    fn clear(&self) -> Fallible<()> {
        let mut conn = self.acquire()?;
        let tx = conn.transaction()?;
        tx.execute("delete from students;", [])?;
        tx.execute("delete from attendance;", [])?;
        tx.commit()?;
        Ok(())
    }

    fn write(&self, tables: &Tables) -> Fallible<()> {
        let mut conn = self.acquire()?;
        let tx = conn.transaction()?;
        for row in &tables.students {
            insert_student(&tx, row)?;
        }
        for row in &tables.attendance {
            insert_attendance(&tx, row)?;
        }
        tx.commit()?;
        Ok(())
    }
}

fn insert_student(tx: &Transaction, row: &StudentRow) -> Fallible<()> {
    let sql = "insert into students (id, name) values (?, ?);";
    tx.execute(sql, (&row.id, &row.name))?;
    Ok(())
}

fn insert_attendance(tx: &Transaction, row: &AttendanceRow) -> Fallible<()> {
    let sql = "insert into attendance (student_id, date) values (?, ?);";
    tx.execute(sql, (&row.student_id, &row.date))?;
    Ok(())
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["students"], |row| row.get(0))?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::error::ErrorKind;

    fn sample() -> Tables {
        Tables {
            students: vec![
                StudentRow {
                    id: Some("s1".to_string()),
                    name: Some("Bob".to_string()),
                },
                StudentRow {
                    id: Some("s2".to_string()),
                    name: None,
                },
            ],
            attendance: vec![AttendanceRow {
                student_id: Some("s1".to_string()),
                date: Some("2024-01-01".to_string()),
            }],
        }
    }

    #[test]
    fn test_empty_store_reads_empty() -> Fallible<()> {
        let store = SqliteStore::in_memory()?;
        assert_eq!(store.read()?, Tables::default());
        Ok(())
    }

    #[test]
    fn test_write_then_read_keeps_order_and_blanks() -> Fallible<()> {
        let store = SqliteStore::in_memory()?;
        store.write(&sample())?;
        assert_eq!(store.read()?, sample());
        Ok(())
    }

    #[test]
    fn test_clear() -> Fallible<()> {
        let store = SqliteStore::in_memory()?;
        store.write(&sample())?;
        store.clear()?;
        assert_eq!(store.read()?, Tables::default());
        Ok(())
    }

    #[test]
    fn test_reopen_keeps_data() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("attend.db");
        let path = path.to_str().ok_or_else(|| ErrorReport::new("invalid path"))?;
        SqliteStore::new(path)?.write(&sample())?;
        assert_eq!(SqliteStore::new(path)?.read()?, sample());
        Ok(())
    }

    #[test]
    fn test_unreachable_path() {
        let result = SqliteStore::new("/nonexistent-directory/attend.db");
        let err = result.err().unwrap();
        assert_eq!(err.kind(), ErrorKind::StoreUnavailable);
    }
}
