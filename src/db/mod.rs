//! Database module for classroom, schedule, maintenance, and user data.

mod error;
mod maintenance;
mod schedule;
mod types;
mod users;

pub use error::StoreError;
pub use types::{DbRoom, DbScheduleEntry, DbTicket, DbUser, TicketStatus};

use rusqlite::{Connection, OptionalExtension};
use std::sync::Mutex;

use crate::auth::hash_password;
use crate::scheduling::RoomStatus;

const SCHEMA_SQL: &str = include_str!("../../sql/init.sql");

/// Owns the SQLite connection for every persisted table. All access goes
/// through the interior mutex, which also serializes the check-then-insert
/// sequence used for conflict detection.
pub struct RoomDb {
    db: Mutex<Connection>,
}

impl RoomDb {
    /// Opens (or creates) the database at `db_path` and initializes the
    /// schema.
    pub fn open(db_path: &str) -> Result<Self, StoreError> {
        Self::init(Connection::open(db_path)?)
    }

    /// Opens an in-memory database.
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA_SQL)?;

        // Seed the administrator account on first run.
        conn.execute(
            "INSERT OR IGNORE INTO users (full_name, email, password, role)
             VALUES ('System Administrator', 'admin', ?1, 'admin')",
            [hash_password("admin123")],
        )?;

        Ok(Self {
            db: Mutex::new(conn),
        })
    }

    /// Adds a classroom. New rooms always start Available.
    pub fn add_room(
        &self,
        name: &str,
        capacity: i64,
        room_type: &str,
        equipment: &str,
    ) -> Result<i64, StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::MissingField("name"));
        }
        if room_type.trim().is_empty() {
            return Err(StoreError::MissingField("type"));
        }
        if capacity <= 0 {
            return Err(StoreError::BadCapacity);
        }

        let db = self.db.lock().unwrap();
        let existing: Option<i64> = db
            .query_row(
                "SELECT id FROM classrooms WHERE name = ?",
                [name.trim()],
                |row| row.get(0),
            )
            .optional()?;
        if existing.is_some() {
            return Err(StoreError::DuplicateName {
                name: name.trim().to_string(),
            });
        }

        db.execute(
            "INSERT INTO classrooms (name, capacity, type, status, equipment)
             VALUES (?1, ?2, ?3, 'Available', ?4)",
            (name.trim(), capacity, room_type.trim(), equipment.trim()),
        )?;

        Ok(db.last_insert_rowid())
    }

    /// All classrooms, ordered by name.
    pub fn rooms(&self) -> Result<Vec<DbRoom>, StoreError> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(
            "SELECT id, name, capacity, type, status, equipment
             FROM classrooms ORDER BY name ASC",
        )?;

        let rooms = stmt
            .query_map([], |row| {
                Ok(DbRoom {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    capacity: row.get(2)?,
                    room_type: row.get(3)?,
                    status: row.get(4)?,
                    equipment: row.get(5)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rooms)
    }

    /// Looks up a single classroom.
    pub fn room(&self, id: i64) -> Result<Option<DbRoom>, StoreError> {
        let db = self.db.lock().unwrap();
        let room = db
            .query_row(
                "SELECT id, name, capacity, type, status, equipment
                 FROM classrooms WHERE id = ?",
                [id],
                |row| {
                    Ok(DbRoom {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        capacity: row.get(2)?,
                        room_type: row.get(3)?,
                        status: row.get(4)?,
                        equipment: row.get(5)?,
                    })
                },
            )
            .optional()?;

        Ok(room)
    }

    /// Looks up a classroom by its unique name.
    pub fn room_by_name(&self, name: &str) -> Result<Option<DbRoom>, StoreError> {
        let db = self.db.lock().unwrap();
        let room = db
            .query_row(
                "SELECT id, name, capacity, type, status, equipment
                 FROM classrooms WHERE name = ?",
                [name.trim()],
                |row| {
                    Ok(DbRoom {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        capacity: row.get(2)?,
                        room_type: row.get(3)?,
                        status: row.get(4)?,
                        equipment: row.get(5)?,
                    })
                },
            )
            .optional()?;

        Ok(room)
    }

    /// Updates a classroom, including its manual status.
    pub fn update_room(
        &self,
        id: i64,
        name: &str,
        capacity: i64,
        room_type: &str,
        status: &str,
        equipment: &str,
    ) -> Result<(), StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::MissingField("name"));
        }
        if room_type.trim().is_empty() {
            return Err(StoreError::MissingField("type"));
        }
        if capacity <= 0 {
            return Err(StoreError::BadCapacity);
        }
        let status = RoomStatus::parse_settable(status).ok_or_else(|| StoreError::BadStatus {
            raw: status.trim().to_string(),
        })?;

        let db = self.db.lock().unwrap();
        let taken: Option<i64> = db
            .query_row(
                "SELECT id FROM classrooms WHERE name = ? AND id != ?",
                (name.trim(), id),
                |row| row.get(0),
            )
            .optional()?;
        if taken.is_some() {
            return Err(StoreError::DuplicateName {
                name: name.trim().to_string(),
            });
        }

        let changed = db.execute(
            "UPDATE classrooms SET name = ?1, capacity = ?2, type = ?3, status = ?4, equipment = ?5
             WHERE id = ?6",
            (
                name.trim(),
                capacity,
                room_type.trim(),
                status.as_str(),
                equipment.trim(),
                id,
            ),
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound { kind: "room", id });
        }

        Ok(())
    }

    /// Deletes a classroom; its schedule entries cascade. Deleting an unknown
    /// id is a no-op.
    pub fn delete_room(&self, id: i64) -> Result<(), StoreError> {
        let db = self.db.lock().unwrap();
        db.execute("DELETE FROM classrooms WHERE id = ?", [id])?;
        Ok(())
    }
}
