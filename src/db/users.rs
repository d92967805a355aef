//! Row-level user storage. Credential policy lives in `crate::auth`.

use super::{DbUser, RoomDb, StoreError};
use rusqlite::OptionalExtension;

fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DbUser> {
    Ok(DbUser {
        id: row.get(0)?,
        full_name: row.get(1)?,
        email: row.get(2)?,
        password: row.get(3)?,
        role: row.get(4)?,
    })
}

impl RoomDb {
    pub fn insert_user(
        &self,
        full_name: &str,
        email: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<i64, StoreError> {
        let db = self.db.lock().unwrap();
        db.execute(
            "INSERT INTO users (full_name, email, password, role) VALUES (?1, ?2, ?3, ?4)",
            (full_name.trim(), email.trim(), password_hash, role),
        )?;
        Ok(db.last_insert_rowid())
    }

    pub fn user_by_email(&self, email: &str) -> Result<Option<DbUser>, StoreError> {
        let db = self.db.lock().unwrap();
        let user = db
            .query_row(
                "SELECT id, full_name, email, password, role FROM users WHERE email = ?",
                [email.trim()],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    pub fn user_by_id(&self, id: i64) -> Result<Option<DbUser>, StoreError> {
        let db = self.db.lock().unwrap();
        let user = db
            .query_row(
                "SELECT id, full_name, email, password, role FROM users WHERE id = ?",
                [id],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    /// Updates a user's profile row. The password column is only touched when
    /// a new hash is supplied.
    pub fn update_user_row(
        &self,
        id: i64,
        full_name: &str,
        email: &str,
        password_hash: Option<&str>,
    ) -> Result<(), StoreError> {
        let db = self.db.lock().unwrap();
        let changed = match password_hash {
            Some(hash) => db.execute(
                "UPDATE users SET full_name = ?1, email = ?2, password = ?3 WHERE id = ?4",
                (full_name.trim(), email.trim(), hash, id),
            )?,
            None => db.execute(
                "UPDATE users SET full_name = ?1, email = ?2 WHERE id = ?3",
                (full_name.trim(), email.trim(), id),
            )?,
        };
        if changed == 0 {
            return Err(StoreError::NotFound { kind: "user", id });
        }
        Ok(())
    }
}
