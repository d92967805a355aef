//! Maintenance ticket storage.
//!
//! Tickets are persisted rows, not process memory, so the inbox survives
//! restarts. The category/urgency/summary/suggested-action fields come from
//! the assistant's analysis of the reporter's free text.

use super::{DbTicket, RoomDb, StoreError, TicketStatus};

fn ticket_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DbTicket> {
    Ok(DbTicket {
        id: row.get(0)?,
        description: row.get(1)?,
        category: row.get(2)?,
        urgency: row.get(3)?,
        summary: row.get(4)?,
        suggested_action: row.get(5)?,
        created_at: row.get(6)?,
        status: row.get(7)?,
    })
}

impl RoomDb {
    /// Files a new ticket. New tickets start Pending.
    pub fn add_ticket(
        &self,
        description: &str,
        category: &str,
        urgency: &str,
        summary: &str,
        suggested_action: &str,
    ) -> Result<i64, StoreError> {
        if description.trim().is_empty() {
            return Err(StoreError::MissingField("description"));
        }

        let created_at = chrono::Local::now().to_rfc3339();
        let db = self.db.lock().unwrap();
        db.execute(
            "INSERT INTO maintenance_tickets
                 (description, category, urgency, summary, suggested_action, created_at, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'Pending')",
            (
                description.trim(),
                category.trim(),
                urgency.trim(),
                summary.trim(),
                suggested_action.trim(),
                created_at,
            ),
        )?;

        Ok(db.last_insert_rowid())
    }

    /// All tickets, newest first.
    pub fn tickets(&self) -> Result<Vec<DbTicket>, StoreError> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(
            "SELECT id, description, category, urgency, summary, suggested_action, created_at, status
             FROM maintenance_tickets ORDER BY id DESC",
        )?;

        let tickets = stmt
            .query_map([], ticket_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(tickets)
    }

    /// Looks up a single ticket.
    pub fn ticket(&self, id: i64) -> Result<Option<DbTicket>, StoreError> {
        use rusqlite::OptionalExtension;

        let db = self.db.lock().unwrap();
        let ticket = db
            .query_row(
                "SELECT id, description, category, urgency, summary, suggested_action, created_at, status
                 FROM maintenance_tickets WHERE id = ?",
                [id],
                ticket_from_row,
            )
            .optional()?;

        Ok(ticket)
    }

    /// Moves a ticket through its lifecycle.
    pub fn set_ticket_status(&self, id: i64, status: TicketStatus) -> Result<(), StoreError> {
        let db = self.db.lock().unwrap();
        let changed = db.execute(
            "UPDATE maintenance_tickets SET status = ?1 WHERE id = ?2",
            (status.as_str(), id),
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound { kind: "ticket", id });
        }
        Ok(())
    }

    /// Removes a ticket. Deleting an unknown id is a no-op.
    pub fn delete_ticket(&self, id: i64) -> Result<(), StoreError> {
        let db = self.db.lock().unwrap();
        db.execute("DELETE FROM maintenance_tickets WHERE id = ?", [id])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_lifecycle() {
        let db = RoomDb::open_in_memory().unwrap();
        let id = db
            .add_ticket(
                "Projector keeps flickering",
                "Equipment",
                "Medium",
                "Projector display failure",
                "Check HDMI / replace bulb",
            )
            .unwrap();

        let ticket = db.ticket(id).unwrap().unwrap();
        assert_eq!(ticket.status, "Pending");
        assert_eq!(ticket.category, "Equipment");

        db.set_ticket_status(id, TicketStatus::InProgress).unwrap();
        assert_eq!(db.ticket(id).unwrap().unwrap().status, "In Progress");

        db.set_ticket_status(id, TicketStatus::Resolved).unwrap();
        assert_eq!(db.ticket(id).unwrap().unwrap().status, "Resolved");
    }

    #[test]
    fn test_tickets_newest_first() {
        let db = RoomDb::open_in_memory().unwrap();
        db.add_ticket("first", "Other", "Low", "s", "a").unwrap();
        db.add_ticket("second", "Other", "Low", "s", "a").unwrap();
        let descriptions: Vec<String> = db
            .tickets()
            .unwrap()
            .into_iter()
            .map(|t| t.description)
            .collect();
        assert_eq!(descriptions, vec!["second", "first"]);
    }

    #[test]
    fn test_empty_description_rejected() {
        let db = RoomDb::open_in_memory().unwrap();
        assert!(matches!(
            db.add_ticket("  ", "Other", "Low", "s", "a"),
            Err(StoreError::MissingField("description"))
        ));
    }

    #[test]
    fn test_status_update_on_unknown_ticket() {
        let db = RoomDb::open_in_memory().unwrap();
        let err = db
            .set_ticket_status(7, TicketStatus::Resolved)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_ticket_is_idempotent() {
        let db = RoomDb::open_in_memory().unwrap();
        let id = db.add_ticket("leak", "Plumbing", "High", "s", "a").unwrap();
        db.delete_ticket(id).unwrap();
        db.delete_ticket(id).unwrap();
        assert!(db.tickets().unwrap().is_empty());
    }
}
