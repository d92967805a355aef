//! Schedule storage: conflict-checked insertion and per-room queries.

use super::{DbScheduleEntry, RoomDb, StoreError};
use crate::scheduling::{overlaps, time_to_minutes, Weekday};

fn entry_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DbScheduleEntry> {
    Ok(DbScheduleEntry {
        id: row.get(0)?,
        room_id: row.get(1)?,
        subject: row.get(2)?,
        professor: row.get(3)?,
        day_of_week: row.get(4)?,
        start_time: row.get(5)?,
        end_time: row.get(6)?,
    })
}

impl RoomDb {
    /// Books a class into a room's weekly schedule.
    ///
    /// Validates every field, encodes both times, and rejects any interval
    /// that overlaps an existing entry for the same room and day under the
    /// half-open rule. The conflict scan and the insert run while holding
    /// the connection lock, inside one transaction, so two bookings cannot
    /// both pass the scan and then both commit.
    pub fn add_schedule(
        &self,
        room_id: i64,
        subject: &str,
        professor: &str,
        day: &str,
        start: &str,
        end: &str,
    ) -> Result<i64, StoreError> {
        if subject.trim().is_empty() {
            return Err(StoreError::MissingField("subject"));
        }
        if professor.trim().is_empty() {
            return Err(StoreError::MissingField("professor"));
        }
        if day.trim().is_empty() {
            return Err(StoreError::MissingField("day"));
        }
        if start.trim().is_empty() {
            return Err(StoreError::MissingField("start time"));
        }
        if end.trim().is_empty() {
            return Err(StoreError::MissingField("end time"));
        }

        let day = Weekday::parse(day).ok_or_else(|| StoreError::BadDay {
            raw: day.trim().to_string(),
        })?;
        let new_start = time_to_minutes(start).ok_or_else(|| StoreError::BadTime {
            which: "start",
            raw: start.trim().to_string(),
        })?;
        let new_end = time_to_minutes(end).ok_or_else(|| StoreError::BadTime {
            which: "end",
            raw: end.trim().to_string(),
        })?;
        if new_start >= new_end {
            return Err(StoreError::InvalidInterval);
        }

        let mut db = self.db.lock().unwrap();
        let tx = db.transaction()?;
        {
            let mut stmt = tx.prepare(
                "SELECT subject, start_time, end_time FROM schedules
                 WHERE room_id = ?1 AND day_of_week = ?2",
            )?;
            let existing = stmt.query_map((room_id, day.as_str()), |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?;

            for row in existing {
                let (other_subject, other_start, other_end) = row?;
                if let (Some(s), Some(e)) =
                    (time_to_minutes(&other_start), time_to_minutes(&other_end))
                {
                    if overlaps(new_start, new_end, s, e) {
                        return Err(StoreError::Conflict {
                            subject: other_subject,
                            start: other_start,
                            end: other_end,
                        });
                    }
                }
            }
        }

        tx.execute(
            "INSERT INTO schedules (room_id, subject, professor, day_of_week, start_time, end_time)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (
                room_id,
                subject.trim(),
                professor.trim(),
                day.as_str(),
                start.trim(),
                end.trim(),
            ),
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(id)
    }

    /// All schedule entries for a room, in calendar day order (Sunday first)
    /// and then by start time. An unknown room yields an empty list.
    pub fn schedules_for_room(&self, room_id: i64) -> Result<Vec<DbScheduleEntry>, StoreError> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(
            "SELECT id, room_id, subject, professor, day_of_week, start_time, end_time
             FROM schedules WHERE room_id = ?",
        )?;

        let mut entries = stmt
            .query_map([room_id], entry_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        // Rows written through add_schedule always carry a canonical day and
        // parseable times; anything else sorts last / earliest.
        entries.sort_by_key(|e| {
            (
                Weekday::parse(&e.day_of_week)
                    .map(|d| d.calendar_index())
                    .unwrap_or(7),
                time_to_minutes(&e.start_time).unwrap_or(0),
            )
        });

        Ok(entries)
    }

    /// Schedule entries for one room and day, ascending by start time.
    pub fn schedules_for_room_on(
        &self,
        room_id: i64,
        day: Weekday,
    ) -> Result<Vec<DbScheduleEntry>, StoreError> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(
            "SELECT id, room_id, subject, professor, day_of_week, start_time, end_time
             FROM schedules WHERE room_id = ?1 AND day_of_week = ?2",
        )?;

        let mut entries = stmt
            .query_map((room_id, day.as_str()), entry_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        entries.sort_by_key(|e| time_to_minutes(&e.start_time).unwrap_or(0));

        Ok(entries)
    }

    /// Removes a schedule entry. Deleting an unknown id is a no-op.
    pub fn delete_schedule(&self, id: i64) -> Result<(), StoreError> {
        let db = self.db.lock().unwrap();
        db.execute("DELETE FROM schedules WHERE id = ?", [id])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_with_room(name: &str) -> (RoomDb, i64) {
        let db = RoomDb::open_in_memory().unwrap();
        let id = db.add_room(name, 40, "Lecture Hall", "").unwrap();
        (db, id)
    }

    #[test]
    fn test_booking_succeeds_on_empty_day() {
        let (db, room) = db_with_room("LH1");
        db.add_schedule(room, "CS101", "Dr. X", "Tuesday", "1:00 PM", "2:00 PM")
            .unwrap();
        let entries = db
            .schedules_for_room_on(room, Weekday::Tuesday)
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].subject, "CS101");
        assert_eq!(entries[0].day_of_week, "Tuesday");
    }

    #[test]
    fn test_overlapping_booking_names_conflict() {
        let (db, room) = db_with_room("LH1");
        db.add_schedule(room, "CS101", "Dr. X", "Tuesday", "1:00 PM", "2:00 PM")
            .unwrap();

        let err = db
            .add_schedule(room, "MATH200", "Dr. Y", "Tuesday", "1:30 PM", "2:30 PM")
            .unwrap_err();
        assert!(err.is_conflict());
        let message = err.to_string();
        assert!(message.contains("CS101"), "{message}");
        assert!(message.contains("1:00 PM - 2:00 PM"), "{message}");

        // Nothing was inserted
        let entries = db.schedules_for_room_on(room, Weekday::Tuesday).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_conflict_detection_is_symmetric() {
        let (db, room) = db_with_room("LH1");
        db.add_schedule(room, "A", "P", "Monday", "9:00 AM", "10:00 AM")
            .unwrap();
        assert!(db
            .add_schedule(room, "B", "P", "Monday", "9:30 AM", "10:30 AM")
            .unwrap_err()
            .is_conflict());
        // The other containment direction conflicts too
        assert!(db
            .add_schedule(room, "C", "P", "Monday", "8:00 AM", "11:00 AM")
            .unwrap_err()
            .is_conflict());
    }

    #[test]
    fn test_touching_intervals_are_adjacency_safe() {
        let (db, room) = db_with_room("LH1");
        db.add_schedule(room, "A", "P", "Monday", "9:00 AM", "10:00 AM")
            .unwrap();
        db.add_schedule(room, "B", "P", "Monday", "10:00 AM", "11:00 AM")
            .unwrap();
        let entries = db.schedules_for_room_on(room, Weekday::Monday).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_same_interval_different_rooms_both_succeed() {
        let db = RoomDb::open_in_memory().unwrap();
        let r1 = db.add_room("LH1", 40, "Lecture Hall", "").unwrap();
        let r2 = db.add_room("LH2", 40, "Lecture Hall", "").unwrap();
        db.add_schedule(r1, "A", "P", "Monday", "9:00 AM", "10:00 AM")
            .unwrap();
        db.add_schedule(r2, "A", "P", "Monday", "9:00 AM", "10:00 AM")
            .unwrap();
    }

    #[test]
    fn test_same_interval_different_days_both_succeed() {
        let (db, room) = db_with_room("LH1");
        db.add_schedule(room, "A", "P", "Monday", "9:00 AM", "10:00 AM")
            .unwrap();
        db.add_schedule(room, "A", "P", "Wednesday", "9:00 AM", "10:00 AM")
            .unwrap();
    }

    #[test]
    fn test_invalid_interval_rejected() {
        let (db, room) = db_with_room("LH1");
        assert!(matches!(
            db.add_schedule(room, "A", "P", "Monday", "2:00 PM", "1:00 PM"),
            Err(StoreError::InvalidInterval)
        ));
        assert!(matches!(
            db.add_schedule(room, "A", "P", "Monday", "1:00 PM", "1:00 PM"),
            Err(StoreError::InvalidInterval)
        ));
    }

    #[test]
    fn test_field_and_format_validation() {
        let (db, room) = db_with_room("LH1");
        assert!(matches!(
            db.add_schedule(room, "", "P", "Monday", "9:00 AM", "10:00 AM"),
            Err(StoreError::MissingField("subject"))
        ));
        assert!(matches!(
            db.add_schedule(room, "A", "P", "Moonday", "9:00 AM", "10:00 AM"),
            Err(StoreError::BadDay { .. })
        ));
        assert!(matches!(
            db.add_schedule(room, "A", "P", "Monday", "9 o'clock", "10:00 AM"),
            Err(StoreError::BadTime { which: "start", .. })
        ));
    }

    #[test]
    fn test_day_stored_in_canonical_form() {
        let (db, room) = db_with_room("LH1");
        db.add_schedule(room, "A", "P", "  tuesday ", "9:00 AM", "10:00 AM")
            .unwrap();
        let entries = db.schedules_for_room_on(room, Weekday::Tuesday).unwrap();
        assert_eq!(entries[0].day_of_week, "Tuesday");
    }

    #[test]
    fn test_listing_uses_calendar_day_order() {
        let (db, room) = db_with_room("LH1");
        // Lexical order would be Friday, Monday, Sunday, Wednesday.
        db.add_schedule(room, "W", "P", "Wednesday", "9:00 AM", "10:00 AM")
            .unwrap();
        db.add_schedule(room, "F", "P", "Friday", "9:00 AM", "10:00 AM")
            .unwrap();
        db.add_schedule(room, "Su", "P", "Sunday", "9:00 AM", "10:00 AM")
            .unwrap();
        db.add_schedule(room, "M2", "P", "Monday", "1:00 PM", "2:00 PM")
            .unwrap();
        db.add_schedule(room, "M1", "P", "Monday", "9:00 AM", "10:00 AM")
            .unwrap();

        let subjects: Vec<String> = db
            .schedules_for_room(room)
            .unwrap()
            .into_iter()
            .map(|e| e.subject)
            .collect();
        assert_eq!(subjects, vec!["Su", "M1", "M2", "W", "F"]);
    }

    #[test]
    fn test_day_listing_sorted_by_start_time() {
        let (db, room) = db_with_room("LH1");
        db.add_schedule(room, "Late", "P", "Monday", "3:00 PM", "4:00 PM")
            .unwrap();
        db.add_schedule(room, "Early", "P", "Monday", "8:00 AM", "9:00 AM")
            .unwrap();
        db.add_schedule(room, "Noon", "P", "Monday", "12:00 PM", "1:00 PM")
            .unwrap();

        let subjects: Vec<String> = db
            .schedules_for_room_on(room, Weekday::Monday)
            .unwrap()
            .into_iter()
            .map(|e| e.subject)
            .collect();
        assert_eq!(subjects, vec!["Early", "Noon", "Late"]);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let (db, room) = db_with_room("LH1");
        let id = db
            .add_schedule(room, "A", "P", "Monday", "9:00 AM", "10:00 AM")
            .unwrap();
        db.delete_schedule(id).unwrap();
        db.delete_schedule(id).unwrap();
        assert!(db.schedules_for_room(room).unwrap().is_empty());
    }

    #[test]
    fn test_deleting_room_cascades_to_schedules() {
        let (db, room) = db_with_room("LH1");
        db.add_schedule(room, "A", "P", "Monday", "9:00 AM", "10:00 AM")
            .unwrap();
        db.delete_room(room).unwrap();
        assert!(db.schedules_for_room(room).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_room_lists_empty() {
        let db = RoomDb::open_in_memory().unwrap();
        assert!(db.schedules_for_room(404).unwrap().is_empty());
        assert!(db
            .schedules_for_room_on(404, Weekday::Monday)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_freed_slot_can_be_rebooked() {
        let (db, room) = db_with_room("LH1");
        let id = db
            .add_schedule(room, "A", "P", "Monday", "9:00 AM", "10:00 AM")
            .unwrap();
        db.delete_schedule(id).unwrap();
        db.add_schedule(room, "B", "P", "Monday", "9:00 AM", "10:00 AM")
            .unwrap();
    }
}
