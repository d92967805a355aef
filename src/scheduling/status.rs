//! Room status derivation.
//!
//! A room's displayed status merges the administrator-set manual status with
//! the schedule for the day being looked at. Manual Maintenance and Reserved
//! always win; otherwise the room is Occupied while a scheduled class is in
//! session and Available the rest of the time.

use chrono::Timelike;
use serde::Serialize;

use crate::db::{DbScheduleEntry, RoomDb, StoreError};
use crate::scheduling::{time_to_minutes, Weekday};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoomStatus {
    Available,
    Occupied,
    Reserved,
    Maintenance,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "Available",
            RoomStatus::Occupied => "Occupied",
            RoomStatus::Reserved => "Reserved",
            RoomStatus::Maintenance => "Maintenance",
        }
    }

    /// Display color for this status.
    pub fn color(&self) -> &'static str {
        match self {
            RoomStatus::Available => "#10b981",
            RoomStatus::Occupied | RoomStatus::Reserved => "#ef4444",
            RoomStatus::Maintenance => "#f59e0b",
        }
    }

    /// Reads the persisted status column. Anything unrecognized is treated
    /// as Available, mirroring the resolver's fall-through behavior.
    pub fn from_column(raw: &str) -> RoomStatus {
        let cleaned = raw.trim();
        [
            RoomStatus::Available,
            RoomStatus::Occupied,
            RoomStatus::Reserved,
            RoomStatus::Maintenance,
        ]
        .into_iter()
        .find(|s| s.as_str().eq_ignore_ascii_case(cleaned))
        .unwrap_or(RoomStatus::Available)
    }

    /// Strict parse of administrator input. Occupied is only ever computed
    /// from the schedule, so it is not in the settable set.
    pub fn parse_settable(raw: &str) -> Option<RoomStatus> {
        match RoomStatus::from_column(raw) {
            RoomStatus::Occupied => None,
            status if status.as_str().eq_ignore_ascii_case(raw.trim()) => Some(status),
            _ => None,
        }
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The displayable status descriptor handed to the UI layer.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub status: RoomStatus,
    pub color: &'static str,
    pub message: String,
}

impl StatusReport {
    fn new(status: RoomStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            color: status.color(),
            message: message.into(),
        }
    }
}

/// Resolves a status from its inputs. `entries` must already be filtered to
/// the day being looked at; `minutes_now` is the instant being tested.
///
/// Resolution order, first match wins:
/// 1. manual Maintenance
/// 2. manual Reserved (overrides any scheduled class)
/// 3. a schedule entry whose `[start, end)` window contains the instant
/// 4. Available
pub fn resolve(
    manual: RoomStatus,
    day: Weekday,
    minutes_now: u32,
    entries: &[DbScheduleEntry],
) -> StatusReport {
    match manual {
        RoomStatus::Maintenance => StatusReport::new(RoomStatus::Maintenance, "Under Repair"),
        RoomStatus::Reserved => StatusReport::new(RoomStatus::Reserved, "Special Event"),
        _ => {
            let active = entries.iter().find(|e| {
                match (time_to_minutes(&e.start_time), time_to_minutes(&e.end_time)) {
                    (Some(start), Some(end)) => minutes_now >= start && minutes_now < end,
                    _ => false,
                }
            });

            match active {
                Some(entry) => StatusReport::new(
                    RoomStatus::Occupied,
                    format!("Occupied by {}", entry.subject),
                ),
                None => StatusReport::new(RoomStatus::Available, format!("Free on {day}")),
            }
        }
    }
}

/// Resolves the current status of a room.
///
/// `selected_day` overrides which weekday's schedule is consulted; the
/// time-of-day is always the current wall clock. An unknown room id resolves
/// to Available rather than failing.
pub fn room_status(
    db: &RoomDb,
    room_id: i64,
    selected_day: Option<Weekday>,
) -> Result<StatusReport, StoreError> {
    let manual = db
        .room(room_id)?
        .map(|room| RoomStatus::from_column(&room.status))
        .unwrap_or(RoomStatus::Available);

    let day = selected_day.unwrap_or_else(Weekday::today);
    let now = chrono::Local::now();
    let minutes_now = now.hour() * 60 + now.minute();

    let entries = db.schedules_for_room_on(room_id, day)?;
    Ok(resolve(manual, day, minutes_now, &entries))
}
