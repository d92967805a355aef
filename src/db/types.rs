//! Row types for the classroom database.

#[derive(Debug, Clone)]
pub struct DbRoom {
    pub id: i64,
    pub name: String,
    pub capacity: i64,
    pub room_type: String,
    pub status: String,
    pub equipment: String,
}

impl DbRoom {
    /// Splits the comma-joined equipment column back into display labels.
    pub fn equipment_list(&self) -> Vec<String> {
        self.equipment
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct DbScheduleEntry {
    pub id: i64,
    pub room_id: i64,
    pub subject: String,
    pub professor: String,
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone)]
pub struct DbTicket {
    pub id: i64,
    pub description: String,
    pub category: String,
    pub urgency: String,
    pub summary: String,
    pub suggested_action: String,
    pub created_at: String,
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct DbUser {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Lifecycle states for a maintenance ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    Pending,
    InProgress,
    Resolved,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Pending => "Pending",
            TicketStatus::InProgress => "In Progress",
            TicketStatus::Resolved => "Resolved",
        }
    }

    pub fn parse(raw: &str) -> Option<TicketStatus> {
        let cleaned = raw.trim();
        [
            TicketStatus::Pending,
            TicketStatus::InProgress,
            TicketStatus::Resolved,
        ]
        .into_iter()
        .find(|s| s.as_str().eq_ignore_ascii_case(cleaned))
    }
}
