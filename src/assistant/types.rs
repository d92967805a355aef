//! Structured drafts produced by the assistant.
//!
//! Field names are camelCase on the wire because that is what the prompt
//! asks the model to emit. Every field is optional; the drafts are
//! best-effort pre-fills that go through the exact same validation as
//! hand-typed input.

use serde::{Deserialize, Serialize};

/// A booking draft extracted from free text ("book CL5 for CS101 tuesday
/// 1pm to 2pm with Dr. X").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingDraft {
    pub subject: Option<String>,
    pub room_name: Option<String>,
    pub day: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub professor: Option<String>,
}

/// Room-search filters extracted from free text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchIntent {
    pub day: Option<String>,
    pub filter_type: Option<String>,
    pub search_keyword: Option<String>,
    pub time_start: Option<u32>,
    pub time_end: Option<u32>,
    pub min_capacity: Option<i64>,
    pub equipment: Option<Vec<String>>,
    pub target_status: Option<String>,
}

/// The assistant's triage of a maintenance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TicketAnalysis {
    pub category: String,
    pub urgency: String,
    pub summary: String,
    pub suggested_action: String,
}

impl Default for TicketAnalysis {
    fn default() -> Self {
        Self {
            category: "Other".to_string(),
            urgency: "Medium".to_string(),
            summary: String::new(),
            suggested_action: "Manual review".to_string(),
        }
    }
}

impl TicketAnalysis {
    /// Fallback triage used when the assistant is unreachable, so a report
    /// is never dropped.
    pub fn fallback(description: &str) -> Self {
        let summary: String = description.trim().chars().take(80).collect();
        Self {
            summary,
            ..Self::default()
        }
    }
}
