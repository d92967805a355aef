//! Natural-language assistant client.
//!
//! Call-through to an external generateContent-style API that turns free
//! text into structured booking drafts, search filters, and maintenance
//! triage. The core never trusts the drafts; they feed the same validated
//! insert paths as typed input.

mod error;
mod types;

pub use error::AssistantError;
pub use types::{BookingDraft, SearchIntent, TicketAnalysis};

use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::config::AssistantConfig;
use crate::scheduling::Weekday;

/// Client for the external text-to-structured-data service.
///
/// The resolved model name is cached inside the client, not in module state;
/// `refresh_model` drops it so the next call re-runs discovery.
pub struct AssistantClient {
    client: reqwest::Client,
    config: AssistantConfig,
    resolved_model: RwLock<Option<String>>,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelInfo {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    fn supports_generate(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|m| m == "generateContent")
    }
}

impl AssistantClient {
    pub fn new(config: AssistantConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            resolved_model: RwLock::new(None),
        }
    }

    /// Resolves which model to call, preferring the configured ordering.
    /// The result is cached until `refresh_model` is called.
    pub async fn resolve_model(&self) -> Result<String, AssistantError> {
        if let Some(model) = self.resolved_model.read().await.clone() {
            return Ok(model);
        }

        let url = format!(
            "{}/models?key={}",
            self.config.base_url, self.config.api_key
        );
        let list: ModelList = self.client.get(&url).send().await?.json().await?;

        let preferred = self
            .config
            .preferred_models
            .iter()
            .find_map(|wanted| {
                list.models
                    .iter()
                    .find(|m| m.name.contains(wanted.as_str()) && m.supports_generate())
            })
            .or_else(|| list.models.iter().find(|m| m.supports_generate()));

        let model = match preferred {
            Some(m) => m.name.trim_start_matches("models/").to_string(),
            None if !self.config.fallback_model.is_empty() => {
                warn!("No advertised model supports generateContent, using fallback");
                self.config.fallback_model.clone()
            }
            None => return Err(AssistantError::NoModel),
        };

        info!("Resolved assistant model: {model}");
        *self.resolved_model.write().await = Some(model.clone());
        Ok(model)
    }

    /// Drops the cached model name so the next request re-runs discovery.
    pub async fn refresh_model(&self) {
        *self.resolved_model.write().await = None;
    }

    /// Sends a prompt and returns the JSON object extracted from the model's
    /// text output.
    async fn generate(&self, prompt: &str) -> Result<Value, AssistantError> {
        let model = self.resolve_model().await?;
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, model, self.config.api_key
        );

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });
        let response: Value = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        if let Some(error) = response.get("error") {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string();
            return Err(AssistantError::Api { message });
        }

        let text = response
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .ok_or(AssistantError::Empty)?;

        extract_json(text).ok_or(AssistantError::Unparseable)
    }

    /// Extracts a booking draft from free text.
    pub async fn parse_booking_intent(
        &self,
        query: &str,
    ) -> Result<BookingDraft, AssistantError> {
        let prompt = format!(
            "Context: Today is {today}.\n\
             User Query: \"{query}\"\n\
             Task: Extract schedule details.\n\
             OUTPUT RAW JSON ONLY:\n\
             {{ \"subject\": \"string\"|null, \"roomName\": \"string\"|null, \
             \"day\": \"string\"|null, \"startTime\": \"H:MM AM/PM\"|null, \
             \"endTime\": \"H:MM AM/PM\"|null, \"professor\": \"string\"|null }}",
            today = Weekday::today(),
        );

        let value = self.generate(&prompt).await?;
        serde_json::from_value(value).map_err(|_| AssistantError::Unparseable)
    }

    /// Extracts room-search filters from free text.
    pub async fn parse_search_intent(
        &self,
        query: &str,
    ) -> Result<SearchIntent, AssistantError> {
        let prompt = format!(
            "Context: Today is {today}.\n\
             User Query: \"{query}\"\n\
             Task: Extract search requirements.\n\
             Ref Data: Types: ['Lecture Hall', 'Laboratory', 'Computer Lab', \
             'Seminar Room', 'Auditorium', 'Conference Room']\n\
             Rules:\n\
             1. 'day': Convert relative (tomorrow) to a strict day name.\n\
             2. 'filterType': Fuzzy match to Types. If \"room\"/\"any\"/\"empty\", return \"All\".\n\
             3. 'searchKeyword': Specific names (e.g. \"CL5\").\n\
             4. 'timeStart'/'timeEnd': 24h hour numbers. \"12pm\" = start:12, end:13.\n\
             5. 'targetStatus': \"Available\" (default), \"Maintenance\".\n\
             OUTPUT RAW JSON ONLY:\n\
             {{ \"day\": \"Monday\"|null, \"filterType\": \"string\"|null, \
             \"searchKeyword\": \"string\"|null, \"timeStart\": number|null, \
             \"timeEnd\": number|null, \"minCapacity\": number|null, \
             \"equipment\": [\"string\"]|null, \"targetStatus\": \"Available\"|null }}",
            today = Weekday::today(),
        );

        let value = self.generate(&prompt).await?;
        serde_json::from_value(value).map_err(|_| AssistantError::Unparseable)
    }

    /// Triage of a free-text maintenance report.
    pub async fn analyze_maintenance(
        &self,
        description: &str,
    ) -> Result<TicketAnalysis, AssistantError> {
        let prompt = format!(
            "User Report: \"{description}\"\n\
             Task: Analyze issue.\n\
             Rules:\n\
             1. Category: Electrical, Plumbing, HVAC, Equipment, Cleaning, Other.\n\
             2. Urgency: Low, Medium, High, Critical.\n\
             OUTPUT RAW JSON ONLY:\n\
             {{ \"category\": \"Equipment\", \"urgency\": \"Medium\", \
             \"summary\": \"string\", \"suggestedAction\": \"string\" }}"
        );

        let value = self.generate(&prompt).await?;
        serde_json::from_value(value).map_err(|_| AssistantError::Unparseable)
    }
}

/// Pulls the outermost JSON object out of model output, which may arrive
/// wrapped in code fences or surrounding prose.
fn extract_json(text: &str) -> Option<Value> {
    let cleaned = text.replace("```json", "").replace("```", "");
    let first = cleaned.find('{')?;
    let last = cleaned.rfind('}')?;
    if last < first {
        return None;
    }
    serde_json::from_str(&cleaned[first..=last]).ok()
}
