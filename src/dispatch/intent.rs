use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::jobs::describe_jobs;
use super::navigation::NavAction;
use crate::error::NluError;

/// Result of one NLU call. Every field is optional on the wire; a missing
/// field degrades to an unhandled intent rather than a parse error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredIntent {
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub entities: Map<String, Value>,
    #[serde(default)]
    pub reply: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl StructuredIntent {
    pub fn new(intent: &str) -> Self {
        Self {
            intent: Some(intent.to_string()),
            ..Default::default()
        }
    }

    pub fn with_entity(mut self, key: &str, value: &str) -> Self {
        self.entities.insert(key.to_string(), Value::String(value.to_string()));
        self
    }

    pub fn with_reply(mut self, reply: &str) -> Self {
        self.reply = Some(reply.to_string());
        self
    }

    pub fn label(&self) -> &str {
        self.intent.as_deref().unwrap_or("")
    }

    /// Non-empty string entity, or `None`.
    pub fn entity(&self, key: &str) -> Option<&str> {
        self.entities
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

/// Remote classification seam. One call per utterance, no retry.
#[async_trait]
pub trait IntentResolver: Send + Sync {
    async fn resolve(&self, utterance: &str) -> Result<StructuredIntent, NluError>;
}

/// What a handled remote intent asks the assistant to do.
#[derive(Debug, Clone, PartialEq)]
pub enum IntentAction {
    Navigate(NavAction),
    Say(String),
}

/// Map a remote result onto an action. `None` means unhandled.
pub fn interpret(result: &StructuredIntent) -> Option<IntentAction> {
    match result.label() {
        "navigate" => result
            .entity("page")
            .map(|page| IntentAction::Navigate(NavAction::Section(page.to_string()))),
        "query_jobs" => result
            .entity("category")
            .map(|category| IntentAction::Say(describe_jobs(category))),
        "smalltalk" => result
            .reply
            .as_deref()
            .filter(|reply| !reply.trim().is_empty())
            .map(|reply| IntentAction::Say(reply.to_string())),
        _ => None,
    }
}
