//! AI assistance endpoints
//!
//! The backend turns a plain-language audience description into segment
//! rules and proposes message templates. Its answers are shown as-is.

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::error::Error;
use crate::fetch::Fetch;

/// Objective sent with every message suggestion request
pub const DEFAULT_OBJECTIVE: &str = "Engage customers in the segment";

/// Tone sent with every message suggestion request
pub const DEFAULT_TONE: &str = "Friendly and professional";

/// Body of `POST /ai/parse-segment`
#[derive(Debug, Clone, Serialize)]
struct SegmentPrompt<'a> {
    prompt: &'a str,
}

/// Body of `POST /ai/message-suggestions`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageSuggestionRequest {
    pub objective: String,

    #[serde(rename = "segmentDescription")]
    pub segment_description: String,

    pub tone: String,
}

impl MessageSuggestionRequest {
    /// Request suggestions for the named segment
    pub fn for_segment(segment_name: &str) -> Self {
        Self {
            objective: DEFAULT_OBJECTIVE.to_string(),
            segment_description: format!(
                "{} - Customers matching specific criteria",
                segment_name
            ),
            tone: DEFAULT_TONE.to_string(),
        }
    }
}

/// Message templates proposed by the backend, ready to display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestions(pub Vec<String>);

impl Suggestions {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }
}

fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl From<Value> for Suggestions {
    /// Accept whatever shape comes back: a list, a `suggestions` wrapper, a
    /// map of named suggestions or a single string.
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Suggestions::default(),
            Value::Array(items) => Suggestions(items.iter().map(display_text).collect()),
            Value::Object(mut map) => match map.remove("suggestions") {
                Some(inner) => Suggestions::from(inner),
                None => Suggestions(map.values().map(display_text).collect()),
            },
            other => Suggestions(vec![display_text(&other)]),
        }
    }
}

/// Client for the `/ai` endpoints
#[derive(Debug, Clone)]
pub struct AiClient {
    /// The API base URL
    url: String,

    /// HTTP client used for requests
    client: Client,
}

impl AiClient {
    /// Create a new AiClient
    pub(crate) fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            client,
        }
    }

    fn get_url(&self, path: &str) -> String {
        format!("{}/ai{}", self.url, path)
    }

    /// Turn an audience description into segment rules
    pub async fn parse_segment(&self, prompt: &str) -> Result<Value, Error> {
        Fetch::post(&self.client, &self.get_url("/parse-segment"))
            .json(&SegmentPrompt { prompt })?
            .execute::<Value>()
            .await
    }

    /// Ask for message template suggestions
    pub async fn message_suggestions(
        &self,
        request: &MessageSuggestionRequest,
    ) -> Result<Suggestions, Error> {
        let value = Fetch::post(&self.client, &self.get_url("/message-suggestions"))
            .json(request)?
            .execute::<Value>()
            .await?;
        Ok(Suggestions::from(value))
    }
}
