//! Pluggable completion backends
//!
//! Two interchangeable implementations of [`CompletionBackend`] are
//! selected at startup and injected into the pipeline: a local model
//! server (Ollama) and a hosted API (OpenAI). Each has its own network
//! failure surface, its own response schema, and its own JSON
//! post-validation; a response that fails validation is a per-unit
//! `MalformedResponse`, never a batch abort. Only the hosted backend
//! retries, and only on rate-limit signals.

use std::time::Duration;

use cvpipe_core::{UnitError, post_json, retry_rate_limited};
use serde_json::{Value, json};

/// Which backend variant is in use; drives the context-window size and
/// the CSV schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Local,
    Hosted,
}

/// Structured record extracted from one CV.
///
/// The shape depends on the backend: the local model is asked a narrow
/// three-degree question, the hosted model for free-text trajectories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// Local backend: university per degree level.
    Degrees {
        bachelors: Option<String>,
        masters: Option<String>,
        phd: Option<String>,
    },
    /// Hosted backend: pipe-separated education and career histories.
    Trajectory {
        education: Option<String>,
        career: Option<String>,
    },
}

/// A completion backend: context window in, structured record out.
pub trait CompletionBackend: Send + Sync {
    fn kind(&self) -> BackendKind;
    fn extract(&self, context: &str) -> Result<Record, UnitError>;
}

// === Local backend (Ollama) ===

/// Generous timeout for a local model round-trip
const OLLAMA_TIMEOUT: Duration = Duration::from_secs(120);

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";

pub struct OllamaBackend {
    url: String,
    model: String,
}

impl OllamaBackend {
    pub fn new(url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            model: model.into(),
        }
    }
}

impl CompletionBackend for OllamaBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Local
    }

    fn extract(&self, context: &str) -> Result<Record, UnitError> {
        let prompt = format!(
            "Extract the universities for bachelor's, master's, and PhD from the text. \
             Return a JSON like: {{\"bachelors\": \"uni name or null\", \
             \"masters\": \"uni name or null\", \"phd\": \"uni name or null\"}}.\n\n\
             Text: {context}\n\nGive only the JSON."
        );
        let payload = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
        });

        let response = post_json(&self.url, &payload, None, OLLAMA_TIMEOUT)?;
        let generated = response
            .get("response")
            .or_else(|| response.get("generated_text"))
            .and_then(Value::as_str)
            .unwrap_or_default();
        parse_degrees(generated)
    }
}

/// Validate the local model's reply as a three-degree JSON object.
///
/// The model sometimes emits the literal string "null" instead of JSON
/// null; both are mapped to a missing degree.
fn parse_degrees(generated: &str) -> Result<Record, UnitError> {
    let value: Value =
        serde_json::from_str(generated.trim()).map_err(|_| malformed(generated))?;
    if !value.is_object() {
        return Err(malformed(generated));
    }
    let degree = |key: &str| -> Option<String> {
        value
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| *s != "null")
            .map(String::from)
    };
    Ok(Record::Degrees {
        bachelors: degree("bachelors"),
        masters: degree("masters"),
        phd: degree("phd"),
    })
}

// === Hosted backend (OpenAI) ===

const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const OPENAI_TIMEOUT: Duration = Duration::from_secs(60);

/// Rate-limit policy: total attempts and the fixed wait between them
const OPENAI_MAX_ATTEMPTS: u32 = 2;
const OPENAI_RETRY_WAIT: Duration = Duration::from_secs(30);

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

const OPENAI_SYSTEM_PROMPT: &str = "\
You are an assistant that extracts information from an unstructured CV and \
returns the needed info in JSON format.
Extract the following from the given text:
1. education_trajectory: List the degrees (B.A., M.A., Ph.D.) along with \
university names and graduation years in this format:
\"B.A., University Name, Year | M.A., University Name, Year | Ph.D., University Name, Year\".
2. career_trajectory: List the career trajectory (university, start year, end \
year, and position) in this format:
\"University Name, Start Year-End Year, Position | University Name, Start Year-End Year, Position\". \
Beware phd candidate is not a career.
Only return the JSON object with these two keys: education_trajectory and career_trajectory.";

pub struct OpenAiBackend {
    api_key: String,
    model: String,
}

impl OpenAiBackend {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    fn request(&self, context: &str) -> Result<Record, UnitError> {
        let payload = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": OPENAI_SYSTEM_PROMPT },
                { "role": "user", "content": context },
            ],
            "temperature": 1,
            "max_tokens": 350,
            "response_format": { "type": "json_object" },
        });

        let response = post_json(OPENAI_URL, &payload, Some(&self.api_key), OPENAI_TIMEOUT)?;
        let content = response
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .ok_or_else(|| malformed(&response.to_string()))?;
        parse_trajectory(content)
    }
}

impl CompletionBackend for OpenAiBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Hosted
    }

    fn extract(&self, context: &str) -> Result<Record, UnitError> {
        retry_rate_limited("openai", OPENAI_MAX_ATTEMPTS, OPENAI_RETRY_WAIT, || {
            self.request(context)
        })
    }
}

/// Validate the hosted model's reply as a two-trajectory JSON object.
fn parse_trajectory(content: &str) -> Result<Record, UnitError> {
    let value: Value =
        serde_json::from_str(content.trim()).map_err(|_| malformed(content))?;
    if !value.is_object() {
        return Err(malformed(content));
    }
    let field = |key: &str| -> Option<String> {
        value.get(key).and_then(Value::as_str).map(String::from)
    };
    Ok(Record::Trajectory {
        education: field("education_trajectory"),
        career: field("career_trajectory"),
    })
}

fn malformed(body: &str) -> UnitError {
    UnitError::MalformedResponse {
        body: body.to_string(),
    }
}
