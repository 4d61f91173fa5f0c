use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use domain::{
    repositories::schedule_generator::ScheduleGenerator,
    value_objects::schedule::{SchedulePrompt, ScheduledTaskModel},
};

const SCHEDULE_TOOL_NAME: &str = "parse_todays_schedule";

/// Minimal chat-completions client built on reqwest. One request per
/// generation, forced tool call, no retries.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    function: ToolCallFunction,
}

#[derive(Debug, Deserialize)]
struct ToolCallFunction {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct ScheduleArguments {
    schedule: Vec<ScheduledTaskModel>,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorEnvelope {
    error: OpenAiErrorDetails,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetails {
    #[serde(rename = "type")]
    type_: Option<String>,
    code: Option<String>,
    message: Option<String>,
}

/// Parses and validates the tool-call arguments. The priority enum and the
/// required fields are enforced here so that a malformed completion surfaces
/// as a generation failure instead of a downstream type error.
pub(crate) fn parse_schedule_arguments(arguments: &str) -> Result<Vec<ScheduledTaskModel>> {
    let parsed: ScheduleArguments = serde_json::from_str(arguments)
        .map_err(|err| anyhow::anyhow!("tool call arguments do not match schedule schema: {err}"))?;

    Ok(parsed.schedule)
}

fn schedule_tool_definition() -> serde_json::Value {
    json!({
        "type": "function",
        "function": {
            "name": SCHEDULE_TOOL_NAME,
            "description": "Parse the schedule for today",
            "parameters": {
                "type": "object",
                "properties": {
                    "schedule": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "description": { "type": "string" },
                                "startTime": { "type": "string" },
                                "duration": { "type": "number" },
                                "priority": {
                                    "type": "string",
                                    "enum": ["high", "medium", "low"]
                                },
                                "subtasks": {
                                    "type": "array",
                                    "items": { "type": "string" }
                                }
                            },
                            "required": ["description", "startTime", "duration", "priority"]
                        }
                    }
                },
                "required": ["schedule"]
            }
        }
    })
}

impl OpenAiClient {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
            base_url,
        }
    }

    async fn ensure_success(resp: reqwest::Response, context: &str) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();
        let body = match resp.text().await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => "<empty response body>".to_string(),
            Err(err) => format!("<failed to read response body: {err}>"),
        };

        let (error_type, error_code, error_message) =
            match serde_json::from_str::<OpenAiErrorEnvelope>(&body) {
                Ok(envelope) => (
                    envelope.error.type_,
                    envelope.error.code,
                    envelope.error.message,
                ),
                Err(_) => (None, None, None),
            };

        error!(
            status = %status,
            openai_error_type = ?error_type,
            openai_error_code = ?error_code,
            openai_error_message = ?error_message,
            context = %context,
            "openai api request failed"
        );

        anyhow::bail!(
            "OpenAI API request failed: {} (status {})",
            context,
            status
        );
    }
}

#[async_trait]
impl ScheduleGenerator for OpenAiClient {
    async fn generate(&self, prompt: SchedulePrompt) -> Result<Vec<ScheduledTaskModel>> {
        // https://platform.openai.com/docs/api-reference/chat/create
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": prompt.system },
                { "role": "user", "content": prompt.user }
            ],
            "tools": [schedule_tool_definition()],
            "tool_choice": {
                "type": "function",
                "function": { "name": SCHEDULE_TOOL_NAME }
            }
        });

        let resp = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;
        let resp = Self::ensure_success(resp, "create chat completion").await?;

        let parsed: ChatCompletionResponse = resp.json().await?;

        let tool_call = parsed
            .choices
            .first()
            .and_then(|choice| choice.message.tool_calls.as_deref())
            .and_then(|calls| calls.first())
            .ok_or_else(|| anyhow::anyhow!("completion response contains no tool call"))?;

        if tool_call.function.name != SCHEDULE_TOOL_NAME {
            anyhow::bail!(
                "completion returned unexpected tool call: {}",
                tool_call.function.name
            );
        }

        parse_schedule_arguments(&tool_call.function.arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::value_objects::enums::task_priorities::TaskPriority;

    #[test]
    fn parses_well_formed_arguments() {
        let arguments = r#"{
            "schedule": [
                {
                    "description": "Write report",
                    "startTime": "09:00",
                    "duration": 2,
                    "priority": "high",
                    "subtasks": ["Outline", "Draft"]
                },
                {
                    "description": "Review PRs",
                    "startTime": "11:15",
                    "duration": 1.5,
                    "priority": "medium"
                }
            ]
        }"#;

        let schedule = parse_schedule_arguments(arguments).unwrap();

        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule[0].priority, TaskPriority::High);
        assert_eq!(
            schedule[0].subtasks.as_deref(),
            Some(["Outline".to_string(), "Draft".to_string()].as_slice())
        );
        assert_eq!(schedule[1].duration, 1.5);
        assert!(schedule[1].subtasks.is_none());
    }

    #[test]
    fn rejects_unknown_priority() {
        let arguments = r#"{
            "schedule": [
                {
                    "description": "Write report",
                    "startTime": "09:00",
                    "duration": 2,
                    "priority": "urgent"
                }
            ]
        }"#;

        assert!(parse_schedule_arguments(arguments).is_err());
    }

    #[test]
    fn rejects_missing_required_field() {
        let arguments = r#"{ "schedule": [ { "description": "Write report" } ] }"#;

        assert!(parse_schedule_arguments(arguments).is_err());
    }

    #[test]
    fn rejects_non_json_arguments() {
        assert!(parse_schedule_arguments("not json").is_err());
    }
}
