use crate::{
    errors::AiError,
    providers::ai::{AiProvider, StructuredRequest},
};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Debug;
use std::time::Duration;
use tracing::{debug, error};

// --- Gemini-specific request and response structures ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    tools: Vec<Tool<'a>>,
    tool_config: ToolConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool<'a> {
    function_declarations: Vec<FunctionDeclaration<'a>>,
}

#[derive(Serialize)]
struct FunctionDeclaration<'a> {
    name: &'a str,
    description: &'a str,
    parameters: Value,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolConfig<'a> {
    function_calling_config: FunctionCallingConfig<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FunctionCallingConfig<'a> {
    mode: &'a str,
    allowed_function_names: Vec<&'a str>,
}

#[derive(Deserialize, Debug)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize, Debug)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PartResponse {
    function_call: Option<FunctionCall>,
}

#[derive(Deserialize, Debug)]
struct FunctionCall {
    name: String,
    #[serde(default)]
    args: Value,
}

/// Gemini's function schemas accept an OpenAPI subset without
/// `additionalProperties`; strictness is enforced when parsing the result.
pub fn sanitize_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(key, _)| key.as_str() != "additionalProperties")
                .map(|(key, value)| (key.clone(), sanitize_schema(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(sanitize_schema).collect()),
        other => other.clone(),
    }
}

// --- Gemini Provider implementation ---

/// A provider for interacting with the Google Gemini API.
#[derive(Clone, Debug)]
pub struct GeminiProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: String,
}

impl GeminiProvider {
    /// Creates a new `GeminiProvider`.
    pub fn new(
        api_url: String,
        api_key: String,
        timeout: Option<Duration>,
    ) -> Result<Self, AiError> {
        let mut builder = ReqwestClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(AiError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
        })
    }

    /// The `generateContent` endpoint for a model name.
    pub fn endpoint_for_model(model_name: &str) -> String {
        format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{model_name}:generateContent"
        )
    }
}

#[async_trait]
impl AiProvider for GeminiProvider {
    async fn generate_structured(
        &self,
        request: &StructuredRequest<'_>,
    ) -> Result<String, AiError> {
        let request_body = GeminiRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: request.system_prompt,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: request.user_prompt,
                }],
            }],
            tools: vec![Tool {
                function_declarations: vec![FunctionDeclaration {
                    name: request.function_name,
                    description: request.function_description,
                    parameters: sanitize_schema(request.parameters),
                }],
            }],
            tool_config: ToolConfig {
                function_calling_config: FunctionCallingConfig {
                    mode: "ANY",
                    allowed_function_names: vec![request.function_name],
                },
            },
        };

        debug!(api_url = %self.api_url, "--> Sending structured request to Gemini");
        let response = self
            .client
            .post(&self.api_url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(AiError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %error_text, "Gemini returned an error");
            return Err(AiError::from_status(status.as_u16(), error_text));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(AiError::AiDeserialization)?;

        let call = gemini_response
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .find_map(|p| p.function_call)
            .filter(|call| call.name == request.function_name)
            .ok_or(AiError::MissingToolCall)?;

        Ok(call.args.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sanitize_removes_additional_properties_at_every_level() {
        let schema = json!({
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "items": {
                    "type": "array",
                    "items": { "type": "object", "additionalProperties": false }
                }
            }
        });
        let cleaned = sanitize_schema(&schema);
        assert!(cleaned.get("additionalProperties").is_none());
        assert!(cleaned["properties"]["items"]["items"]
            .get("additionalProperties")
            .is_none());
        assert_eq!(cleaned["properties"]["items"]["type"], "array");
    }
}
