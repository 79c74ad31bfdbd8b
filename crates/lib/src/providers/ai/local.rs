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

// --- OpenAI-compatible request and response structures ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    messages: Vec<ChatMessage<'a>>,
    tools: Vec<ChatTool<'a>>,
    tool_choice: ToolChoice<'a>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatTool<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    function: FunctionDeclaration<'a>,
}

#[derive(Serialize)]
struct FunctionDeclaration<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a Value,
}

#[derive(Serialize)]
struct ToolChoice<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    function: ToolChoiceFunction<'a>,
}

#[derive(Serialize)]
struct ToolChoiceFunction<'a> {
    name: &'a str,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize, Debug)]
struct ChatResponseMessage {
    #[serde(default)]
    tool_calls: Vec<ToolCall>,
}

#[derive(Deserialize, Debug)]
struct ToolCall {
    function: ToolCallFunction,
}

#[derive(Deserialize, Debug)]
struct ToolCallFunction {
    #[serde(default)]
    name: Option<String>,
    arguments: String,
}

// --- Local Provider implementation ---

/// A provider for an OpenAI-compatible chat completions API.
///
/// Works against hosted gateways as well as local model servers.
#[derive(Clone, Debug)]
pub struct LocalAiProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: Option<String>,
    model: Option<String>,
}

impl LocalAiProvider {
    /// Creates a new `LocalAiProvider`.
    pub fn new(
        api_url: String,
        api_key: Option<String>,
        model: Option<String>,
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
            model,
        })
    }
}

#[async_trait]
impl AiProvider for LocalAiProvider {
    async fn generate_structured(
        &self,
        request: &StructuredRequest<'_>,
    ) -> Result<String, AiError> {
        let request_body = ChatRequest {
            model: self.model.as_deref(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: request.user_prompt,
                },
            ],
            tools: vec![ChatTool {
                kind: "function",
                function: FunctionDeclaration {
                    name: request.function_name,
                    description: request.function_description,
                    parameters: request.parameters,
                },
            }],
            tool_choice: ToolChoice {
                kind: "function",
                function: ToolChoiceFunction {
                    name: request.function_name,
                },
            },
            stream: false,
        };

        let mut request_builder = self.client.post(&self.api_url);
        if let Some(key) = &self.api_key {
            request_builder = request_builder.bearer_auth(key);
        }

        debug!(api_url = %self.api_url, model = ?self.model, "--> Sending structured request");
        let response = request_builder
            .json(&request_body)
            .send()
            .await
            .map_err(AiError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %error_text, "AI provider returned an error");
            return Err(AiError::from_status(status.as_u16(), error_text));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(AiError::AiDeserialization)?;

        let tool_call = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.tool_calls.into_iter().next())
            .ok_or(AiError::MissingToolCall)?;

        if let Some(name) = tool_call.function.name.as_deref() {
            if name != request.function_name {
                error!(expected = request.function_name, got = name, "Unexpected tool call");
                return Err(AiError::MissingToolCall);
            }
        }

        Ok(tool_call.function.arguments)
    }
}
