pub mod gemini;
pub mod local;

use crate::errors::AiError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use serde_json::Value;
use std::fmt::Debug;

/// A request for exactly one structured result.
///
/// The provider must force the model to call the single declared function and
/// return that call's arguments, never free text.
#[derive(Debug, Clone, Copy)]
pub struct StructuredRequest<'a> {
    pub system_prompt: &'a str,
    pub user_prompt: &'a str,
    pub function_name: &'a str,
    pub function_description: &'a str,
    /// JSON schema of the function parameters.
    pub parameters: &'a Value,
}

/// A trait for interacting with an AI completion provider.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Sends the request and returns the raw JSON arguments of the forced call.
    ///
    /// Parsing and validating the arguments is left to the caller.
    async fn generate_structured(&self, request: &StructuredRequest<'_>)
        -> Result<String, AiError>;
}

dyn_clone::clone_trait_object!(AiProvider);
