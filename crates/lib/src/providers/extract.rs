use crate::errors::ExtractError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;
use url::Url;

/// A trait for services that turn a web page into a markdown document.
#[async_trait]
pub trait ContentExtractor: Send + Sync + Debug + DynClone {
    /// Fetches `url` once and returns its markdown representation.
    async fn extract_markdown(&self, url: &Url) -> Result<String, ExtractError>;
}

dyn_clone::clone_trait_object!(ContentExtractor);
