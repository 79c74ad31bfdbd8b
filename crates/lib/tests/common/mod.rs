#![allow(dead_code)]
//! # Common Test Utilities

use repurpose::providers::ai::AiProvider;
use repurpose::providers::extract::ContentExtractor;
use repurpose::{GenerationOptions, RepurposePipeline};
use repurpose_test_utils::{MockAiProvider, MockExtractor};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the tracing subscriber once per test binary.
pub fn setup_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Builds a pipeline around clones of the given mocks, so the originals can
/// still be inspected afterwards.
pub fn pipeline_with(
    extractor: &MockExtractor,
    ai: &MockAiProvider,
    options: GenerationOptions,
) -> RepurposePipeline {
    let extractor: Box<dyn ContentExtractor> = Box::new(extractor.clone());
    let ai: Box<dyn AiProvider> = Box::new(ai.clone());
    RepurposePipeline::new(extractor, ai, options)
}
