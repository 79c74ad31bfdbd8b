//! # Prompt Templates
//!
//! Fixed instruction text for the generation step, split into the tone table
//! and the repurposing task prompts.

pub mod repurpose;
pub mod tone;

pub use repurpose::{build_system_prompt, build_user_prompt};
pub use tone::tone_instruction;
