use super::tone::tone_instruction;
use crate::types::ToneOption;

/// Phrases the model is told never to use.
pub const BANNED_PHRASES: [&str; 6] = [
    "revolutionize",
    "game-changer",
    "unlock",
    "in today's landscape",
    "In today's rapidly evolving landscape",
    "Unlock the power of",
];

pub const REPURPOSE_SYSTEM_PROMPT: &str = r#"You are an expert at repurposing blog posts for social media and SEO. You write in a natural human voice, never in corporate AI speak. Never use these phrases: {banned_phrases}. {tone_instruction}"#;

pub const REPURPOSE_USER_PROMPT: &str = r#"Below is the content of a blog post. Turn it into repurposed content assets.

Blog Content:
---
{content}
---

Return the result by calling the provided function.

REQUIREMENTS:
- LinkedIn posts: exactly three, one per angle (Educational, Controversial Take, Personal Story). 150-250 words each, natural voice, no corporate jargon, each a genuinely different take. Use line breaks for readability.
- Twitter hooks: exactly three, one per type (Question-based, Bold Statement, Story Hook). Under 280 characters each, build curiosity so people want to read the thread.
- Meta description: under 160 characters, SEO-friendly and action-oriented.
- YouTube title: under 60 characters, engaging without being clickbait.
- YouTube description: 3-4 sentences in video-focused language.
{extended_requirements}- Sound like a human marketer, not a chatbot."#;

pub const EXTENDED_REQUIREMENTS: &str = r#"- Email newsletter: subject line under 50 characters, preview text under 90 characters, and a short body that drives readers to the post.
- Instagram carousel: 5-7 slides numbered from 1. The first slide is the hook, the last slide is the call to action.
- Content score: rate readability, engagement and SEO strength from 0 to 100, describe keyword density in a short phrase, and summarise the assessment in one sentence.
"#;

pub const REPURPOSE_FUNCTION_DESCRIPTION: &str = "Return the repurposed content assets";

/// System instruction: fixed voice rules followed by the tone instruction.
pub fn build_system_prompt(tone: ToneOption) -> String {
    let banned = BANNED_PHRASES
        .iter()
        .map(|p| format!("\"{p}\""))
        .collect::<Vec<_>>()
        .join(", ");
    REPURPOSE_SYSTEM_PROMPT
        .replace("{banned_phrases}", &banned)
        .replace("{tone_instruction}", tone_instruction(tone))
}

/// User instruction embedding the (already truncated) content.
pub fn build_user_prompt(content: &str, extended: bool) -> String {
    let extended_requirements = if extended { EXTENDED_REQUIREMENTS } else { "" };
    REPURPOSE_USER_PROMPT
        .replace("{extended_requirements}", extended_requirements)
        .replace("{content}", content)
}
