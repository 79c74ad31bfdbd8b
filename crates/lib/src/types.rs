//! # Data Model
//!
//! Request, metadata and result types that cross the pipeline boundary. Field
//! names serialize in camelCase to match the JSON contract used by front ends
//! and the history store.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

// --- Tone ---

/// The instruction profile that conditions the generation step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ToneOption {
    #[default]
    #[serde(rename = "b2b-formal")]
    B2bFormal,
    #[serde(rename = "b2b-casual")]
    B2bCasual,
    #[serde(rename = "b2c-formal")]
    B2cFormal,
    #[serde(rename = "b2c-casual")]
    B2cCasual,
}

impl ToneOption {
    pub const ALL: [ToneOption; 4] = [
        ToneOption::B2bFormal,
        ToneOption::B2bCasual,
        ToneOption::B2cFormal,
        ToneOption::B2cCasual,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToneOption::B2bFormal => "b2b-formal",
            ToneOption::B2bCasual => "b2b-casual",
            ToneOption::B2cFormal => "b2c-formal",
            ToneOption::B2cCasual => "b2c-casual",
        }
    }

    /// Human-readable label used in exports and listings.
    pub fn label(self) -> &'static str {
        match self {
            ToneOption::B2bFormal => "B2B – Formal",
            ToneOption::B2bCasual => "B2B – Casual",
            ToneOption::B2cFormal => "B2C – Formal",
            ToneOption::B2cCasual => "B2C – Casual",
        }
    }

    /// Parses a tone, falling back to the default for unknown or absent values.
    pub fn from_str_lenient(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTone(pub String);

impl fmt::Display for UnknownTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown tone '{}'", self.0)
    }
}

impl std::error::Error for UnknownTone {}

impl FromStr for ToneOption {
    type Err = UnknownTone;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToneOption::ALL
            .into_iter()
            .find(|tone| tone.as_str() == s)
            .ok_or_else(|| UnknownTone(s.to_string()))
    }
}

impl fmt::Display for ToneOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything other than a known tone name resolves to the default tone,
/// including `null`, numbers and objects.
impl<'de> Deserialize<'de> for ToneOption {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(ToneOption::from_str_lenient(raw.as_str()))
    }
}

// --- Request ---

/// A single repurposing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRequest {
    pub url: String,
    #[serde(default)]
    pub tone: ToneOption,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_text: Option<String>,
}

impl SourceRequest {
    pub fn new(url: impl Into<String>, tone: ToneOption) -> Self {
        Self {
            url: url.into(),
            tone,
            manual_text: None,
        }
    }

    pub fn with_manual_text(mut self, text: impl Into<String>) -> Self {
        self.manual_text = Some(text.into());
        self
    }
}

// --- Derived metadata ---

/// Metadata derived heuristically from the acquired content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogMeta {
    pub title: String,
    pub author: String,
    pub date: String,
    pub image: String,
    pub word_count: u64,
    pub reading_time: u64,
    pub preview_text: String,
}

// --- Generated assets ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkedinAngle {
    Educational,
    #[serde(rename = "Controversial Take")]
    ControversialTake,
    #[serde(rename = "Personal Story")]
    PersonalStory,
}

impl LinkedinAngle {
    pub const ALL: [LinkedinAngle; 3] = [
        LinkedinAngle::Educational,
        LinkedinAngle::ControversialTake,
        LinkedinAngle::PersonalStory,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LinkedinAngle::Educational => "Educational",
            LinkedinAngle::ControversialTake => "Controversial Take",
            LinkedinAngle::PersonalStory => "Personal Story",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookType {
    #[serde(rename = "Question-based")]
    QuestionBased,
    #[serde(rename = "Bold Statement")]
    BoldStatement,
    #[serde(rename = "Story Hook")]
    StoryHook,
}

impl HookType {
    pub const ALL: [HookType; 3] = [
        HookType::QuestionBased,
        HookType::BoldStatement,
        HookType::StoryHook,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HookType::QuestionBased => "Question-based",
            HookType::BoldStatement => "Bold Statement",
            HookType::StoryHook => "Story Hook",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkedinPost {
    pub angle: LinkedinAngle,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TwitterHook {
    #[serde(rename = "type")]
    pub hook_type: HookType,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct YoutubeContent {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EmailNewsletter {
    pub subject_line: String,
    pub preview_text: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CarouselSlide {
    pub slide_number: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstagramCarousel {
    pub slides: Vec<CarouselSlide>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContentScore {
    pub readability: u32,
    pub engagement: u32,
    pub seo_strength: u32,
    pub keyword_density: String,
    pub summary: String,
}

/// The structured result returned by the AI collaborator.
///
/// Parsing is strict: unknown fields and values outside the closed enums are
/// rejected, so a malformed result never becomes a partially populated value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GeneratedAssets {
    pub linkedin_posts: Vec<LinkedinPost>,
    pub twitter_hooks: Vec<TwitterHook>,
    pub meta_description: String,
    pub youtube: YoutubeContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_newsletter: Option<EmailNewsletter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram_carousel: Option<InstagramCarousel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_score: Option<ContentScore>,
}

impl GeneratedAssets {
    pub fn into_content(self, blog_meta: BlogMeta) -> RepurposedContent {
        RepurposedContent {
            linkedin_posts: self.linkedin_posts,
            twitter_hooks: self.twitter_hooks,
            meta_description: self.meta_description,
            youtube: self.youtube,
            email_newsletter: self.email_newsletter,
            instagram_carousel: self.instagram_carousel,
            content_score: self.content_score,
            blog_meta,
        }
    }
}

/// The complete, immutable output of one successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepurposedContent {
    pub linkedin_posts: Vec<LinkedinPost>,
    pub twitter_hooks: Vec<TwitterHook>,
    pub meta_description: String,
    pub youtube: YoutubeContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_newsletter: Option<EmailNewsletter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram_carousel: Option<InstagramCarousel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_score: Option<ContentScore>,
    pub blog_meta: BlogMeta,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tone_falls_back_to_default() {
        let request: SourceRequest =
            serde_json::from_value(json!({ "url": "https://example.com", "tone": "shouty" }))
                .unwrap();
        assert_eq!(request.tone, ToneOption::B2bFormal);

        let request: SourceRequest =
            serde_json::from_value(json!({ "url": "https://example.com", "tone": null })).unwrap();
        assert_eq!(request.tone, ToneOption::B2bFormal);

        let request: SourceRequest =
            serde_json::from_value(json!({ "url": "https://example.com" })).unwrap();
        assert_eq!(request.tone, ToneOption::B2bFormal);
    }

    #[test]
    fn non_string_tone_falls_back_to_default() {
        for tone in [json!(5), json!({ "x": 1 }), json!(true), json!(["b2c-casual"])] {
            let request: SourceRequest = serde_json::from_value(
                json!({ "url": "https://example.com/post", "tone": tone }),
            )
            .unwrap();
            assert_eq!(request.tone, ToneOption::B2bFormal);
        }

        let request: SourceRequest =
            serde_json::from_str(r#"{"url":"https://example.com/post","tone":5}"#).unwrap();
        assert_eq!(request.tone, ToneOption::B2bFormal);
    }

    #[test]
    fn tone_round_trips_wire_names() {
        for tone in ToneOption::ALL {
            let value = serde_json::to_value(tone).unwrap();
            assert_eq!(value, json!(tone.as_str()));
            let back: ToneOption = serde_json::from_value(value).unwrap();
            assert_eq!(back, tone);
        }
    }

    #[test]
    fn manual_text_uses_camel_case() {
        let request: SourceRequest = serde_json::from_value(json!({
            "url": "https://example.com/post",
            "tone": "b2c-casual",
            "manualText": "hello"
        }))
        .unwrap();
        assert_eq!(request.tone, ToneOption::B2cCasual);
        assert_eq!(request.manual_text.as_deref(), Some("hello"));
    }

    #[test]
    fn optional_assets_are_omitted_from_json() {
        let content = GeneratedAssets {
            linkedin_posts: vec![],
            twitter_hooks: vec![],
            meta_description: "m".into(),
            youtube: YoutubeContent {
                title: "t".into(),
                description: "d".into(),
            },
            email_newsletter: None,
            instagram_carousel: None,
            content_score: None,
        }
        .into_content(BlogMeta::default());
        let value = serde_json::to_value(&content).unwrap();
        assert!(value.get("emailNewsletter").is_none());
        assert!(value.get("contentScore").is_none());
        assert_eq!(value["blogMeta"]["readingTime"], 0);
    }
}
