//! JSON schema for the forced function call.
//!
//! Every object is closed (`additionalProperties: false`) and the angle and hook
//! fields are enums, so providers that honour the schema cannot emit values the
//! parser would reject.

use crate::types::{HookType, LinkedinAngle};
use serde_json::{json, Value};

fn string_field(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

fn score_field(description: &str) -> Value {
    json!({ "type": "integer", "minimum": 0, "maximum": 100, "description": description })
}

fn linkedin_posts_schema() -> Value {
    let angles: Vec<&str> = LinkedinAngle::ALL.iter().map(|a| a.as_str()).collect();
    json!({
        "type": "array",
        "description": "Exactly three LinkedIn posts, one per angle",
        "minItems": 3,
        "maxItems": 3,
        "items": {
            "type": "object",
            "properties": {
                "angle": { "type": "string", "enum": angles },
                "content": string_field("The post text, 150-250 words")
            },
            "required": ["angle", "content"],
            "additionalProperties": false
        }
    })
}

fn twitter_hooks_schema() -> Value {
    let types: Vec<&str> = HookType::ALL.iter().map(|h| h.as_str()).collect();
    json!({
        "type": "array",
        "description": "Exactly three Twitter hooks, one per type",
        "minItems": 3,
        "maxItems": 3,
        "items": {
            "type": "object",
            "properties": {
                "type": { "type": "string", "enum": types },
                "content": string_field("The hook text, under 280 characters")
            },
            "required": ["type", "content"],
            "additionalProperties": false
        }
    })
}

fn extended_properties() -> [(&'static str, Value); 3] {
    [
        (
            "emailNewsletter",
            json!({
                "type": "object",
                "properties": {
                    "subjectLine": string_field("Under 50 characters"),
                    "previewText": string_field("Under 90 characters"),
                    "body": string_field("Short newsletter body")
                },
                "required": ["subjectLine", "previewText", "body"],
                "additionalProperties": false
            }),
        ),
        (
            "instagramCarousel",
            json!({
                "type": "object",
                "properties": {
                    "slides": {
                        "type": "array",
                        "minItems": 1,
                        "items": {
                            "type": "object",
                            "properties": {
                                "slideNumber": { "type": "integer", "minimum": 1 },
                                "text": string_field("Slide text")
                            },
                            "required": ["slideNumber", "text"],
                            "additionalProperties": false
                        }
                    }
                },
                "required": ["slides"],
                "additionalProperties": false
            }),
        ),
        (
            "contentScore",
            json!({
                "type": "object",
                "properties": {
                    "readability": score_field("Readability score"),
                    "engagement": score_field("Engagement score"),
                    "seoStrength": score_field("SEO strength score"),
                    "keywordDensity": string_field("Short description of keyword density"),
                    "summary": string_field("One sentence assessment")
                },
                "required": ["readability", "engagement", "seoStrength", "keywordDensity", "summary"],
                "additionalProperties": false
            }),
        ),
    ]
}

/// Parameters schema of the repurposing function.
///
/// With `extended` set, the newsletter, carousel and score objects become
/// required properties as well.
pub fn repurpose_tool_schema(extended: bool) -> Value {
    let mut properties = serde_json::Map::new();
    properties.insert("linkedinPosts".into(), linkedin_posts_schema());
    properties.insert("twitterHooks".into(), twitter_hooks_schema());
    properties.insert(
        "metaDescription".into(),
        string_field("SEO meta description, under 160 characters"),
    );
    properties.insert(
        "youtube".into(),
        json!({
            "type": "object",
            "properties": {
                "title": string_field("Under 60 characters"),
                "description": string_field("3-4 sentences")
            },
            "required": ["title", "description"],
            "additionalProperties": false
        }),
    );

    let mut required = vec!["linkedinPosts", "twitterHooks", "metaDescription", "youtube"];
    if extended {
        for (name, schema) in extended_properties() {
            properties.insert(name.into(), schema);
            required.push(name);
        }
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    })
}
