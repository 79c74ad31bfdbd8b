//! Markdown export of a finished result.

use crate::types::{RepurposedContent, ToneOption};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// File name for an export created at `now`, e.g. `blog-repurposer-2025-03-01-14-05.md`.
pub fn export_file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    format!("blog-repurposer-{}.md", now.format("%Y-%m-%d-%H-%M"))
}

fn section(lines: &mut Vec<String>, heading: &str) {
    lines.push("---".into());
    lines.push(String::new());
    lines.push(format!("## {heading}"));
    lines.push(String::new());
}

fn subsection(lines: &mut Vec<String>, heading: impl Display, body: &str) {
    lines.push(format!("### {heading}"));
    lines.push(String::new());
    lines.push(body.to_string());
    lines.push(String::new());
}

/// Renders every asset of `result` as one Markdown document.
///
/// Newsletter, carousel and score sections only appear when present.
pub fn render_markdown<Tz: TimeZone>(
    result: &RepurposedContent,
    url: &str,
    tone: ToneOption,
    generated_at: &DateTime<Tz>,
) -> String
where
    Tz::Offset: Display,
{
    let meta = &result.blog_meta;
    let mut lines = vec![
        "# Blog Content Repurpose".to_string(),
        format!("Generated on: {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
        format!("Original URL: {url}"),
        String::new(),
        "## Blog Details".to_string(),
        format!("- Title: {}", meta.title),
        format!("- Word Count: {}", meta.word_count),
        format!("- Generated Tone: {}", tone.label()),
        String::new(),
    ];

    section(&mut lines, "LinkedIn Posts");
    for post in &result.linkedin_posts {
        subsection(&mut lines, post.angle.as_str(), &post.content);
    }

    section(&mut lines, "Twitter Thread Hooks");
    for hook in &result.twitter_hooks {
        subsection(&mut lines, hook.hook_type.as_str(), &hook.content);
    }

    section(&mut lines, "Meta Description");
    lines.push(result.meta_description.clone());
    lines.push(String::new());

    section(&mut lines, "YouTube Video Content");
    subsection(&mut lines, "Title", &result.youtube.title);
    subsection(&mut lines, "Description", &result.youtube.description);

    if let Some(email) = &result.email_newsletter {
        section(&mut lines, "Email Newsletter");
        subsection(&mut lines, "Subject Line", &email.subject_line);
        subsection(&mut lines, "Preview Text", &email.preview_text);
        subsection(&mut lines, "Body", &email.body);
    }

    if let Some(carousel) = &result.instagram_carousel {
        section(&mut lines, "Instagram Carousel");
        for slide in &carousel.slides {
            subsection(&mut lines, format!("Slide {}", slide.slide_number), &slide.text);
        }
    }

    if let Some(score) = &result.content_score {
        section(&mut lines, "Content Score");
        lines.push(format!("- Readability: {}/100", score.readability));
        lines.push(format!("- Engagement: {}/100", score.engagement));
        lines.push(format!("- SEO Strength: {}/100", score.seo_strength));
        lines.push(format!("- Keyword Density: {}", score.keyword_density));
        lines.push(format!("- Summary: {}", score.summary));
    }

    lines.join("\n")
}
