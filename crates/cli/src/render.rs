//! Terminal formatting for history entries.

use chrono::{DateTime, Local};
use repurpose::{export::render_markdown, HistoryEntry};

fn recorded_at(entry: &HistoryEntry) -> DateTime<Local> {
    DateTime::from_timestamp_millis(entry.timestamp)
        .map(|t| t.with_timezone(&Local))
        .unwrap_or_else(Local::now)
}

/// One line per entry: position, local time, tone and title, then the URL.
pub fn history_line(index: usize, entry: &HistoryEntry) -> String {
    format!(
        "[{index}] {}  {:<12}  {}\n    {}",
        recorded_at(entry).format("%Y-%m-%d %H:%M"),
        entry.tone.label(),
        entry.preview_title,
        entry.url
    )
}

/// The Markdown export of an entry, dated when it was generated.
pub fn entry_markdown(entry: &HistoryEntry) -> String {
    render_markdown(&entry.result, &entry.url, entry.tone, &recorded_at(entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use repurpose::{types::GeneratedAssets, BlogMeta, ToneOption};
    use repurpose_test_utils::valid_assets_json;

    fn entry(timestamp: i64) -> HistoryEntry {
        let assets: GeneratedAssets = serde_json::from_value(valid_assets_json(true)).unwrap();
        let result = assets.into_content(BlogMeta {
            title: "Shipping Rust".into(),
            word_count: 512,
            ..BlogMeta::default()
        });
        HistoryEntry::from_result(
            "https://blog.example.com/posts/shipping-rust",
            ToneOption::B2bCasual,
            result,
            timestamp,
        )
    }

    #[test]
    fn history_line_shows_position_tone_and_title() {
        let line = history_line(3, &entry(1_741_180_800_000));
        assert!(line.starts_with("[3] 2025-03-0"));
        assert!(line.contains("B2B – Casual"));
        assert!(line.contains("Shipping Rust"));
        assert!(line.ends_with("    https://blog.example.com/posts/shipping-rust"));
    }

    #[test]
    fn entry_markdown_includes_extended_sections() {
        let doc = entry_markdown(&entry(1_741_180_800_000));
        assert!(doc.contains("Original URL: https://blog.example.com/posts/shipping-rust"));
        assert!(doc.contains("- Word Count: 512"));
        assert!(doc.contains("## Email Newsletter"));
        assert!(doc.contains("### Slide 3"));
        assert!(doc.contains("- Readability: 82/100"));
    }
}
