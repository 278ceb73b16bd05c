use std::sync::LazyLock;

use askama::Template;
use html_escape::decode_html_entities;
use regex::Regex;

use crate::date::format_date;
use crate::feed::Item;
use crate::image::resolve_image;

const SUMMARY_CHARS: usize = 120;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// A rendered news card. Displaying it yields the card's HTML, with every
/// text field escaped.
#[derive(Debug, Clone, PartialEq, Template)]
#[template(path = "card.html")]
pub struct Card {
    pub image: Option<String>,
    pub title: String,
    pub link: String,
    pub summary: String,
    pub date: String,
    pub source: String,
}

pub fn render_card(item: &Item, source_name: &str, show_image: bool) -> Card {
    Card {
        image: show_image.then(|| resolve_image(item)),
        title: item
            .title()
            .map(|t| decode_html_entities(t).into_owned())
            .unwrap_or_else(|| "Untitled".to_string()),
        link: item.link().map(safe_link).unwrap_or_else(|| "#".to_string()),
        summary: item.description().map(summarize).unwrap_or_default(),
        date: item.pub_date().map(format_date).unwrap_or_default(),
        source: source_name.to_string(),
    }
}

/// Removes anything that looks like a tag.
pub fn strip_tags(markup: &str) -> String {
    TAG.replace_all(markup, "").into_owned()
}

/// Plain-text teaser: tags stripped, entities decoded, cut to 120
/// characters, then `...`.
pub fn summarize(description: &str) -> String {
    let stripped = strip_tags(description);
    let text: String = decode_html_entities(&stripped)
        .chars()
        .take(SUMMARY_CHARS)
        .collect();
    format!("{}...", text)
}

// Only web links become live anchors
fn safe_link(link: &str) -> String {
    let lower = link.trim_start().to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        link.trim().to_string()
    } else {
        "#".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::PLACEHOLDER_IMAGE;

    fn sample_item() -> Item {
        Item {
            title: Some("Rust 2.0 released".to_string()),
            link: Some("https://news.test/rust".to_string()),
            description: Some("<p>The <b>big</b> news.</p>".to_string()),
            pub_date: Some("2024-03-05T10:00:00Z".to_string()),
            thumbnail: Some("https://img.test/rust.png".to_string()),
            ..Default::default()
        }
    }

    mod summary_tests {
        use super::*;

        #[test]
        fn test_strip_tags() {
            assert_eq!(strip_tags("<p>The <b>big</b> news.</p>"), "The big news.");
        }

        #[test]
        fn test_strip_script_tags() {
            let stripped = strip_tags(r#"<script>alert("x")</script>safe"#);
            assert_eq!(stripped, r#"alert("x")safe"#);
            assert!(!stripped.contains('<'));
        }

        #[test]
        fn test_summarize_short_text() {
            assert_eq!(summarize("<p>Short</p>"), "Short...");
        }

        #[test]
        fn test_summarize_decodes_entities() {
            assert_eq!(
                summarize("<p>Apple&#8217;s chips &amp; more</p>"),
                "Apple\u{2019}s chips & more..."
            );
        }

        #[test]
        fn test_entities_count_as_one_character() {
            let text = format!("{}&amp;tail", "a".repeat(119));
            assert_eq!(summarize(&text), format!("{}&...", "a".repeat(119)));
        }

        #[test]
        fn test_summarize_truncates_at_120_chars() {
            let long = "a".repeat(300);
            let summary = summarize(&long);
            assert_eq!(summary.len(), 123);
            assert!(summary.ends_with("..."));
        }

        #[test]
        fn test_summarize_counts_characters_not_bytes() {
            let long = "é".repeat(200);
            let summary = summarize(&long);
            assert_eq!(summary.chars().count(), 123);
        }
    }

    mod render_tests {
        use super::*;

        #[test]
        fn test_render_full_card() {
            let card = render_card(&sample_item(), "BBC News", true);

            assert_eq!(card.image.as_deref(), Some("https://img.test/rust.png"));
            assert_eq!(card.title, "Rust 2.0 released");
            assert_eq!(card.link, "https://news.test/rust");
            assert_eq!(card.summary, "The big news....");
            assert_eq!(card.date, "Mar 05, 2024");
            assert_eq!(card.source, "BBC News");
        }

        #[test]
        fn test_render_without_image() {
            let card = render_card(&sample_item(), "TechCrunch", false);
            assert_eq!(card.image, None);
        }

        #[test]
        fn test_placeholder_image_when_shown() {
            let card = render_card(&Item::default(), "BBC News", true);
            assert_eq!(card.image.as_deref(), Some(PLACEHOLDER_IMAGE));
        }

        #[test]
        fn test_render_empty_item() {
            let card = render_card(&Item::default(), "CNN Business", false);

            assert_eq!(card.title, "Untitled");
            assert_eq!(card.link, "#");
            assert_eq!(card.summary, "");
            assert_eq!(card.date, "");
        }

        #[test]
        fn test_non_http_link_is_neutralised() {
            let item = Item {
                link: Some("javascript:alert(1)".to_string()),
                ..Default::default()
            };
            assert_eq!(render_card(&item, "X", false).link, "#");
        }

        #[test]
        fn test_html_escapes_text() {
            let item = Item {
                title: Some("<script>alert(1)</script>".to_string()),
                description: Some("a &lt;b&gt; c".to_string()),
                ..Default::default()
            };

            let card = render_card(&item, "Feed", false);
            assert_eq!(card.summary, "a <b> c...");

            let html = card.render().unwrap();

            assert!(!html.contains("<script>"));
            assert!(html.contains("&lt;script&gt;"));
            assert!(!html.contains("<b>"));
            assert!(html.contains("<p>a &lt;b&gt; c...</p>"));
            assert!(!html.contains("<img"));
        }

        #[test]
        fn test_decoded_text_is_escaped_once() {
            let item = Item {
                title: Some("Q&amp;A: Apple&#8217;s chips".to_string()),
                description: Some("<p>Apple&#8217;s chips &amp; more</p>".to_string()),
                ..Default::default()
            };

            let card = render_card(&item, "Feed", false);
            assert_eq!(card.title, "Q&A: Apple\u{2019}s chips");

            let html = card.render().unwrap();
            assert!(html.contains("<p>Apple\u{2019}s chips &amp; more...</p>"));
            assert!(html.contains(">Q&amp;A: Apple\u{2019}s chips</a>"));
            assert!(!html.contains("&amp;amp;"));
            assert!(!html.contains("#8217"));
        }

        #[test]
        fn test_html_contains_image_when_shown() {
            let html = render_card(&sample_item(), "BBC News", true).render().unwrap();

            assert!(html.contains("<img"));
            assert!(html.contains("news-card"));
            assert!(html.contains("Rust 2.0 released"));
            assert!(html.contains("Mar 05, 2024"));
        }
    }
}
