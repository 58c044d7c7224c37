//! Rich-text bodies, stored as an ordered list of blocks with inline spans.
use maud::{Markup, Render, html};
use rustc_hash::FxHashMap;
use serde::Deserialize;

use super::null_as_default;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(rename = "_type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<Span>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mark_defs: Vec<MarkDef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Span {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub marks: Vec<String>,
}

/// Annotation referenced by key from [`Span::marks`], e.g. a link.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarkDef {
    #[serde(rename = "_key", default, deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(rename = "_type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default)]
    pub href: Option<String>,
}

/// Visual treatment of a block.
///
/// | style        | treatment  |
/// |--------------|------------|
/// | `h1`..`h4`   | heading    |
/// | `normal`     | paragraph  |
/// | `blockquote` | quote      |
/// | anything else, or a non-text block | [`BlockStyle::Fallback`], rendered as a paragraph |
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockStyle {
    Heading(u8),
    Normal,
    Blockquote,
    Fallback(String),
}

impl BlockStyle {
    pub fn of(block: &Block) -> Self {
        if block.kind != "block" {
            return BlockStyle::Fallback(block.kind.clone());
        }

        match block.style.as_deref().unwrap_or("normal") {
            "h1" => BlockStyle::Heading(1),
            "h2" => BlockStyle::Heading(2),
            "h3" => BlockStyle::Heading(3),
            "h4" => BlockStyle::Heading(4),
            "normal" => BlockStyle::Normal,
            "blockquote" => BlockStyle::Blockquote,
            other => BlockStyle::Fallback(other.to_string()),
        }
    }
}

/// Every text run of every block, joined with single spaces.
pub fn plain_text(blocks: &[Block]) -> String {
    blocks
        .iter()
        .flat_map(|block| block.children.iter())
        .map(|span| span.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Approximate reading time, e.g. `"3 min read"`. Never less than one minute.
pub fn reading_time(blocks: &[Block], words_per_minute: usize) -> String {
    let words = plain_text(blocks).split_whitespace().count();
    let minutes = (words as f64 / words_per_minute.max(1) as f64).round() as usize;

    format!("{} min read", minutes.max(1))
}

impl Block {
    fn render_spans(&self) -> Markup {
        let links: FxHashMap<&str, &str> = self
            .mark_defs
            .iter()
            .filter(|def| def.kind == "link")
            .filter_map(|def| def.href.as_deref().map(|href| (def.key.as_str(), href)))
            .collect();

        html! {
            @for span in &self.children {
                (render_marked(&span.text, &span.marks, &links))
            }
        }
    }
}

fn render_marked(text: &str, marks: &[String], links: &FxHashMap<&str, &str>) -> Markup {
    let Some((mark, rest)) = marks.split_first() else {
        return html! { (text) };
    };

    let inner = render_marked(text, rest, links);
    match mark.as_str() {
        "strong" => html! { strong { (inner) } },
        "em" => html! { em { (inner) } },
        "code" => html! { code { (inner) } },
        "underline" => html! { span.underline { (inner) } },
        "strike-through" => html! { s { (inner) } },
        key => match links.get(key) {
            Some(href) => html! { a."text-blue-600".underline href=(href) { (inner) } },
            None => inner,
        },
    }
}

impl Render for Block {
    fn render(&self) -> Markup {
        let spans = self.render_spans();

        match BlockStyle::of(self) {
            BlockStyle::Heading(1) => html! { h1."text-4xl".font-extrabold."mb-6"."text-gray-900" { (spans) } },
            BlockStyle::Heading(2) => html! { h2."text-3xl".font-semibold."mb-5"."text-gray-900" { (spans) } },
            BlockStyle::Heading(3) => html! { h3."text-2xl".font-semibold."mb-4"."text-gray-800" { (spans) } },
            BlockStyle::Heading(_) => html! { h4."text-xl".font-semibold."mb-3"."text-gray-800" { (spans) } },
            BlockStyle::Blockquote => html! {
                blockquote."border-l-4"."border-blue-500"."pl-4".italic."my-6"."text-gray-600" { (spans) }
            },
            BlockStyle::Normal | BlockStyle::Fallback(_) => html! {
                p."mb-6".leading-relaxed."text-gray-700" { (spans) }
            },
        }
    }
}

/// Renders a whole body, block by block.
pub fn render_body(blocks: &[Block]) -> Markup {
    html! {
        @for block in blocks {
            (block)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paragraph_of_words(count: usize) -> Block {
        Block {
            kind: "block".into(),
            style: Some("normal".into()),
            children: vec![Span {
                text: vec!["word"; count].join(" "),
                marks: vec![],
            }],
            mark_defs: vec![],
        }
    }

    fn styled(style: &str, text: &str) -> Block {
        Block {
            kind: "block".into(),
            style: Some(style.into()),
            children: vec![Span {
                text: text.into(),
                marks: vec![],
            }],
            mark_defs: vec![],
        }
    }

    #[test]
    fn reading_time_floors_at_one_minute() {
        assert_eq!(reading_time(&[], 200), "1 min read");
        assert_eq!(reading_time(&[paragraph_of_words(199)], 200), "1 min read");
        assert_eq!(reading_time(&[paragraph_of_words(400)], 200), "2 min read");
    }

    #[test]
    fn reading_time_rounds_to_nearest_minute() {
        assert_eq!(reading_time(&[paragraph_of_words(299)], 200), "1 min read");
        assert_eq!(reading_time(&[paragraph_of_words(300)], 200), "2 min read");
        assert_eq!(
            reading_time(&[paragraph_of_words(350), paragraph_of_words(350)], 200),
            "4 min read"
        );
    }

    #[test]
    fn plain_text_joins_runs_across_blocks() {
        let blocks = vec![styled("h1", "Title"), styled("normal", "first"), styled("normal", "second")];
        assert_eq!(plain_text(&blocks), "Title first second");
    }

    #[test]
    fn styles_map_to_treatments() {
        assert_eq!(BlockStyle::of(&styled("h2", "")), BlockStyle::Heading(2));
        assert_eq!(BlockStyle::of(&styled("normal", "")), BlockStyle::Normal);
        assert_eq!(BlockStyle::of(&styled("blockquote", "")), BlockStyle::Blockquote);
        assert_eq!(
            BlockStyle::of(&styled("h6", "")),
            BlockStyle::Fallback("h6".into())
        );

        let image: Block = serde_json::from_value(json!({ "_type": "image" })).unwrap();
        assert_eq!(BlockStyle::of(&image), BlockStyle::Fallback("image".into()));
    }

    #[test]
    fn unknown_styles_render_as_paragraphs() {
        let html = render_body(&[styled("h6", "Tiny heading")]).into_string();
        assert!(html.starts_with("<p "));
        assert!(html.contains("Tiny heading"));
    }

    #[test]
    fn headings_and_quotes_render_their_tags() {
        let html = render_body(&[styled("h3", "Section"), styled("blockquote", "Quoted")]).into_string();
        assert!(html.contains("<h3 "));
        assert!(html.contains("<blockquote "));
    }

    #[test]
    fn marks_and_links_render_inline() {
        let block: Block = serde_json::from_value(json!({
            "_type": "block",
            "style": "normal",
            "markDefs": [{ "_key": "l1", "_type": "link", "href": "https://example.com" }],
            "children": [
                { "_type": "span", "text": "Bold", "marks": ["strong"] },
                { "_type": "span", "text": "site", "marks": ["l1", "em"] },
                { "_type": "span", "text": "plain", "marks": ["sparkle"] }
            ]
        }))
        .unwrap();

        let html = block.render().into_string();
        assert!(html.contains("<strong>Bold</strong>"));
        assert!(html.contains("href=\"https://example.com\""));
        assert!(html.contains("<em>site</em>"));
        assert!(html.contains("plain"));
    }

    #[test]
    fn null_rich_text_fields_are_empty() {
        let blocks: Vec<Block> = serde_json::from_value(json!([
            { "_type": "block", "style": "normal", "children": null, "markDefs": null },
            {
                "_type": "block",
                "markDefs": [{ "_key": null, "_type": "link", "href": null }],
                "children": [{ "_type": "span", "text": null, "marks": null }, { "text": "kept" }]
            }
        ]))
        .unwrap();

        assert!(blocks[0].children.is_empty());
        assert!(blocks[0].mark_defs.is_empty());
        assert_eq!(blocks[1].children[0].text, "");
        assert!(blocks[1].children[0].marks.is_empty());
        assert_eq!(plain_text(&blocks), " kept");
        assert!(render_body(&blocks).into_string().contains("kept"));
    }
}
