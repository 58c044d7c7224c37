//! Summary tile of one post, linking to its detail page.
//!
//! Every optional field is either rendered or left out entirely, never replaced by a placeholder.
use maud::{Markup, html};

use crate::client::ContentApi;
use crate::content::{Entry, format_date};
use crate::routing::Route;

pub fn entry_card(entry: &Entry, images: &dyn ContentApi) -> Markup {
    let href = Route::BlogPost {
        id: entry.id.clone(),
    }
    .url();
    let main_image = entry
        .main_image
        .as_ref()
        .and_then(|image| images.image_url(image).map(|src| (src, image.alt_or(&entry.title))));

    html! {
        a.bg-white.cursor-pointer.rounded-lg.shadow-lg.overflow-hidden.flex.flex-col.group href=(href) data-entry=(entry.id) {
            @if let Some((src, alt)) = main_image {
                div.relative."h-36"."sm:h-44".overflow-hidden data-block="image" {
                    img."w-full"."h-full".object-cover src=(src) alt=(alt) loading="lazy";
                }
            }

            div."p-3"."sm:p-4".flex.flex-col."flex-1" {
                @if !entry.categories.is_empty() {
                    div.flex.flex-wrap."gap-1"."mb-1" data-block="categories" {
                        @for category in &entry.categories {
                            span."text-xs"."text-blue-400"."bg-blue-900/30"."px-2"."py-0.5".rounded-full { (category.title) }
                        }
                    }
                }

                h3.font-semibold.text-black."line-clamp-1"."mb-1" { (entry.title) }

                @if let Some(excerpt) = &entry.excerpt {
                    p."text-gray-500"."text-sm"."line-clamp-1"."flex-grow" { (excerpt) }
                }

                div.flex.items-center.justify-between."text-xs"."text-gray-400"."mt-2" {
                    @if let Some(author) = &entry.author {
                        span.flex.items-center."gap-2" data-block="author" {
                            @if let Some(image) = &author.image {
                                @if let Some(src) = images.image_url(image) {
                                    img."w-6"."h-6".rounded-full src=(src) alt=(image.alt_or(&author.name)) loading="lazy";
                                }
                            }
                            span { (author.name) }
                        }
                    }
                    @if let Some(date) = &entry.published_at {
                        time datetime=(date.to_rfc3339()) data-block="date" { (format_date(date)) }
                    }
                }

                span."mt-1".text-black.font-medium { "Read More →" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MemoryContent;
    use serde_json::{Value, json};

    fn render(document: Value) -> String {
        let entry: Entry = serde_json::from_value(document).unwrap();
        entry_card(&entry, &MemoryContent::new(vec![])).into_string()
    }

    fn complete() -> Value {
        json!({
            "_id": "abc",
            "title": "Saving early",
            "excerpt": "Compound interest, explained.",
            "publishedAt": "2025-02-03T10:00:00Z",
            "mainImage": { "asset": { "_ref": "image-aaa-640x480-png" } },
            "author": { "name": "Dana", "image": { "asset": { "_ref": "image-bbb-64x64-jpg" } } },
            "categories": [{ "title": "Savings" }]
        })
    }

    fn without(fields: &[&str]) -> Value {
        let mut document = complete();
        for field in fields {
            document.as_object_mut().unwrap().remove(*field);
        }
        document
    }

    #[test]
    fn complete_entry_renders_every_block() {
        let html = render(complete());

        assert!(html.contains(r#"href="/blog/abc""#));
        assert!(html.contains(r#"data-block="image""#));
        assert!(html.contains(r#"data-block="author""#));
        assert!(html.contains(r#"data-block="date""#));
        assert!(html.contains(r#"data-block="categories""#));
        assert!(html.contains("2/3/2025"));
        assert!(html.contains("https://cdn.sanity.io/images/memory/fixtures/aaa-640x480.png"));
    }

    #[test]
    fn absent_fields_are_omitted_independently_and_together() {
        let cases: &[(&[&str], &[&str])] = &[
            (&["mainImage"], &["image"]),
            (&["author"], &["author"]),
            (&["publishedAt"], &["date"]),
            (&["categories"], &["categories"]),
            (&["mainImage", "author"], &["image", "author"]),
            (
                &["mainImage", "author", "publishedAt", "categories"],
                &["image", "author", "date", "categories"],
            ),
        ];

        for (missing, omitted) in cases {
            let html = render(without(missing));
            for block in ["image", "author", "date", "categories"] {
                let present = html.contains(&format!(r#"data-block="{}""#, block));
                assert_eq!(present, !omitted.contains(&block), "{:?} -> {}", missing, block);
            }
            assert!(html.contains("Saving early"));
        }
    }

    #[test]
    fn author_without_image_keeps_the_name() {
        let mut document = complete();
        document["author"] = json!({ "name": "Dana" });

        let html = render(document);
        assert!(html.contains(r#"data-block="author""#));
        assert!(html.contains("Dana"));
        assert!(!html.contains("bbb-64x64"));
    }

    #[test]
    fn image_alt_text_is_used_when_present() {
        let mut document = complete();
        document["mainImage"]["alt"] = json!("Piggy bank on a desk");

        let html = render(document);
        assert!(html.contains(r#"alt="Piggy bank on a desk""#));
        assert!(html.contains(r#"alt="Dana""#));
    }

    #[test]
    fn empty_categories_are_omitted() {
        let mut document = complete();
        document["categories"] = json!([]);
        assert!(!render(document).contains(r#"data-block="categories""#));
    }
}
