//! Blog posts as stored in the remote content store.
//!
//! Posts are created and edited outside of this crate, which only reads them. Optional fields that are missing or
//! malformed in the remote data deserialize to `None` or an empty list, so that views can simply omit them.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

pub mod portable_text;

pub use portable_text::{Block, BlockStyle, MarkDef, Span, plain_text, reading_time};

/// Reading time shown for a post whose body is missing altogether, as opposed to empty.
pub const UNKNOWN_READING_TIME: &str = "2 min read";

/// One blog post, with every field the list and detail views need.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Opaque identifier, used verbatim in `/blog/[id]`.
    ///
    /// The single-entry query does not project it, in which case it is empty until [`Entry::with_id`] is called.
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    /// `None` when the post has no body at all. An empty body is `Some(vec![])`.
    #[serde(default)]
    pub body: Option<Vec<Block>>,
    #[serde(default)]
    pub main_image: Option<ImageRef>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default, deserialize_with = "non_null_items")]
    pub categories: Vec<Category>,
}

impl Entry {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        if self.id.is_empty() {
            self.id = id.into();
        }
        self
    }

    pub fn body(&self) -> &[Block] {
        self.body.as_deref().unwrap_or_default()
    }

    pub fn reading_time(&self, words_per_minute: usize) -> String {
        match &self.body {
            Some(blocks) => reading_time(blocks, words_per_minute),
            None => UNKNOWN_READING_TIME.to_string(),
        }
    }
}

/// The partial projection used for the "More Articles" carousel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub main_image: Option<ImageRef>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Author {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub image: Option<ImageRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
}

/// A reference to an image asset, resolved to a URL by [`ContentApi::image_url`](crate::client::ContentApi::image_url).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageRef {
    #[serde(default)]
    pub asset: AssetRef,
    #[serde(default)]
    pub alt: Option<String>,
}

impl ImageRef {
    pub fn from_ref(asset_ref: impl Into<String>) -> Self {
        Self {
            asset: AssetRef {
                reference: Some(asset_ref.into()),
                url: None,
            },
            alt: None,
        }
    }

    /// The asset's own alt text, or `fallback` when it has none.
    pub fn alt_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.alt.as_deref().filter(|alt| !alt.trim().is_empty()).unwrap_or(fallback)
    }
}

/// Either an unresolved asset reference (`_ref`) or an already expanded asset with a `url`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AssetRef {
    #[serde(rename = "_ref", default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Short locale-neutral date, e.g. `3/14/2025`.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Dangling references resolve to `null` inside projected arrays.
fn non_null_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items = Option::<Vec<Option<T>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items.into_iter().flatten().collect())
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    if let Ok(date) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(date.with_timezone(&Utc)));
    }

    Ok(NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_entry_deserializes() {
        let entry: Entry = serde_json::from_value(json!({
            "_id": "abc",
            "title": "Budgeting 101",
            "excerpt": "Where does the money go?",
            "categories": [{ "title": "Budgeting" }, null, { "title": "Basics" }],
            "publishedAt": "2025-03-14T09:30:00.000Z",
            "mainImage": { "_type": "image", "asset": { "_ref": "image-a1b2-800x600-jpg", "_type": "reference" } },
            "author": { "name": "Dana", "image": null },
            "body": [{ "_type": "block", "style": "normal", "children": [{ "_type": "span", "text": "Hello" }] }]
        }))
        .unwrap();

        assert_eq!(entry.id, "abc");
        assert_eq!(entry.categories.len(), 2);
        assert_eq!(entry.author.as_ref().unwrap().name, "Dana");
        assert!(entry.author.as_ref().unwrap().image.is_none());
        assert_eq!(
            entry.main_image.as_ref().unwrap().asset.reference.as_deref(),
            Some("image-a1b2-800x600-jpg")
        );
        assert_eq!(format_date(&entry.published_at.unwrap()), "3/14/2025");
        assert_eq!(entry.body().len(), 1);
    }

    #[test]
    fn missing_and_null_fields_are_omitted() {
        let entry: Entry = serde_json::from_value(json!({
            "_id": "bare",
            "title": "Bare",
            "categories": null,
            "body": null,
            "author": null,
            "publishedAt": "not a date"
        }))
        .unwrap();

        assert!(entry.excerpt.is_none());
        assert!(entry.main_image.is_none());
        assert!(entry.author.is_none());
        assert!(entry.published_at.is_none());
        assert!(entry.categories.is_empty());
        assert!(entry.body.is_none());
    }

    #[test]
    fn missing_body_has_unknown_reading_time() {
        let missing: Entry = serde_json::from_value(json!({ "_id": "a", "title": "No body" })).unwrap();
        assert!(missing.body().is_empty());
        assert_eq!(missing.reading_time(200), "2 min read");

        let empty: Entry = serde_json::from_value(json!({ "_id": "b", "title": "Empty", "body": [] })).unwrap();
        assert_eq!(empty.reading_time(200), "1 min read");
    }

    #[test]
    fn image_alt_falls_back_when_blank() {
        let image: ImageRef = serde_json::from_value(json!({
            "asset": { "_ref": "image-a1b2-800x600-jpg" },
            "alt": "Skyline at dusk"
        }))
        .unwrap();
        assert_eq!(image.alt_or("Post title"), "Skyline at dusk");

        let blank = ImageRef {
            alt: Some("  ".into()),
            ..ImageRef::from_ref("image-a1b2-800x600-jpg")
        };
        assert_eq!(blank.alt_or("Post title"), "Post title");
    }

    #[test]
    fn date_only_published_at_is_accepted() {
        let summary: EntrySummary = serde_json::from_value(json!({
            "_id": "d",
            "title": "Dated",
            "publishedAt": "2024-12-01"
        }))
        .unwrap();

        assert_eq!(format_date(&summary.published_at.unwrap()), "12/1/2024");
    }

    #[test]
    fn with_id_only_fills_missing_ids() {
        let entry: Entry = serde_json::from_value(json!({ "title": "No id" })).unwrap();
        assert_eq!(entry.with_id("abc").id, "abc");

        let entry: Entry = serde_json::from_value(json!({ "_id": "x", "title": "Id" })).unwrap();
        assert_eq!(entry.with_id("abc").id, "x");
    }
}
