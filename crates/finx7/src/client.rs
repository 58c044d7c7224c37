//! Access to the remote content store.
//!
//! Views never talk HTTP directly: they go through the [`ContentApi`] trait, implemented by [`SanityClient`] for the
//! real store and by [`MemoryContent`] for fixtures and tests.
use std::time::Instant;

use log::{debug, error};
use serde::Deserialize;
use serde_json::Value;

use crate::content::{Entry, EntrySummary, ImageRef};
use crate::errors::ContentError;
use crate::logging::{FormatElapsedTimeOptions, format_elapsed_time};
use crate::options::SiteOptions;

mod memory;

pub use memory::MemoryContent;

/// The three query shapes the views issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Every post, newest first, with the projection used by the list view.
    AllEntries,
    /// One post by id, with its full body and resolved references.
    EntryById { id: String },
    /// Up to `limit` posts other than `exclude`, newest first.
    RelatedEntries { exclude: String, limit: usize },
}

impl Query {
    pub fn name(&self) -> &'static str {
        match self {
            Query::AllEntries => "all-entries",
            Query::EntryById { .. } => "entry-by-id",
            Query::RelatedEntries { .. } => "related-entries",
        }
    }

    /// The GROQ text of the query. Parameters are bound separately, see [`Query::params`].
    pub fn groq(&self) -> String {
        match self {
            Query::AllEntries => concat!(
                r#"*[_type == "post"] | order(publishedAt desc) "#,
                "{_id, title, excerpt, categories[]->{title}, publishedAt, mainImage, author->{name, image}, body}"
            )
            .to_string(),
            Query::EntryById { .. } => concat!(
                r#"*[_type == "post" && _id == $id][0]"#,
                "{_id, title, excerpt, body, mainImage, publishedAt, author->{name, image}, categories[]->{title}}"
            )
            .to_string(),
            Query::RelatedEntries { limit, .. } => format!(
                r#"*[_type == "post" && _id != $id] | order(publishedAt desc) [0...{}]{{_id, title, mainImage, publishedAt}}"#,
                limit
            ),
        }
    }

    /// Parameter bindings, as `$name` keys and JSON-encoded values.
    pub fn params(&self) -> Vec<(String, String)> {
        match self {
            Query::AllEntries => vec![],
            Query::EntryById { id } | Query::RelatedEntries { exclude: id, .. } => {
                vec![("$id".to_string(), Value::String(id.clone()).to_string())]
            }
        }
    }
}

/// A remote content store answering structured queries.
pub trait ContentApi: Send + Sync {
    /// Runs a query and returns its raw JSON result (object, array, or null).
    fn fetch(&self, query: &Query) -> Result<Value, ContentError>;

    /// Resolves an image reference to a fetchable URL.
    fn image_url(&self, image: &ImageRef) -> Option<String>;

    fn fetch_entries(&self) -> Result<Vec<Entry>, ContentError> {
        let query = Query::AllEntries;
        let entries: Option<Vec<Entry>> = decode(&query, self.fetch(&query)?)?;
        Ok(entries.unwrap_or_default())
    }

    fn fetch_entry(&self, id: &str) -> Result<Entry, ContentError> {
        let query = Query::EntryById { id: id.to_string() };
        let entry: Option<Entry> = decode(&query, self.fetch(&query)?)?;

        entry
            .map(|entry| entry.with_id(id))
            .ok_or_else(|| ContentError::NotFound { id: id.to_string() })
    }

    fn fetch_related(&self, exclude: &str, limit: usize) -> Result<Vec<EntrySummary>, ContentError> {
        let query = Query::RelatedEntries {
            exclude: exclude.to_string(),
            limit,
        };
        let related: Option<Vec<EntrySummary>> = decode(&query, self.fetch(&query)?)?;
        Ok(related.unwrap_or_default())
    }
}

fn decode<T: for<'de> Deserialize<'de>>(query: &Query, value: Value) -> Result<T, ContentError> {
    serde_json::from_value(value).map_err(|source| ContentError::Decode {
        query: query.name(),
        source,
    })
}

/// Builds the CDN URL of an image asset.
///
/// Asset references look like `image-<hash>-<width>x<height>-<ext>`, and map to `<hash>-<width>x<height>.<ext>`.
pub fn sanity_image_url(project_id: &str, dataset: &str, image: &ImageRef) -> Option<String> {
    if let Some(url) = &image.asset.url {
        return Some(url.clone());
    }

    let reference = image.asset.reference.as_deref()?;
    let (name, extension) = reference.strip_prefix("image-")?.rsplit_once('-')?;

    Some(format!(
        "https://cdn.sanity.io/images/{}/{}/{}.{}",
        project_id, dataset, name, extension
    ))
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
}

/// Blocking client for the Sanity HTTP query API.
pub struct SanityClient {
    agent: ureq::Agent,
    project_id: String,
    dataset: String,
    query_url: String,
}

impl SanityClient {
    pub fn new(options: &SiteOptions) -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
            project_id: options.project_id.clone(),
            dataset: options.dataset.clone(),
            query_url: format!(
                "{}/v{}/data/query/{}",
                options.api_host(),
                options.api_version,
                options.dataset
            ),
        }
    }

    pub fn query_url(&self) -> &str {
        &self.query_url
    }

    fn request(&self, query: &Query) -> Result<Value, ContentError> {
        let mut request = self.agent.get(&self.query_url).query("query", query.groq());
        for (key, value) in query.params() {
            request = request.query(key, value);
        }

        let mut response = request.call().map_err(|err| request_error(query, err))?;

        let raw = response
            .body_mut()
            .read_to_string()
            .map_err(|err| request_error(query, err))?;

        decode_envelope(query, &raw)
    }
}

fn request_error(query: &Query, err: ureq::Error) -> ContentError {
    match err {
        ureq::Error::StatusCode(status) => ContentError::Status {
            query: query.name(),
            status,
        },
        source => ContentError::Request {
            query: query.name(),
            source,
        },
    }
}

/// Unwraps the `result` of a query response. A response without one yields `null`.
fn decode_envelope(query: &Query, raw: &str) -> Result<Value, ContentError> {
    let envelope: QueryResponse = serde_json::from_str(raw).map_err(|source| ContentError::Decode {
        query: query.name(),
        source,
    })?;

    Ok(envelope.result)
}

impl ContentApi for SanityClient {
    fn fetch(&self, query: &Query) -> Result<Value, ContentError> {
        let start = Instant::now();
        let result = self.request(query);

        match &result {
            Ok(_) => debug!(
                "{} resolved in {}",
                query.name(),
                format_elapsed_time(start.elapsed(), &FormatElapsedTimeOptions::default())
            ),
            Err(err) => error!("{}: {}", query.name(), err),
        }

        result
    }

    fn image_url(&self, image: &ImageRef) -> Option<String> {
        sanity_image_url(&self.project_id, &self.dataset, image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn related_query_binds_the_excluded_id() {
        let query = Query::RelatedEntries {
            exclude: "abc".into(),
            limit: 6,
        };

        assert!(query.groq().contains("_id != $id"));
        assert!(query.groq().contains("[0...6]"));
        assert_eq!(query.params(), vec![("$id".to_string(), "\"abc\"".to_string())]);
    }

    #[test]
    fn params_are_json_encoded() {
        let query = Query::EntryById {
            id: "say \"hi\"".into(),
        };
        assert_eq!(query.params()[0].1, r#""say \"hi\"""#);
        assert!(Query::AllEntries.params().is_empty());
    }

    #[test]
    fn image_references_resolve_to_cdn_urls() {
        let image = ImageRef::from_ref("image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg");

        assert_eq!(
            sanity_image_url("3h3yanyt", "production", &image).as_deref(),
            Some("https://cdn.sanity.io/images/3h3yanyt/production/Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000.jpg")
        );
    }

    #[test]
    fn malformed_references_do_not_resolve() {
        assert!(sanity_image_url("p", "d", &ImageRef::from_ref("file-abc-pdf")).is_none());
        assert!(sanity_image_url("p", "d", &ImageRef::from_ref("image-nodash")).is_none());
    }

    #[test]
    fn response_result_is_unwrapped() {
        let result = decode_envelope(&Query::AllEntries, r#"{"ms":4,"query":"*","result":[{"_id":"a"}]}"#).unwrap();
        assert_eq!(result, serde_json::json!([{ "_id": "a" }]));
    }

    #[test]
    fn response_without_result_is_null() {
        let query = Query::EntryById { id: "gone".into() };
        assert_eq!(decode_envelope(&query, r#"{"ms":3}"#).unwrap(), Value::Null);
        assert_eq!(decode_envelope(&query, r#"{"result":null}"#).unwrap(), Value::Null);
    }

    #[test]
    fn garbled_response_is_a_decode_error() {
        let err = decode_envelope(&Query::AllEntries, "<html>Bad gateway</html>").unwrap_err();
        assert!(matches!(err, ContentError::Decode { query: "all-entries", .. }));
    }

    #[test]
    fn http_status_errors_keep_the_status() {
        let query = Query::RelatedEntries {
            exclude: "abc".into(),
            limit: 6,
        };

        let err = request_error(&query, ureq::Error::StatusCode(404));
        assert!(matches!(err, ContentError::Status { query: "related-entries", status: 404 }));

        let err = request_error(&query, ureq::Error::ConnectionFailed);
        assert!(matches!(err, ContentError::Request { query: "related-entries", .. }));
    }

    #[test]
    fn client_targets_the_configured_dataset() {
        let client = SanityClient::new(&SiteOptions::default());
        assert_eq!(
            client.query_url(),
            "https://3h3yanyt.apicdn.sanity.io/v2023-05-03/data/query/production"
        );
    }
}
