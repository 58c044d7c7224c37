use serde_json::{Value, json};

use crate::client::{ContentApi, MemoryContent, Query};
use crate::content::ImageRef;
use crate::errors::ContentError;

pub(crate) fn post(i: usize) -> Value {
    json!({
        "_id": format!("post-{}", i),
        "title": format!("Post {}", i),
        "excerpt": format!("Excerpt {}", i),
        "publishedAt": format!("2025-01-{:02}T08:00:00Z", i + 1),
        "body": [{ "_type": "block", "style": "normal", "children": [{ "_type": "span", "text": "A few words here." }] }]
    })
}

/// `count` posts, `post-0` being the oldest.
pub(crate) fn posts(count: usize) -> MemoryContent {
    MemoryContent::new((0..count).map(post).collect())
}

/// A content store that is always unavailable.
pub(crate) struct Offline;

impl ContentApi for Offline {
    fn fetch(&self, query: &Query) -> Result<Value, ContentError> {
        Err(ContentError::Status {
            query: query.name(),
            status: 503,
        })
    }

    fn image_url(&self, _image: &ImageRef) -> Option<String> {
        None
    }
}
