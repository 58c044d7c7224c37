use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::ConfigError;

/// Options shared by the content client and the views.
///
/// ## Examples
/// Default values:
/// ```rs
/// use finx7::SiteOptions;
///
/// let options = SiteOptions::default();
/// assert_eq!(options.page_size, 6);
/// ```
/// Custom values:
/// ```rs
/// use finx7::SiteOptions;
///
/// let options = SiteOptions {
///     dataset: "staging".into(),
///     use_cdn: false,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SiteOptions {
    /// Sanity project the posts are stored in.
    pub project_id: String,
    pub dataset: String,
    /// Dated API version, e.g. `2023-05-03`.
    pub api_version: String,
    /// Query the cached API edge instead of the live API.
    pub use_cdn: bool,

    /// Base URL for the site, used for canonical URLs, e.g. `https://www.finx7.com`.
    pub base_url: Option<String>,

    /// Number of posts on one page of the blog list.
    pub page_size: usize,
    /// Maximum number of posts in the "More Articles" carousel.
    pub related_limit: usize,
    pub words_per_minute: usize,

    /// Endpoint the contact form is relayed to.
    pub form_endpoint: String,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            project_id: "3h3yanyt".to_string(),
            dataset: "production".to_string(),
            api_version: "2023-05-03".to_string(),
            use_cdn: true,
            base_url: Some("https://www.finx7.com".to_string()),
            page_size: 6,
            related_limit: 6,
            words_per_minute: 200,
            form_endpoint: "https://formsubmit.co/info@example.com".to_string(),
        }
    }
}

impl SiteOptions {
    /// Reads options from a TOML file. Keys missing from the file keep their default value.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&raw).map_err(|source| ConfigError::ParseFailed {
            path: PathBuf::from(path),
            source,
        })
    }

    /// Host of the query API, depending on [`SiteOptions::use_cdn`].
    pub fn api_host(&self) -> String {
        let api = if self.use_cdn { "apicdn" } else { "api" };
        format!("https://{}.{}.sanity.io", self.project_id, api)
    }

    pub fn canonical_url(&self, path: &str) -> Option<String> {
        self.base_url
            .as_ref()
            .map(|base| format!("{}{}", base.trim_end_matches('/'), path))
    }
}
