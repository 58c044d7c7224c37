//! Error types for Finx7.
use std::fmt::{self, Debug, Formatter};
use std::path::PathBuf;
use thiserror::Error;

macro_rules! impl_debug_for_error {
    ($($t:ty),*) => {
        $(
            impl Debug for $t {
                fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                    // Errors returned from main are shown through Debug, while thiserror only implements Display.
                    write!(f, "{}", self)
                }
            }
        )*
    };
}

#[derive(Error)]
pub enum ContentError {
    #[error("Request for `{query}` failed")]
    Request {
        query: &'static str,
        #[source]
        source: ureq::Error,
    },
    #[error("Content API answered `{query}` with status {status}")]
    Status { query: &'static str, status: u16 },
    #[error("Could not decode the result of `{query}`")]
    Decode {
        query: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("No entry with id `{id}`")]
    NotFound { id: String },
    #[error("Request for `{query}` was interrupted: {reason}")]
    Interrupted { query: &'static str, reason: String },
}

#[derive(Error)]
pub enum FormError {
    #[error("Form relay rejected the submission with status {status}")]
    Status { status: u16 },
    #[error("Could not reach the form relay")]
    Request {
        #[source]
        source: ureq::Error,
    },
}

#[derive(Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {path}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file: {path}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid fixtures file: {path}")]
    InvalidFixtures {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum Finx7Error {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl_debug_for_error!(ContentError, FormError, ConfigError);
