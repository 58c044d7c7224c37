#![doc = include_str!("../README.md")]

// Modules the site binary interacts with directly
pub mod client;
pub mod content;
pub mod errors;
pub mod fetch;
pub mod memo;
pub mod pagination;
pub mod routing;
pub mod views;

mod logging;
mod options;
mod templating;

#[cfg(test)]
mod test_support;

pub use logging::{FormatElapsedTimeOptions, format_elapsed_time};
pub use options::SiteOptions;

pub mod maud {
    //! Layout and shared markup helpers built on [Maud](https://maud.lambda.xyz).
    pub use crate::templating::layout::{SeoMeta, layout};
    pub use crate::templating::maud_ext::*;
}

/// Name and version of this crate, used for the generator tag in the output HTML.
///
/// ## Example
/// ```rs
/// use finx7::GENERATOR;
///
/// format!("<meta name=\"generator\" content=\"{}\">", GENERATOR);
/// ```
pub const GENERATOR: &str = concat!("Finx7 v", env!("CARGO_PKG_VERSION"));
