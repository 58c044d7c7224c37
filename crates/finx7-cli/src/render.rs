use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use colored::Colorize;
use finx7::client::ContentApi;
use finx7::errors::Finx7Error;
use finx7::routing::Route;
use finx7::views::{PageRequest, render_route};
use finx7::{FormatElapsedTimeOptions, SiteOptions, format_elapsed_time};
use tracing::{info, warn};

/// Renders the page at `path` and writes it to `output`, or stdout.
///
/// `path` may carry a `?page=` query, which `page` overrides.
pub async fn render_page(
    client: Arc<dyn ContentApi>,
    options: &SiteOptions,
    path: &str,
    page: Option<usize>,
    viewport_width: u32,
    output: Option<&Path>,
) -> Result<(), Finx7Error> {
    let start = Instant::now();
    let (route_path, query_page) = split_page_query(path);

    let request = PageRequest {
        page: page.or(query_page),
        viewport_width,
        ..PageRequest::new(Route::resolve(route_path))
    };
    let rendered = render_route(client, options, &request).await;
    let html = rendered.html.into_string();

    match output {
        Some(output) => std::fs::write(output, &html)?,
        None => println!("{}", html),
    }

    let elapsed = format_elapsed_time(start.elapsed(), &FormatElapsedTimeOptions::default());
    if rendered.status == 200 {
        info!(name: "render", "{} {} {}", rendered.status.to_string().green(), route_path.bold(), elapsed);
    } else {
        warn!(name: "render", "{} {} {}", rendered.status.to_string().yellow(), route_path.bold(), elapsed);
    }

    Ok(())
}

fn split_page_query(path: &str) -> (&str, Option<usize>) {
    let Some((route_path, query)) = path.split_once('?') else {
        return (path, None);
    };

    let page = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "page")
        .and_then(|(_, value)| value.parse().ok());

    (route_path, page)
}
