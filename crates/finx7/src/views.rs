//! Views and the pages assembled from them.
//!
//! Every request mounts fresh views, so each page view fetches its content anew.
use std::sync::Arc;

use maud::{Markup, html};

use crate::client::ContentApi;
use crate::fetch::FetchState;
use crate::maud::{SeoMeta, layout};
use crate::options::SiteOptions;
use crate::routing::Route;

pub mod card;
pub mod contact;
pub mod detail;
pub mod list;
pub mod sections;

use contact::ContactView;
use detail::{DetailView, load_detail};
use list::{ListView, load_list};

/// Viewport width assumed when the client does not report one.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;

/// What a visitor asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub route: Route,
    /// Requested page of the blog list, from `?page=`.
    pub page: Option<usize>,
    pub viewport_width: u32,
}

impl PageRequest {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            page: None,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
        }
    }

    pub fn with_page(mut self, page: Option<usize>) -> Self {
        self.page = page;
        self
    }
}

#[derive(Debug)]
pub struct RenderedPage {
    pub status: u16,
    pub html: Markup,
}

/// Mounts the views of `request.route`, waits for their content and renders the whole document.
pub async fn render_route(client: Arc<dyn ContentApi>, options: &SiteOptions, request: &PageRequest) -> RenderedPage {
    let route = &request.route;

    let (status, main, meta) = match route {
        Route::Home => (
            200,
            html! {
                (sections::hero())
                (sections::services())
                (sections::about())
                (ContactView::default().render())
            },
            None,
        ),
        Route::Services => (200, sections::services(), Some(seo("Services", None))),
        Route::AboutUs => (200, sections::about(), Some(seo("About Us", None))),
        Route::ContactUs => return contact_page(&ContactView::default(), options),
        Route::Blogs => {
            let mut view = ListView::new(options);
            load_list(client.clone(), &mut view).await;
            if let Some(page) = request.page {
                view.go_to_page(page);
            }

            let status = match view.entries() {
                FetchState::Failed(_) => 502,
                _ => 200,
            };
            (status, view.render(client.as_ref()), Some(seo("Blogs", None)))
        }
        Route::BlogPost { id } => {
            let mut view = DetailView::new(options);
            load_detail(client.clone(), &mut view, id).await;

            let status = match view.entry() {
                FetchState::Failed(_) if view.is_not_found() => 404,
                FetchState::Failed(_) => 502,
                _ => 200,
            };
            let meta = view
                .entry()
                .ready()
                .map(|entry| seo(&entry.title, entry.excerpt.as_deref()));
            (status, view.render(client.as_ref(), request.viewport_width), meta)
        }
        Route::NotFound => (404, not_found(), Some(seo("Page not found", None))),
    };

    RenderedPage {
        status,
        html: layout(main, route, options, meta),
    }
}

/// The contact page, showing the state of `view` after a submission or a fresh form.
pub fn contact_page(view: &ContactView, options: &SiteOptions) -> RenderedPage {
    RenderedPage {
        status: 200,
        html: layout(
            view.render(),
            &Route::ContactUs,
            options,
            Some(seo("Contact Us", Some("Get in touch with a Finx7 advisor."))),
        ),
    }
}

fn seo(title: &str, description: Option<&str>) -> SeoMeta {
    SeoMeta::new(title, description, None)
}

fn not_found() -> Markup {
    html! {
        section."min-h-screen".flex.flex-col.items-center.justify-center."gap-6".text-center {
            h1."text-6xl".font-extrabold."text-orange-300" { "404" }
            p."text-gray-300".text-lg { "The page you are looking for does not exist." }
            a."bg-orange-300".text-white.font-semibold."px-6"."py-3".rounded-lg href=(Route::Home.url()) { "Back to home" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Offline, posts};

    async fn render(route: Route) -> RenderedPage {
        let client: Arc<dyn ContentApi> = Arc::new(posts(13));
        render_route(client, &SiteOptions::default(), &PageRequest::new(route)).await
    }

    #[tokio::test]
    async fn home_stacks_every_section() {
        let page = render(Route::Home).await;
        let html = page.html.into_string();

        assert_eq!(page.status, 200);
        assert!(html.contains("Smart Financial Solutions"));
        assert!(html.contains(r#"id="services""#));
        assert!(html.contains(r#"id="about""#));
        assert!(html.contains(r#"id="contactus""#));
    }

    #[tokio::test]
    async fn blog_list_honours_requested_page() {
        let request = PageRequest::new(Route::Blogs).with_page(Some(3));
        let page = render_route(Arc::new(posts(13)), &SiteOptions::default(), &request).await;
        let html = page.html.into_string();

        assert_eq!(page.status, 200);
        assert_eq!(html.matches("data-entry=").count(), 1);
        assert!(html.contains("<title>Blogs - Finx7</title>"));
    }

    #[tokio::test]
    async fn out_of_range_page_keeps_the_first() {
        let request = PageRequest::new(Route::Blogs).with_page(Some(9));
        let page = render_route(Arc::new(posts(13)), &SiteOptions::default(), &request).await;

        assert!(page.html.into_string().contains(r#"aria-current="page">1<"#));
    }

    #[tokio::test]
    async fn blog_post_is_titled_after_the_post() {
        let page = render(Route::BlogPost { id: "post-4".into() }).await;
        let html = page.html.into_string();

        assert_eq!(page.status, 200);
        assert!(html.contains("<title>Post 4 - Finx7</title>"));
        assert!(html.contains(r#"<link rel="canonical" href="https://www.finx7.com/blog/post-4">"#));
    }

    #[tokio::test]
    async fn one_shared_client_serves_list_and_post() {
        let client: Arc<dyn ContentApi> = Arc::new(posts(3));
        let options = SiteOptions::default();

        let list = render_route(client.clone(), &options, &PageRequest::new(Route::Blogs)).await;
        let post = render_route(client, &options, &PageRequest::new(Route::BlogPost { id: "post-2".into() })).await;

        assert_eq!(list.status, 200);
        assert_eq!(post.status, 200);
        assert!(post.html.into_string().contains("<title>Post 2 - Finx7</title>"));
    }

    #[tokio::test]
    async fn missing_post_is_a_404() {
        let page = render(Route::BlogPost { id: "ghost".into() }).await;
        assert_eq!(page.status, 404);
        assert!(page.html.into_string().contains("Try again"));
    }

    #[tokio::test]
    async fn unreachable_store_is_a_502() {
        let request = PageRequest::new(Route::Blogs);
        let page = render_route(Arc::new(Offline), &SiteOptions::default(), &request).await;
        assert_eq!(page.status, 502);
    }

    #[tokio::test]
    async fn unknown_paths_are_a_404() {
        let page = render(Route::NotFound).await;
        assert_eq!(page.status, 404);
        assert!(page.html.into_string().contains("Back to home"));
    }
}
