//! Blog list: every post is fetched once per mount, then paged through in memory.
use std::sync::Arc;

use log::error;
use maud::{Markup, html};

use crate::client::ContentApi;
use crate::content::Entry;
use crate::errors::ContentError;
use crate::fetch::{FetchState, Generations, Ticket};
use crate::memo::Memo;
use crate::options::SiteOptions;
use crate::pagination::{PageControl, PageWindow, Paginator};
use crate::routing::Route;
use crate::templating::maud_ext::{failed, loading};

use super::card::entry_card;

/// Side effect the host should perform after a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEffect {
    ScrollToTop,
}

pub struct ListView {
    entries: FetchState<Vec<Entry>>,
    paginator: Paginator,
    generations: Generations,
    controls: Memo<(usize, usize), Vec<PageControl>>,
}

impl ListView {
    pub fn new(options: &SiteOptions) -> Self {
        Self {
            entries: FetchState::Idle,
            paginator: Paginator::new(options.page_size, 0),
            generations: Generations::default(),
            controls: Memo::default(),
        }
    }

    pub fn entries(&self) -> &FetchState<Vec<Entry>> {
        &self.entries
    }

    /// Starts loading the list. Responses to earlier mounts will be ignored.
    pub fn mount(&mut self) -> Ticket {
        self.entries = FetchState::Loading;
        self.generations.issue(Route::Blogs.url())
    }

    /// Applies the response of the request issued with `ticket`. Returns whether it was applied.
    pub fn resolve(&mut self, ticket: &Ticket, result: Result<Vec<Entry>, ContentError>) -> bool {
        if !self.generations.is_current(ticket) {
            return false;
        }

        if let Err(err) = &result {
            error!("Failed to load blog posts: {}", err);
        }

        let total_items = result.as_ref().map(Vec::len).unwrap_or(0);
        self.paginator = Paginator::new(self.paginator.page_size(), total_items);
        self.controls.invalidate();
        self.entries = FetchState::from_result(result);
        true
    }

    pub fn current_page(&self) -> usize {
        self.paginator.current_page()
    }

    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages()
    }

    /// Moves to page `page`, ignoring pages outside `1..=total_pages`.
    pub fn go_to_page(&mut self, page: usize) -> Option<ListEffect> {
        self.paginator
            .go_to_page(page)
            .then_some(ListEffect::ScrollToTop)
    }

    /// Posts shown on the current page, once the list is loaded.
    pub fn window(&self) -> Option<PageWindow<'_, Entry>> {
        self.entries
            .ready()
            .map(|entries| self.paginator.window(entries))
    }

    pub fn controls(&mut self) -> &[PageControl] {
        let paginator = &self.paginator;
        self.controls.get_or_compute(
            (paginator.current_page(), paginator.total_pages()),
            |_| paginator.controls(),
        )
    }

    pub fn render(&mut self, images: &dyn ContentApi) -> Markup {
        let retry_href = Route::Blogs.url();
        match &self.entries {
            FetchState::Idle | FetchState::Loading => return loading(),
            FetchState::Failed(reason) => return failed(reason, &retry_href),
            FetchState::Ready(_) => {}
        }

        let controls = self.controls().to_vec();
        let window = self.window();

        html! {
            div."bg-gradient-to-b"."from-gray-700"."via-gray-800"."to-black"."min-h-screen"."py-12"."px-4" {
                h2."text-4xl".font-bold."text-orange-300"."mb-12"."mt-16".text-center { "Latest Blogs" }

                @match window {
                    Some(window) if !window.items.is_empty() => {
                        div."max-w-6xl"."mx-auto".grid."gap-8"."sm:grid-cols-2"."lg:grid-cols-3" {
                            @for entry in window.items {
                                div.transform.transition."hover:scale-105" { (entry_card(entry, images)) }
                            }
                        }
                        (pagination_bar(&controls, &retry_href))
                    }
                    _ => {
                        p."text-gray-400".text-center data-empty { "No blog posts found." }
                    }
                }
            }
        }
    }
}

fn page_href(base: &str, page: usize) -> String {
    format!("{}?page={}", base, page)
}

fn pagination_bar(controls: &[PageControl], base: &str) -> Markup {
    html! {
        nav."mt-10".flex.justify-center.items-center."gap-2" aria-label="Pagination" {
            @for control in controls {
                @match control {
                    PageControl::Prev { disabled: true, .. } => {
                        span."px-4"."py-2".rounded-lg."text-gray-500" aria-disabled="true" { "Prev" }
                    }
                    PageControl::Prev { target, .. } => {
                        a."px-4"."py-2".rounded-lg."bg-orange-300".text-white href=(page_href(base, *target)) rel="prev" { "Prev" }
                    }
                    PageControl::Number { page, current: true } => {
                        span."px-4"."py-2".rounded-lg."bg-orange-300".text-white aria-current="page" { (page) }
                    }
                    PageControl::Number { page, .. } => {
                        a."px-4"."py-2".rounded-lg."bg-gray-700".text-white href=(page_href(base, *page)) { (page) }
                    }
                    PageControl::Next { disabled: true, .. } => {
                        span."px-4"."py-2".rounded-lg."text-gray-500" aria-disabled="true" { "Next" }
                    }
                    PageControl::Next { target, .. } => {
                        a."px-4"."py-2".rounded-lg."bg-orange-300".text-white href=(page_href(base, *target)) rel="next" { "Next" }
                    }
                }
            }
        }
    }
}

/// Mounts `view` and loads every post through `client`.
pub async fn load_list<C>(client: Arc<C>, view: &mut ListView)
where
    C: ContentApi + ?Sized + 'static,
{
    let ticket = view.mount();

    let result = tokio::task::spawn_blocking(move || client.fetch_entries())
        .await
        .unwrap_or_else(|err| {
            Err(ContentError::Interrupted {
                query: "all-entries",
                reason: err.to_string(),
            })
        });

    view.resolve(&ticket, result);
}
