//! Blog post page: the post itself, plus a carousel of other recent posts.
//!
//! The post and the carousel are loaded by two independent requests. Each fills its own slot when it resolves, in
//! whatever order they arrive; the page is a loading placeholder until the post itself is known.
use std::sync::Arc;

use log::error;
use maud::{Markup, html};
use tokio::sync::mpsc;

use crate::client::ContentApi;
use crate::content::portable_text::render_body;
use crate::content::{Entry, EntrySummary, format_date};
use crate::errors::ContentError;
use crate::fetch::{FetchState, Generations, Ticket};
use crate::memo::Memo;
use crate::options::SiteOptions;
use crate::routing::Route;
use crate::templating::maud_ext::{failed, loading};

/// Response of one of the two requests issued by [`DetailView::navigate`].
#[derive(Debug)]
pub enum DetailMessage {
    Entry(Ticket, Result<Entry, ContentError>),
    Related(Ticket, Result<Vec<EntrySummary>, ContentError>),
}

/// Overall state of the page. The carousel has no say in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailState {
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselSettings {
    pub slides_to_show: usize,
    pub slides_to_scroll: usize,
    pub infinite: bool,
    pub dots: bool,
    pub autoplay_speed_ms: u32,
    pub speed_ms: u32,
}

impl CarouselSettings {
    /// Three slides on wide screens, two under 1024px and one under 640px, never more than there are posts.
    pub fn for_viewport(viewport_width: u32, slide_count: usize) -> Self {
        let slides_to_show = match viewport_width {
            width if width < 640 => 1,
            width if width < 1024 => 2,
            _ => 3,
        }
        .min(slide_count.max(1));

        Self {
            slides_to_show,
            slides_to_scroll: 1,
            infinite: slide_count > slides_to_show,
            dots: true,
            autoplay_speed_ms: 4000,
            speed_ms: 500,
        }
    }
}

pub struct DetailView {
    id: Option<String>,
    entry: FetchState<Entry>,
    related: FetchState<Vec<EntrySummary>>,
    not_found: bool,
    generations: Generations,
    related_limit: usize,
    words_per_minute: usize,
    reading_time: Memo<u64, String>,
    carousel: Memo<(u32, usize), CarouselSettings>,
}

impl DetailView {
    pub fn new(options: &SiteOptions) -> Self {
        Self {
            id: None,
            entry: FetchState::Idle,
            related: FetchState::Idle,
            not_found: false,
            generations: Generations::default(),
            related_limit: options.related_limit,
            words_per_minute: options.words_per_minute,
            reading_time: Memo::default(),
            carousel: Memo::default(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn entry(&self) -> &FetchState<Entry> {
        &self.entry
    }

    pub fn related(&self) -> &FetchState<Vec<EntrySummary>> {
        &self.related
    }

    pub fn related_limit(&self) -> usize {
        self.related_limit
    }

    /// Whether the last request for the post found no post with this id.
    pub fn is_not_found(&self) -> bool {
        self.not_found
    }

    pub fn state(&self) -> DetailState {
        match self.entry {
            FetchState::Idle => DetailState::Idle,
            FetchState::Loading => DetailState::Loading,
            FetchState::Ready(_) => DetailState::Ready,
            FetchState::Failed(_) => DetailState::Failed,
        }
    }

    /// Switches the page to post `id`. Responses still in flight for a previous id will be discarded.
    pub fn navigate(&mut self, id: &str) -> Ticket {
        self.id = Some(id.to_string());
        self.entry = FetchState::Loading;
        self.related = FetchState::Loading;
        self.not_found = false;
        self.reading_time.invalidate();
        self.generations.issue(id)
    }

    /// Applies a response. Returns whether it was applied, i.e. whether it was still current.
    pub fn apply(&mut self, message: DetailMessage) -> bool {
        match message {
            DetailMessage::Entry(ticket, result) => {
                if !self.generations.is_current(&ticket) {
                    return false;
                }
                if let Err(err) = &result {
                    error!("Failed to load blog post `{}`: {}", ticket.key, err);
                    self.not_found = matches!(err, ContentError::NotFound { .. });
                }
                self.entry = FetchState::from_result(result);
            }
            DetailMessage::Related(ticket, result) => {
                if !self.generations.is_current(&ticket) {
                    return false;
                }
                if let Err(err) = &result {
                    error!("Failed to load posts related to `{}`: {}", ticket.key, err);
                }
                self.related = FetchState::from_result(result);
            }
        }

        true
    }

    /// Reading time of the loaded post, computed once per navigation.
    pub fn reading_time(&mut self) -> Option<&str> {
        let FetchState::Ready(entry) = &self.entry else {
            return None;
        };

        let words_per_minute = self.words_per_minute;
        let time = self
            .reading_time
            .get_or_compute(self.generations.current(), |_| entry.reading_time(words_per_minute));
        Some(time.as_str())
    }

    pub fn carousel_settings(&mut self, viewport_width: u32) -> &CarouselSettings {
        let count = self.related.ready().map(Vec::len).unwrap_or(0);
        self.carousel.get_or_compute((viewport_width, count), |(width, count)| {
            CarouselSettings::for_viewport(*width, *count)
        })
    }

    pub fn render(&mut self, images: &dyn ContentApi, viewport_width: u32) -> Markup {
        let retry_href = Route::BlogPost {
            id: self.id.clone().unwrap_or_default(),
        }
        .url();

        match &self.entry {
            FetchState::Idle | FetchState::Loading => return loading(),
            FetchState::Failed(reason) => return failed(reason, &retry_href),
            FetchState::Ready(_) => {}
        }

        let read_time = self.reading_time().unwrap_or_default().to_string();
        let carousel = self.carousel_settings(viewport_width).clone();
        let FetchState::Ready(entry) = &self.entry else {
            return loading();
        };

        html! {
            section."min-h-screen".bg-white."py-10"."px-2"."md:px-6"."max-w-4xl"."mx-auto" data-entry=(entry.id) {
                h1."text-4xl"."md:text-5xl"."mt-14".font-extrabold."text-gray-900"."mb-4".leading-tight.text-center {
                    (entry.title)
                }

                div.flex.flex-col."sm:flex-row"."sm:items-center"."gap-4"."mb-5" {
                    div.flex.items-center."gap-2" {
                        @if let Some(author) = &entry.author {
                            @if let Some(image) = &author.image {
                                @if let Some(src) = images.image_url(image) {
                                    img."w-10"."h-10".rounded-full.border."border-gray-200" src=(src) alt=(image.alt_or(&author.name));
                                }
                            }
                            span.font-medium."text-gray-800" data-block="author" { (author.name) }
                        }
                    }
                    div.flex."gap-4".items-center.text-sm."text-gray-500" {
                        @if let Some(date) = &entry.published_at {
                            time datetime=(date.to_rfc3339()) data-block="date" { (format_date(date)) }
                        }
                        span { "·" }
                        span data-block="reading-time" { (read_time) }
                        @if !entry.categories.is_empty() {
                            span { "·" }
                            @for category in &entry.categories {
                                span."bg-blue-100"."text-blue-700".text-xs."px-2"."py-1".rounded-full.font-semibold."ml-1" {
                                    (category.title)
                                }
                            }
                        }
                    }
                }

                @if let Some(image) = &entry.main_image {
                    @if let Some(src) = images.image_url(image) {
                        div.rounded-lg.overflow-hidden."mb-10"."mt-6" data-block="image" {
                            img."w-full"."h-96".object-cover src=(src) alt=(image.alt_or(&entry.title));
                        }
                    }
                }

                section.prose."prose-lg"."max-w-none"."text-gray-900"."mx-auto"."mb-10" {
                    (render_body(entry.body()))
                }

                aside."mt-16" {
                    div."max-w-4xl"."mx-auto"."bg-gray-50".rounded-lg.shadow-lg."p-6".relative {
                        h2.text-xl.font-semibold."mb-6".border-b."border-gray-200"."pb-2" { "More Articles" }
                        (related_carousel(&self.related, &carousel, images))
                    }
                }

                (share_links())
            }
        }
    }
}

fn related_carousel(
    related: &FetchState<Vec<EntrySummary>>,
    settings: &CarouselSettings,
    images: &dyn ContentApi,
) -> Markup {
    let posts = match related {
        FetchState::Ready(posts) if !posts.is_empty() => posts,
        FetchState::Idle | FetchState::Loading => return html! {},
        _ => return html! { p."text-gray-400" { "No other articles found." } },
    };

    html! {
        div.carousel.relative
            data-slides-to-show=(settings.slides_to_show)
            data-slides-to-scroll=(settings.slides_to_scroll)
            data-infinite=(settings.infinite)
            data-dots=(settings.dots)
            data-autoplay-speed=(settings.autoplay_speed_ms)
            data-speed=(settings.speed_ms) {
            button.carousel-prev type="button" aria-label="Previous Slide" { "←" }
            div.carousel-track.flex {
                @for post in posts {
                    div."px-3" data-related=(post.id) {
                        a.block.bg-white.rounded-lg.shadow-md.overflow-hidden href=(Route::BlogPost { id: post.id.clone() }.url()) {
                            @if let Some(image) = &post.main_image {
                                @if let Some(src) = images.image_url(image) {
                                    img."w-full"."h-48".object-cover src=(src) alt=(image.alt_or(&post.title));
                                }
                            }
                            div."p-4" {
                                h3.text-lg.font-semibold."line-clamp-2"."text-gray-900"."mb-2" { (post.title) }
                                @if let Some(date) = &post.published_at {
                                    p.text-xs."text-gray-500" { (format_date(date)) }
                                }
                            }
                        }
                    }
                }
            }
            button.carousel-next type="button" aria-label="Next Slide" { "→" }
        }
    }
}

fn share_links() -> Markup {
    html! {
        div."mt-10".flex."gap-4"."border-t"."pt-6".justify-center {
            a."bg-blue-600".text-white."p-4".rounded-md href="#" aria-label="Share on Facebook" { "f" }
            a."bg-sky-500".text-white."p-4".rounded-md href="#" aria-label="Share on Twitter" { "t" }
            a."bg-blue-800".text-white."p-4".rounded-md href="#" aria-label="Share on LinkedIn" { "in" }
        }
    }
}

/// Navigates `view` to post `id` and runs both of its requests concurrently, applying each response as it arrives.
pub async fn load_detail<C>(client: Arc<C>, view: &mut DetailView, id: &str)
where
    C: ContentApi + ?Sized + 'static,
{
    let ticket = view.navigate(id);
    let limit = view.related_limit();
    let (tx, mut rx) = mpsc::unbounded_channel();

    {
        let (client, tx, ticket, id) = (client.clone(), tx.clone(), ticket.clone(), id.to_string());
        tokio::spawn(async move {
            let result = tokio::task::spawn_blocking(move || client.fetch_entry(&id))
                .await
                .unwrap_or_else(|err| Err(interrupted("entry-by-id", err)));
            let _ = tx.send(DetailMessage::Entry(ticket, result));
        });
    }

    {
        let (client, ticket, id) = (client, ticket, id.to_string());
        tokio::spawn(async move {
            let result = tokio::task::spawn_blocking(move || client.fetch_related(&id, limit))
                .await
                .unwrap_or_else(|err| Err(interrupted("related-entries", err)));
            let _ = tx.send(DetailMessage::Related(ticket, result));
        });
    }

    while let Some(message) = rx.recv().await {
        view.apply(message);
    }
}

fn interrupted(query: &'static str, err: tokio::task::JoinError) -> ContentError {
    ContentError::Interrupted {
        query,
        reason: err.to_string(),
    }
}
