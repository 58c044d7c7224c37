use maud::{DOCTYPE, Markup, html};

use crate::options::SiteOptions;
use crate::routing::Route;
use crate::templating::maud_ext::generator;

pub struct SeoMeta {
    pub title: String,
    pub description: Option<String>,
    pub canonical_url: Option<String>,
}

impl Default for SeoMeta {
    fn default() -> Self {
        Self {
            title: "Finx7".to_string(),
            description: Some(
                "Finx7 delivers smart financial solutions: wealth management, investment advisory, and risk planning."
                    .to_string(),
            ),
            canonical_url: None,
        }
    }
}

impl SeoMeta {
    pub fn new(title: impl Into<String>, description: Option<&str>, canonical_url: Option<String>) -> Self {
        Self {
            title: title.into(),
            description: description.map(str::to_string),
            canonical_url,
        }
    }

    pub fn render(&self) -> Markup {
        let formatted_title = if self.title == "Finx7" {
            self.title.clone()
        } else {
            format!("{} - Finx7", self.title)
        };

        let description = self
            .description
            .clone()
            .or_else(|| SeoMeta::default().description)
            .unwrap_or_default();

        html! {
            title { (formatted_title) }
            meta name="description" content=(description);
            meta name="robots" content="index, follow";

            meta property="og:title" content=(formatted_title);
            meta property="og:description" content=(description);
            meta property="og:type" content="website";
            @if let Some(canonical_url) = &self.canonical_url {
                meta property="og:url" content=(canonical_url);
                link rel="canonical" href=(canonical_url);
            }
        }
    }
}

const NAV_LINKS: &[(&str, Route)] = &[
    ("Home", Route::Home),
    ("Services", Route::Services),
    ("About Us", Route::AboutUs),
    ("Blogs", Route::Blogs),
    ("Contact", Route::ContactUs),
];

fn navbar(current: &Route) -> Markup {
    html! {
        header."fixed"."top-0".w-full."z-50"."bg-gray-900/90"."backdrop-blur" {
            nav."max-w-6xl"."mx-auto"."px-6"."py-4".flex.items-center.justify-between {
                a."text-2xl".font-bold."text-orange-300" href="/" { "Finx7" }
                ul.flex."gap-6" {
                    @for (label, route) in NAV_LINKS {
                        @let active = route == current
                            || (matches!(route, Route::Blogs) && matches!(current, Route::BlogPost { .. }));
                        li {
                            a class=(if active { "text-orange-300 hover:text-orange-300" } else { "text-white hover:text-orange-300" }) href=(route.url()) { (label) }
                        }
                    }
                }
            }
        }
    }
}

fn footer() -> Markup {
    html! {
        footer."bg-black"."text-gray-400" {
            div."max-w-6xl"."mx-auto"."px-6"."py-12".grid."gap-8"."md:grid-cols-3" {
                div {
                    p."text-2xl".font-bold."text-orange-300" { "Finx7" }
                    p."mt-2" { "Empowering smarter financial solutions for everyone." }
                }
                div {
                    h5."text-lg".font-semibold.text-white { "Quick Links" }
                    ul."mt-2" {
                        @for (label, route) in NAV_LINKS {
                            li { a."hover:text-orange-300" href=(route.url()) { (label) } }
                        }
                    }
                }
                div {
                    h5."text-lg".font-semibold.text-white { "Contact Us" }
                    p."mt-2" { a href="mailto:info@example.com" { "info@example.com" } }
                    p { a href="tel:+1234567890" { "+1 234 567 890" } }
                    p { "New York, NY" }
                }
            }
            p."text-center"."text-sm"."pb-6" { "Copyright © 2025 Finx7. All rights reserved." }
        }
    }
}

/// Wraps a page body in the document shell: head, navigation and footer.
pub fn layout(main: Markup, current: &Route, options: &SiteOptions, seo: Option<SeoMeta>) -> Markup {
    let mut seo_data = seo.unwrap_or_default();
    if seo_data.canonical_url.is_none() {
        seo_data.canonical_url = options.canonical_url(&current.url());
    }

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                (generator())
                link rel="icon" href="/favicon.svg";
                script src="https://cdn.tailwindcss.com" {}
                (seo_data.render())
            }
            body."bg-gray-900" {
                (navbar(current))
                main { (main) }
                (footer())
            }
        }
    }
}
