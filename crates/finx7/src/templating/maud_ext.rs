use maud::{Markup, html};

use crate::GENERATOR;

/// Generator tag for the output HTML. See [`GENERATOR`](crate::GENERATOR).
pub fn generator() -> Markup {
    html! {
        meta name="generator" content=(GENERATOR);
    }
}

/// Loading placeholder shown while a view waits on its first response.
pub fn loading() -> Markup {
    html! {
        div."min-h-screen".flex.items-center.justify-center."text-gray-500".text-lg role="status" {
            "Loading..."
        }
    }
}

/// Failure notice with a link that mounts the view again.
pub fn failed(reason: &str, retry_href: &str) -> Markup {
    html! {
        div."min-h-screen".flex.flex-col.items-center.justify-center."gap-4" role="alert" {
            p."text-gray-300".text-lg { "Something went wrong while loading this page." }
            p."text-gray-500".text-sm { (reason) }
            a."bg-orange-300"."hover:bg-orange-200".text-white.font-semibold."px-6"."py-3".rounded-lg href=(retry_href) {
                "Try again"
            }
        }
    }
}
