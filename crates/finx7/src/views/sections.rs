//! Static marketing sections. The home page stacks all of them, and most also have a page of their own.
use maud::{Markup, html};

use crate::routing::Route;

struct Service {
    title: &'static str,
    description: &'static str,
}

const SERVICES: &[Service] = &[
    Service {
        title: "Wealth Management",
        description: "Personalized strategies to grow and protect your wealth, built around your goals and timeline.",
    },
    Service {
        title: "Investment Advisory",
        description: "Research-driven portfolio advice that balances opportunity with the risk you are comfortable taking.",
    },
    Service {
        title: "Risk & Insurance Planning",
        description: "Coverage and contingency plans that keep your family and business secure when the unexpected happens.",
    },
];

const STATS: &[(&str, &str)] = &[
    ("99%", "Client Satisfaction"),
    ("10+", "Years Experience"),
    ("500+", "Happy Clients"),
    ("24/7", "Support Available"),
];

pub fn hero() -> Markup {
    html! {
        section."min-h-screen".flex.items-center.justify-center."bg-gradient-to-br"."from-gray-900"."via-gray-800"."to-black"."px-6" {
            div."max-w-4xl".text-center {
                h1."text-5xl"."md:text-6xl".font-extrabold.text-white."mb-6" {
                    "Smart Financial Solutions"
                }
                p."text-xl"."text-gray-300"."mb-10" {
                    "We help individuals and businesses plan, invest and protect what matters most."
                }
                div.flex.justify-center."gap-4" {
                    a."bg-orange-300"."hover:bg-orange-200".text-white.font-semibold."px-8"."py-3".rounded-lg href=(Route::Services.url()) {
                        "Our Services"
                    }
                    a.border."border-orange-300"."text-orange-300".font-semibold."px-8"."py-3".rounded-lg href=(Route::ContactUs.url()) {
                        "Get in Touch"
                    }
                }
            }
        }
    }
}

pub fn services() -> Markup {
    html! {
        section."bg-gray-800"."py-20"."px-6" id="services" {
            h2."text-4xl".font-bold."text-orange-300".text-center."mb-12" { "Our Services" }
            div."max-w-6xl"."mx-auto".grid."md:grid-cols-3"."gap-8" {
                @for service in SERVICES {
                    div."bg-gray-900".rounded-xl."p-8".shadow-lg data-service {
                        h3."text-2xl".font-semibold.text-white."mb-4" { (service.title) }
                        p."text-gray-400" { (service.description) }
                    }
                }
            }
        }
    }
}

pub fn about() -> Markup {
    html! {
        section."bg-black"."py-20"."px-6" id="about" {
            div."max-w-5xl"."mx-auto".text-center {
                h2."text-4xl".font-bold."text-orange-300"."mb-6" { "About Us" }
                p."text-lg"."text-gray-300"."mb-12" {
                    "Finx7 is a team of advisors, analysts and planners who believe sound financial guidance should be clear, "
                    "honest and within reach. We work alongside our clients for the long run."
                }
                (stats())
            }
        }
    }
}

fn stats() -> Markup {
    html! {
        div.grid."grid-cols-2"."md:grid-cols-4"."gap-8" {
            @for (value, label) in STATS {
                div data-stat {
                    p."text-4xl".font-extrabold."text-orange-300" { (value) }
                    p."text-gray-400" { (label) }
                }
            }
        }
    }
}
