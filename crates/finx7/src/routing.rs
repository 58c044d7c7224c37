//! Paths of the site and the view each of them mounts.
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use rustc_hash::FxHashMap;

const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// The parameter name of a `[name]` route segment.
fn parameter_name(route_segment: &str) -> Option<&str> {
    route_segment
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .filter(|name| !name.is_empty())
}

/// Matches `path` against a raw route, segment by segment, returning the captured parameters.
///
/// Trailing slashes are ignored on both sides. A parameter must fill a whole segment and is percent-decoded.
pub fn match_route(raw_route: &str, path: &str) -> Option<FxHashMap<String, String>> {
    let route_segments: Vec<&str> = raw_route.trim_matches('/').split('/').collect();
    let path_segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    if route_segments.len() != path_segments.len() {
        return None;
    }

    let mut captured = FxHashMap::default();
    for (route_segment, path_segment) in route_segments.iter().zip(&path_segments) {
        match parameter_name(route_segment) {
            Some(name) => {
                if path_segment.is_empty() {
                    return None;
                }
                let value = percent_decode_str(path_segment).decode_utf8().ok()?;
                captured.insert(name.to_string(), value.into_owned());
            }
            None if route_segment == path_segment => {}
            None => return None,
        }
    }

    Some(captured)
}

/// Every page of the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Hero, services, about and contact sections on one page.
    Home,
    Services,
    AboutUs,
    ContactUs,
    Blogs,
    BlogPost { id: String },
    NotFound,
}

const STATIC_ROUTES: &[(&str, Route)] = &[
    ("/", Route::Home),
    ("/services", Route::Services),
    ("/aboutus", Route::AboutUs),
    ("/contactus", Route::ContactUs),
    ("/blogs", Route::Blogs),
];

const BLOG_POST_ROUTE: &str = "/blog/[id]";

impl Route {
    /// Resolves a request path (without query string) to a route.
    pub fn resolve(path: &str) -> Route {
        if let Some((_, route)) = STATIC_ROUTES
            .iter()
            .find(|(raw, _)| match_route(raw, path).is_some())
        {
            return route.clone();
        }

        match match_route(BLOG_POST_ROUTE, path).and_then(|mut params| params.remove("id")) {
            Some(id) => Route::BlogPost { id },
            None => Route::NotFound,
        }
    }

    pub fn url(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Services => "/services".to_string(),
            Route::AboutUs => "/aboutus".to_string(),
            Route::ContactUs => "/contactus".to_string(),
            Route::Blogs => "/blogs".to_string(),
            Route::BlogPost { id } => BLOG_POST_ROUTE.replace("[id]", &utf8_percent_encode(id, SEGMENT).to_string()),
            Route::NotFound => "/404".to_string(),
        }
    }
}
