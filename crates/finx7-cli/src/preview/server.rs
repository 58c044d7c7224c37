use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Instant;

use axum::{
    Form, Router,
    extract::{Query, State},
    http::{StatusCode, Uri},
    middleware,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use finx7::SiteOptions;
use finx7::client::ContentApi;
use finx7::routing::Route;
use finx7::views::contact::{ContactForm, ContactView, FormRelay};
use finx7::views::{DEFAULT_VIEWPORT_WIDTH, PageRequest, RenderedPage, contact_page, render_route};
use serde::Deserialize;
use tokio::net::TcpSocket;
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tracing::{Level, debug, error};

use crate::server_utils::{CustomOnResponse, attach_request_uri, find_open_port, log_server_start};

#[derive(Clone)]
struct AppState {
    client: Arc<dyn ContentApi>,
    relay: Arc<dyn FormRelay>,
    options: Arc<SiteOptions>,
}

/// Query string accepted by every page. Malformed values are ignored rather than rejected.
#[derive(Debug, Default, Deserialize)]
struct PageParams {
    page: Option<String>,
    width: Option<String>,
}

impl PageParams {
    fn into_request(self, route: Route) -> PageRequest {
        PageRequest {
            page: self.page.and_then(|page| page.parse().ok()),
            viewport_width: self
                .width
                .and_then(|width| width.parse().ok())
                .unwrap_or(DEFAULT_VIEWPORT_WIDTH),
            ..PageRequest::new(route)
        }
    }
}

fn into_response(page: RenderedPage) -> Response {
    let status = StatusCode::from_u16(page.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Html(page.html.into_string())).into_response()
}

async fn handle_page(State(state): State<AppState>, uri: Uri, Query(params): Query<PageParams>) -> Response {
    let request = params.into_request(Route::resolve(uri.path()));
    into_response(render_route(state.client.clone(), &state.options, &request).await)
}

async fn handle_contact(State(state): State<AppState>, Form(form): Form<ContactForm>) -> Response {
    let relay = state.relay.clone();
    let submitted = tokio::task::spawn_blocking(move || {
        let mut view = ContactView::default();
        view.submit(relay.as_ref(), form);
        view
    })
    .await;

    match submitted {
        Ok(view) => into_response(contact_page(&view, &state.options)),
        Err(err) => {
            error!("Contact form submission was interrupted: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn start_preview_web_server(
    client: Arc<dyn ContentApi>,
    relay: Arc<dyn FormRelay>,
    options: SiteOptions,
    host: bool,
    port: u16,
) -> std::io::Result<()> {
    let start_time = Instant::now();

    // Listen on every interface with --host, otherwise localhost only
    let addr = if host {
        IpAddr::from([0, 0, 0, 0])
    } else {
        IpAddr::from([127, 0, 0, 1])
    };

    let port = find_open_port(&addr, port)?;
    let socket = TcpSocket::new_v4()?;
    let _ = socket.set_reuseaddr(true);
    let _ = socket.set_reuseport(true);
    socket.bind(SocketAddr::new(addr, port))?;

    let listener = socket.listen(1024)?;
    let local_addr = listener.local_addr()?;
    debug!("listening on {}", local_addr);

    let state = AppState {
        client,
        relay,
        options: Arc::new(options),
    };

    let router = Router::new()
        .route(&Route::ContactUs.url(), get(handle_page).post(handle_contact))
        .fallback(handle_page)
        .with_state(state)
        .layer(middleware::from_fn(attach_request_uri))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(CustomOnResponse),
        );

    log_server_start(start_time, host, local_addr, "Preview");

    axum::serve(listener, router.into_make_service()).await
}
