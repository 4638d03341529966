use std::{net::SocketAddr, path::Path as FsPath, sync::Arc};

use anyhow::Context;
use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue, StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use content::ContentRegistry;
use shared::{
    domain::DocumentRecord,
    error::SiteError,
    protocol::{ContactSubmission, NewsletterSubmission},
};
use site_api::{document_path, page_count_from, Page, Renderer, Route, ViewOptions};
use tower_http::{
    limit::RequestBodyLimitLayer, services::ServeDir, set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use ui_state::FormState;

mod api;
mod app_state;
mod config;

use app_state::{AppState, LogSink, Submission, SubmitOutcome};
use config::{load_settings, prepare_static_dir};

const MAX_FORM_BYTES: usize = 64 * 1024;

const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; \
     script-src 'self' 'unsafe-inline'; \
     style-src 'self' 'unsafe-inline'; \
     img-src 'self' data: https: blob:; \
     font-src 'self' data:; \
     connect-src 'self'; \
     frame-src 'self'; \
     object-src 'self'; \
     base-uri 'self'; \
     form-action 'self'; \
     frame-ancestors 'self'; \
     upgrade-insecure-requests";

fn security_headers() -> [(HeaderName, &'static str); 7] {
    [
        (
            header::STRICT_TRANSPORT_SECURITY,
            "max-age=63072000; includeSubDomains; preload",
        ),
        (header::X_FRAME_OPTIONS, "SAMEORIGIN"),
        (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        (header::X_XSS_PROTECTION, "1; mode=block"),
        (header::REFERRER_POLICY, "strict-origin-when-cross-origin"),
        (
            HeaderName::from_static("permissions-policy"),
            "camera=(), microphone=(), geolocation=(), interest-cohort=()",
        ),
        (header::CONTENT_SECURITY_POLICY, CONTENT_SECURITY_POLICY),
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings()?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let registry = match &settings.content_path {
        Some(path) => ContentRegistry::load(path)
            .with_context(|| format!("failed to load content from '{}'", path.display()))?,
        None => ContentRegistry::builtin().context("built-in content is invalid")?,
    };
    info!(
        services = registry.services().len(),
        documents = registry.documents().len(),
        "content loaded"
    );

    let static_dir = prepare_static_dir(&settings.static_dir)?;
    let renderer = Renderer::new().context("failed to compile templates")?;

    let state = AppState {
        registry: Arc::new(registry),
        renderer,
        sink: Arc::new(LogSink),
        static_dir,
        public_url: settings.public_url.clone(),
        autoplay: settings.autoplay_interval(),
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.bind_addr))?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let assets = ServeDir::new(&state.static_dir);

    let mut router = Router::new()
        .route("/", get(page))
        .route("/services", get(page))
        .route("/services/:slug", get(page))
        .route("/about", get(page))
        .route("/about-us", get(page))
        .route("/contact", get(page).post(contact_submit))
        .route("/newsletter", post(newsletter_submit))
        .route("/documents/:slug", get(page))
        .route("/api/services", get(api::list_services))
        .route("/api/services/:slug", get(api::get_service))
        .route("/api/contact", post(api::submit_contact))
        .route("/api/newsletter", post(api::submit_newsletter))
        .route("/healthz", get(healthz))
        .nest_service("/assets", assets)
        .fallback(page)
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_FORM_BYTES));

    for (name, value) in security_headers() {
        router = router.layer(SetResponseHeaderLayer::overriding(
            name,
            HeaderValue::from_static(value),
        ));
    }
    router.layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

/// Every HTML GET, plus the fallback: the path picks the page and the query
/// string carries the component state.
async fn page(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let route = Route::resolve(uri.path());
    let options = ViewOptions::from_query(uri.query().unwrap_or_default());

    let load = match &route {
        Route::Document(slug) => match state.registry.document(slug.as_str()) {
            Some(record) => Some(document_page_count(&state.static_dir, record).await),
            None => None,
        },
        _ => None,
    };

    let built = state.pages().for_route(&route, &options, |record| {
        load.unwrap_or_else(|| {
            Err(SiteError::DocumentUnavailable {
                url: record.file_url(),
            })
        })
    });
    match built {
        Ok(page) => render(&state, StatusCode::OK, &page),
        Err(err) => error_page(&state, uri.path(), err),
    }
}

async fn document_page_count(
    static_dir: &FsPath,
    record: &DocumentRecord,
) -> Result<u32, SiteError> {
    let read = tokio::fs::read(document_path(static_dir, record)).await;
    page_count_from(record, read)
}

async fn contact_submit(
    State(state): State<Arc<AppState>>,
    Form(submission): Form<ContactSubmission>,
) -> Response {
    let mut form = FormState::contact();
    form.fill(submission.fields());

    match state.submit(&mut form, Submission::Contact).await {
        SubmitOutcome::Accepted => Redirect::to("/contact?sent=1").into_response(),
        SubmitOutcome::Invalid(errors) => {
            debug!(fields = ?errors.keys().collect::<Vec<_>>(), "contact form rejected");
            let page = state.pages().contact(&form, false);
            render(&state, StatusCode::UNPROCESSABLE_ENTITY, &page)
        }
        SubmitOutcome::DeliveryFailed => internal_error(),
    }
}

async fn newsletter_submit(
    State(state): State<Arc<AppState>>,
    Form(submission): Form<NewsletterSubmission>,
) -> Response {
    let mut form = FormState::newsletter();
    form.set("email", submission.email);

    match state.submit(&mut form, Submission::Newsletter).await {
        SubmitOutcome::Accepted => Redirect::to("/?subscribed=1#newsletter").into_response(),
        SubmitOutcome::Invalid(_) => {
            let page = state.pages().home(&ViewOptions::default(), &form);
            render(&state, StatusCode::UNPROCESSABLE_ENTITY, &page)
        }
        SubmitOutcome::DeliveryFailed => internal_error(),
    }
}

fn render(state: &AppState, status: StatusCode, page: &Page) -> Response {
    let status = if page.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        status
    };
    match state.renderer.render(page) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => {
            error!(error = %err, template = page.template(), "page failed to render");
            internal_error()
        }
    }
}

fn error_page(state: &AppState, path: &str, err: SiteError) -> Response {
    if err.is_not_found() {
        debug!(path, error = %err, "no such page");
        render(state, StatusCode::NOT_FOUND, &state.pages().not_found(path))
    } else {
        error!(path, error = %err, "page failed");
        internal_error()
    }
}

fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
