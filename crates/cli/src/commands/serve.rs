use anyhow::{Context, Result};
use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use devtools_web_core::parse_site_toml;
use devtools_web_generator::{
    Document, GeneratedSite, generate_site, robots::ROBOTS_ROUTE, sitemap::SITEMAP_ROUTE,
};
use notify::{Event as NotifyEvent, EventKind, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use super::{ConfigSource, load_config};

/// Rendered documents, replaced wholesale on reload
type SharedSite = Arc<RwLock<Arc<GeneratedSite>>>;

#[derive(Clone)]
struct AppState {
    site: SharedSite,
}

pub struct ServeOptions {
    pub config: Option<PathBuf>,
    pub host: String,
    pub port: u16,
    pub static_dir: Option<PathBuf>,
    pub watch: bool,
}

/// Serve robots.txt and sitemap.xml.
///
/// Documents are rendered once at startup. With `watch`, edits to
/// site.toml re-render them; a config that fails to load leaves the
/// previous documents in place.
pub async fn run(opts: ServeOptions) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "devtools_web=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let (config, source) = load_config(opts.config.as_deref())?;
    tracing::info!(
        "Loaded {} route(s) for {} from {}",
        config.routes.len(),
        config.url,
        source
    );

    if let Some(dir) = &opts.static_dir
        && !dir.is_dir()
    {
        anyhow::bail!("Static directory does not exist: {}", dir.display());
    }

    let site = generate_site(&config).context("Failed to render site documents")?;
    let shared: SharedSite = Arc::new(RwLock::new(Arc::new(site)));

    if opts.watch {
        match source {
            ConfigSource::File(path) => {
                let watcher_site = shared.clone();
                tokio::spawn(async move {
                    if let Err(e) = watch_config(path, watcher_site).await {
                        tracing::error!("Config watcher error: {:#}", e);
                    }
                });
            }
            ConfigSource::Builtin => {
                tracing::warn!("--watch ignored: no site.toml to watch");
            }
        }
    }

    let app = router(AppState { site: shared }, opts.static_dir);

    let listener = tokio::net::TcpListener::bind((opts.host.as_str(), opts.port))
        .await
        .with_context(|| format!("Failed to bind to {}:{}", opts.host, opts.port))?;

    tracing::info!("Serving on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

fn router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let mut app = Router::new()
        .route(ROBOTS_ROUTE, get(robots_handler))
        .route(SITEMAP_ROUTE, get(sitemap_handler))
        .with_state(state);

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(TraceLayer::new_for_http())
}

async fn robots_handler(State(state): State<AppState>) -> Response {
    serve_document(&state, ROBOTS_ROUTE).await
}

async fn sitemap_handler(State(state): State<AppState>) -> Response {
    serve_document(&state, SITEMAP_ROUTE).await
}

async fn serve_document(state: &AppState, route: &str) -> Response {
    let site = state.site.read().await.clone();
    match site.document(route) {
        Some(doc) => document_response(doc),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn document_response(doc: &Document) -> Response {
    (
        [
            (header::CONTENT_TYPE, doc.content_type),
            (header::CACHE_CONTROL, doc.cache_control()),
        ],
        doc.body.clone(),
    )
        .into_response()
}

/// Re-render from `path` and swap the served documents
async fn reload(path: &Path, site: &SharedSite) -> Result<()> {
    let config =
        parse_site_toml(path).with_context(|| format!("Failed to parse {}", path.display()))?;
    let rendered = generate_site(&config)?;
    *site.write().await = Arc::new(rendered);
    tracing::info!("Reloaded {} route(s) from {}", config.routes.len(), path.display());
    Ok(())
}

/// Watch site.toml and reload on change
async fn watch_config(path: PathBuf, site: SharedSite) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::channel(100);

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<NotifyEvent>| {
        if let Ok(event) = res {
            let _ = tx.blocking_send(event);
        }
    })?;

    // Watch the parent so editors that replace the file are still seen
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    watcher.watch(dir, RecursiveMode::NonRecursive)?;

    let file_name = path
        .file_name()
        .context("Config path has no file name")?
        .to_os_string();

    tracing::info!("Watching {} for changes", path.display());

    while let Some(event) = rx.recv().await {
        if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
            continue;
        }
        if !event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name.as_os_str()))
        {
            continue;
        }

        if let Err(e) = reload(&path, &site).await {
            tracing::error!("Keeping previous documents: {:#}", e);
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
