use std::{fs::OpenOptions, path::PathBuf, process::exit, sync::Arc, time::Duration};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{
    EnvFilter, Layer,
    filter::{FilterExt, LevelFilter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use finboard::{
    AppState, Config, DEFAULT_LOG_FILE, DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT, NoiseFilter,
    SharedStore, build_router, graceful_shutdown, refresh_store,
};

/// The web server for the Finboard dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the analytics backend, e.g. http://localhost:8001.
    #[arg(long, env = "BACKEND_URL")]
    backend_url: String,

    /// The port to serve the dashboard from.
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Seconds to wait for each backend request.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs())]
    request_timeout_secs: u64,

    /// Drop log messages matching this regex. May be given more than once.
    #[arg(long = "suppress-pattern")]
    suppress_patterns: Vec<String>,

    /// File to write the debug log to.
    #[arg(long, env = "LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            backend_url: args.backend_url,
            port: args.port,
            request_timeout: Duration::from_secs(args.request_timeout_secs),
            suppress_patterns: args.suppress_patterns,
            log_file: args.log_file,
        }
    }
}

#[tokio::main]
async fn main() {
    let config = Config::from(Args::parse());

    let noise_filter = match config.noise_filter() {
        Ok(noise_filter) => noise_filter,
        Err(error) => {
            eprintln!("{error}");
            exit(2);
        }
    };
    setup_logging(&config, noise_filter);

    let backend = match config.backend_client() {
        Ok(backend) => backend,
        Err(error) => {
            tracing::error!("{error}");
            exit(2);
        }
    };

    let store = SharedStore::default();
    // The server still starts if the first load fails. Pages show a prompt to
    // refresh until a load succeeds.
    if refresh_store(&backend, &store).await.is_err() {
        tracing::warn!("starting without data from {}", config.backend_url);
    }

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(AppState::new(store, backend)));

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    let addr = config.address();
    tracing::info!("HTTP server listening on http://{}", addr);
    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("server stopped: {error}");
        exit(1);
    }
}

fn setup_logging(config: &Config, noise_filter: NoiseFilter) {
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(LevelFilter::INFO.and(noise_filter.clone()));

    let debug_log = match OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
    {
        Ok(log_file) => Some(
            tracing_subscriber::fmt::layer()
                .pretty()
                .with_ansi(false)
                .with_writer(Arc::new(log_file))
                .with_filter(LevelFilter::DEBUG.and(noise_filter)),
        ),
        Err(error) => {
            eprintln!(
                "Could not open log file {}: {error}",
                config.log_file.display()
            );
            None
        }
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().ok())
        .with(stdout_log)
        .with(debug_log)
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
