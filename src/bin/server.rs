use std::{
    fs::OpenOptions,
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use expense_tracker::{AppState, PaginationConfig, build_router, graceful_shutdown, logging_middleware};

/// A web app for recording expenses and charting where the money went.
///
/// Expenses are kept in memory and are lost when the server stops.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The address to serve the app from.
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// The port to serve the app from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The number of expenses shown on each page of the expense list.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    page_size: u64,

    /// The canonical name of the local timezone, used for the default date of
    /// new expenses, e.g. "Pacific/Auckland".
    #[arg(long, default_value = "Etc/UTC")]
    timezone: String,

    /// Also write debug logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log every request and response body.
    #[arg(long)]
    log_bodies: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(error) = setup_logging(args.log_file.as_deref()) {
        eprintln!("could not open log file: {error}");
        return ExitCode::FAILURE;
    }

    if is_valid_timezone(&args.timezone) {
        tracing::info!("Using local timezone {}", args.timezone);
    } else {
        tracing::error!(
            "\"{}\" is not a valid canonical timezone name, e.g. \"Pacific/Auckland\"",
            args.timezone
        );
        return ExitCode::FAILURE;
    }

    let pagination_config = PaginationConfig {
        page_size: args.page_size,
        ..Default::default()
    };
    let state = AppState::new(&args.timezone, pagination_config);

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let mut router = build_router(state);
    if args.log_bodies {
        router = router.layer(middleware::from_fn(logging_middleware));
    }
    let router = add_tracing_layer(router);

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    let addr = SocketAddr::new(args.host, args.port);
    tracing::info!("HTTP server listening on {}", addr);

    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("server stopped with an error: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn is_valid_timezone(timezone: &str) -> bool {
    time_tz::timezones::get_by_name(timezone).is_some()
}

fn setup_logging(log_file: Option<&Path>) -> std::io::Result<()> {
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let debug_log = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;

            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(file))
                    .with_filter(filter::LevelFilter::DEBUG),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();

    Ok(())
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
        // Errors are logged by the handlers that produce them.
        .on_failure(());

    router.layer(tracing_layer)
}
