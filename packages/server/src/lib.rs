#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for the REAL-UP neighborhood sentiment map.
//!
//! Serves the selection form, runs the plot pipeline for each submitted
//! form on the blocking thread pool, and serves the rendered map so the
//! result page can embed it. Static assets are served from the configured
//! static directory under `/static`.

pub mod config;
mod handlers;
pub mod interactive;
pub mod pages;

use std::sync::Arc;

use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use realup_map_plot::PlotConfig;

pub use config::{ConfigError, ServerConfig};
pub use handlers::{ApiHealth, MapForm};

/// Shared application state.
pub struct AppState {
    /// Plot pipeline settings, read once at startup.
    pub plot: Arc<PlotConfig>,
}

/// Registers the application routes.
///
/// Static file serving is added separately by [`run_server`] since it
/// depends on the configured directory.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index))
        .route("/realup-map", web::post().to(handlers::realup_map))
        .route("/map", web::get().to(handlers::map_view))
        .service(web::scope("/api").route("/health", web::get().to(handlers::health)));
}

/// Initializes the global logger from `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logger() {
    let _ = pretty_env_logger::try_init_custom_env("RUST_LOG");
}

/// Starts the REAL-UP map server.
///
/// This is a regular async function; the caller is responsible for
/// providing the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    init_logger();

    let ServerConfig {
        bind_addr,
        port,
        static_dir,
        plot,
    } = config;

    log::info!(
        "Plotting from {} into {}",
        plot.data_dir.display(),
        plot.map_path.display()
    );

    let state = web::Data::new(AppState {
        plot: Arc::new(plot),
    });

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
            .service(Files::new("/static", &static_dir))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
