#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Standalone entry point for the REAL-UP map server.
//!
//! Reads configuration from `REALUP_CONFIG` and the environment.

use realup_map_server::{ServerConfig, init_logger, run_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_logger();

    let config = ServerConfig::load(None).map_err(std::io::Error::other)?;
    run_server(config).await
}
