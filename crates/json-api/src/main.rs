//! Audioshelf JSON API Server

use std::process::ExitCode;

use salvo::{
    affix_state::inject,
    oapi::{OpenApi, swagger_ui::SwaggerUi},
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use audioshelf_app::context::AppContext;

use crate::{config::ServerConfig, observability::Observability, state::State};

mod cart;
mod config;
mod extensions;
mod healthcheck;
mod money;
mod observability;
mod orders;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Audioshelf JSON API Server entry point
#[tokio::main]
pub async fn main() -> ExitCode {
    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(source) => {
            #[expect(
                clippy::print_stderr,
                reason = "logging not initialized yet, must use eprintln for config errors"
            )]
            {
                eprintln!("Configuration error: {source}");
            }

            return ExitCode::FAILURE;
        }
    };

    let observability = match Observability::init(&config) {
        Ok(observability) => observability,
        Err(source) => {
            #[expect(
                clippy::print_stderr,
                reason = "tracing failed to initialise, stderr is all that is left"
            )]
            {
                eprintln!("Observability error: {source}");
            }

            return ExitCode::FAILURE;
        }
    };

    let app = match AppContext::from_settings(
        &config.database.settings(),
        config.catalog.backend(),
    )
    .await
    {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");
            observability.shutdown();

            return ExitCode::FAILURE;
        }
    };

    let addr = config.socket_addr();

    info!(
        catalog = if config.catalog.catalog_url.is_some() { "http" } else { "database" },
        "starting server on {addr}"
    );

    let listener = TcpListener::new(addr).bind().await;

    let api = router::api_router();

    let doc = OpenApi::new("Audioshelf API", env!("CARGO_PKG_VERSION")).merge_router(&api);

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::new(app)))
        .hoop(observability::request_logging)
        .push(api)
        .push(router::ops_router())
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);
    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;

    info!("server stopped");
    observability.shutdown();

    ExitCode::SUCCESS
}
