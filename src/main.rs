use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use log::info;
use tokio::net::TcpListener;

use astroroast::api::{self, AppState};
use astroroast::banner::{BannerInfo, model_cache_label, print_banner};
use astroroast::config::Config;
use astroroast::engine::roast::RoastEngine;
use astroroast::ephemeris::kepler::KeplerEphemeris;
use astroroast::oracle::gemini::GeminiClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real deployments set the environment directly.
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();

    let oracle = Arc::new(GeminiClient::new(config.gemini()));
    let engine = RoastEngine::new(
        Arc::new(KeplerEphemeris),
        oracle,
        config.model_cache_ttl(),
        config.roast(),
    );
    let app = api::router(AppState {
        engine: Arc::new(engine),
    });

    let addr = config.bind_addr();
    print_banner(&BannerInfo {
        addr: &addr,
        api_base: &config.api_base,
        fallback_model: &config.fallback_model,
        model_cache: &model_cache_label(config.model_cache_ttl),
        locale: config.locale.code(),
    });

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("goodbye.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("failed to listen for ctrl+c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutting down");
}
