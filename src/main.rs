use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use isis_synth::config::Config;
use isis_synth::render::Renderer;
use isis_synth::secrets::SecretStore;
use isis_synth::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "isis_synth=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let cfg = Config::load();
    tracing::info!("Starting IS-IS synthesis server");
    tracing::info!("Templates Dir: {}", cfg.templates_dir);
    tracing::info!("Secret salt: {:?}", cfg.secret_salt);
    tracing::info!("Secret cache size: {}", cfg.secret_cache_size);
    tracing::info!("Listen: {}", cfg.listen_addr);

    let renderer = load_renderer(&cfg.templates_dir);

    // Create app state
    let state = Arc::new(AppState {
        config: cfg.clone(),
        secrets: SecretStore::with_capacity(cfg.secret_cache_size),
        renderer,
    });

    // Build router
    let app = router::build(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&cfg.listen_addr).await?;
    tracing::info!("isis-synth listening on {}", cfg.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("isis-synth shutting down");
    Ok(())
}

fn load_renderer(templates_dir: &str) -> Option<Renderer> {
    match Renderer::from_dir(templates_dir) {
        Ok(renderer) if renderer.template_count() > 0 => {
            tracing::info!("Loaded {} templates", renderer.template_count());
            Some(renderer)
        }
        Ok(_) => {
            tracing::warn!("No templates found in {} - rendering disabled", templates_dir);
            None
        }
        Err(e) => {
            tracing::warn!("{:#} - rendering disabled", e);
            None
        }
    }
}

/// Resolves on Ctrl+C, or on SIGTERM where the platform has it
async fn shutdown_signal() {
    let interrupt = async {
        match signal::ctrl_c().await {
            Ok(()) => "Ctrl+C",
            Err(e) => {
                tracing::error!("Ctrl+C listener unavailable: {}", e);
                std::future::pending().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::SignalKind;
        match signal::unix::signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                "SIGTERM"
            }
            Err(e) => {
                tracing::error!("SIGTERM listener unavailable: {}", e);
                std::future::pending().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&'static str>();

    let received = tokio::select! {
        name = interrupt => name,
        name = terminate => name,
    };
    tracing::info!("{} received, draining connections", received);
}
