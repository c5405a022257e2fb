// SPDX-FileCopyrightText: 2026 Kiosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `kiosk serve` command implementation.
//!
//! Wires the commerce client, the Telegram channel, and the intake engine
//! together and runs the dispatcher until a shutdown signal arrives.

use std::sync::Arc;

use kiosk_catalog::CommerceClient;
use kiosk_config::model::KioskConfig;
use kiosk_core::error::KioskError;
use kiosk_core::traits::{ChatChannel, CommerceApi};
use kiosk_intake::{IntakeDispatcher, IntakeEngine, SessionStore};
use kiosk_telegram::TelegramChannel;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Runs the `kiosk serve` command.
pub async fn run_serve(config: KioskConfig) -> Result<(), KioskError> {
    init_tracing(&config.bot.log_level);

    info!(bot_name = config.bot.name.as_str(), "starting kiosk serve");

    let commerce: Arc<dyn CommerceApi> = Arc::new(CommerceClient::new(&config.commerce)?);
    info!(
        base_url = config.commerce.base_url.as_str(),
        "commerce client initialized"
    );

    let mut telegram = TelegramChannel::new(&config.telegram).map_err(|e| {
        error!(error = %e, "failed to initialize Telegram channel");
        eprintln!(
            "error: Telegram bot token required. Set telegram.bot_token in kiosk.toml \
             or the KIOSK_TELEGRAM_BOT_TOKEN environment variable."
        );
        e
    })?;
    telegram.connect().await?;
    let channel: Arc<dyn ChatChannel> = Arc::new(telegram);
    info!("telegram channel connected");

    let engine = build_engine(&config, commerce);
    let dispatcher = IntakeDispatcher::new(engine, channel, config.intake.idle_timeout_secs);

    let cancel = install_signal_handler();
    dispatcher.run(cancel).await?;

    info!("kiosk serve shutdown complete");
    Ok(())
}

/// Builds the intake engine from configuration and a commerce collaborator.
fn build_engine(config: &KioskConfig, commerce: Arc<dyn CommerceApi>) -> Arc<IntakeEngine> {
    Arc::new(IntakeEngine::new(
        commerce,
        SessionStore::new(),
        config.intake.clone(),
        config.commerce.catalog_page_size,
    ))
}

/// Installs signal handlers for SIGTERM and SIGINT.
///
/// Returns a [`CancellationToken`] that is cancelled when either signal is
/// received.
fn install_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm =
                signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");

            tokio::select! {
                _ = ctrl_c => {
                    info!("received SIGINT (Ctrl+C), initiating shutdown");
                }
                _ = sigterm.recv() => {
                    info!("received SIGTERM, initiating shutdown");
                }
            }
        }

        #[cfg(not(unix))]
        {
            let _ = ctrl_c.await;
            info!("received Ctrl+C, initiating shutdown");
        }

        token_clone.cancel();
        debug!("shutdown signal handler completed");
    });

    token
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("kiosk={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
