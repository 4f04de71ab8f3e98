//! Application orchestrator: wires the menu, the bus objects and the poller.

use std::net::SocketAddr;
use std::sync::Arc;

use linkhub_backend::Client;
use linkhub_menu::{LayoutNotifier, MenuStore, Reconciler, TrayEvent, TrayHandle, populate_static};
use linkhub_protocol::constants::SERVICE_NAME;
use linkhub_sni::signal::signal_pump;
use linkhub_sni::{ItemConfig, LayoutSignal, register_with_watcher, serve};
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::desktop::ensure_supported;
use crate::error::StartupError;
use crate::poller::poll_loop;

/// Runs the tray until Quit is activated or SIGINT arrives.
pub async fn run(config: Config, backend: SocketAddr) -> Result<(), StartupError> {
    let desktop = std::env::var("XDG_CURRENT_DESKTOP").ok();
    ensure_supported(desktop.as_deref())?;

    let cancel = CancellationToken::new();
    let store = Arc::new(MenuStore::new());
    let (mut tray, events) = TrayHandle::new();
    let (layout_signal, revisions) = LayoutSignal::channel();

    // -- Poller, gated on bus readiness --
    let client = Client::new(backend, config.request_timeout())?;
    tracing::info!(url = client.url(), "polling backend");
    let reconciler = Reconciler::new(Arc::clone(&store), layout_signal.clone());
    let (ready_tx, ready_rx) = oneshot::channel();
    let poller = tokio::spawn(poll_loop(
        client,
        reconciler,
        config.poll_interval(),
        ready_rx,
        cancel.clone(),
    ));

    // -- Bus objects --
    let revision = populate_static(&store);
    tracing::debug!(revision, "static menu populated");
    let conn = serve(Arc::clone(&store), events, ItemConfig::default()).await?;

    tokio::spawn(signal_pump(conn.clone(), revisions, cancel.clone()));

    if let Err(e) = register_with_watcher(&conn, SERVICE_NAME).await {
        tracing::warn!("failed to register with StatusNotifierWatcher: {e}");
    }

    // Shells that cached an older layout refresh on this.
    layout_signal.layout_updated(store.revision());

    if ready_tx.send(()).is_err() {
        tracing::warn!("poller exited before startup completed");
    }
    tracing::info!("tray ready");

    // -- Main loop: menu events until shutdown --
    let dashboard = config.dashboard_url();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("SIGINT received, shutting down");
                break;
            }
            event = tray.recv() => match event {
                Some(TrayEvent::OpenDashboard) => {
                    tracing::info!(url = %dashboard, "opening dashboard");
                    if let Err(e) = open::that_detached(&dashboard) {
                        tracing::error!("failed to open dashboard: {e}");
                    }
                }
                Some(TrayEvent::QuitRequested) => {
                    tracing::info!("quit requested via tray");
                    break;
                }
                None => {
                    tracing::warn!("menu object dropped, shutting down");
                    break;
                }
            },
        }
    }

    // -- Graceful shutdown --
    cancel.cancel();
    if let Err(e) = poller.await {
        tracing::error!("poller task failed: {e}");
    }
    drop(conn);

    Ok(())
}
