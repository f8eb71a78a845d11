//! Exchange-to-Cloud Latency Map Host
//!
//! Headless host for the latency graph engine: loads settings and the
//! location catalog, runs the explorer actor with periodic refresh, and
//! logs every change a renderer would draw.

mod export;
mod settings;

use std::sync::Arc;

use anyhow::Context;
use lat_geo::LocationCatalog;
use lat_graph::{spawn_explorer, ExplorerEvent, LatencyExplorer};
use settings::Settings;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Include all our crates in the default filter
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "latmap=info,lat_geo=info,lat_graph=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting latmap");

    let settings = load_settings();
    let catalog = match &settings.catalog_path {
        Some(path) => LocationCatalog::load(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => LocationCatalog::reference(),
    };
    info!(
        "Catalog: {} exchanges, {} regions",
        catalog.exchanges().len(),
        catalog.regions().len()
    );

    let explorer = LatencyExplorer::with_config(Arc::new(catalog), settings.explorer.clone());
    let (handle, mut events, task) = spawn_explorer(explorer);

    if let Some(name) = &settings.select_point {
        if handle.select_point(name.as_str()).await?.is_none() {
            warn!("No visible connection touches {}, nothing selected", name);
        }
    }

    handle.start_refresh().await?;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => log_event(&event),
                Err(RecvError::Lagged(skipped)) => warn!("Event log fell behind, {} events skipped", skipped),
                Err(RecvError::Closed) => break,
            },
            result = &mut shutdown => {
                result.context("Failed to listen for Ctrl-C")?;
                info!("Ctrl-C received, shutting down");
                break;
            }
        }
    }

    handle.stop_refresh().await?;
    let graph = handle.snapshot().await?;
    if let Some(path) = &settings.export_path {
        let written = export::write_snapshot(&graph, path)?;
        info!("Exported {} connections to {}", written, path.display());
    }

    handle.shutdown().await?;
    task.await.context("Explorer actor panicked")?;

    Ok(())
}

/// Load settings, writing defaults on first run so there is a file to edit
fn load_settings() -> Settings {
    let exists = Settings::settings_path().is_some_and(|p| p.exists());
    let settings = Settings::load();
    if !exists {
        match settings.save() {
            Ok(()) => {
                if let Some(path) = Settings::settings_path() {
                    info!("Wrote default settings to {}", path.display());
                }
            }
            Err(e) => warn!("Could not write default settings: {:#}", e),
        }
    }
    settings
}

fn log_event(event: &ExplorerEvent) {
    match event {
        ExplorerEvent::GraphRebuilt {
            filters,
            points,
            connections,
        } => info!(
            "Graph: {} points, {} connections ({} band)",
            points,
            connections,
            filters.latency_range.name()
        ),
        ExplorerEvent::LatenciesRefreshed { tick, connections } => {
            debug!("Refresh {}: {} connections", tick, connections.len());
            for conn in connections {
                debug!("  {}", conn);
            }
        }
        ExplorerEvent::SelectionChanged {
            connection,
            range,
            stats,
        } => info!(
            "Selected {} over {}: min {} / avg {} / max {}",
            connection, range, stats.min, stats.avg, stats.max
        ),
        ExplorerEvent::RangeChanged { range, stats } => match stats {
            Some(stats) => info!(
                "Range {}: min {} / avg {} / max {}",
                range, stats.min, stats.avg, stats.max
            ),
            None => info!("Range {} (nothing selected)", range),
        },
        ExplorerEvent::SelectionCleared => info!("Selection cleared"),
        ExplorerEvent::RefreshStarted { interval_ms } => {
            info!("Refreshing every {} ms", interval_ms)
        }
        ExplorerEvent::RefreshStopped => info!("Refresh stopped"),
    }
}
