mod backend_bridge;
mod controller;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use client_core::{
    notifications::NotificationCenter, settings::load_settings, NegotiationController,
};
use crossbeam_channel::bounded;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::NegotiationDeskApp;

/// Desktop front end for the automatic negotiation service.
#[derive(Parser, Debug)]
#[command(name = "negotiation-desk")]
struct Args {
    /// Overrides `server_url` from negotiation_desk.toml / environment.
    #[arg(long)]
    server_url: Option<String>,
    /// Directory the save dialog opens in.
    #[arg(long)]
    download_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if let Some(dir) = args.download_dir {
        settings.download_dir = Some(dir);
    }
    let server_url = settings.validated_server_url()?.to_string();
    tracing::info!(server = %server_url, "starting negotiation desk");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(
        server_url.clone(),
        settings.download_dir.clone(),
        cmd_rx,
        ui_tx,
    );

    let controller =
        NegotiationController::new(NotificationCenter::new(settings.notification_ttl));
    let app = NegotiationDeskApp::new(cmd_tx, ui_rx, controller, server_url);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("AI Negotiation Desk")
            .with_inner_size([1100.0, 780.0])
            .with_min_inner_size([720.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "AI Negotiation Desk",
        options,
        Box::new(|cc| {
            ui::theme::apply(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| anyhow::anyhow!("desktop ui exited with an error: {err}"))
}
