//! Runtime bridge between the UI command queue and backend event intake.

use std::{path::PathBuf, sync::Arc, thread};

use client_core::{
    export::{default_download_dir, write_report},
    ExportError, ExportJob, ExportOutcome, HttpNegotiationClient, NegotiationApi,
};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(
    server_url: String,
    download_dir: Option<PathBuf>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "Backend worker startup failure: {err}"
                )));
                return;
            }
        };

        let client = match HttpNegotiationClient::new(&server_url) {
            Ok(client) => Arc::new(client),
            Err(err) => {
                tracing::error!("invalid negotiation service url '{server_url}': {err}");
                let _ = ui_tx.try_send(UiEvent::BackendFailed(err.to_string()));
                return;
            }
        };
        tracing::info!(server = %client.base_url(), "backend worker ready");
        let _ = ui_tx.try_send(UiEvent::BackendReady);

        // Each command runs as its own task so a slow report never blocks a negotiation.
        while let Ok(cmd) = cmd_rx.recv() {
            let client = Arc::clone(&client);
            let ui_tx = ui_tx.clone();
            let download_dir = download_dir.clone();
            match cmd {
                BackendCommand::StartNegotiation { request } => {
                    runtime.spawn(async move {
                        let outcome = client.start_negotiation(&request).await;
                        let _ = ui_tx.send(UiEvent::NegotiationFinished(outcome));
                    });
                }
                BackendCommand::GenerateReport { job } => {
                    runtime.spawn(async move {
                        let outcome = generate_and_save(client.as_ref(), job, download_dir).await;
                        let _ = ui_tx.send(UiEvent::ReportFinished(outcome));
                    });
                }
            }
        }
        tracing::info!("ui command queue closed; backend worker exiting");
    });
}

async fn generate_and_save(
    client: &HttpNegotiationClient,
    job: ExportJob,
    download_dir: Option<PathBuf>,
) -> Result<ExportOutcome, ExportError> {
    let bytes = client.generate_pdf_report(&job.negotiation).await?;
    let Some(path) = pick_save_path(job.filename, download_dir).await else {
        return Ok(ExportOutcome::Cancelled);
    };
    write_report(&path, &bytes).await?;
    Ok(ExportOutcome::Saved(path))
}

async fn pick_save_path(filename: String, download_dir: Option<PathBuf>) -> Option<PathBuf> {
    let picked = tokio::task::spawn_blocking(move || {
        let directory = download_dir.unwrap_or_else(default_download_dir);
        rfd::FileDialog::new()
            .set_directory(directory)
            .set_file_name(&filename)
            .add_filter("PDF", &["pdf"])
            .save_file()
    })
    .await;
    match picked {
        Ok(path) => path,
        Err(err) => {
            tracing::error!("save dialog task failed: {err}");
            None
        }
    }
}
