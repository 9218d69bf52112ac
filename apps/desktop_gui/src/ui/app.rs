use std::time::{Duration, Instant};

use client_core::{NegotiationController, NegotiationForm, NotificationKind};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::panels;

const IDLE_REPAINT: Duration = Duration::from_millis(250);
const BUSY_REPAINT: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendStatus {
    Starting,
    Ready,
    Failed(String),
}

pub struct NegotiationDeskApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    pub(crate) controller: NegotiationController,
    pub(crate) form: NegotiationForm,
    pub(crate) backend: BackendStatus,
    pub(crate) server_url: String,
}

impl NegotiationDeskApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        controller: NegotiationController,
        server_url: String,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            controller,
            form: NegotiationForm::default(),
            backend: BackendStatus::Starting,
            server_url,
        }
    }

    fn process_ui_events(&mut self, now: Instant) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::BackendReady => {
                    self.backend = BackendStatus::Ready;
                }
                UiEvent::BackendFailed(message) => {
                    self.controller.notify(
                        NotificationKind::Error,
                        format!("Backend failed to start: {message}"),
                        now,
                    );
                    self.backend = BackendStatus::Failed(message);
                }
                UiEvent::NegotiationFinished(outcome) => {
                    self.controller.finish_negotiation(outcome, now);
                }
                UiEvent::ReportFinished(outcome) => {
                    self.controller.finish_export(outcome, now);
                }
            }
        }
    }

    pub(crate) fn submit_negotiation(&mut self) {
        let now = Instant::now();
        let Some(request) = self.controller.begin_negotiation(&self.form, now) else {
            return;
        };
        if let Err(message) =
            dispatch_backend_command(&self.cmd_tx, BackendCommand::StartNegotiation { request })
        {
            self.controller.abort_negotiation(message, now);
        }
    }

    pub(crate) fn download_report(&mut self) {
        let Some(job) = self.controller.begin_export() else {
            return;
        };
        if let Err(message) =
            dispatch_backend_command(&self.cmd_tx, BackendCommand::GenerateReport { job })
        {
            self.controller.abort_export(message, Instant::now());
        }
    }

    fn is_busy(&self) -> bool {
        self.controller.loading().is_some()
            || self.controller.is_export_in_flight()
            || !self.controller.notifications().active().is_empty()
    }
}

impl eframe::App for NegotiationDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.process_ui_events(now);
        self.controller.poll(now);

        panels::show_header(self, ctx);
        panels::show_main(self, ctx);
        panels::show_loading_overlay(self, ctx);
        panels::show_notifications(self, ctx);

        if self.is_busy() {
            ctx.request_repaint_after(BUSY_REPAINT);
        } else {
            ctx.request_repaint_after(IDLE_REPAINT);
        }
    }
}
