//! Session-scoped state for one negotiation front end.
//!
//! The controller never performs I/O itself. Front ends call `begin_*`, run the
//! returned request on whatever executor they own, and hand the outcome back to
//! `finish_*`. Time is always passed in so the whole lifecycle is reproducible.

use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use shared::domain::{NegotiationRequest, NegotiationResult, PriceBounds};
use tracing::{info, warn};

use crate::{
    error::{ClientError, ExportError},
    export::{report_filename, save_report, ExportJob, ExportOutcome},
    loading::LoadingSequencer,
    notifications::{NotificationCenter, NotificationKind},
    report::{render_report, NegotiationReport},
    validation::{validate_form, NegotiationForm},
    NegotiationApi,
};

/// Extra time the overlay stays up after the response arrives.
pub const RESULTS_REVEAL_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiState {
    Idle,
    Loading { step: usize },
    ResultsShown,
}

#[derive(Debug)]
enum Phase {
    Idle,
    Loading(LoadingSequencer),
    ResultsShown,
}

#[derive(Debug, Clone)]
struct RetainedNegotiation {
    result: NegotiationResult,
    report: NegotiationReport,
}

#[derive(Debug)]
pub struct NegotiationController {
    phase: Phase,
    reveal_at: Option<Instant>,
    retained: Option<RetainedNegotiation>,
    /// Bounds of the request currently in flight.
    in_flight: Option<PriceBounds>,
    export_in_flight: bool,
    notifications: NotificationCenter,
}

impl Default for NegotiationController {
    fn default() -> Self {
        Self::new(NotificationCenter::default())
    }
}

impl NegotiationController {
    pub fn new(notifications: NotificationCenter) -> Self {
        Self {
            phase: Phase::Idle,
            reveal_at: None,
            retained: None,
            in_flight: None,
            export_in_flight: false,
            notifications,
        }
    }

    pub fn state(&self) -> UiState {
        match &self.phase {
            Phase::Idle => UiState::Idle,
            Phase::Loading(sequencer) => UiState::Loading {
                step: sequencer.current_step(),
            },
            Phase::ResultsShown => UiState::ResultsShown,
        }
    }

    pub fn loading(&self) -> Option<&LoadingSequencer> {
        match &self.phase {
            Phase::Loading(sequencer) => Some(sequencer),
            _ => None,
        }
    }

    pub fn can_submit(&self) -> bool {
        self.in_flight.is_none() && !matches!(self.phase, Phase::Loading(_))
    }

    pub fn can_export(&self) -> bool {
        self.retained.is_some() && !self.export_in_flight
    }

    pub fn is_export_in_flight(&self) -> bool {
        self.export_in_flight
    }

    /// Rendered results, once they have been revealed.
    pub fn report(&self) -> Option<&NegotiationReport> {
        match self.phase {
            Phase::ResultsShown => self.retained.as_ref().map(|retained| &retained.report),
            _ => None,
        }
    }

    pub fn retained_result(&self) -> Option<&NegotiationResult> {
        self.retained.as_ref().map(|retained| &retained.result)
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn dismiss_notification(&mut self, id: u64) -> bool {
        self.notifications.dismiss(id)
    }

    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>, now: Instant) {
        self.notifications.push(kind, message, now);
    }

    /// Validates the form and, if accepted, enters the loading state.
    ///
    /// Returns the request to send, or `None` when validation failed (an error
    /// notification has been queued) or a negotiation is already running.
    pub fn begin_negotiation(
        &mut self,
        form: &NegotiationForm,
        now: Instant,
    ) -> Option<NegotiationRequest> {
        if !self.can_submit() {
            return None;
        }

        let request = match validate_form(form) {
            Ok(request) => request,
            Err(err) => {
                self.notifications
                    .push(NotificationKind::Error, err.to_string(), now);
                return None;
            }
        };

        self.in_flight = Some(request.bounds());
        self.reveal_at = None;
        self.phase = Phase::Loading(LoadingSequencer::start(now));
        Some(request)
    }

    pub fn finish_negotiation(
        &mut self,
        outcome: Result<NegotiationResult, ClientError>,
        now: Instant,
    ) {
        let Some(bounds) = self.in_flight.take() else {
            warn!("negotiation outcome arrived with no request in flight; ignoring");
            return;
        };

        match outcome {
            Ok(result) => {
                let report = render_report(&result, bounds);
                self.retained = Some(RetainedNegotiation { result, report });
                self.reveal_at = Some(now + RESULTS_REVEAL_DELAY);
            }
            Err(err) => {
                warn!("negotiation failed: {err}");
                self.notifications
                    .push(NotificationKind::Error, err.negotiation_notice(), now);
                self.phase = self.resting_phase();
            }
        }
    }

    /// Releases the in-flight slot when the request could not be sent at all.
    pub fn abort_negotiation(&mut self, message: impl Into<String>, now: Instant) {
        if self.in_flight.take().is_none() {
            return;
        }
        self.notifications.push(NotificationKind::Error, message, now);
        self.phase = self.resting_phase();
    }

    /// Drives timers: loading steps, the delayed reveal and notification expiry.
    pub fn poll(&mut self, now: Instant) {
        if let Phase::Loading(sequencer) = &mut self.phase {
            sequencer.tick(now);
        }

        if self.reveal_at.is_some_and(|at| now >= at) {
            self.reveal_at = None;
            self.phase = Phase::ResultsShown;
            self.notifications.push(
                NotificationKind::Success,
                "Negotiation completed successfully!",
                now,
            );
        }

        self.notifications.prune(now);
    }

    /// When the pending reveal is due, if any.
    pub fn reveal_deadline(&self) -> Option<Instant> {
        self.reveal_at
    }

    /// Claims the export slot for the retained result. `None` means the
    /// download control is inert: nothing retained or an export already running.
    pub fn begin_export(&mut self) -> Option<ExportJob> {
        if !self.can_export() {
            return None;
        }
        let retained = self.retained.as_ref()?;
        self.export_in_flight = true;
        Some(ExportJob {
            filename: report_filename(&retained.result.item),
            negotiation: retained.result.clone(),
        })
    }

    pub fn finish_export(&mut self, outcome: Result<ExportOutcome, ExportError>, now: Instant) {
        self.export_in_flight = false;
        match outcome {
            Ok(ExportOutcome::Saved(path)) => {
                info!(path = %path.display(), "pdf report downloaded");
                self.notifications.push(
                    NotificationKind::Success,
                    "PDF report downloaded successfully!",
                    now,
                );
            }
            Ok(ExportOutcome::Cancelled) => {
                self.notifications
                    .push(NotificationKind::Info, "PDF download cancelled", now);
            }
            Err(err) => {
                warn!("pdf export failed: {err}");
                self.notifications
                    .push(NotificationKind::Error, err.notice(), now);
            }
        }
    }

    pub fn abort_export(&mut self, message: impl Into<String>, now: Instant) {
        if !self.export_in_flight {
            return;
        }
        self.export_in_flight = false;
        self.notifications.push(NotificationKind::Error, message, now);
    }

    fn resting_phase(&self) -> Phase {
        if self.retained.is_some() {
            Phase::ResultsShown
        } else {
            Phase::Idle
        }
    }
}

/// Validates `form`, awaits the negotiation call and hands the outcome back.
/// Returns false when nothing was sent. The reveal still waits for `poll`.
pub async fn run_negotiation<A: NegotiationApi + ?Sized>(
    controller: &mut NegotiationController,
    api: &A,
    form: &NegotiationForm,
) -> bool {
    let Some(request) = controller.begin_negotiation(form, Instant::now()) else {
        return false;
    };
    let outcome = api.start_negotiation(&request).await;
    controller.finish_negotiation(outcome, Instant::now());
    true
}

/// Fetches the report for the retained negotiation and writes it into `dir`.
/// Returns the saved path, or `None` if nothing was exported.
pub async fn run_export<A: NegotiationApi + ?Sized>(
    controller: &mut NegotiationController,
    api: &A,
    dir: &Path,
) -> Option<PathBuf> {
    let job = controller.begin_export()?;
    let outcome = fetch_and_save(api, &job, dir).await;
    let saved = outcome.as_ref().ok().cloned();
    controller.finish_export(outcome.map(ExportOutcome::Saved), Instant::now());
    saved
}

async fn fetch_and_save<A: NegotiationApi + ?Sized>(
    api: &A,
    job: &ExportJob,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let bytes = api.generate_pdf_report(&job.negotiation).await?;
    save_report(dir, &job.filename, &bytes).await
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
