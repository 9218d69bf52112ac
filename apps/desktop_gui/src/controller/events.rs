//! Backend-to-UI events.

use client_core::{ClientError, ExportError, ExportOutcome};
use shared::domain::NegotiationResult;

pub enum UiEvent {
    BackendReady,
    BackendFailed(String),
    NegotiationFinished(Result<NegotiationResult, ClientError>),
    ReportFinished(Result<ExportOutcome, ExportError>),
}
