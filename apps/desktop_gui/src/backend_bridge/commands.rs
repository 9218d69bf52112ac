//! Backend commands queued from UI to backend worker.

use client_core::ExportJob;
use shared::domain::NegotiationRequest;

pub enum BackendCommand {
    StartNegotiation { request: NegotiationRequest },
    GenerateReport { job: ExportJob },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::StartNegotiation { .. } => "start_negotiation",
            Self::GenerateReport { .. } => "generate_report",
        }
    }
}
