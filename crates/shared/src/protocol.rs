use serde::{Deserialize, Serialize};

use crate::domain::NegotiationResult;

pub const START_NEGOTIATION_PATH: &str = "start_auto_negotiation";
pub const GENERATE_PDF_REPORT_PATH: &str = "generate_pdf_report";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfReportRequest {
    pub negotiation: NegotiationResult,
}
