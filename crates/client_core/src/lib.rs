use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use shared::{
    domain::{NegotiationRequest, NegotiationResult},
    error::ApiErrorBody,
    protocol::{PdfReportRequest, GENERATE_PDF_REPORT_PATH, START_NEGOTIATION_PATH},
};
use tracing::{info, warn};
use url::Url;

pub mod controller;
pub mod error;
pub mod export;
pub mod loading;
pub mod metrics;
pub mod notifications;
pub mod report;
pub mod settings;
pub mod validation;

pub use controller::{run_export, run_negotiation, NegotiationController, UiState};
pub use error::{ClientError, ExportError};
pub use export::{ExportJob, ExportOutcome};
pub use notifications::{Notification, NotificationKind};
pub use report::NegotiationReport;
pub use validation::NegotiationForm;

/// The two calls the negotiation service exposes.
#[async_trait]
pub trait NegotiationApi: Send + Sync {
    async fn start_negotiation(
        &self,
        request: &NegotiationRequest,
    ) -> Result<NegotiationResult, ClientError>;

    /// Returns the raw PDF bytes.
    async fn generate_pdf_report(
        &self,
        negotiation: &NegotiationResult,
    ) -> Result<Vec<u8>, ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpNegotiationClient {
    http: Client,
    base_url: Url,
}

impl HttpNegotiationClient {
    pub fn new(server_url: &str) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(server_url.trim())?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            http: Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }
}

#[async_trait]
impl NegotiationApi for HttpNegotiationClient {
    async fn start_negotiation(
        &self,
        request: &NegotiationRequest,
    ) -> Result<NegotiationResult, ClientError> {
        let url = self.endpoint(START_NEGOTIATION_PATH)?;
        info!(item = %request.item, buyer_max = request.buyer_max, seller_min = request.seller_min, "starting negotiation");
        let res = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(ClientError::Network)?;
        let res = ensure_success(res).await?;
        let body = res.bytes().await.map_err(ClientError::Network)?;
        let result: NegotiationResult =
            serde_json::from_slice(&body).map_err(ClientError::Decode)?;
        info!(status = %result.status, rounds = result.rounds().len(), "negotiation finished");
        Ok(result)
    }

    async fn generate_pdf_report(
        &self,
        negotiation: &NegotiationResult,
    ) -> Result<Vec<u8>, ClientError> {
        let url = self.endpoint(GENERATE_PDF_REPORT_PATH)?;
        info!(item = %negotiation.item, "requesting pdf report");
        let res = self
            .http
            .post(url)
            .json(&PdfReportRequest {
                negotiation: negotiation.clone(),
            })
            .send()
            .await
            .map_err(ClientError::Network)?;
        let res = ensure_success(res).await?;
        let bytes = res.bytes().await.map_err(ClientError::Network)?;
        Ok(bytes.to_vec())
    }
}

async fn ensure_success(res: Response) -> Result<Response, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    let message = api_error_message(status, &body);
    warn!(status = status.as_u16(), %message, "negotiation service returned an error");
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

fn api_error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) => format!("request failed with status {}", status.as_u16()),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
