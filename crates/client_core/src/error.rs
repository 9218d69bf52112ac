use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("unreadable response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ClientError {
    /// Notification text shown when starting a negotiation fails.
    pub fn negotiation_notice(&self) -> String {
        match self {
            Self::InvalidUrl(err) => format!("Invalid server URL: {err}"),
            Self::Api { message, .. } => format!("Error: {message}"),
            Self::Network(_) => {
                "Error starting negotiation. Please check your connection.".to_string()
            }
            Self::Decode(_) => {
                "Received an unreadable response from the negotiation service".to_string()
            }
        }
    }

    /// Notification text shown when the PDF report request fails.
    pub fn report_notice(&self) -> String {
        match self {
            Self::InvalidUrl(err) => format!("Invalid server URL: {err}"),
            Self::Api { .. } => "Error generating PDF report".to_string(),
            Self::Network(_) | Self::Decode(_) => "Error downloading PDF report".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    pub fn notice(&self) -> String {
        match self {
            Self::Client(err) => err.report_notice(),
            Self::Io { source, .. } => format!("Failed to save PDF report: {source}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_notice_prefixes_server_message() {
        let err = ClientError::Api {
            status: 400,
            message: "Invalid item".to_string(),
        };
        assert_eq!(err.negotiation_notice(), "Error: Invalid item");
        assert_eq!(err.report_notice(), "Error generating PDF report");
    }

    #[test]
    fn io_failure_notice_names_the_cause() {
        let err = ExportError::Io {
            path: PathBuf::from("/nope/report.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.notice(), "Failed to save PDF report: denied");
    }
}
