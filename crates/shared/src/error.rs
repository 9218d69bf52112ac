use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the negotiation service on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

impl ApiErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Pre-flight rejection of form input. Never reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter an item name")]
    EmptyItem,
    #[error("Please enter valid prices")]
    InvalidPrice,
    #[error("Seller minimum price cannot be higher than buyer maximum price!")]
    SellerAboveBuyer,
    #[error("Prices must be positive values")]
    NonPositivePrice,
}
