use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const STATUS_AGREED: &str = "agreed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentRole {
    Buyer,
    Seller,
    Mediator,
    Other,
}

impl AgentRole {
    /// Unknown names map to `Other` rather than failing.
    pub fn from_name(name: &str) -> Self {
        match name {
            "buyer" => Self::Buyer,
            "seller" => Self::Seller,
            "mediator" => Self::Mediator,
            _ => Self::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Buyer => "Buyer",
            Self::Seller => "Seller",
            Self::Mediator => "Mediator",
            Self::Other => "Agent",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Buyer => "🛒",
            Self::Seller => "🏪",
            Self::Mediator => "⚖️",
            Self::Other => "🤖",
        }
    }
}

/// One recorded turn of a negotiation.
///
/// `agent` keeps the name exactly as the server sent it, and unmodelled fields
/// land in `extra`, so a round survives the trip back to the report endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub round: u32,
    pub agent: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Round {
    pub fn role(&self) -> AgentRole {
        AgentRole::from_name(&self.agent)
    }
}

/// Negotiation outcome as returned by the server.
///
/// Fields the client does not interpret are kept in `extra` so the value can be
/// posted back to the report endpoint without losing anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationResult {
    pub status: String,
    #[serde(default)]
    pub item: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rounds: Option<Vec<Round>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NegotiationResult {
    pub fn is_agreed(&self) -> bool {
        self.status == STATUS_AGREED
    }

    pub fn rounds(&self) -> &[Round] {
        self.rounds.as_deref().unwrap_or_default()
    }

    /// `None` when the server omitted the rounds list entirely.
    pub fn round_count(&self) -> Option<usize> {
        self.rounds.as_ref().map(Vec::len)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBounds {
    pub buyer_max: f64,
    pub seller_min: f64,
}

impl PriceBounds {
    pub fn midpoint(&self) -> f64 {
        (self.buyer_max + self.seller_min) / 2.0
    }

    pub fn range(&self) -> f64 {
        self.buyer_max - self.seller_min
    }
}

/// Validated negotiation input. Build it through the client validator rather than by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationRequest {
    pub item: String,
    pub buyer_max: f64,
    pub seller_min: f64,
}

impl NegotiationRequest {
    pub fn bounds(&self) -> PriceBounds {
        PriceBounds {
            buyer_max: self.buyer_max,
            seller_min: self.seller_min,
        }
    }
}
