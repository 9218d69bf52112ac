//! Rendering of a finished negotiation into a presentation model.
//!
//! `render_report` is pure: the GUI lays the model out with widgets, the CLI
//! prints it through `Display`.

use std::fmt;

use shared::domain::{AgentRole, NegotiationResult, PriceBounds};

use crate::metrics::DerivedMetrics;

pub const SUMMARY_FALLBACK: &str = "The negotiation involved strategic back-and-forth between \
intelligent agents representing buyer and seller interests, with a mediator facilitating fair \
resolution.";

pub const ANALYSIS_FALLBACK: &str = "This negotiation demonstrated typical market dynamics with \
both parties employing strategic positioning to achieve favorable outcomes. The AI agents \
utilized advanced negotiation tactics including anchoring, concession patterns, and deadline \
pressure.";

pub const NO_AGREEMENT_FALLBACK: &str = "No agreement reached between parties";
pub const NO_ROUNDS_TEXT: &str = "No negotiation rounds recorded.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerTone {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusBanner {
    pub tone: BannerTone,
    pub icon: &'static str,
    pub headline: String,
    pub details: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryBlock {
    pub item: String,
    pub buyer_max: f64,
    pub seller_min: f64,
    pub range: f64,
    pub round_count: usize,
    pub duration_minutes: usize,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    pub round: u32,
    pub role: AgentRole,
    pub price: Option<f64>,
    pub message: String,
    pub strategy: Option<String>,
}

impl TimelineEntry {
    pub fn agent_label(&self) -> String {
        format!("{} {}", self.role.icon(), self.role.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisBlock {
    pub text: String,
    pub metrics: DerivedMetrics,
    /// Fair value index as displayed: one decimal, or a bare `7` when no final price is known.
    pub fairness_text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NegotiationReport {
    pub status: StatusBanner,
    pub summary: SummaryBlock,
    pub timeline: Vec<TimelineEntry>,
    pub analysis: AnalysisBlock,
}

pub fn render_report(result: &NegotiationResult, bounds: PriceBounds) -> NegotiationReport {
    NegotiationReport {
        status: status_banner(result, bounds),
        summary: summary_block(result, bounds),
        timeline: result
            .rounds()
            .iter()
            .map(|round| TimelineEntry {
                round: round.round,
                role: round.role(),
                // A zero price is treated as "no price quoted".
                price: round.price.filter(|price| *price != 0.0),
                message: round.message.clone(),
                strategy: round.strategy.clone(),
            })
            .collect(),
        analysis: analysis_block(result, bounds),
    }
}

pub fn format_money(value: f64) -> String {
    format!("${value:.2}")
}

pub fn duration_estimate_minutes(round_count: usize) -> usize {
    (round_count / 2).max(1)
}

fn status_banner(result: &NegotiationResult, bounds: PriceBounds) -> StatusBanner {
    if result.is_agreed() {
        let details = match result.final_price {
            Some(price) => vec![
                format!("Deal agreed at {}", format_money(price)),
                format!(
                    "Savings: {} from average price",
                    format_money((price - bounds.midpoint()).abs())
                ),
            ],
            None => Vec::new(),
        };
        StatusBanner {
            tone: BannerTone::Success,
            icon: "🎉",
            headline: "Negotiation Successful!".to_string(),
            details,
        }
    } else {
        StatusBanner {
            tone: BannerTone::Failure,
            icon: "💔",
            headline: "Negotiation Failed".to_string(),
            details: vec![non_empty_or(result.reason.as_deref(), NO_AGREEMENT_FALLBACK)],
        }
    }
}

fn summary_block(result: &NegotiationResult, bounds: PriceBounds) -> SummaryBlock {
    let round_count = result.rounds().len();
    SummaryBlock {
        item: non_empty_or(Some(result.item.as_str()), "N/A"),
        buyer_max: bounds.buyer_max,
        seller_min: bounds.seller_min,
        range: bounds.range(),
        round_count,
        duration_minutes: duration_estimate_minutes(round_count),
        description: non_empty_or(result.summary.as_deref(), SUMMARY_FALLBACK),
    }
}

fn analysis_block(result: &NegotiationResult, bounds: PriceBounds) -> AnalysisBlock {
    let metrics = DerivedMetrics::compute(result, bounds);
    let fairness_text = match result.final_price {
        Some(_) => format!("{:.1}", metrics.fairness),
        None => format!("{}", metrics.fairness),
    };
    AnalysisBlock {
        text: non_empty_or(result.analysis.as_deref(), ANALYSIS_FALLBACK),
        metrics,
        fairness_text,
    }
}

fn non_empty_or(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => fallback.to_string(),
    }
}

impl fmt::Display for NegotiationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.status.icon, self.status.headline)?;
        for line in &self.status.details {
            writeln!(f, "  {line}")?;
        }

        let summary = &self.summary;
        writeln!(f)?;
        writeln!(f, "📊 Executive Summary")?;
        writeln!(f, "  Item:              {}", summary.item)?;
        writeln!(f, "  Buyer Max:         {}", format_money(summary.buyer_max))?;
        writeln!(f, "  Seller Min:        {}", format_money(summary.seller_min))?;
        writeln!(f, "  Negotiation Range: {}", format_money(summary.range))?;
        writeln!(f, "  Total Rounds:      {}", summary.round_count)?;
        writeln!(f, "  Duration:          ~{} minutes", summary.duration_minutes)?;
        writeln!(f, "  {}", summary.description)?;

        writeln!(f)?;
        writeln!(f, "🔄 Negotiation Timeline")?;
        if self.timeline.is_empty() {
            writeln!(f, "  {NO_ROUNDS_TEXT}")?;
        }
        for entry in &self.timeline {
            write!(f, "  Round {} · {}", entry.round, entry.agent_label())?;
            if let Some(price) = entry.price {
                write!(f, " · {}", format_money(price))?;
            }
            writeln!(f)?;
            writeln!(f, "    {}", entry.message)?;
            if let Some(strategy) = &entry.strategy {
                writeln!(f, "    Strategy: {strategy}")?;
            }
        }

        let metrics = &self.analysis.metrics;
        writeln!(f)?;
        writeln!(f, "🧠 Strategic Analysis")?;
        writeln!(f, "  {}", self.analysis.text)?;
        writeln!(f, "  Negotiation Efficiency: {}%", metrics.efficiency)?;
        writeln!(f, "  Fair Value Index:       {}/10", self.analysis.fairness_text)?;
        write!(f, "  Complexity Score:       {}/10", metrics.complexity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const LAPTOP: PriceBounds = PriceBounds {
        buyer_max: 1000.0,
        seller_min: 800.0,
    };

    fn result(value: serde_json::Value) -> NegotiationResult {
        serde_json::from_value(value).expect("decode result")
    }

    #[test]
    fn laptop_agreement_summary() {
        let report = render_report(
            &result(json!({
                "status": "agreed",
                "item": "Laptop",
                "final_price": 900.0,
                "rounds": [{"round": 1, "agent": "buyer", "message": "offer $800"}]
            })),
            LAPTOP,
        );

        assert_eq!(report.status.tone, BannerTone::Success);
        assert_eq!(report.status.details[0], "Deal agreed at $900.00");
        assert_eq!(report.status.details[1], "Savings: $0.00 from average price");
        assert_eq!(format_money(report.summary.range), "$200.00");
        assert_eq!(report.summary.round_count, 1);
        assert_eq!(report.summary.duration_minutes, 1);
        assert_eq!(report.summary.description, SUMMARY_FALLBACK);
        assert_eq!(report.analysis.metrics.fairness, 10.0);
        assert_eq!(report.analysis.metrics.efficiency, 95);
        assert_eq!(report.analysis.metrics.complexity, 3);
    }

    #[test]
    fn timeline_keeps_every_round_in_order() {
        let report = render_report(
            &result(json!({
                "status": "failed",
                "item": "Car",
                "rounds": [
                    {"round": 1, "agent": "buyer", "message": "a", "price": 100.0},
                    {"round": 2, "agent": "seller", "message": "b", "price": 150.0, "strategy": "firm"},
                    {"round": 3, "agent": "mediator", "message": "c"},
                    {"round": 4, "agent": "buyer", "message": "d", "price": 120.0}
                ]
            })),
            LAPTOP,
        );

        let rounds: Vec<u32> = report.timeline.iter().map(|entry| entry.round).collect();
        assert_eq!(rounds, vec![1, 2, 3, 4]);
        assert_eq!(report.timeline[1].strategy.as_deref(), Some("firm"));
        assert_eq!(report.timeline[2].price, None);
        assert_eq!(report.timeline[2].agent_label(), "⚖️ Mediator");
    }

    #[test]
    fn failed_negotiation_shows_reason_or_fallback() {
        let with_reason = render_report(
            &result(json!({
                "status": "failed",
                "item": "Car",
                "reason": "Maximum rounds reached without agreement",
                "rounds": []
            })),
            LAPTOP,
        );
        assert_eq!(with_reason.status.tone, BannerTone::Failure);
        assert_eq!(
            with_reason.status.details,
            vec!["Maximum rounds reached without agreement".to_string()]
        );

        let without_reason = render_report(&result(json!({"status": "failed"})), LAPTOP);
        assert_eq!(without_reason.status.details, vec![NO_AGREEMENT_FALLBACK.to_string()]);
        assert_eq!(without_reason.summary.item, "N/A");
        assert_eq!(without_reason.analysis.text, ANALYSIS_FALLBACK);
    }

    #[test]
    fn agreed_without_final_price_omits_price_lines() {
        let report = render_report(&result(json!({"status": "agreed", "item": "Desk"})), LAPTOP);
        assert!(report.status.details.is_empty());
        assert_eq!(report.analysis.metrics.fairness, 7.0);
        assert_eq!(report.analysis.fairness_text, "7");
        assert_eq!(report.analysis.metrics.efficiency, 85);
        assert!(report.to_string().contains("Fair Value Index:       7/10"));
    }

    #[test]
    fn zero_round_price_is_not_shown() {
        let report = render_report(
            &result(json!({
                "status": "failed",
                "rounds": [
                    {"round": 1, "agent": "seller", "message": "make an offer", "price": 0.0},
                    {"round": 2, "agent": "buyer", "message": "offer $850", "price": 850.0}
                ]
            })),
            LAPTOP,
        );

        assert_eq!(report.timeline[0].price, None);
        assert_eq!(report.timeline[1].price, Some(850.0));
        assert!(report.to_string().contains("Round 1 · 🏪 Seller\n"));
    }

    #[test]
    fn duration_estimate_is_at_least_one_minute() {
        assert_eq!(duration_estimate_minutes(0), 1);
        assert_eq!(duration_estimate_minutes(3), 1);
        assert_eq!(duration_estimate_minutes(9), 4);
    }

    #[test]
    fn text_rendering_lists_rounds_and_metrics() {
        let text = render_report(
            &result(json!({
                "status": "agreed",
                "item": "Laptop",
                "final_price": 900.0,
                "analysis": "Buyer anchored low.",
                "rounds": [{"round": 1, "agent": "buyer", "message": "offer $800", "price": 800.0}]
            })),
            LAPTOP,
        )
        .to_string();

        assert!(text.contains("Round 1 · 🛒 Buyer · $800.00"));
        assert!(text.contains("Buyer anchored low."));
        assert!(text.contains("Fair Value Index:       10.0/10"));
        assert!(!text.contains(NO_ROUNDS_TEXT));
    }

    #[test]
    fn text_rendering_marks_empty_timeline() {
        let text = render_report(&result(json!({"status": "failed", "rounds": []})), LAPTOP)
            .to_string();
        assert!(text.contains(NO_ROUNDS_TEXT));
    }
}
