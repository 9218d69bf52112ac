use client_core::{report::BannerTone, NotificationKind};
use eframe::egui;

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(88, 101, 242);
pub const PANEL_FILL: egui::Color32 = egui::Color32::from_rgb(32, 34, 40);
pub const CARD_FILL: egui::Color32 = egui::Color32::from_rgb(43, 45, 52);
pub const CARD_STROKE: egui::Color32 = egui::Color32::from_rgb(58, 60, 70);
pub const MUTED_TEXT: egui::Color32 = egui::Color32::from_rgb(170, 171, 179);
pub const HINT_TEXT: egui::Color32 = egui::Color32::from_rgb(240, 71, 71);

const SUCCESS: egui::Color32 = egui::Color32::from_rgb(35, 165, 90);
const ERROR: egui::Color32 = egui::Color32::from_rgb(240, 71, 71);
const WARNING: egui::Color32 = egui::Color32::from_rgb(240, 178, 50);

pub fn apply(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = PANEL_FILL;
    visuals.selection.bg_fill = ACCENT;
    visuals.hyperlink_color = ACCENT;
    ctx.set_visuals(visuals);
}

pub fn notification_color(kind: NotificationKind) -> egui::Color32 {
    match kind {
        NotificationKind::Success => SUCCESS,
        NotificationKind::Error => ERROR,
        NotificationKind::Warning => WARNING,
        NotificationKind::Info => ACCENT,
    }
}

pub fn banner_color(tone: BannerTone) -> egui::Color32 {
    match tone {
        BannerTone::Success => SUCCESS,
        BannerTone::Failure => ERROR,
    }
}

pub fn card() -> egui::Frame {
    egui::Frame::new()
        .fill(CARD_FILL)
        .stroke(egui::Stroke::new(1.0, CARD_STROKE))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::same(12))
}
