//! Panels drawn each frame. Read state from the controller, route clicks back through the app.

use std::time::Instant;

use client_core::{
    loading::{StepStatus, LOADING_STEPS},
    report::{format_money, NegotiationReport, NO_ROUNDS_TEXT},
    validation::price_field_hint,
};
use eframe::egui;

use crate::ui::{
    app::{BackendStatus, NegotiationDeskApp},
    theme,
};

const FORM_LABEL_WIDTH: f32 = 140.0;
const TOAST_WIDTH: f32 = 320.0;

pub fn show_header(app: &NegotiationDeskApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.heading("🤝 AI Negotiation Desk");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let (dot, text) = match &app.backend {
                    BackendStatus::Starting => (theme::MUTED_TEXT, "connecting".to_string()),
                    BackendStatus::Ready => (theme::ACCENT, app.server_url.clone()),
                    BackendStatus::Failed(err) => (theme::HINT_TEXT, format!("offline: {err}")),
                };
                ui.label(egui::RichText::new(text).color(theme::MUTED_TEXT).small());
                ui.label(egui::RichText::new("●").color(dot));
            });
        });
        ui.add_space(6.0);
    });
}

pub fn show_main(app: &mut NegotiationDeskApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                show_form(app, ui);
                ui.add_space(12.0);
                // Cloned so the download click below can borrow the app mutably.
                if let Some(report) = app.controller.report().cloned() {
                    show_report(app, ui, &report);
                }
            });
    });
}

fn show_form(app: &mut NegotiationDeskApp, ui: &mut egui::Ui) {
    theme::card().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new("New negotiation").strong().size(16.0));
        ui.add_space(8.0);

        egui::Grid::new("negotiation_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                form_row(ui, "Item", &mut app.form.item, "e.g. Gaming Laptop", false);
                form_row(ui, "Buyer maximum ($)", &mut app.form.buyer_max, "1000", true);
                form_row(ui, "Seller minimum ($)", &mut app.form.seller_min, "800", true);
            });

        ui.add_space(10.0);
        let submitting = !app.controller.can_submit();
        let label = if submitting {
            "⏳ Negotiating..."
        } else {
            "🚀 Start AI Negotiation"
        };
        let clicked = ui
            .add_enabled(
                !submitting,
                egui::Button::new(egui::RichText::new(label).strong())
                    .fill(theme::ACCENT)
                    .min_size(egui::vec2(220.0, 32.0)),
            )
            .clicked();
        if clicked {
            app.submit_negotiation();
        }
    });
}

fn form_row(ui: &mut egui::Ui, label: &str, value: &mut String, hint: &str, price: bool) {
    ui.add_sized(
        [FORM_LABEL_WIDTH, 20.0],
        egui::Label::new(egui::RichText::new(label).color(theme::MUTED_TEXT)),
    );
    ui.vertical(|ui| {
        ui.add(
            egui::TextEdit::singleline(value)
                .hint_text(hint)
                .desired_width(260.0),
        );
        if price {
            if let Some(warning) = price_field_hint(value) {
                ui.label(egui::RichText::new(warning).color(theme::HINT_TEXT).small());
            }
        }
    });
    ui.end_row();
}

fn show_report(app: &mut NegotiationDeskApp, ui: &mut egui::Ui, report: &NegotiationReport) {
    let banner = &report.status;
    theme::card()
        .stroke(egui::Stroke::new(1.5, theme::banner_color(banner.tone)))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                egui::RichText::new(format!("{} {}", banner.icon, banner.headline))
                    .size(20.0)
                    .strong()
                    .color(theme::banner_color(banner.tone)),
            );
            for line in &banner.details {
                ui.label(line.as_str());
            }
        });
    ui.add_space(8.0);

    let summary = &report.summary;
    theme::card().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new("📊 Executive Summary").strong());
        ui.add_space(4.0);
        egui::Grid::new("negotiation_summary")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                summary_row(ui, "Item", summary.item.clone());
                summary_row(ui, "Buyer Max", format_money(summary.buyer_max));
                summary_row(ui, "Seller Min", format_money(summary.seller_min));
                summary_row(ui, "Negotiation Range", format_money(summary.range));
                summary_row(ui, "Total Rounds", summary.round_count.to_string());
                summary_row(ui, "Duration", format!("~{} minutes", summary.duration_minutes));
            });
        ui.add_space(6.0);
        ui.label(summary.description.as_str());
    });
    ui.add_space(8.0);

    theme::card().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new("🔄 Negotiation Timeline").strong());
        ui.add_space(4.0);
        if report.timeline.is_empty() {
            ui.label(egui::RichText::new(NO_ROUNDS_TEXT).italics().color(theme::MUTED_TEXT));
        }
        for entry in &report.timeline {
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new(format!("Round {}", entry.round)).strong());
                ui.label(entry.agent_label());
                if let Some(price) = entry.price {
                    ui.label(egui::RichText::new(format_money(price)).color(theme::ACCENT));
                }
            });
            ui.label(entry.message.as_str());
            if let Some(strategy) = &entry.strategy {
                ui.label(
                    egui::RichText::new(format!("Strategy: {strategy}"))
                        .small()
                        .color(theme::MUTED_TEXT),
                );
            }
            ui.separator();
        }
    });
    ui.add_space(8.0);

    let metrics = &report.analysis.metrics;
    theme::card().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new("🧠 Strategic Analysis").strong());
        ui.add_space(4.0);
        ui.label(report.analysis.text.as_str());
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            metric(ui, "Negotiation Efficiency", format!("{}%", metrics.efficiency));
            metric(ui, "Fair Value Index", format!("{}/10", report.analysis.fairness_text));
            metric(ui, "Complexity Score", format!("{}/10", metrics.complexity));
        });
    });
    ui.add_space(10.0);

    let exporting = app.controller.is_export_in_flight();
    let label = if exporting {
        "⏳ Generating PDF..."
    } else {
        "📄 Download PDF Report"
    };
    let clicked = ui
        .add_enabled(app.controller.can_export(), egui::Button::new(label))
        .clicked();
    if clicked {
        app.download_report();
    }
}

fn summary_row(ui: &mut egui::Ui, label: &str, value: String) {
    ui.label(egui::RichText::new(label).color(theme::MUTED_TEXT));
    ui.label(value);
    ui.end_row();
}

fn metric(ui: &mut egui::Ui, label: &str, value: String) {
    ui.group(|ui| {
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new(value).size(18.0).strong());
            ui.label(egui::RichText::new(label).small().color(theme::MUTED_TEXT));
        });
    });
}

pub fn show_loading_overlay(app: &NegotiationDeskApp, ctx: &egui::Context) {
    let Some(sequencer) = app.controller.loading() else {
        return;
    };
    egui::Window::new("Negotiating")
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.set_width(340.0);
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new());
                ui.label(egui::RichText::new(sequencer.current().text).strong());
            });
            ui.add_space(6.0);
            ui.add(egui::ProgressBar::new(sequencer.progress()).show_percentage());
            ui.add_space(6.0);
            for (index, step) in LOADING_STEPS.iter().enumerate() {
                let (mark, color) = match sequencer.step_status(index) {
                    StepStatus::Completed => ("✔", theme::ACCENT),
                    StepStatus::Active => ("▶", egui::Color32::WHITE),
                    StepStatus::Pending => ("○", theme::MUTED_TEXT),
                };
                ui.label(egui::RichText::new(format!("{mark} {}", step.label)).color(color));
            }
            if sequencer.is_finished() {
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new("Waiting for the negotiation service...")
                        .small()
                        .color(theme::MUTED_TEXT),
                );
            }
        });
}

pub fn show_notifications(app: &mut NegotiationDeskApp, ctx: &egui::Context) {
    let now = Instant::now();
    let mut dismissed = Vec::new();
    egui::Area::new(egui::Id::new("notifications"))
        .anchor(egui::Align2::RIGHT_TOP, [-12.0, 56.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for notification in app.controller.notifications().active() {
                let color = theme::notification_color(notification.kind);
                theme::card()
                    .stroke(egui::Stroke::new(1.0, color))
                    .show(ui, |ui| {
                        ui.set_width(TOAST_WIDTH);
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(notification.kind.icon()).color(color));
                            ui.label(notification.message.as_str());
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Min),
                                |ui| {
                                    if ui.small_button("✕").clicked() {
                                        dismissed.push(notification.id);
                                    }
                                    let secs = notification.remaining(now).as_secs_f32().ceil();
                                    ui.label(
                                        egui::RichText::new(format!("{secs:.0}s"))
                                            .small()
                                            .color(theme::MUTED_TEXT),
                                    );
                                },
                            );
                        });
                    });
                ui.add_space(6.0);
            }
        });
    for id in dismissed {
        app.controller.dismiss_notification(id);
    }
}
