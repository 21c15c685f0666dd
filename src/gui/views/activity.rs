//! Activity side panel
//!
//! Recent notifications, user settings and the operation log viewer.

use crate::gui::app::WalletApp;
use crate::quote::QuoteFailurePolicy;
use crate::user_settings::UserSettings;
use eframe::egui::{self, RichText};

impl WalletApp {
    pub(crate) fn view_activity(&mut self, ui: &mut egui::Ui) {
        self.render_notifications(ui);
        ui.add_space(self.theme.spacing_md);
        self.render_settings(ui);
        ui.add_space(self.theme.spacing_md);
        self.render_operation_log(ui);
    }

    fn render_notifications(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Notifications").size(16.0).strong());
            if !self.notifications.is_empty() && ui.add(self.theme.button_small("Clear")).clicked() {
                self.notifications.clear();
            }
        });
        ui.separator();

        if self.notifications.is_empty() {
            ui.label(RichText::new("Nothing yet").color(self.theme.text_secondary));
            return;
        }

        for entry in self.notifications.recent().take(10) {
            let color = if entry.is_error {
                self.theme.error
            } else {
                self.theme.text_primary
            };
            ui.horizontal_wrapped(|ui| {
                ui.label(
                    RichText::new(entry.time_ago())
                        .small()
                        .color(self.theme.text_secondary),
                );
                ui.label(RichText::new(&entry.message).color(color));
            });
        }
    }

    fn render_settings(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new(RichText::new("Settings").size(16.0).strong())
            .default_open(false)
            .show(ui, |ui| {
                let mut changed = false;

                ui.label("When a quote fetch fails:");
                let mut policy = self.user_settings.quote_failure_policy;
                changed |= ui
                    .radio_value(&mut policy, QuoteFailurePolicy::RetainLast, "Keep last quote")
                    .changed();
                changed |= ui
                    .radio_value(&mut policy, QuoteFailurePolicy::MarkUnavailable, "Show NaN")
                    .changed();
                if policy != self.user_settings.quote_failure_policy {
                    self.user_settings.quote_failure_policy = policy;
                    self.panel.quote_mut().set_failure_policy(policy);
                }

                ui.horizontal(|ui| {
                    ui.label("Price refresh (s, 0 = off):");
                    changed |= ui
                        .add(
                            egui::DragValue::new(&mut self.user_settings.price_refresh_interval_secs)
                                .clamp_range(0..=3600),
                        )
                        .changed();
                });

                ui.horizontal(|ui| {
                    ui.label("Starting balance (next launch):");
                    changed |= ui
                        .add(
                            egui::DragValue::new(&mut self.user_settings.starting_balance)
                                .speed(0.1)
                                .clamp_range(0.0..=1_000_000.0),
                        )
                        .changed();
                });

                if ui
                    .checkbox(&mut self.user_settings.log_operations, "Write operation log")
                    .changed()
                {
                    self.wallet
                        .set_log_operations(self.user_settings.log_operations);
                    changed = true;
                }

                if changed {
                    self.save_settings();
                }

                ui.add_space(self.theme.spacing_xs);
                let settings_path = UserSettings::settings_path_display();
                ui.label(
                    RichText::new(format!("Settings file: {}", settings_path))
                        .small()
                        .color(self.theme.text_secondary),
                );
            });
    }

    fn render_operation_log(&mut self, ui: &mut egui::Ui) {
        let response = egui::CollapsingHeader::new(RichText::new("Operation Log").size(16.0).strong())
            .default_open(false)
            .show(ui, |ui| {
                let is_loading = self.log_view.job.is_some();
                let mut refresh = false;
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(
                            !is_loading,
                            self.theme.button_small(if is_loading { "Loading" } else { "Refresh" }),
                        )
                        .clicked()
                    {
                        refresh = true;
                    }
                    let log_path = crate::operation_log::log_file_path();
                    if ui
                        .add(egui::Button::new("📋").small())
                        .on_hover_text(format!("Copy path: {}", log_path))
                        .clicked()
                    {
                        ui.output_mut(|o| o.copied_text = log_path);
                    }
                });

                egui::ScrollArea::vertical()
                    .max_height(260.0)
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(&self.log_view.content)
                                .monospace()
                                .small(),
                        );
                    });
                refresh
            });

        // Load on first expand, reload on demand
        match response.body_returned {
            Some(true) => self.refresh_logs(),
            Some(false) if !self.log_view.loaded => self.refresh_logs(),
            _ => {}
        }
    }
}
