//! Wallet card view
//!
//! Account selector, balance line, token list and the action buttons.

use crate::config::{get_address_explorer_url, NATIVE_TOKEN};
use crate::form::ActionKind;
use crate::gui::app::WalletApp;
use crate::panel::NO_TOKENS_MESSAGE;
use eframe::egui::{self, RichText};

impl WalletApp {
    pub(crate) fn view_wallet_card(&mut self, ui: &mut egui::Ui) {
        let view = self.panel_view();
        let options = view.account_options();
        let selected_value = view.selected_value();
        let selected_label = view.selected_label();
        let public_key = view.selected().map(|a| a.public_key.clone());
        let balance_line = view.balance.display(NATIVE_TOKEN);
        let token_rows = view.token_rows();

        let theme = self.theme;
        let mut account_change: Option<String> = None;
        let mut opened: Option<ActionKind> = None;
        let mut create_account = false;

        theme.frame_card().show(ui, |ui| {
            ui.set_max_width(560.0);

            ui.horizontal(|ui| {
                ui.label(RichText::new("Wallet").size(18.0).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    egui::ComboBox::from_id_source("account_select")
                        .selected_text(&selected_label)
                        .width(160.0)
                        .show_ui(ui, |ui| {
                            for (value, label) in &options {
                                let is_selected = *value == selected_value;
                                if ui.selectable_label(is_selected, label).clicked()
                                    && !is_selected
                                {
                                    account_change = Some(value.clone());
                                }
                            }
                        });
                });
            });

            if let Some(key) = &public_key {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(key).monospace().small().color(theme.text_secondary));
                    if ui
                        .add(egui::Button::new("📋").small())
                        .on_hover_text("Copy address")
                        .clicked()
                    {
                        ui.output_mut(|o| o.copied_text = key.clone());
                    }
                    if ui
                        .link(RichText::new("Explorer").small().color(theme.accent))
                        .clicked()
                    {
                        let url = get_address_explorer_url(&self.config.cluster, key);
                        if let Err(e) = open::that(&url) {
                            self.notifications
                                .error(format!("Failed to open URL: {}", e));
                        }
                    }
                });
            }

            ui.add_space(theme.spacing_xs);
            ui.label(RichText::new(balance_line).size(16.0).color(theme.success));

            ui.add_space(theme.spacing_md);
            ui.label(RichText::new("Your Tokens").strong());
            ui.separator();
            if token_rows.is_empty() {
                ui.label(RichText::new(NO_TOKENS_MESSAGE).color(theme.text_secondary));
            } else {
                egui::Grid::new("token_grid")
                    .num_columns(2)
                    .striped(true)
                    .spacing([theme.spacing_lg, theme.spacing_xs])
                    .show(ui, |ui| {
                        for (name, amount) in &token_rows {
                            ui.label(name);
                            ui.label(RichText::new(amount).monospace());
                            ui.end_row();
                        }
                    });
            }

            ui.add_space(theme.spacing_md);
            ui.horizontal_wrapped(|ui| {
                for kind in ActionKind::ALL {
                    if ui.add(theme.button_outline(kind.button_label())).clicked() {
                        opened = Some(kind);
                    }
                }
            });

            ui.add_space(theme.spacing_sm);
            if ui.add(theme.button_primary("Create New Account")).clicked() {
                create_account = true;
            }
        });

        if let Some(index) = account_change {
            self.panel.change_account(&index, &mut self.wallet);
        }
        if let Some(kind) = opened {
            self.panel.open(kind);
        }
        if create_account {
            self.panel.create_new_account(&mut self.wallet);
        }
    }
}
