//! Action dialogs
//!
//! One egui window per open form. Closing a window keeps its draft.

use crate::config::QUOTE_TOKEN;
use crate::form::ActionKind;
use crate::gui::app::WalletApp;
use eframe::egui::{self, RichText};

impl WalletApp {
    pub(crate) fn show_dialogs(&mut self, ctx: &egui::Context) {
        for kind in ActionKind::ALL {
            if self.panel.form(kind).is_open() {
                self.show_dialog(ctx, kind);
            }
        }
    }

    fn show_dialog(&mut self, ctx: &egui::Context, kind: ActionKind) {
        let theme = self.theme;
        let native_balance = self.wallet.native_balance();
        let panel = &mut self.panel;
        let mut open = true;
        let mut submitted = false;

        egui::Window::new(kind.title())
            .id(egui::Id::new(("action_dialog", kind)))
            .collapsible(false)
            .resizable(false)
            .default_width(360.0)
            .open(&mut open)
            .show(ctx, |ui| {
                let form = panel.form_mut(kind);
                for field in kind.fields() {
                    if let Some(buffer) = form.field_mut(*field) {
                        let mut edit = egui::TextEdit::singleline(buffer)
                            .hint_text(field.placeholder())
                            .desired_width(f32::INFINITY);
                        if field.is_numeric() {
                            edit = edit.font(egui::TextStyle::Monospace);
                        }
                        ui.add(edit);
                    }
                }

                if kind == ActionKind::Swap {
                    ui.add_space(theme.spacing_xs);
                    if let Some(warning) = panel.swap_warning(native_balance) {
                        ui.label(RichText::new(warning).color(theme.error));
                    }
                    ui.label(panel.receive_line(QUOTE_TOKEN));
                    if let Some(err) = panel.quote().last_error() {
                        ui.label(
                            RichText::new(format!("Quote unavailable: {}", err))
                                .small()
                                .color(theme.warning),
                        );
                    }
                    if panel.quote().in_flight() > 0 {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label(RichText::new("Fetching quote...").small().color(theme.text_secondary));
                        });
                    }
                }

                ui.add_space(theme.spacing_sm);
                if ui.add(theme.button_primary(kind.submit_label())).clicked() {
                    submitted = true;
                }
            });

        if submitted {
            self.panel.submit(kind, &mut self.wallet);
        } else if !open {
            self.panel.close(kind);
        }
    }
}
