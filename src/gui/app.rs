//! Main GUI application module
//!
//! Contains the WalletApp struct, background job polling and the frame loop.

use crate::{
    async_job::AsyncJob,
    config::{Config, CLUSTERS},
    panel::{ActionPanel, PanelView},
    price_feed::{PriceFeed, UsdQuoteSource},
    user_settings::UserSettings,
    wallet::SimulatedWallet,
};
use anyhow::{anyhow, Result};
use eframe::{egui, egui::RichText, App, Frame, NativeOptions};
use std::time::{Duration, Instant};

use super::notifications::Notifications;
use super::theme::{configure_style, AppTheme};

/// Repaint cadence while any background job is in flight
const JOB_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

const EMPTY_LOG_TEXT: &str = "No logs yet. Run an operation to generate entries.";

pub(crate) struct LogViewState {
    pub(crate) content: String,
    pub(crate) job: Option<AsyncJob<String>>,
    /// Set once a read finished, successfully or not
    pub(crate) loaded: bool,
}

impl Default for LogViewState {
    fn default() -> Self {
        Self {
            content: EMPTY_LOG_TEXT.to_string(),
            job: None,
            loaded: false,
        }
    }
}

pub struct WalletApp {
    pub(crate) config: Config,
    pub(crate) user_settings: UserSettings,
    pub(crate) theme: AppTheme,
    pub(crate) panel: ActionPanel,
    pub(crate) wallet: SimulatedWallet,
    pub(crate) price_feed: PriceFeed,
    pub(crate) quote_source: UsdQuoteSource,
    pub(crate) price_job: Option<AsyncJob<f64>>,
    pub(crate) last_price_request: Option<Instant>,
    pub(crate) notifications: Notifications,
    pub(crate) log_view: LogViewState,
}

impl WalletApp {
    pub fn new(
        config: Config,
        user_settings: UserSettings,
        price_feed: PriceFeed,
        ctx: &egui::Context,
    ) -> Self {
        let theme = AppTheme::default();
        configure_style(ctx, &theme);

        let wallet = SimulatedWallet::new(
            config.cluster.clone(),
            user_settings.starting_balance,
            user_settings.log_operations,
        );
        let panel = ActionPanel::new(user_settings.quote_failure_policy);
        tracing::info!(
            "Wallet card ready on {} (rpc {})",
            config.cluster_label(),
            config.rpc_url
        );

        Self {
            quote_source: UsdQuoteSource::new(price_feed.clone()),
            config,
            user_settings,
            theme,
            panel,
            wallet,
            price_feed,
            price_job: None,
            last_price_request: None,
            notifications: Notifications::default(),
            log_view: LogViewState::default(),
        }
    }

    /// Snapshot of what the wallet card displays this frame
    pub(crate) fn panel_view(&self) -> PanelView<'_> {
        PanelView {
            accounts: self.wallet.accounts(),
            selected_account: self.wallet.selected_index(),
            balance: self.wallet.balance(),
            tokens: self.wallet.tokens(),
        }
    }

    fn poll_jobs(&mut self) {
        for event in self.wallet.drain_events() {
            self.notifications.push(event);
        }

        if self.panel.poll_quote() {
            if let Some(err) = self.panel.quote().last_error() {
                self.notifications.error(format!("Quote unavailable: {}", err));
            }
        }

        if let Some(job) = &mut self.price_job {
            if let Some(res) = job.poll() {
                self.price_job = None;
                match res {
                    Ok(price) => {
                        tracing::debug!("USD price updated: {}", price);
                        self.wallet.set_usd_price(price);
                    }
                    Err(e) => {
                        tracing::warn!("Price refresh failed: {}", e);
                        self.notifications
                            .error(format!("Price refresh failed: {}", e));
                    }
                }
            }
        }

        if let Some(job) = &mut self.log_view.job {
            if let Some(res) = job.poll() {
                self.log_view.job = None;
                self.log_view.loaded = true;
                match res {
                    Ok(content) => self.log_view.content = content,
                    Err(e) => self.notifications.error(e.to_string()),
                }
            }
        }
    }

    /// Start a price fetch when none has run yet or the refresh interval elapsed.
    fn refresh_price_if_due(&mut self) {
        if self.price_job.is_some() {
            return;
        }
        let interval = self.user_settings.price_refresh_interval_secs;
        let due = match self.last_price_request {
            None => true,
            Some(at) => interval > 0 && at.elapsed() >= Duration::from_secs(interval),
        };
        if due {
            self.price_job = Some(self.price_feed.spawn_price_job());
            self.last_price_request = Some(Instant::now());
        }
    }

    pub(crate) fn refresh_logs(&mut self) {
        if self.log_view.job.is_none() {
            self.log_view.job = Some(AsyncJob::spawn(|| async move {
                match crate::operation_log::read_log() {
                    Ok(content) if content.is_empty() => Ok(EMPTY_LOG_TEXT.to_string()),
                    Ok(content) => Ok(content),
                    Err(e) => Err(anyhow!("Failed to read log file: {}", e)),
                }
            }));
        }
    }

    pub(crate) fn switch_cluster(&mut self, cluster_id: &str) {
        self.config = Config::new(cluster_id);
        self.wallet.set_cluster(self.config.cluster.clone());
        self.user_settings.selected_cluster = self.config.cluster.clone();
        self.save_settings();
        tracing::info!("Switched cluster to {}", self.config.cluster);
        self.notifications
            .info(format!("Switched to {}", self.config.cluster_label()));
    }

    pub(crate) fn save_settings(&mut self) {
        if let Err(e) = self.user_settings.save() {
            tracing::warn!("Failed to save settings: {}", e);
            self.notifications
                .error(format!("Failed to save settings: {}", e));
        }
    }

    fn has_pending_jobs(&self) -> bool {
        self.panel.quote().in_flight() > 0
            || self.price_job.is_some()
            || self.log_view.job.is_some()
    }

    fn render_top_bar(&mut self, ui: &mut egui::Ui) {
        ui.add_space(self.theme.spacing_sm);
        ui.horizontal(|ui| {
            ui.heading(RichText::new("SolCard").strong().color(self.theme.primary));
            ui.label(
                RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                    .size(12.0)
                    .color(self.theme.text_secondary),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mut selection: Option<&'static str> = None;
                egui::ComboBox::from_id_source("cluster_selector")
                    .selected_text(self.config.cluster_label())
                    .width(160.0)
                    .show_ui(ui, |ui| {
                        for cluster in CLUSTERS {
                            let is_selected = self.config.cluster == cluster.id;
                            if ui.selectable_label(is_selected, cluster.label).clicked()
                                && !is_selected
                            {
                                selection = Some(cluster.id);
                            }
                        }
                    })
                    .response
                    .on_hover_text(format!("RPC: {}", self.config.rpc_url));
                if let Some(cluster_id) = selection {
                    self.switch_cluster(cluster_id);
                }
            });
        });
        ui.add_space(self.theme.spacing_sm);
    }
}

impl App for WalletApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.poll_jobs();
        self.refresh_price_if_due();

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            self.render_top_bar(ui);
        });

        egui::SidePanel::right("activity_panel")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.view_activity(ui);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.view_wallet_card(ui);
            });
        });

        self.show_dialogs(ctx);

        // Edits made in the swap dialog this frame issue their quote right away
        self.panel.refresh_quote(&self.quote_source);

        if self.has_pending_jobs() {
            ctx.request_repaint_after(JOB_REPAINT_INTERVAL);
        } else if self.user_settings.price_refresh_interval_secs > 0 {
            ctx.request_repaint_after(Duration::from_secs(
                self.user_settings.price_refresh_interval_secs,
            ));
        }
    }
}

/// Open the wallet card window. Blocks until the window is closed.
///
/// The cluster comes from `config` when `SOLCARD_CLUSTER` is set, otherwise
/// from the saved user settings.
pub fn launch(mut config: Config) -> Result<()> {
    let user_settings = UserSettings::load();
    if std::env::var_os("SOLCARD_CLUSTER").is_none() {
        config = Config::new(&user_settings.selected_cluster);
    }
    let price_feed = config.price_feed()?;

    let app_creator = move |cc: &eframe::CreationContext<'_>| {
        Box::new(WalletApp::new(config, user_settings, price_feed, &cc.egui_ctx)) as Box<dyn App>
    };

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([980.0, 640.0])
        .with_min_inner_size([720.0, 480.0]);

    let native_options = NativeOptions {
        viewport,
        persist_window: true,
        ..Default::default()
    };

    eframe::run_native("SolCard - Solana Wallet Card", native_options, Box::new(app_creator))
        .map_err(|e| anyhow!("Failed to start GUI: {}", e))
}
