use crate::api::SubscriptionApi;
use crate::chart::ChartAdapter;
use crate::models::{ChartKind, Coupon, Insight, NewSubscription, Subscription, SubscriptionId};
use crate::stats::{SpendingSummary, build_summary, category_totals};
use crate::storage::{PreferenceKey, PreferenceStore, Preferences};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

pub const ADD_FAILED_ALERT: &str = "Failed to add subscription. Please try again.";
pub const DELETE_FAILED_ALERT: &str = "Failed to delete subscription. Please try again.";

/// A user action coming from the presentation surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddSubscription(NewSubscription),
    DeleteSubscription(SubscriptionId),
    ToggleTheme,
    ToggleMode,
    ToggleChartType,
    RefreshInsights,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "insights", rename_all = "lowercase")]
pub enum InsightsPanel {
    #[default]
    Loading,
    Ready(Vec<Insight>),
    Failed,
}

#[derive(Debug, Default)]
pub struct Dashboard {
    pub subscriptions: Vec<Subscription>,
    pub insights: InsightsPanel,
    pub coupons: Vec<Coupon>,
    pub preferences: Preferences,
    pub chart: ChartAdapter,
    pub alert: Option<String>,
}

impl Dashboard {
    pub fn summary(&self) -> SpendingSummary {
        build_summary(&self.subscriptions)
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            subscriptions: self.subscriptions.clone(),
            summary: self.summary(),
            chart_kind: self.chart.kind(),
            chart_build: self.chart.chart().map(|chart| chart.build),
            chart: self.chart.config(),
            preferences: self.preferences,
            insights: self.insights.clone(),
            coupons: self.coupons.clone(),
            alert: self.alert.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardSnapshot {
    pub subscriptions: Vec<Subscription>,
    pub summary: SpendingSummary,
    pub chart_kind: ChartKind,
    pub chart_build: Option<u64>,
    pub chart: Option<serde_json::Value>,
    pub preferences: Preferences,
    pub insights: InsightsPanel,
    pub coupons: Vec<Coupon>,
    pub alert: Option<String>,
}

pub struct Controller {
    api: Arc<dyn SubscriptionApi>,
    store: Box<dyn PreferenceStore>,
    state: Dashboard,
}

impl Controller {
    /// Reads preferences and builds the empty chart. No network traffic yet.
    pub fn new(api: Arc<dyn SubscriptionApi>, store: Box<dyn PreferenceStore>) -> Self {
        let preferences = Preferences::load(store.as_ref());
        let mut chart = ChartAdapter::new(ChartKind::default());
        chart.initialize(preferences.theme);

        Self {
            api,
            store,
            state: Dashboard {
                preferences,
                chart,
                ..Dashboard::default()
            },
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.state
    }

    /// Returns the pending alert once.
    pub fn take_alert(&mut self) -> Option<String> {
        self.state.alert.take()
    }

    pub async fn start(&mut self) {
        self.load_subscriptions().await;
        self.load_coupons().await;
        self.load_insights().await;
    }

    pub async fn dispatch(&mut self, action: Action) {
        match action {
            Action::AddSubscription(new) => self.add_subscription(new).await,
            Action::DeleteSubscription(id) => self.delete_subscription(id).await,
            Action::ToggleTheme => self.toggle_theme().await,
            Action::ToggleMode => self.toggle_mode().await,
            Action::ToggleChartType => self.toggle_chart_type(),
            Action::RefreshInsights => self.load_insights().await,
        }
    }

    async fn load_subscriptions(&mut self) {
        match self.api.list_subscriptions().await {
            Ok(subscriptions) => {
                self.state.subscriptions = subscriptions;
                self.refresh_chart();
            }
            Err(err) => error!("error loading subscriptions: {err}"),
        }
    }

    async fn load_coupons(&mut self) {
        match self.api.fetch_coupons().await {
            Ok(coupons) => self.state.coupons = coupons,
            Err(err) => error!("error loading coupons: {err}"),
        }
    }

    async fn load_insights(&mut self) {
        match self.api.fetch_insights().await {
            Ok(insights) => self.state.insights = InsightsPanel::Ready(insights),
            Err(err) if err.is_network() => {
                error!("error loading insights: {err}");
                self.state.insights = InsightsPanel::Failed;
            }
            Err(err) => warn!("insights not refreshed: {err}"),
        }
    }

    async fn add_subscription(&mut self, new: NewSubscription) {
        match self.api.add_subscription(&new).await {
            Ok(created) => {
                info!("added subscription {} ({})", created.id, created.name);
                self.load_subscriptions().await;
                self.load_insights().await;
            }
            Err(err) => {
                error!("error adding subscription: {err}");
                self.state.alert = Some(ADD_FAILED_ALERT.to_string());
            }
        }
    }

    async fn delete_subscription(&mut self, id: SubscriptionId) {
        match self.api.delete_subscription(id).await {
            Ok(()) => {
                info!("deleted subscription {id}");
                self.load_subscriptions().await;
                self.load_insights().await;
            }
            Err(err) => {
                error!("error deleting subscription {id}: {err}");
                self.state.alert = Some(DELETE_FAILED_ALERT.to_string());
            }
        }
    }

    async fn toggle_theme(&mut self) {
        let theme = self.state.preferences.theme.toggled();
        self.state.preferences.theme = theme;
        self.save_preference(PreferenceKey::Theme, theme.as_str()).await;
        self.refresh_chart();
    }

    async fn toggle_mode(&mut self) {
        let mode = self.state.preferences.mode.toggled();
        self.state.preferences.mode = mode;
        self.save_preference(PreferenceKey::Mode, mode.as_str()).await;
    }

    fn toggle_chart_type(&mut self) {
        let totals = category_totals(&self.state.subscriptions);
        let kind = self
            .state
            .chart
            .toggle(&totals, self.state.preferences.theme);
        info!("chart switched to {}", kind.as_str());
    }

    fn refresh_chart(&mut self) {
        let totals = category_totals(&self.state.subscriptions);
        self.state
            .chart
            .update(&totals, self.state.preferences.theme);
    }

    async fn save_preference(&mut self, key: PreferenceKey, value: &str) {
        if let Err(err) = self.store.set(key, value).await {
            warn!("failed to persist {} preference: {err}", key.name());
        }
    }
}
