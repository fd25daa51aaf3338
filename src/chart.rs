//! Category-spending chart state.
//!
//! Drawing happens in the browser; this module keeps the selected chart kind
//! and the live chart object, and turns them into a Chart.js configuration.

use crate::models::{ChartKind, Theme};
use crate::stats::CategoryTotals;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

const DATASET_LABEL: &str = "Spending by Category";

const FILL_COLORS: [&str; 8] = [
    "rgba(99, 102, 241, 0.8)",
    "rgba(139, 92, 246, 0.8)",
    "rgba(16, 185, 129, 0.8)",
    "rgba(245, 158, 11, 0.8)",
    "rgba(239, 68, 68, 0.8)",
    "rgba(59, 130, 246, 0.8)",
    "rgba(236, 72, 153, 0.8)",
    "rgba(107, 114, 128, 0.8)",
];

const BORDER_COLORS: [&str; 8] = [
    "rgba(99, 102, 241, 1)",
    "rgba(139, 92, 246, 1)",
    "rgba(16, 185, 129, 1)",
    "rgba(245, 158, 11, 1)",
    "rgba(239, 68, 68, 1)",
    "rgba(59, 130, 246, 1)",
    "rgba(236, 72, 153, 1)",
    "rgba(107, 114, 128, 1)",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub grid: &'static str,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                text_primary: "#1f2937",
                text_secondary: "#6b7280",
                grid: "#f3f4f6",
            },
            Theme::Dark => Palette {
                text_primary: "#f9fafb",
                text_secondary: "#d1d5db",
                grid: "#374151",
            },
        }
    }
}

/// A constructed chart. Rebuilt from scratch when the kind changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub build: u64,
    pub labels: Vec<String>,
    pub data: Vec<f64>,
    pub palette: Palette,
}

impl Chart {
    fn new(kind: ChartKind, build: u64, theme: Theme) -> Self {
        Self {
            kind,
            build,
            labels: Vec::new(),
            data: Vec::new(),
            palette: Palette::for_theme(theme),
        }
    }

    /// Chart.js configuration; formatting callbacks are attached by the page.
    pub fn config(&self) -> Value {
        let legend = json!({
            "display": self.kind == ChartKind::Pie,
            "position": "bottom",
            "labels": {
                "color": self.palette.text_primary,
                "font": { "size": 12 }
            }
        });

        let scales = match self.kind {
            ChartKind::Bar => json!({
                "y": {
                    "beginAtZero": true,
                    "ticks": { "color": self.palette.text_secondary },
                    "grid": { "color": self.palette.grid }
                },
                "x": {
                    "ticks": { "color": self.palette.text_secondary },
                    "grid": { "display": false }
                }
            }),
            ChartKind::Pie => json!({}),
        };

        json!({
            "type": self.kind.as_str(),
            "data": {
                "labels": self.labels,
                "datasets": [{
                    "label": DATASET_LABEL,
                    "data": self.data,
                    "backgroundColor": FILL_COLORS,
                    "borderColor": BORDER_COLORS,
                    "borderWidth": 2
                }]
            },
            "options": {
                "responsive": true,
                "maintainAspectRatio": false,
                "plugins": { "legend": legend },
                "scales": scales
            }
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChartAdapter {
    kind: ChartKind,
    chart: Option<Chart>,
    builds: u64,
}

impl ChartAdapter {
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            chart: None,
            builds: 0,
        }
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn chart(&self) -> Option<&Chart> {
        self.chart.as_ref()
    }

    pub fn config(&self) -> Option<Value> {
        self.chart.as_ref().map(Chart::config)
    }

    /// Builds an empty chart of the current kind.
    pub fn initialize(&mut self, theme: Theme) {
        self.builds += 1;
        debug!("building {} chart #{}", self.kind.as_str(), self.builds);
        self.chart = Some(Chart::new(self.kind, self.builds, theme));
    }

    /// Replaces the data in place. Does nothing before `initialize`.
    pub fn update(&mut self, totals: &CategoryTotals, theme: Theme) {
        let Some(chart) = self.chart.as_mut() else {
            return;
        };
        chart.labels = totals.labels();
        chart.data = totals.values();
        chart.palette = Palette::for_theme(theme);
    }

    /// Tears the chart down and rebuilds it in the other kind with the same data.
    pub fn toggle(&mut self, totals: &CategoryTotals, theme: Theme) -> ChartKind {
        self.kind = self.kind.toggled();
        if let Some(old) = self.chart.take() {
            debug!("destroyed {} chart #{}", old.kind.as_str(), old.build);
        }
        self.initialize(theme);
        self.update(totals, theme);
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Subscription, SubscriptionId};
    use crate::stats::category_totals;

    fn totals() -> CategoryTotals {
        let subs = vec![
            Subscription {
                id: SubscriptionId(1),
                name: "Netflix".into(),
                cost: 15.0,
                renewal_date: "2025-01-01".into(),
                category: "Streaming".into(),
            },
            Subscription {
                id: SubscriptionId(2),
                name: "Spotify".into(),
                cost: 9.99,
                renewal_date: "2025-01-09".into(),
                category: "Music".into(),
            },
        ];
        category_totals(&subs)
    }

    #[test]
    fn update_before_initialize_is_ignored() {
        let mut adapter = ChartAdapter::new(ChartKind::Bar);
        adapter.update(&totals(), Theme::Light);
        assert!(adapter.chart().is_none());
        assert!(adapter.config().is_none());
    }

    #[test]
    fn update_keeps_the_same_chart_object() {
        let mut adapter = ChartAdapter::new(ChartKind::Bar);
        adapter.initialize(Theme::Light);
        adapter.update(&totals(), Theme::Light);

        let chart = adapter.chart().unwrap();
        assert_eq!(chart.build, 1);
        assert_eq!(chart.labels, vec!["Streaming", "Music"]);
        assert_eq!(chart.data, vec![15.0, 9.99]);
    }

    #[test]
    fn toggle_rebuilds_and_replays_data() {
        let mut adapter = ChartAdapter::new(ChartKind::Bar);
        adapter.initialize(Theme::Light);
        adapter.update(&totals(), Theme::Light);

        assert_eq!(adapter.toggle(&totals(), Theme::Dark), ChartKind::Pie);
        let chart = adapter.chart().unwrap();
        assert_eq!(chart.build, 2);
        assert_eq!(chart.kind, ChartKind::Pie);
        assert_eq!(chart.labels, vec!["Streaming", "Music"]);
        assert_eq!(chart.palette, Palette::for_theme(Theme::Dark));
    }

    #[test]
    fn bar_config_has_scales_and_hidden_legend() {
        let mut adapter = ChartAdapter::new(ChartKind::Bar);
        adapter.initialize(Theme::Light);
        adapter.update(&totals(), Theme::Light);
        let config = adapter.config().unwrap();

        assert_eq!(config["type"], "bar");
        assert_eq!(config["options"]["plugins"]["legend"]["display"], false);
        assert_eq!(config["options"]["scales"]["y"]["beginAtZero"], true);
        assert_eq!(config["data"]["datasets"][0]["label"], "Spending by Category");
        assert_eq!(config["data"]["labels"][1], "Music");
    }

    #[test]
    fn pie_config_shows_legend_without_scales() {
        let mut adapter = ChartAdapter::new(ChartKind::Pie);
        adapter.initialize(Theme::Dark);
        let config = adapter.config().unwrap();

        assert_eq!(config["type"], "pie");
        assert_eq!(config["options"]["plugins"]["legend"]["display"], true);
        assert_eq!(config["options"]["scales"], json!({}));
        assert_eq!(
            config["options"]["plugins"]["legend"]["labels"]["color"],
            "#f9fafb"
        );
    }
}
