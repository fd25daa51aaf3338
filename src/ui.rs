use crate::controller::{Dashboard, InsightsPanel};
use crate::format::{format_amount, format_currency, format_date};
use crate::models::{ChartKind, Coupon, DisplayMode, Insight, Subscription, Theme};

/// Copy that differs between the friendly and robotic display modes.
#[derive(Debug)]
pub struct UiText {
    pub tagline: &'static str,
    pub subscriptions_title: &'static str,
    pub stats_title: &'static str,
    pub avg_label: &'static str,
    pub yearly_label: &'static str,
    pub chart_title: &'static str,
    pub insights_title: &'static str,
    pub insights_icon: &'static str,
    pub coupons_title: &'static str,
    pub add_button: &'static str,
    pub refresh_button: &'static str,
    pub empty_message: &'static str,
    pub loading_text: &'static str,
    pub footer_text: &'static str,
    pub switch_to_pie: &'static str,
    pub switch_to_bar: &'static str,
    pub delete_button: &'static str,
    pub delete_confirm: &'static str,
    pub mode_icon: &'static str,
}

const FRIENDLY: UiText = UiText {
    tagline: "Your intelligent subscription assistant 😊",
    subscriptions_title: "Your Subscriptions",
    stats_title: "Spending Overview",
    avg_label: "Average",
    yearly_label: "Yearly Total",
    chart_title: "Category Breakdown",
    insights_title: "AI Insights",
    insights_icon: "🤖",
    coupons_title: "Available Deals",
    add_button: "Add Subscription",
    refresh_button: "Refresh Insights",
    empty_message: "No subscriptions yet. Add your first one above! 🚀",
    loading_text: "Analyzing your spending patterns...",
    footer_text: "Built with SubSage - Track smarter, save more ❤️",
    switch_to_pie: "Switch to Pie Chart 🥧",
    switch_to_bar: "Switch to Bar Chart 📊",
    delete_button: "🗑️ Remove",
    delete_confirm: "Are you sure you want to remove this subscription?",
    mode_icon: "😊",
};

const ROBOTIC: UiText = UiText {
    tagline: "SUBSCRIPTION MANAGEMENT SYSTEM v1.0",
    subscriptions_title: "SUBSCRIPTION DATABASE",
    stats_title: "FINANCIAL METRICS",
    avg_label: "AVG COST",
    yearly_label: "ANNUAL TOTAL",
    chart_title: "CATEGORY ANALYSIS",
    insights_title: "SYSTEM INSIGHTS",
    insights_icon: "⚙️",
    coupons_title: "PROMOTIONAL OFFERS",
    add_button: "ADD ENTRY",
    refresh_button: "REFRESH DATA",
    empty_message: "DATABASE EMPTY. INITIALIZE FIRST ENTRY.",
    loading_text: "PROCESSING DATA...",
    footer_text: "SUBSAGE SYSTEM © 2025 - OPERATIONAL",
    switch_to_pie: "SWITCH TO PIE CHART",
    switch_to_bar: "SWITCH TO BAR CHART",
    delete_button: "DELETE",
    delete_confirm: "CONFIRM DELETION OF ENTRY?",
    mode_icon: "🤖",
};

pub fn ui_text(mode: DisplayMode) -> &'static UiText {
    match mode {
        DisplayMode::Friendly => &FRIENDLY,
        DisplayMode::Robotic => &ROBOTIC,
    }
}

impl UiText {
    pub fn chart_toggle(&self, kind: ChartKind) -> &'static str {
        match kind {
            ChartKind::Bar => self.switch_to_pie,
            ChartKind::Pie => self.switch_to_bar,
        }
    }
}

pub fn theme_icon(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "🌙",
        Theme::Dark => "☀️",
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Serializes a value for inline `<script>` use without closing the tag early.
fn script_json(value: &impl serde::Serialize) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}

pub fn render_index(dashboard: &Dashboard, alert: Option<&str>) -> String {
    let prefs = dashboard.preferences;
    let text = ui_text(prefs.mode);
    let summary = dashboard.summary();

    fill_template(INDEX_HTML, |key| match key {
        "THEME" => prefs.theme.as_str().to_string(),
        "THEME_ICON" => theme_icon(prefs.theme).to_string(),
        "MODE_ICON" => text.mode_icon.to_string(),
        "TAGLINE" => text.tagline.to_string(),
        "SUBSCRIPTIONS_TITLE" => text.subscriptions_title.to_string(),
        "SUB_COUNT" => summary.subscription_count.to_string(),
        "ADD_BUTTON" => text.add_button.to_string(),
        "SUBSCRIPTIONS" => render_subscriptions(&dashboard.subscriptions, text),
        "STATS_TITLE" => text.stats_title.to_string(),
        "TOTAL_COST" => format_amount(summary.total_cost),
        "AVG_LABEL" => text.avg_label.to_string(),
        "AVG_COST" => format_amount(summary.average_cost),
        "YEARLY_LABEL" => text.yearly_label.to_string(),
        "YEARLY_COST" => format_amount(summary.yearly_cost),
        "CHART_TITLE" => text.chart_title.to_string(),
        "CHART_TOGGLE" => text.chart_toggle(dashboard.chart.kind()).to_string(),
        "INSIGHTS_ICON" => text.insights_icon.to_string(),
        "INSIGHTS_TITLE" => text.insights_title.to_string(),
        "REFRESH_BUTTON" => text.refresh_button.to_string(),
        "INSIGHTS" => render_insights(&dashboard.insights, text),
        "COUPONS_TITLE" => text.coupons_title.to_string(),
        "COUPONS" => render_coupons(&dashboard.coupons),
        "FOOTER" => text.footer_text.to_string(),
        "CHART_CONFIG" => {
            script_json(&dashboard.chart.config().unwrap_or(serde_json::Value::Null))
        }
        "ALERT" => match alert {
            Some(message) => format!("<script>window.alert({});</script>", script_json(&message)),
            None => String::new(),
        },
        _ => String::new(),
    })
}

/// Single pass over `{{KEY}}` markers, so substituted values are never rescanned.
fn fill_template(template: &str, value: impl Fn(&str) -> String) -> String {
    let mut out = String::with_capacity(template.len() + 4096);
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                out.push_str(&value(&after[..end]));
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn render_subscriptions(subscriptions: &[Subscription], text: &UiText) -> String {
    if subscriptions.is_empty() {
        return format!(
            r#"<div class="empty-state"><p>{}</p></div>"#,
            text.empty_message
        );
    }

    let confirm = script_json(&text.delete_confirm);
    subscriptions
        .iter()
        .map(|sub| {
            format!(
                r#"<div class="subscription-item">
  <div class="sub-info">
    <div class="sub-name">{name}</div>
    <div class="sub-details">
      <span class="sub-detail">📅 {renewal}</span>
      <span class="sub-category">{category}</span>
    </div>
  </div>
  <div class="sub-actions">
    <div class="sub-cost">{cost}</div>
    <form method="post" action="/subscriptions/{id}/delete" onsubmit="return confirm({confirm});">
      <button class="delete-btn" type="submit">{delete}</button>
    </form>
  </div>
</div>"#,
                name = escape_html(&sub.name),
                renewal = format_date(&sub.renewal_date),
                category = escape_html(&sub.category),
                cost = format_currency(sub.cost),
                id = sub.id,
                confirm = escape_html(&confirm),
                delete = text.delete_button,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_insights(panel: &InsightsPanel, text: &UiText) -> String {
    match panel {
        InsightsPanel::Loading => format!(
            r#"<div class="loading-state"><div class="spinner"></div><p>{}</p></div>"#,
            text.loading_text
        ),
        InsightsPanel::Failed => "<p>Failed to load insights. Please try again.</p>".to_string(),
        InsightsPanel::Ready(insights) if insights.is_empty() => {
            "<p>No insights available yet.</p>".to_string()
        }
        InsightsPanel::Ready(insights) => insights
            .iter()
            .map(render_insight)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn render_insight(insight: &Insight) -> String {
    format!(
        r#"<div class="insight-item {kind}"><p class="insight-message">{message}</p></div>"#,
        kind = escape_html(&insight.kind),
        message = escape_html(&insight.message),
    )
}

pub fn render_coupons(coupons: &[Coupon]) -> String {
    coupons
        .iter()
        .map(|coupon| {
            format!(
                r#"<div class="coupon-item">
  <div class="coupon-header">
    <div class="coupon-service">{service}</div>
    <div class="coupon-discount">{discount}</div>
  </div>
  <div class="coupon-description">{description}</div>
  <div class="coupon-footer">
    <span class="coupon-code">{code}</span>
    <span class="coupon-expiry">Expires: {expiry}</span>
  </div>
</div>"#,
                service = escape_html(&coupon.service),
                discount = escape_html(&coupon.discount),
                description = escape_html(&coupon.description),
                code = escape_html(&coupon.code),
                expiry = format_date(&coupon.expiry_date),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en" data-theme="{{THEME}}">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>SubSage - Smart Subscription Manager</title>
  <script src="https://cdn.jsdelivr.net/npm/chart.js@4"></script>
  <style>
    :root {
      --bg-primary: #f9fafb;
      --bg-secondary: #ffffff;
      --bg-tertiary: #f3f4f6;
      --text-primary: #1f2937;
      --text-secondary: #6b7280;
      --accent: #6366f1;
      --danger: #ef4444;
      --shadow: 0 10px 30px rgba(31, 41, 55, 0.08);
    }

    [data-theme="dark"] {
      --bg-primary: #111827;
      --bg-secondary: #1f2937;
      --bg-tertiary: #374151;
      --text-primary: #f9fafb;
      --text-secondary: #d1d5db;
      --shadow: 0 10px 30px rgba(0, 0, 0, 0.4);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg-primary);
      color: var(--text-primary);
      font-family: "Inter", "Segoe UI", sans-serif;
      padding: 24px 18px 48px;
    }

    header {
      display: flex;
      justify-content: space-between;
      align-items: center;
      max-width: 1100px;
      margin: 0 auto 24px;
    }

    h1 {
      margin: 0;
      font-size: 2rem;
    }

    .tagline {
      margin: 4px 0 0;
      color: var(--text-secondary);
    }

    .toggles {
      display: flex;
      gap: 8px;
    }

    .toggles form {
      margin: 0;
    }

    button {
      border: none;
      border-radius: 10px;
      padding: 10px 16px;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    .toggle-btn {
      background: var(--bg-tertiary);
      color: var(--text-primary);
      font-size: 1.2rem;
    }

    main {
      max-width: 1100px;
      margin: 0 auto;
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
      gap: 20px;
    }

    .card {
      background: var(--bg-secondary);
      border-radius: 18px;
      box-shadow: var(--shadow);
      padding: 22px;
      display: grid;
      gap: 14px;
      align-content: start;
    }

    .card h2 {
      margin: 0;
      font-size: 1.15rem;
      display: flex;
      align-items: center;
      gap: 8px;
    }

    .badge {
      background: var(--accent);
      color: white;
      border-radius: 999px;
      padding: 2px 10px;
      font-size: 0.85rem;
    }

    .add-form {
      display: grid;
      grid-template-columns: repeat(2, 1fr);
      gap: 10px;
    }

    .add-form input,
    .add-form select {
      padding: 10px;
      border-radius: 10px;
      border: 1px solid var(--bg-tertiary);
      background: var(--bg-primary);
      color: var(--text-primary);
    }

    .add-form button {
      grid-column: span 2;
    }

    .subscription-item,
    .coupon-item,
    .insight-item {
      border-radius: 12px;
      padding: 12px 14px;
      background: var(--bg-tertiary);
    }

    .subscription-item {
      display: flex;
      justify-content: space-between;
      align-items: center;
      gap: 12px;
    }

    .sub-name {
      font-weight: 600;
    }

    .sub-details {
      display: flex;
      gap: 10px;
      color: var(--text-secondary);
      font-size: 0.9rem;
    }

    .sub-category {
      background: var(--bg-secondary);
      border-radius: 999px;
      padding: 0 8px;
    }

    .sub-actions {
      display: flex;
      align-items: center;
      gap: 1rem;
    }

    .sub-actions form {
      margin: 0;
    }

    .sub-cost {
      font-weight: 700;
    }

    .delete-btn {
      background: var(--danger);
      padding: 6px 10px;
    }

    .stats {
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 10px;
    }

    .stat {
      background: var(--bg-tertiary);
      border-radius: 12px;
      padding: 12px;
    }

    .stat .label {
      display: block;
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.08em;
      color: var(--text-secondary);
    }

    .stat .value {
      font-size: 1.4rem;
      font-weight: 700;
    }

    .chart-box {
      position: relative;
      height: 280px;
    }

    .insight-item.warning,
    .insight-item.alert,
    .insight-item.cost {
      border-left: 4px solid #f59e0b;
    }

    .insight-item.success {
      border-left: 4px solid #10b981;
    }

    .insight-item.tip,
    .insight-item.info {
      border-left: 4px solid var(--accent);
    }

    .insight-message {
      margin: 0;
    }

    .coupon-header,
    .coupon-footer {
      display: flex;
      justify-content: space-between;
    }

    .coupon-service {
      font-weight: 600;
    }

    .coupon-discount {
      color: #10b981;
      font-weight: 700;
    }

    .coupon-code {
      font-family: monospace;
      border: 1px dashed var(--text-secondary);
      border-radius: 6px;
      padding: 0 6px;
    }

    .coupon-expiry {
      color: var(--text-secondary);
      font-size: 0.85rem;
    }

    .empty-state,
    .loading-state {
      text-align: center;
      color: var(--text-secondary);
    }

    footer {
      text-align: center;
      margin-top: 32px;
      color: var(--text-secondary);
    }
  </style>
</head>
<body>
  <header>
    <div>
      <h1>SubSage</h1>
      <p class="tagline">{{TAGLINE}}</p>
    </div>
    <div class="toggles">
      <form method="post" action="/toggle/mode">
        <button class="toggle-btn" type="submit" aria-label="Toggle display mode">{{MODE_ICON}}</button>
      </form>
      <form method="post" action="/toggle/theme">
        <button class="toggle-btn" type="submit" aria-label="Toggle theme">{{THEME_ICON}}</button>
      </form>
    </div>
  </header>

  <main>
    <section class="card">
      <h2>{{SUBSCRIPTIONS_TITLE}} <span class="badge">{{SUB_COUNT}}</span></h2>
      <form class="add-form" method="post" action="/subscriptions">
        <input name="name" placeholder="Name" required />
        <input name="cost" type="number" step="0.01" min="0" placeholder="Monthly cost" required />
        <input name="renewal_date" type="date" required />
        <select name="category">
          <option>Streaming</option>
          <option>Gaming</option>
          <option>Productivity</option>
          <option>Fitness</option>
          <option>Music</option>
          <option>Education</option>
          <option>Cloud Storage</option>
          <option>Other</option>
        </select>
        <button type="submit">{{ADD_BUTTON}}</button>
      </form>
      <div class="subscriptions-list">
{{SUBSCRIPTIONS}}
      </div>
    </section>

    <section class="card">
      <h2>{{STATS_TITLE}}</h2>
      <div class="stats">
        <div class="stat"><span class="label">Total</span><span class="value">${{TOTAL_COST}}</span></div>
        <div class="stat"><span class="label">{{AVG_LABEL}}</span><span class="value">${{AVG_COST}}</span></div>
        <div class="stat"><span class="label">{{YEARLY_LABEL}}</span><span class="value">${{YEARLY_COST}}</span></div>
      </div>
      <h2>{{CHART_TITLE}}</h2>
      <div class="chart-box"><canvas id="spendingChart"></canvas></div>
      <form method="post" action="/toggle/chart">
        <button type="submit">{{CHART_TOGGLE}}</button>
      </form>
    </section>

    <section class="card">
      <h2><span class="icon">{{INSIGHTS_ICON}}</span>{{INSIGHTS_TITLE}}</h2>
      <div class="insights-content">
{{INSIGHTS}}
      </div>
      <form method="post" action="/insights/refresh">
        <button type="submit">{{REFRESH_BUTTON}}</button>
      </form>
    </section>

    <section class="card">
      <h2><span class="icon">🎟️</span>{{COUPONS_TITLE}}</h2>
      <div class="coupons-list">
{{COUPONS}}
      </div>
    </section>
  </main>

  <footer>{{FOOTER}}</footer>

  <script>
    const config = {{CHART_CONFIG}};
    if (config && window.Chart) {
      config.options.plugins.tooltip = {
        callbacks: {
          label: (context) => context.label + ': $' + Number(context.parsed.y ?? context.parsed).toFixed(2)
        }
      };
      if (config.options.scales && config.options.scales.y) {
        config.options.scales.y.ticks.callback = (value) => '$' + value;
      }
      new Chart(document.getElementById('spendingChart').getContext('2d'), config);
    }
  </script>
  {{ALERT}}
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartAdapter;
    use crate::models::SubscriptionId;
    use crate::storage::Preferences;

    fn dashboard() -> Dashboard {
        let mut chart = ChartAdapter::new(ChartKind::Bar);
        chart.initialize(Theme::Light);
        Dashboard {
            subscriptions: vec![Subscription {
                id: SubscriptionId(7),
                name: "Tom & Jerry <Plus>".into(),
                cost: 12.5,
                renewal_date: "2025-12-31".into(),
                category: "Streaming".into(),
            }],
            chart,
            ..Dashboard::default()
        }
    }

    #[test]
    fn index_renders_list_stats_and_delete_action() {
        let html = render_index(&dashboard(), None);
        assert!(html.contains("Tom &amp; Jerry &lt;Plus&gt;"));
        assert!(html.contains("Dec 31, 2025"));
        assert!(html.contains("$12.50"));
        assert!(html.contains(r#"action="/subscriptions/7/delete""#));
        assert!(html.contains("$150.00"), "yearly projection");
        assert!(html.contains("Switch to Pie Chart"));
        assert!(!html.contains("{{"));
        assert!(!html.contains("window.alert"));
    }

    #[test]
    fn robotic_mode_swaps_copy() {
        let dash = Dashboard {
            preferences: Preferences {
                theme: Theme::Dark,
                mode: DisplayMode::Robotic,
            },
            ..Dashboard::default()
        };
        let html = render_index(&dash, None);
        assert!(html.contains("DATABASE EMPTY. INITIALIZE FIRST ENTRY."));
        assert!(html.contains(r#"data-theme="dark""#));
        assert!(html.contains("SYSTEM INSIGHTS"));
        assert!(html.contains("PROCESSING DATA..."));
    }

    #[test]
    fn alert_is_rendered_as_script() {
        let html = render_index(&Dashboard::default(), Some("Failed to delete subscription. Please try again."));
        assert!(html.contains(
            r#"window.alert("Failed to delete subscription. Please try again.")"#
        ));
    }

    #[test]
    fn insights_panel_states() {
        let text = ui_text(DisplayMode::Friendly);
        assert!(render_insights(&InsightsPanel::Failed, text).contains("Failed to load insights"));
        assert!(
            render_insights(&InsightsPanel::Ready(Vec::new()), text)
                .contains("No insights available yet.")
        );
        let html = render_insights(
            &InsightsPanel::Ready(vec![Insight {
                kind: "warning".into(),
                message: "Spend less".into(),
            }]),
            text,
        );
        assert!(html.contains(r#"class="insight-item warning""#));
    }

    #[test]
    fn coupons_show_code_and_expiry() {
        let html = render_coupons(&[Coupon {
            id: Some(2),
            service: "Spotify Family".into(),
            discount: "50% off".into(),
            description: "Save 50% on first 6 months of Family plan".into(),
            code: "MUSIC50".into(),
            expiry_date: "2025-11-30".into(),
            category: Some("Music".into()),
        }]);
        assert!(html.contains("MUSIC50"));
        assert!(html.contains("Expires: Nov 30, 2025"));
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let mut dash = dashboard();
        dash.subscriptions[0].name = "{{FOOTER}}".into();
        let html = render_index(&dash, None);
        assert!(html.contains("{{FOOTER}}"));
    }

    #[test]
    fn chart_toggle_label_follows_kind() {
        let text = ui_text(DisplayMode::Robotic);
        assert_eq!(text.chart_toggle(ChartKind::Bar), "SWITCH TO PIE CHART");
        assert_eq!(text.chart_toggle(ChartKind::Pie), "SWITCH TO BAR CHART");
    }
}
