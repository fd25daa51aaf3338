use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(pub i64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A recurring payment as stored by the remote API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: SubscriptionId,
    pub name: String,
    pub cost: f64,
    pub renewal_date: String,
    pub category: String,
}

/// User input for a new subscription. Forwarded to the API without validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubscription {
    pub name: String,
    pub cost: f64,
    pub renewal_date: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    #[serde(default)]
    pub id: Option<i64>,
    pub service: String,
    pub discount: String,
    #[serde(default)]
    pub description: String,
    pub code: String,
    pub expiry_date: String,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Friendly,
    Robotic,
}

impl DisplayMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayMode::Friendly => "friendly",
            DisplayMode::Robotic => "robotic",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "friendly" => Some(DisplayMode::Friendly),
            "robotic" => Some(DisplayMode::Robotic),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Friendly => DisplayMode::Robotic,
            DisplayMode::Robotic => DisplayMode::Friendly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Pie,
}

impl ChartKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ChartKind::Bar => ChartKind::Pie,
            ChartKind::Pie => ChartKind::Bar,
        }
    }
}

/// Missing fields arrive as empty text so the remote decides what is valid.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddSubscriptionForm {
    pub name: String,
    pub cost: String,
    pub renewal_date: String,
    pub category: String,
}

impl AddSubscriptionForm {
    /// An unparseable cost becomes NaN, which serializes as JSON `null`.
    pub fn into_new_subscription(self) -> NewSubscription {
        NewSubscription {
            name: self.name,
            // Whole-string parse: "9.99 USD" is not truncated to 9.99, and
            // "inf"/"NaN" parse but are non-finite, so they also go out as null.
            cost: self.cost.trim().parse().unwrap_or(f64::NAN),
            renewal_date: self.renewal_date,
            category: self.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_reads_camel_case_wire_format() {
        let raw = r#"{"id":3,"name":"Netflix","cost":15.49,"renewalDate":"2025-11-02","category":"Streaming"}"#;
        let sub: Subscription = serde_json::from_str(raw).unwrap();
        assert_eq!(sub.id, SubscriptionId(3));
        assert_eq!(sub.renewal_date, "2025-11-02");
        assert_eq!(sub.cost, 15.49);
    }

    #[test]
    fn new_subscription_with_bad_cost_sends_null() {
        let form = AddSubscriptionForm {
            name: "Gym".into(),
            cost: "abc".into(),
            renewal_date: "2025-01-01".into(),
            category: "Fitness".into(),
        };
        let body = serde_json::to_value(form.into_new_subscription()).unwrap();
        assert!(body["cost"].is_null());
        assert_eq!(body["renewalDate"], "2025-01-01");
    }

    #[test]
    fn cost_with_trailing_text_or_non_finite_value_sends_null() {
        for raw in ["9.99 USD", "inf", "NaN", ""] {
            let form = AddSubscriptionForm {
                cost: raw.into(),
                ..AddSubscriptionForm::default()
            };
            let body = serde_json::to_value(form.into_new_subscription()).unwrap();
            assert!(body["cost"].is_null(), "{raw:?} should not be sent as a number");
        }

        let form = AddSubscriptionForm {
            cost: " 12.50 ".into(),
            ..AddSubscriptionForm::default()
        };
        assert_eq!(form.into_new_subscription().cost, 12.5);
    }

    #[test]
    fn missing_form_fields_become_empty_text() {
        let form: AddSubscriptionForm =
            serde_json::from_str(r#"{"name":"Gym","cost":"30"}"#).unwrap();
        let new = form.into_new_subscription();
        assert_eq!(new.name, "Gym");
        assert_eq!(new.cost, 30.0);
        assert_eq!(new.renewal_date, "");
        assert_eq!(new.category, "");
    }

    #[test]
    fn insight_type_maps_to_kind() {
        let insight: Insight =
            serde_json::from_str(r#"{"type":"warning","message":"careful"}"#).unwrap();
        assert_eq!(insight.kind, "warning");
    }

    #[test]
    fn toggles_flip_between_two_values() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(DisplayMode::Robotic.toggled(), DisplayMode::Friendly);
        assert_eq!(ChartKind::Bar.toggled().toggled(), ChartKind::Bar);
        assert_eq!(Theme::parse("purple"), None);
    }
}
