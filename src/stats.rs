use crate::models::Subscription;
use serde::Serialize;

const MONTHS_PER_YEAR: f64 = 12.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Per-category spending, ordered by first occurrence of each category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategoryTotals(Vec<CategoryTotal>);

impl CategoryTotals {
    pub fn get(&self, category: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.total)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.0.iter()
    }

    pub fn labels(&self) -> Vec<String> {
        self.0.iter().map(|entry| entry.category.clone()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.0.iter().map(|entry| entry.total).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingSummary {
    pub subscription_count: usize,
    pub total_cost: f64,
    pub average_cost: f64,
    pub yearly_cost: f64,
    pub category_totals: CategoryTotals,
    pub most_expensive: Option<Subscription>,
}

pub fn total_cost(subscriptions: &[Subscription]) -> f64 {
    subscriptions.iter().fold(0.0, |sum, sub| sum + sub.cost)
}

/// Zero for an empty list rather than NaN.
pub fn average_cost(subscriptions: &[Subscription]) -> f64 {
    if subscriptions.is_empty() {
        return 0.0;
    }
    total_cost(subscriptions) / subscriptions.len() as f64
}

/// Every subscription is treated as billed monthly.
pub fn yearly_projection(subscriptions: &[Subscription]) -> f64 {
    total_cost(subscriptions) * MONTHS_PER_YEAR
}

pub fn category_totals(subscriptions: &[Subscription]) -> CategoryTotals {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for sub in subscriptions {
        match totals.iter_mut().find(|entry| entry.category == sub.category) {
            Some(entry) => entry.total += sub.cost,
            None => totals.push(CategoryTotal {
                category: sub.category.clone(),
                total: sub.cost,
            }),
        }
    }
    CategoryTotals(totals)
}

/// First of several equally priced entries wins.
pub fn most_expensive(subscriptions: &[Subscription]) -> Option<&Subscription> {
    subscriptions.iter().fold(None, |best, sub| match best {
        Some(current) if current.cost >= sub.cost => Some(current),
        _ => Some(sub),
    })
}

pub fn build_summary(subscriptions: &[Subscription]) -> SpendingSummary {
    SpendingSummary {
        subscription_count: subscriptions.len(),
        total_cost: total_cost(subscriptions),
        average_cost: average_cost(subscriptions),
        yearly_cost: yearly_projection(subscriptions),
        category_totals: category_totals(subscriptions),
        most_expensive: most_expensive(subscriptions).cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubscriptionId;

    fn sub(id: i64, cost: f64, category: &str) -> Subscription {
        Subscription {
            id: SubscriptionId(id),
            name: format!("sub-{id}"),
            cost,
            renewal_date: "2025-06-01".to_string(),
            category: category.to_string(),
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn sample() -> Vec<Subscription> {
        vec![
            sub(1, 9.99, "Streaming"),
            sub(2, 15.00, "Streaming"),
            sub(3, 4.99, "Music"),
        ]
    }

    #[test]
    fn summary_for_mixed_categories() {
        let subs = sample();
        assert!(close(total_cost(&subs), 29.98));
        assert!(close(average_cost(&subs), 29.98 / 3.0));
        assert!(close(yearly_projection(&subs), 359.76));

        let totals = category_totals(&subs);
        assert_eq!(totals.len(), 2);
        assert!(close(totals.get("Streaming").unwrap(), 24.99));
        assert!(close(totals.get("Music").unwrap(), 4.99));
        assert_eq!(totals.labels(), vec!["Streaming", "Music"]);
    }

    #[test]
    fn empty_list_is_all_zero() {
        let subs: Vec<Subscription> = Vec::new();
        assert_eq!(total_cost(&subs), 0.0);
        assert_eq!(average_cost(&subs), 0.0);
        assert!(!average_cost(&subs).is_nan());
        assert_eq!(yearly_projection(&subs), 0.0);
        assert!(category_totals(&subs).is_empty());
        assert!(most_expensive(&subs).is_none());
    }

    #[test]
    fn yearly_is_exactly_twelve_times_total() {
        let subs = vec![sub(1, 0.1, "A"), sub(2, 0.2, "B"), sub(3, 7.77, "A")];
        assert_eq!(yearly_projection(&subs), total_cost(&subs) * 12.0);
    }

    #[test]
    fn category_totals_partition_the_total() {
        let subs = vec![
            sub(1, 3.5, "Gaming"),
            sub(2, 12.0, "gaming"),
            sub(3, 1.25, "Gaming"),
            sub(4, 8.0, "Cloud Storage"),
        ];
        let totals = category_totals(&subs);
        assert_eq!(totals.len(), 3, "labels are case-sensitive");
        let sum = totals.values().iter().fold(0.0, |acc, value| acc + value);
        assert!(close(sum, total_cost(&subs)));
        assert!(close(totals.get("Gaming").unwrap(), 4.75));
    }

    #[test]
    fn aggregation_is_repeatable() {
        let subs = sample();
        assert_eq!(build_summary(&subs), build_summary(&subs));
        assert_eq!(subs, sample());
    }

    #[test]
    fn most_expensive_prefers_first_of_ties() {
        let subs = vec![sub(1, 5.0, "A"), sub(2, 20.0, "B"), sub(3, 20.0, "C")];
        assert_eq!(most_expensive(&subs).unwrap().id, SubscriptionId(2));
    }

    #[test]
    fn nan_cost_propagates() {
        let subs = vec![sub(1, f64::NAN, "A"), sub(2, 1.0, "A")];
        assert!(total_cost(&subs).is_nan());
        assert!(category_totals(&subs).get("A").unwrap().is_nan());
    }
}
