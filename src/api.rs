pub use crate::errors::ApiError;
use crate::models::{Coupon, Insight, NewSubscription, Subscription, SubscriptionId};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// The remote collaborator holding subscriptions, insights and coupons.
#[async_trait]
pub trait SubscriptionApi: Send + Sync {
    async fn list_subscriptions(&self) -> Result<Vec<Subscription>, ApiError>;
    async fn add_subscription(&self, new: &NewSubscription) -> Result<Subscription, ApiError>;
    async fn delete_subscription(&self, id: SubscriptionId) -> Result<(), ApiError>;
    async fn fetch_insights(&self) -> Result<Vec<Insight>, ApiError>;
    async fn fetch_coupons(&self) -> Result<Vec<Coupon>, ApiError>;
}

/// One request per call; no retries and no timeout beyond the transport default.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
}

impl HttpApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    async fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<Value, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!("{endpoint} answered {status}");

        let envelope: Value = match serde_json::from_slice(&body) {
            Ok(value) => value,
            Err(_) if !status.is_success() => {
                return Err(ApiError::Rejected(format!("status {status}")));
            }
            Err(err) => return Err(ApiError::InvalidResponse(err.to_string())),
        };

        let success = envelope
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if !success || !status.is_success() {
            let reason = envelope
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("status {status}"));
            return Err(ApiError::Rejected(reason));
        }

        Ok(envelope)
    }
}

fn payload<T: DeserializeOwned>(mut envelope: Value, field: &str) -> Result<T, ApiError> {
    let value = envelope
        .get_mut(field)
        .map(Value::take)
        .ok_or_else(|| ApiError::InvalidResponse(format!("missing `{field}`")))?;
    serde_json::from_value(value).map_err(|err| ApiError::InvalidResponse(err.to_string()))
}

#[async_trait]
impl SubscriptionApi for HttpApiClient {
    async fn list_subscriptions(&self) -> Result<Vec<Subscription>, ApiError> {
        let endpoint = "/api/subscriptions";
        let envelope = self.send(self.client.get(self.url(endpoint)), endpoint).await?;
        payload(envelope, "subscriptions")
    }

    async fn add_subscription(&self, new: &NewSubscription) -> Result<Subscription, ApiError> {
        let endpoint = "/api/subscriptions";
        let request = self.client.post(self.url(endpoint)).json(new);
        let envelope = self.send(request, endpoint).await?;
        payload(envelope, "subscription")
    }

    async fn delete_subscription(&self, id: SubscriptionId) -> Result<(), ApiError> {
        let endpoint = format!("/api/subscriptions/{id}");
        self.send(self.client.delete(self.url(&endpoint)), &endpoint)
            .await
            .map(|_| ())
    }

    async fn fetch_insights(&self) -> Result<Vec<Insight>, ApiError> {
        let endpoint = "/api/ai-insights";
        let envelope = self.send(self.client.get(self.url(endpoint)), endpoint).await?;
        payload(envelope, "insights")
    }

    async fn fetch_coupons(&self) -> Result<Vec<Coupon>, ApiError> {
        let endpoint = "/api/coupons";
        let envelope = self.send(self.client.get(self.url(endpoint)), endpoint).await?;
        payload(envelope, "coupons")
    }
}
