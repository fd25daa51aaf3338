pub mod api;
pub mod app;
pub mod chart;
pub mod config;
pub mod controller;
pub mod errors;
pub mod format;
pub mod handlers;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;

pub use api::{HttpApiClient, SubscriptionApi};
pub use app::router;
pub use config::AppConfig;
pub use controller::Controller;
pub use state::AppState;
pub use storage::FilePreferenceStore;
