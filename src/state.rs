use crate::controller::Controller;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Actions run one at a time; a request waits for the previous one's reloads.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<Mutex<Controller>>,
}

impl AppState {
    pub fn new(controller: Controller) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
        }
    }
}
