use std::sync::Arc;

use crate::config::Config;
use crate::fulfillment::Orchestrator;

#[derive(Debug, Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            orchestrator: Arc::new(Orchestrator::new(config)),
        }
    }
}
