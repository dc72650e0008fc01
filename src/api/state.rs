//! Application state for the API server

use std::sync::Arc;

use crate::application::SpendingService;

/// API server state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SpendingService>,
    /// Name reported by `/ping` (the pod name when running in a cluster)
    pub instance_name: Arc<str>,
}

impl AppState {
    pub fn new(service: Arc<SpendingService>, instance_name: impl Into<Arc<str>>) -> Self {
        Self {
            service,
            instance_name: instance_name.into(),
        }
    }
}
