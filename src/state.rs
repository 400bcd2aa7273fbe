use crate::client::AnalyticsSource;
use std::{sync::Arc, time::Instant};

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn AnalyticsSource>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(source: Arc<dyn AnalyticsSource>) -> Self {
        Self {
            source,
            started_at: Instant::now(),
        }
    }
}
