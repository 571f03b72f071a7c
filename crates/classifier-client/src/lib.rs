pub mod classifier;
pub mod error;

pub use classifier::ClassifierClient;
pub use error::{ClassifierError, ClassifierResult};

use std::time::Duration;

/// Configuration for the neural classifier service.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub url: String,
    pub timeout: Duration,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        let timeout_ms = std::env::var("CLASSIFIER_TIMEOUT_MS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(analysis_core::limits::CLASSIFIER_TIMEOUT_MS);
        Self {
            url: std::env::var("CLASSIFIER_URL")
                .unwrap_or_else(|_| "http://localhost:8001".to_string()),
            timeout: Duration::from_millis(timeout_ms),
        }
    }
}
