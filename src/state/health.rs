//! API connectivity probe state.

use crate::model::FetchError;

/// Result of the most recent health check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HealthState {
    /// Never run.
    #[default]
    Idle,
    /// Probe in flight.
    Pending,
    /// API answered; carries the zen message.
    Healthy(String),
    /// Probe failed; carries the error message.
    Failed(String),
}

impl HealthState {
    /// Start a probe. Returns `false` (and changes nothing) while one is pending.
    pub fn start(&mut self) -> bool {
        if matches!(self, HealthState::Pending) {
            return false;
        }
        *self = HealthState::Pending;
        true
    }

    /// Record the probe outcome.
    pub fn finish(&mut self, result: Result<String, FetchError>) {
        *self = match result {
            Ok(message) => HealthState::Healthy(message),
            Err(error) => HealthState::Failed(error.to_string()),
        };
    }

    /// Status line text, if there is anything to show.
    pub fn status_line(&self) -> Option<String> {
        match self {
            HealthState::Idle => None,
            HealthState::Pending => Some("Testing API...".to_string()),
            HealthState::Healthy(message) => Some(format!(
                "GitHub API connection successful! Zen: \"{}\"",
                message.trim()
            )),
            HealthState::Failed(message) => {
                Some(format!("GitHub API connection failed: {message}"))
            }
        }
    }
}
