use std::time::Duration;

pub mod constants;
pub mod external;
pub mod service;
#[cfg(test)]
mod tests;
pub mod views;

pub use contact_manager_core as data;

#[derive(Debug, Clone)]
pub struct Config {
    /// base url of the remote contacts service, without trailing slash
    pub server_url: String,
    pub notification_duration: Duration,
}

impl Config {
    pub fn new(server_url: &str) -> Self {
        Self {
            server_url: server_url.trim_end_matches('/').to_owned(),
            notification_duration: Duration::from_millis(
                constants::DEFAULT_NOTIFICATION_DURATION_MS,
            ),
        }
    }

    pub fn with_notification_duration(mut self, duration: Duration) -> Self {
        self.notification_duration = duration;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(constants::DEFAULT_SERVER_URL)
    }
}
