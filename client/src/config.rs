use std::{env, time::Duration};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

/// Connection settings for [`GameClient`](crate::GameClient).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub server_url: String,
    /// No timeout unless one is configured.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Build the configuration from environment variables.
    ///
    /// - `CARLOSWEEPER_SERVER_URL` - server base url (default: `http://localhost:5000`)
    /// - `CARLOSWEEPER_REQUEST_TIMEOUT_SECS` - per-request timeout in seconds (default: none)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = env::var("CARLOSWEEPER_SERVER_URL")
            && !url.trim().is_empty()
        {
            config.server_url = url.trim().to_string();
        }

        config.request_timeout = read_env::<u64>("CARLOSWEEPER_REQUEST_TIMEOUT_SECS")
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        config
    }

    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = server_url.into();
        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}
