//! Client configuration.

use std::time::Duration;

use url::Url;

/// Configuration for a [`CommunicationClient`](crate::CommunicationClient).
///
/// # Examples
///
/// ```rust
/// use commlink_client_core::ClientConfig;
/// use url::Url;
///
/// let base = Url::parse("https://service.example.com/comm/v1/").unwrap();
/// let config = ClientConfig::new(base);
///
/// assert_eq!(config.event_wait_timeout, ClientConfig::DEFAULT_EVENT_WAIT);
/// ```
///
/// Builders adjust individual fields:
///
/// ```rust
/// use std::time::Duration;
/// use commlink_client_core::ClientConfig;
/// use url::Url;
///
/// let base = Url::parse("https://service.example.com/comm/v1/").unwrap();
/// let config = ClientConfig::new(base)
///     .with_event_wait_timeout(Duration::from_secs(10))
///     .with_user_agent("MyApp/2.1".to_string());
///
/// assert_eq!(config.event_wait_timeout, Duration::from_secs(10));
/// assert_eq!(config.user_agent, "MyApp/2.1");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every relative href in the resource graph resolves against.
    pub base_url: Url,

    /// How long a start operation waits for its confirming event before
    /// giving up and releasing its correlation slot.
    pub event_wait_timeout: Duration,

    /// Identification string transports may present to the service.
    pub user_agent: String,
}

impl ClientConfig {
    /// Default window a start operation waits for its confirming event.
    pub const DEFAULT_EVENT_WAIT: Duration = Duration::from_secs(30);

    /// Create a configuration with default timing for the given service root.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            event_wait_timeout: Self::DEFAULT_EVENT_WAIT,
            user_agent: format!("commlink-client-core/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Override how long start operations wait for their confirming event.
    pub fn with_event_wait_timeout(mut self, timeout: Duration) -> Self {
        self.event_wait_timeout = timeout;
        self
    }

    /// Override the client identification string.
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://service.example.com/comm/v1/").unwrap()
    }

    #[test]
    fn defaults() {
        let config = ClientConfig::new(base());
        assert_eq!(config.event_wait_timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("commlink-client-core/"));
    }

    #[test]
    fn builders_override_fields() {
        let config = ClientConfig::new(base())
            .with_event_wait_timeout(Duration::from_millis(250))
            .with_user_agent("probe/0.1".to_string());
        assert_eq!(config.event_wait_timeout, Duration::from_millis(250));
        assert_eq!(config.user_agent, "probe/0.1");
    }
}
