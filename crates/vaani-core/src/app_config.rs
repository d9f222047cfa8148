use std::net::SocketAddr;

#[derive(Clone)]
pub struct AppConfig {
    /// Cuelinks API credential. `None` when unset or empty; search requests
    /// fail with a configuration error until it is provided.
    pub cuelinks_api_key: Option<String>,
    pub cuelinks_base_url: String,
    pub cuelinks_request_timeout_secs: u64,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub user_agent: String,
}

impl AppConfig {
    /// Returns the configured API key, if any.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.cuelinks_api_key.as_deref()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "cuelinks_api_key",
                &self.cuelinks_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("cuelinks_base_url", &self.cuelinks_base_url)
            .field(
                "cuelinks_request_timeout_secs",
                &self.cuelinks_request_timeout_secs,
            )
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
