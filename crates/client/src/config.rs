/// Base URL used when `MYTHOS_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/v1";

/// Settings for [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root including the version prefix, e.g. `http://host:3000/api/v1`.
    pub base_url: String,
    /// Headers sent with every request in addition to `Content-Type`.
    pub default_headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            default_headers: Vec::new(),
        }
    }

    /// Load from the environment.
    ///
    /// | Env Var          | Default                         |
    /// |------------------|---------------------------------|
    /// | `MYTHOS_API_URL` | `http://localhost:3000/api/v1`  |
    pub fn from_env() -> Self {
        let base_url = std::env::var("MYTHOS_API_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::new(base_url)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }
}
