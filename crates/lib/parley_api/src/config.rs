//! API server configuration.

use parley_core::completion::CompletionConfig;
use parley_core::scheduling::SchedulingConfig;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "0.0.0.0:3000").
    pub bind_addr: String,
    /// Completion provider settings.
    pub completion: CompletionConfig,
    /// Scheduling provider settings.
    pub scheduling: SchedulingConfig,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `PORT`   | `3000`  |
    ///
    /// Provider variables are documented on [`CompletionConfig::from_env`]
    /// and [`SchedulingConfig::from_env`].
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        Self {
            bind_addr: format!("0.0.0.0:{port}"),
            completion: CompletionConfig::from_env(),
            scheduling: SchedulingConfig::from_env(),
        }
    }
}
