use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DashboardConfig {
    /// Base URL of the DataGuard API server.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// The dashboard owns the terminal, so diagnostics go to a file.
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

fn default_api_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_log_file() -> String {
    "dataguard-dashboard.log".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            log_file: default_log_file(),
        }
    }
}

impl DashboardConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}
