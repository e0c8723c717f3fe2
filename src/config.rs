use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub session_file: PathBuf,
    pub user_agent: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_base_url = std::env::var("API_BASE_URL")?;
        let session_file = std::env::var("SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".piarpoint-session.json"));
        let user_agent = std::env::var("APP_USER_AGENT")
            .unwrap_or_else(|_| format!("piarpoint/{}", env!("CARGO_PKG_VERSION")));
        Ok(Self {
            api_base_url,
            session_file,
            user_agent,
        })
    }
}
