use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::session::{FileSessionStorage, SessionStore};

/// Everything the screens share: config, the gateway client, and the
/// session store. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub api: ApiClient,
    pub session: SessionStore,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let session = SessionStore::restore(Box::new(FileSessionStorage::new(
            config.session_file.clone(),
        )));
        let api = ApiClient::new(&config, session.clone())?;
        Ok(Self {
            config,
            api,
            session,
        })
    }
}
