use std::sync::Arc;

use crate::config::Config;

/// Shared, read-only state handed to every request.
///
/// Nothing in here is mutable: the bridge keeps no descriptor table or
/// session between requests.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            config: Arc::new(config),
        }
    }
}
