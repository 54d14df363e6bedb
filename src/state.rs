use std::sync::Arc;

use crate::config::Config;
use crate::email::ResetMailer;
use crate::tokens::TokenStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub tokens: Arc<dyn TokenStore>,
    pub mailer: Option<Arc<dyn ResetMailer>>,
}
