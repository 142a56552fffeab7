use std::sync::Arc;

use pressroom::config::Config;
use pressroom::db::RecordStore;
use pressroom::services::{
    AdminCredentials, BlobStorage, Clock, ReviewWorkflow, SessionManager,
};

use crate::web::security::RateLimiter;

/// Public-facing settings the handlers need from [`Config`].
#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub url: String,
    pub name: String,
    pub secure_cookies: bool,
}

impl From<&Config> for SiteSettings {
    fn from(config: &Config) -> Self {
        Self {
            url: config.site_url.clone(),
            name: config.site_name.clone(),
            secure_cookies: config.secure_cookies,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub workflow: ReviewWorkflow<dyn RecordStore, dyn Clock>,
    pub clock: Arc<dyn Clock>,
    pub sessions: Arc<SessionManager>,
    pub admin: Option<Arc<AdminCredentials>>,
    pub storage: Arc<dyn BlobStorage>,
    pub rate_limiter: Arc<RateLimiter>,
    pub site: Arc<SiteSettings>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn RecordStore>,
        storage: Arc<dyn BlobStorage>,
        clock: Arc<dyn Clock>,
        sessions: Arc<SessionManager>,
        admin: Option<AdminCredentials>,
        site: SiteSettings,
    ) -> Self {
        Self {
            workflow: ReviewWorkflow::new(store.clone(), clock.clone()),
            store,
            clock,
            sessions,
            admin: admin.map(Arc::new),
            storage,
            rate_limiter: Arc::new(RateLimiter::new()),
            site: Arc::new(site),
        }
    }
}
