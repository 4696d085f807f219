use config::Config;
use middleware::RateLimiter;
use std::sync::Arc;

pub mod cache;
pub mod config;
pub mod error;
pub mod middleware;
pub mod result;
pub mod router;
pub mod scene;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let rate_limiter = Arc::new(RateLimiter::new(config.clone()));
        Self {
            config,
            rate_limiter,
        }
    }
}
