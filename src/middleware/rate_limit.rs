use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tokio::task::JoinHandle;

use crate::{
    cache::{RateLimitDecision, RateLimitStore},
    config::Config,
    error::AppError,
};

pub const LIMIT_HEADER: &str = "x-ratelimit-limit";
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// 每个客户端的滑动窗口限流服务，随服务器启动创建、关闭时销毁
pub struct RateLimiter {
    store: RateLimitStore,
    config: Arc<Config>,
}

impl RateLimiter {
    pub fn new(config: Config) -> Self {
        Self {
            store: RateLimitStore::new(config.rate_limit_window(), config.rate_limit_requests),
            config: Arc::new(config),
        }
    }

    /// 客户端标识：信任代理头时取代理头，否则取连接地址
    pub fn client_key(&self, req: &Request<Body>) -> String {
        // 从连接信息获取原始IP
        let remote_ip = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ci| ci.0.ip().to_string());

        let forwarded = if self.config.trust_proxy_headers {
            forwarded_ip(req.headers())
        } else {
            None
        };

        forwarded
            .or(remote_ip.as_deref())
            .unwrap_or("unknown")
            .trim()
            .to_string()
    }

    pub async fn check_rate_limit(
        self: Arc<Self>,
        req: Request<Body>,
        next: Next,
    ) -> Result<Response, AppError> {
        let ip = self.client_key(&req);
        tracing::debug!("rate limit key: {}", ip);

        match self.store.check(&ip) {
            RateLimitDecision::Rejected { retry_after } => {
                // 向上取整到秒，至少 1 秒
                let retry_after = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
                tracing::warn!(
                    "Rate limit exceeded for {} ({} requests / {}s)",
                    ip,
                    self.store.max_requests(),
                    self.store.window().as_secs()
                );
                Err(AppError::RateLimited {
                    retry_after: retry_after.max(1),
                })
            }
            RateLimitDecision::Allowed { remaining } => {
                let mut response = next.run(req).await;
                let headers = response.headers_mut();
                headers.insert(LIMIT_HEADER, HeaderValue::from(self.store.max_requests()));
                headers.insert(REMAINING_HEADER, HeaderValue::from(remaining));
                Ok(response)
            }
        }
    }

    /// 定期清理空闲客户端，防止表无限增长
    pub fn spawn_cleanup(self: &Arc<Self>) -> JoinHandle<()> {
        let limiter = Arc::clone(self);
        let period = limiter.store.window().max(Duration::from_secs(1));

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // 第一次 tick 立即返回
            interval.tick().await;
            loop {
                interval.tick().await;
                let removed = limiter.store.purge_expired_at(Instant::now());
                if removed > 0 {
                    tracing::debug!(
                        "Purged {} idle rate limit entries, {} tracked",
                        removed,
                        limiter.store.tracked_clients()
                    );
                }
            }
        })
    }
}

fn forwarded_ip(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("x-real-ip")
        .and_then(|h| h.to_str().ok())
        .filter(|ip| !ip.trim().is_empty())
        .or_else(|| {
            headers
                .get("x-forwarded-for")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.split(',').find(|ip| !ip.trim().is_empty()))
        })
}

pub async fn rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    limiter.check_rate_limit(req, next).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(peer: &str, headers: &[(&str, &str)]) -> Request<Body> {
        let mut builder = Request::builder().uri("/");
        for (k, v) in headers {
            builder = builder.header(*k, *v);
        }
        let mut req = builder.body(Body::empty()).unwrap();
        req.extensions_mut()
            .insert(ConnectInfo(peer.parse::<SocketAddr>().unwrap()));
        req
    }

    #[test]
    fn test_key_uses_peer_address() {
        let limiter = RateLimiter::new(Config::default());
        let req = request("10.0.0.7:5555", &[("x-real-ip", "1.1.1.1")]);

        assert_eq!(limiter.client_key(&req), "10.0.0.7");
    }

    #[test]
    fn test_key_uses_proxy_headers_when_trusted() {
        let config = Config {
            trust_proxy_headers: true,
            ..Config::default()
        };
        let limiter = RateLimiter::new(config);

        let req = request("10.0.0.7:5555", &[("x-forwarded-for", " 203.0.113.9, 10.0.0.1")]);
        assert_eq!(limiter.client_key(&req), "203.0.113.9");

        let req = request("10.0.0.7:5555", &[("x-real-ip", "198.51.100.2")]);
        assert_eq!(limiter.client_key(&req), "198.51.100.2");

        let req = request("10.0.0.7:5555", &[]);
        assert_eq!(limiter.client_key(&req), "10.0.0.7");
    }

    #[test]
    fn test_key_without_connect_info() {
        let limiter = RateLimiter::new(Config::default());
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();

        assert_eq!(limiter.client_key(&req), "unknown");
    }
}
