use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::cache::models::rate_limit::RateLimitWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { remaining: u32 },
    Rejected { retry_after: Duration },
}

/// 速率限制存储：每个客户端一个滑动窗口
///
/// 被拒绝的请求不计数，最早一条放行记录离开窗口后即可再次放行。
#[derive(Debug)]
pub struct RateLimitStore {
    windows: Mutex<HashMap<String, RateLimitWindow>>,
    window: Duration,
    max_requests: u32,
}

impl RateLimitStore {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            window,
            max_requests,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn check(&self, key: &str) -> RateLimitDecision {
        self.check_at(key, Instant::now())
    }

    /// 记录 `key` 在 `now` 时刻的一次请求
    pub fn check_at(&self, key: &str, now: Instant) -> RateLimitDecision {
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());
        let entry = windows.entry(key.to_string()).or_default();
        entry.prune(now, self.window);

        let count = u32::try_from(entry.count()).unwrap_or(u32::MAX);
        if count >= self.max_requests {
            return RateLimitDecision::Rejected {
                retry_after: entry.reset_in(now, self.window),
            };
        }

        entry.record(now);
        RateLimitDecision::Allowed {
            remaining: self.max_requests - count - 1,
        }
    }

    /// 清理窗口内已无记录的客户端，返回清理数量
    pub fn purge_expired_at(&self, now: Instant) -> usize {
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());
        let before = windows.len();
        windows.retain(|_, w| {
            w.prune(now, self.window);
            !w.is_empty()
        });
        before - windows.len()
    }

    pub fn tracked_clients(&self) -> usize {
        self.windows.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}
