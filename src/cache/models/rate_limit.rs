use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// 单个客户端在滑动窗口内的请求时间记录
#[derive(Debug, Clone, Default)]
pub struct RateLimitWindow {
    hits: VecDeque<Instant>,
}

impl RateLimitWindow {
    /// 丢弃距 `now` 已满 `window` 的记录
    pub fn prune(&mut self, now: Instant, window: Duration) {
        while let Some(&oldest) = self.hits.front() {
            if now.saturating_duration_since(oldest) >= window {
                self.hits.pop_front();
            } else {
                break;
            }
        }
    }

    pub fn record(&mut self, at: Instant) {
        self.hits.push_back(at);
    }

    pub fn count(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn oldest(&self) -> Option<Instant> {
        self.hits.front().copied()
    }

    /// 最早一条记录离开窗口还需的时间
    pub fn reset_in(&self, now: Instant, window: Duration) -> Duration {
        self.oldest()
            .map(|t| window.saturating_sub(now.saturating_duration_since(t)))
            .unwrap_or(Duration::ZERO)
    }
}
