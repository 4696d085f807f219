use std::time::{Duration, Instant};

/// 单调帧时钟，返回自挂载以来和自上一帧以来的秒数
///
/// 内部用 Duration 累计，只在返回时转换为 f32。
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Option<Instant>,
    last: Option<Instant>,
    elapsed: Duration,
    delta: Duration,
}

impl FrameClock {
    /// 读取系统时间的时钟
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: Some(now),
            last: Some(now),
            elapsed: Duration::ZERO,
            delta: Duration::ZERO,
        }
    }

    /// 只能通过 [`FrameClock::advance`] 前进的时钟
    pub fn manual() -> Self {
        Self {
            start: None,
            last: None,
            elapsed: Duration::ZERO,
            delta: Duration::ZERO,
        }
    }

    /// 采样系统时间，返回 `(elapsed, delta)`
    pub fn tick(&mut self) -> (f32, f32) {
        match (self.start, self.last) {
            (Some(start), Some(last)) => {
                let now = Instant::now();
                self.delta = now.duration_since(last);
                self.elapsed = now.duration_since(start);
                self.last = Some(now);
            }
            // 手动时钟不读取系统时间
            _ => self.delta = Duration::ZERO,
        }
        (self.elapsed(), self.delta())
    }

    pub fn advance(&mut self, delta: f32) -> (f32, f32) {
        self.delta = Duration::try_from_secs_f32(delta).unwrap_or(Duration::ZERO);
        self.elapsed += self.delta;
        (self.elapsed(), self.delta())
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    pub fn delta(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    pub fn elapsed_duration(&self) -> Duration {
        self.elapsed
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
