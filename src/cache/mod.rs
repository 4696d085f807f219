// 缓存模块
// 进程内的限流计数存储

pub mod models;
pub mod operations;

pub use models::RateLimitWindow;
pub use operations::{RateLimitDecision, RateLimitStore};
