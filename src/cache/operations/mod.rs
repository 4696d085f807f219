/// 缓存操作
pub mod rate_limit;

pub use rate_limit::*;
