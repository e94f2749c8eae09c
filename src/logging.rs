//! 日志初始化
//!
//! 过滤规则取自 `RUST_LOG`，未设置时默认 `info`。

use tracing_subscriber::EnvFilter;

/// 初始化全局日志订阅器，重复调用无副作用
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
