//! 桌面平台模块
//!
//! ## 包含功能
//! - 单实例锁：同一会话只运行一个托盘实例
//! - 系统托盘：周数图标与右键菜单
//! - 刷新来源：每小时定时器、主题变化监听

pub mod instance_guard;
pub mod tray;
pub mod watch;

// 重新导出常用项
pub use instance_guard::{InstanceGuard, notify_already_running};
pub use tray::setup_tray;
pub use watch::{spawn_refresh_timer, spawn_theme_watcher};
