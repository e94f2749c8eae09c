//! 刷新来源
//!
//! - 定时器：每小时触发一次刷新，跨日、跨周后图标自动更新
//! - 主题监听：轮询主题偏好，仅在深浅色切换时触发刷新
//!
//! 纯托盘应用没有窗口，收不到系统的主题变更通知，因此用轮询代替。
//! 两个任务都跑在 Tauri 的异步运行时上，随进程退出结束。

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tauri::AppHandle;
use tokio::time::{MissedTickBehavior, interval};

use super::tray::post;
use crate::controller::{RefreshTrigger, TrayMessage};
use crate::theme::ThemeProbe;

/// 启动周期刷新定时器
pub fn spawn_refresh_timer(app: AppHandle, period: Duration) {
    tauri::async_runtime::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // 第一次 tick 立即返回，启动时已经绘制过
        ticker.tick().await;

        loop {
            ticker.tick().await;
            post(&app, TrayMessage::Refresh(RefreshTrigger::TimerElapsed));
        }
    });
    tracing::info!("[Watch] 定时刷新已启动，周期 {:?}", period);
}

/// 主题变化检测
pub struct ThemeWatcher {
    probe: ThemeProbe,
    last_dark: bool,
}

impl ThemeWatcher {
    pub fn new(probe: ThemeProbe) -> Self {
        let last_dark = probe.is_dark_mode();
        Self { probe, last_dark }
    }

    /// 重新读取主题，发生变化时返回 true
    pub fn poll(&mut self) -> bool {
        let dark = self.probe.is_dark_mode();
        if dark == self.last_dark {
            return false;
        }
        tracing::info!("[Theme] 主题切换为{}", if dark { "深色" } else { "浅色" });
        self.last_dark = dark;
        true
    }
}

/// 启动主题监听
///
/// 读取主题可能要启动外部进程（gsettings），放到阻塞线程池中执行
pub fn spawn_theme_watcher(app: AppHandle, probe: ThemeProbe, period: Duration) {
    let watcher = Arc::new(Mutex::new(ThemeWatcher::new(probe)));
    tauri::async_runtime::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let watcher = watcher.clone();
            match tauri::async_runtime::spawn_blocking(move || watcher.lock().poll()).await {
                Ok(true) => post(
                    &app,
                    TrayMessage::Refresh(RefreshTrigger::ThemePreferenceChanged),
                ),
                Ok(false) => {}
                Err(e) => tracing::warn!("[Watch] 主题检测任务失败: {}", e),
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{APPS_USE_LIGHT_THEME, AppConfig, PERSONALIZE_KEY};
    use crate::store::{KeyValueStore, MemoryStore, StoreValue};

    fn set_light(store: &MemoryStore, value: u32) {
        store
            .set(PERSONALIZE_KEY, APPS_USE_LIGHT_THEME, StoreValue::Number(value))
            .unwrap();
    }

    #[test]
    fn test_watcher_reports_only_changes() {
        let store = Arc::new(MemoryStore::new());
        let probe = ThemeProbe::from_config(store.clone(), &AppConfig::default());
        let mut watcher = ThemeWatcher::new(probe);

        assert!(!watcher.poll());

        set_light(&store, 0);
        assert!(watcher.poll());
        assert!(!watcher.poll());

        set_light(&store, 1);
        assert!(watcher.poll());
    }

    #[tokio::test]
    async fn test_shared_watcher_polls_on_blocking_pool() {
        let store = Arc::new(MemoryStore::new());
        let probe = ThemeProbe::from_config(store.clone(), &AppConfig::default());
        let watcher = Arc::new(Mutex::new(ThemeWatcher::new(probe)));

        set_light(&store, 0);
        let shared = watcher.clone();
        let changed = tokio::task::spawn_blocking(move || shared.lock().poll())
            .await
            .unwrap();
        assert!(changed);

        // 状态保留在共享的 watcher 中
        let shared = watcher.clone();
        let changed = tokio::task::spawn_blocking(move || shared.lock().poll())
            .await
            .unwrap();
        assert!(!changed);
    }

    #[test]
    fn test_watcher_ignores_absent_to_light() {
        let store = Arc::new(MemoryStore::new());
        let probe = ThemeProbe::from_config(store.clone(), &AppConfig::default());
        let mut watcher = ThemeWatcher::new(probe);

        // 值从不存在变为 1，仍是浅色
        set_light(&store, 1);
        assert!(!watcher.poll());
    }
}
