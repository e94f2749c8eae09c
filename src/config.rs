/*!
 * 应用配置
 *
 * 本应用没有配置文件，所有可调项集中在这里：
 * - 单实例锁名称
 * - 自启动、主题偏好所在的注册表路径
 * - 刷新周期、主题轮询周期
 * - 托盘 ID、菜单 ID 与文案
 */

use std::time::Duration;

// ============================================================================
// 常量
// ============================================================================

/// 应用名称（自启动项的值名称、对话框标题）
pub const APP_NAME: &str = "WeekNumberTray";

/// 单实例命名锁，同一会话内使用相同名称的进程互斥
pub const INSTANCE_MUTEX_NAME: &str = "WeekNumberTrayAppMutex";

/// 自启动注册表路径（HKEY_CURRENT_USER 下）
pub const AUTOSTART_RUN_KEY: &str = r"SOFTWARE\Microsoft\Windows\CurrentVersion\Run";

/// 主题偏好注册表路径（HKEY_CURRENT_USER 下）
pub const PERSONALIZE_KEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Themes\Personalize";

/// 主题偏好值名称：0 = 深色，1 = 浅色
pub const APPS_USE_LIGHT_THEME: &str = "AppsUseLightTheme";

pub const TRAY_ID: &str = "week-number";
pub const MENU_AUTOSTART_ID: &str = "tray.autostart";
pub const MENU_EXIT_ID: &str = "tray.exit";

// ============================================================================
// 配置结构
// ============================================================================

/// 托盘应用配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app_name: String,
    pub mutex_name: String,
    pub autostart_key: String,
    pub personalize_key: String,
    pub light_theme_value: String,
    /// 周数刷新周期
    pub refresh_interval: Duration,
    /// 主题偏好轮询周期
    pub theme_poll_interval: Duration,
    /// 托盘图标边长（像素）
    pub icon_size: u32,
    pub autostart_label: String,
    pub exit_label: String,
    pub already_running_message: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            mutex_name: INSTANCE_MUTEX_NAME.to_string(),
            autostart_key: AUTOSTART_RUN_KEY.to_string(),
            personalize_key: PERSONALIZE_KEY.to_string(),
            light_theme_value: APPS_USE_LIGHT_THEME.to_string(),
            refresh_interval: Duration::from_secs(60 * 60),
            theme_poll_interval: Duration::from_secs(5),
            icon_size: 32,
            autostart_label: "Auto start".to_string(),
            exit_label: "Exit".to_string(),
            already_running_message: "The application is already running.".to_string(),
        }
    }
}

impl AppConfig {
    /// 托盘提示文字
    pub fn tooltip(&self, week_number: u32) -> String {
        format!("Week: {}", week_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_refresh_is_hourly() {
        let config = AppConfig::default();
        assert_eq!(config.refresh_interval, Duration::from_secs(3600));
        assert!(config.theme_poll_interval < config.refresh_interval);
    }

    #[test]
    fn test_tooltip_format() {
        assert_eq!(AppConfig::default().tooltip(7), "Week: 7");
    }
}
