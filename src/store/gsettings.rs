//! Linux 主题偏好（只读）
//!
//! 通过 `gsettings` 读取 GNOME 的 `color-scheme` / `gtk-theme`，
//! 换算成与 Windows `AppsUseLightTheme` 相同的取值：0 = 深色，1 = 浅色。
//! 命令不存在或读取失败时视为值不存在。

use std::process::Command;

use super::{KeyValueStore, StoreValue};
use crate::config::{APPS_USE_LIGHT_THEME, PERSONALIZE_KEY};
use crate::error::{AppError, Result};

const INTERFACE_SCHEMA: &str = "org.gnome.desktop.interface";

#[derive(Debug, Default, Clone, Copy)]
pub struct GsettingsStore;

impl GsettingsStore {
    pub fn new() -> Self {
        Self
    }
}

fn read_setting(key: &str) -> Option<String> {
    let output = Command::new("gsettings")
        .args(["get", INTERFACE_SCHEMA, key])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// 由 `color-scheme` 与 `gtk-theme` 推算 `AppsUseLightTheme`
fn light_theme_value(color_scheme: Option<&str>, gtk_theme: Option<&str>) -> Option<u32> {
    if let Some(scheme) = color_scheme {
        if scheme.contains("prefer-dark") {
            return Some(0);
        }
        if scheme.contains("prefer-light") {
            return Some(1);
        }
    }

    // color-scheme 为 default 时，再看主题名
    match gtk_theme {
        Some(theme) if theme.to_lowercase().contains("dark") => Some(0),
        Some(_) => Some(1),
        None => color_scheme.map(|_| 1),
    }
}

impl KeyValueStore for GsettingsStore {
    fn get(&self, key: &str, name: &str) -> Result<Option<StoreValue>> {
        if key != PERSONALIZE_KEY || name != APPS_USE_LIGHT_THEME {
            return Ok(None);
        }

        let scheme = read_setting("color-scheme");
        let theme = read_setting("gtk-theme");
        Ok(light_theme_value(scheme.as_deref(), theme.as_deref()).map(StoreValue::Number))
    }

    fn set(&self, key: &str, _name: &str, _value: StoreValue) -> Result<()> {
        Err(AppError::Unsupported {
            key: key.to_string(),
        })
    }

    fn delete(&self, key: &str, _name: &str) -> Result<()> {
        Err(AppError::Unsupported {
            key: key.to_string(),
        })
    }
}
