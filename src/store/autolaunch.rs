//! 自启动插件存储（Linux / macOS）
//!
//! Run 键下的应用值映射到 `tauri-plugin-autostart`：
//! Linux 上是 `~/.config/autostart` 中的 desktop 文件，macOS 上是 LaunchAgent。
//!
//! 插件总是登记当前可执行文件、以应用名命名，因此：
//! - 读取到已启用时，返回的路径就是当前可执行文件
//! - 写入其他路径会被拒绝（`InvalidValue`）
//! - 值名称参数不参与读写

use tauri::AppHandle;
use tauri_plugin_autostart::ManagerExt;

use super::{KeyValueStore, StoreValue};
use crate::config::AUTOSTART_RUN_KEY;
use crate::error::{AppError, Result};

pub struct AutoLaunchStore {
    app: AppHandle,
    executable: String,
}

impl AutoLaunchStore {
    pub fn new(app: AppHandle, executable: impl Into<String>) -> Self {
        Self {
            app,
            executable: executable.into(),
        }
    }

    fn is_enabled(&self) -> Result<bool> {
        self.app
            .autolaunch()
            .is_enabled()
            .map_err(|e| AppError::AutoLaunch(e.to_string()))
    }
}

/// 只有 Run 键映射到自启动
fn check_key(key: &str) -> Result<()> {
    if key != AUTOSTART_RUN_KEY {
        return Err(AppError::Unsupported {
            key: key.to_string(),
        });
    }
    Ok(())
}

/// 插件只能登记当前可执行文件
fn check_value(name: &str, value: &StoreValue, executable: &str) -> Result<()> {
    match value.as_text() {
        Some(path) if path == executable => Ok(()),
        _ => Err(AppError::InvalidValue {
            name: name.to_string(),
        }),
    }
}

impl KeyValueStore for AutoLaunchStore {
    fn get(&self, key: &str, _name: &str) -> Result<Option<StoreValue>> {
        check_key(key)?;
        let enabled = self.is_enabled()?;
        Ok(enabled.then(|| StoreValue::Text(self.executable.clone())))
    }

    fn set(&self, key: &str, name: &str, value: StoreValue) -> Result<()> {
        check_key(key)?;
        check_value(name, &value, &self.executable)?;
        self.app
            .autolaunch()
            .enable()
            .map_err(|e| AppError::AutoLaunch(e.to_string()))
    }

    fn delete(&self, key: &str, _name: &str) -> Result<()> {
        check_key(key)?;
        // 插件删除不存在的条目会报错，这里按成功处理
        if !self.is_enabled()? {
            return Ok(());
        }
        self.app
            .autolaunch()
            .disable()
            .map_err(|e| AppError::AutoLaunch(e.to_string()))
    }
}
