//! 开机自启动
//!
//! 自启动项是 Run 键下以应用名命名的字符串值，内容为可执行文件路径。
//! 只有值与当前可执行文件路径完全一致时才算已启用，
//! 这样移动过位置的旧安装不会被误认为已启用。

use std::path::Path;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::store::{KeyValueStore, StoreValue};

/// 自启动设置
pub struct AutoStartStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
    name: String,
    executable: String,
}

impl AutoStartStore {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
        name: impl Into<String>,
        executable: impl Into<String>,
    ) -> Self {
        Self {
            store,
            key: key.into(),
            name: name.into(),
            executable: executable.into(),
        }
    }

    /// 按配置构建，可执行文件路径取当前进程
    pub fn from_config(store: Arc<dyn KeyValueStore>, config: &AppConfig) -> Result<Self> {
        Ok(Self::new(
            store,
            config.autostart_key.clone(),
            config.app_name.clone(),
            current_executable()?,
        ))
    }

    /// 当前可执行文件路径
    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// 是否已启用（读取失败一律视为未启用）
    pub fn is_enabled(&self) -> bool {
        match self.store.get(&self.key, &self.name) {
            Ok(Some(value)) => value.as_text() == Some(self.executable.as_str()),
            Ok(None) => false,
            Err(e) => {
                tracing::debug!("[AutoStart] 读取自启动项失败: {}", e);
                false
            }
        }
    }

    /// 写入自启动项，已存在则覆盖
    pub fn enable(&self, executable_path: &str) -> Result<()> {
        self.store.set(
            &self.key,
            &self.name,
            StoreValue::Text(executable_path.to_string()),
        )?;
        tracing::info!("[AutoStart] 已启用: {}", executable_path);
        Ok(())
    }

    /// 删除自启动项，不存在时也返回成功
    pub fn disable(&self) -> Result<()> {
        self.store.delete(&self.key, &self.name)?;
        tracing::info!("[AutoStart] 已禁用");
        Ok(())
    }
}

/// 当前进程的可执行文件路径
pub fn current_executable() -> Result<String> {
    let exe = std::env::current_exe().map_err(|e| AppError::Executable(e.to_string()))?;
    Ok(path_string(&exe))
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{APP_NAME, AUTOSTART_RUN_KEY};
    use crate::store::MemoryStore;

    const EXE: &str = r"C:\Tools\WeekNumberTray.exe";

    fn setup() -> (Arc<MemoryStore>, AutoStartStore) {
        let memory = Arc::new(MemoryStore::new());
        let autostart = AutoStartStore::new(memory.clone(), AUTOSTART_RUN_KEY, APP_NAME, EXE);
        (memory, autostart)
    }

    #[test]
    fn test_disabled_when_nothing_stored() {
        let (_, autostart) = setup();
        assert!(!autostart.is_enabled());
    }

    #[test]
    fn test_enable_then_disable() {
        let (_, autostart) = setup();
        autostart.enable(EXE).unwrap();
        assert!(autostart.is_enabled());
        autostart.disable().unwrap();
        assert!(!autostart.is_enabled());
    }

    #[test]
    fn test_enable_overwrites_previous_path() {
        let (memory, autostart) = setup();
        autostart.enable(r"D:\old\WeekNumberTray.exe").unwrap();
        autostart.enable(EXE).unwrap();

        assert_eq!(
            memory.get(AUTOSTART_RUN_KEY, APP_NAME).unwrap(),
            Some(StoreValue::Text(EXE.to_string()))
        );
        assert!(autostart.is_enabled());
    }

    #[test]
    fn test_other_path_counts_as_disabled() {
        let (_, autostart) = setup();
        autostart.enable(r"D:\elsewhere\WeekNumberTray.exe").unwrap();
        assert!(!autostart.is_enabled());
    }

    #[test]
    fn test_non_text_value_counts_as_disabled() {
        let (memory, autostart) = setup();
        memory
            .set(AUTOSTART_RUN_KEY, APP_NAME, StoreValue::Number(1))
            .unwrap();
        assert!(!autostart.is_enabled());
    }

    #[test]
    fn test_disable_twice_is_ok() {
        let (_, autostart) = setup();
        assert!(autostart.disable().is_ok());
        assert!(autostart.disable().is_ok());
    }

    #[test]
    fn test_from_config_uses_current_exe() {
        let memory = Arc::new(MemoryStore::new());
        let autostart = AutoStartStore::from_config(memory, &AppConfig::default()).unwrap();
        let exe = std::env::current_exe().unwrap();
        assert_eq!(autostart.executable(), exe.to_string_lossy());
    }
}
