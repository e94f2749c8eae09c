//! 键值存储模块
//!
//! 把操作系统的持久化键值区域（Windows 注册表等）抽象为 `get/set/delete`
//! 三个操作，自启动与主题检测都只依赖这个接口，测试时换成 `MemoryStore`。
//!
//! ## 后端
//! - Windows: `RegistryStore`（HKEY_CURRENT_USER）
//! - Linux: `AutoLaunchStore`（自启动）、`GsettingsStore`（主题，只读）
//! - macOS: `AutoLaunchStore`（自启动），主题为 `MemoryStore`（固定浅色）

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use tauri::AppHandle;

use crate::error::Result;

#[cfg(not(target_os = "windows"))]
pub mod autolaunch;
#[cfg(target_os = "linux")]
pub mod gsettings;
#[cfg(target_os = "windows")]
pub mod registry;

/// 存储中的值
///
/// 对应注册表中本程序用到的两种类型：REG_SZ 和 REG_DWORD
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreValue {
    Text(String),
    Number(u32),
}

impl StoreValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StoreValue::Text(s) => Some(s),
            StoreValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<u32> {
        match self {
            StoreValue::Number(n) => Some(*n),
            StoreValue::Text(_) => None,
        }
    }
}

/// 键值存储接口
///
/// `key` 是路径（如 `SOFTWARE\...\Run`），`name` 是该路径下的值名称。
/// 键或值不存在时 `get` 返回 `Ok(None)`，`delete` 视为成功。
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str, name: &str) -> Result<Option<StoreValue>>;
    fn set(&self, key: &str, name: &str, value: StoreValue) -> Result<()>;
    fn delete(&self, key: &str, name: &str) -> Result<()>;
}

/// 内存存储
///
/// 用于测试，以及没有对应系统后端的平台
#[derive(Debug, Default)]
#[cfg_attr(any(target_os = "windows", target_os = "linux"), allow(dead_code))] // 仅测试使用
pub struct MemoryStore {
    values: Mutex<HashMap<(String, String), StoreValue>>,
}

#[cfg_attr(any(target_os = "windows", target_os = "linux"), allow(dead_code))]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str, name: &str) -> Result<Option<StoreValue>> {
        let values = self.values.lock();
        Ok(values.get(&(key.to_string(), name.to_string())).cloned())
    }

    fn set(&self, key: &str, name: &str, value: StoreValue) -> Result<()> {
        self.values
            .lock()
            .insert((key.to_string(), name.to_string()), value);
        Ok(())
    }

    fn delete(&self, key: &str, name: &str) -> Result<()> {
        self.values
            .lock()
            .remove(&(key.to_string(), name.to_string()));
        Ok(())
    }
}

// ============================================================================
// 平台后端选择
// ============================================================================

/// 自启动项所在的存储
#[cfg(target_os = "windows")]
pub fn autostart_backend(_app: &AppHandle) -> Result<Arc<dyn KeyValueStore>> {
    Ok(Arc::new(registry::RegistryStore::current_user()))
}

/// 自启动项所在的存储（需先注册 autostart 插件）
#[cfg(not(target_os = "windows"))]
pub fn autostart_backend(app: &AppHandle) -> Result<Arc<dyn KeyValueStore>> {
    let executable = crate::autostart::current_executable()?;
    Ok(Arc::new(autolaunch::AutoLaunchStore::new(app.clone(), executable)))
}

/// 主题偏好所在的存储
#[cfg(target_os = "windows")]
pub fn preference_backend() -> Arc<dyn KeyValueStore> {
    Arc::new(registry::RegistryStore::current_user())
}

#[cfg(target_os = "linux")]
pub fn preference_backend() -> Arc<dyn KeyValueStore> {
    Arc::new(gsettings::GsettingsStore::new())
}

#[cfg(not(any(target_os = "windows", target_os = "linux")))]
pub fn preference_backend() -> Arc<dyn KeyValueStore> {
    Arc::new(MemoryStore::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_missing_value() {
        let store = MemoryStore::new();
        assert_eq!(store.get("a", "b").unwrap(), None);
    }

    #[test]
    fn test_memory_store_overwrite() {
        let store = MemoryStore::new();
        store.set("k", "n", StoreValue::Text("one".into())).unwrap();
        store.set("k", "n", StoreValue::Text("two".into())).unwrap();
        assert_eq!(
            store.get("k", "n").unwrap(),
            Some(StoreValue::Text("two".into()))
        );
    }

    #[test]
    fn test_memory_store_delete_absent_is_ok() {
        let store = MemoryStore::new();
        assert!(store.delete("k", "n").is_ok());
        assert_eq!(store.get("k", "n").unwrap(), None);
    }

    #[test]
    fn test_store_value_accessors() {
        assert_eq!(StoreValue::Number(0).as_number(), Some(0));
        assert_eq!(StoreValue::Number(0).as_text(), None);
        assert_eq!(StoreValue::Text("x".into()).as_text(), Some("x"));
    }
}
