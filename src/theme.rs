//! 系统深色/浅色模式检测
//!
//! 读取 `AppsUseLightTheme`：0 为深色，其余或读取失败都按浅色处理，
//! 保证图标总能以可读的配色绘制。

use std::sync::Arc;

use crate::config::AppConfig;
use crate::store::KeyValueStore;

pub struct ThemeProbe {
    store: Arc<dyn KeyValueStore>,
    key: String,
    name: String,
}

impl ThemeProbe {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            store,
            key: key.into(),
            name: name.into(),
        }
    }

    pub fn from_config(store: Arc<dyn KeyValueStore>, config: &AppConfig) -> Self {
        Self::new(
            store,
            config.personalize_key.clone(),
            config.light_theme_value.clone(),
        )
    }

    /// 当前是否为深色模式
    pub fn is_dark_mode(&self) -> bool {
        match self.store.get(&self.key, &self.name) {
            Ok(Some(value)) => value.as_number() == Some(0),
            Ok(None) => false,
            Err(e) => {
                tracing::debug!("[Theme] 读取主题偏好失败，按浅色处理: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{APPS_USE_LIGHT_THEME, PERSONALIZE_KEY};
    use crate::store::{MemoryStore, StoreValue};

    fn probe_with(value: Option<StoreValue>) -> ThemeProbe {
        let memory = Arc::new(MemoryStore::new());
        if let Some(v) = value {
            memory.set(PERSONALIZE_KEY, APPS_USE_LIGHT_THEME, v).unwrap();
        }
        ThemeProbe::from_config(memory, &AppConfig::default())
    }

    #[test]
    fn test_absent_value_is_light() {
        assert!(!probe_with(None).is_dark_mode());
    }

    #[test]
    fn test_zero_is_dark() {
        assert!(probe_with(Some(StoreValue::Number(0))).is_dark_mode());
    }

    #[test]
    fn test_one_is_light() {
        assert!(!probe_with(Some(StoreValue::Number(1))).is_dark_mode());
    }

    #[test]
    fn test_text_value_is_light() {
        assert!(!probe_with(Some(StoreValue::Text("0".into()))).is_dark_mode());
    }
}
