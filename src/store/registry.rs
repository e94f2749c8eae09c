//! Windows 注册表存储
//!
//! 所有路径都相对于 `HKEY_CURRENT_USER`。每次操作单独打开键，
//! 不长期持有句柄。

use std::io::ErrorKind;

use winreg::RegKey;
use winreg::enums::{HKEY_CURRENT_USER, KEY_SET_VALUE, RegType};
use winreg::types::FromRegValue;

use super::{KeyValueStore, StoreValue};
use crate::error::{AppError, Result};

/// HKEY_CURRENT_USER 注册表存储
#[derive(Debug, Default, Clone, Copy)]
pub struct RegistryStore;

impl RegistryStore {
    pub fn current_user() -> Self {
        Self
    }

    fn root(&self) -> RegKey {
        RegKey::predef(HKEY_CURRENT_USER)
    }
}

impl KeyValueStore for RegistryStore {
    fn get(&self, key: &str, name: &str) -> Result<Option<StoreValue>> {
        let subkey = match self.root().open_subkey(key) {
            Ok(k) => k,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let raw = match subkey.get_raw_value(name) {
            Ok(v) => v,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match raw.vtype {
            RegType::REG_SZ | RegType::REG_EXPAND_SZ => {
                Ok(Some(StoreValue::Text(String::from_reg_value(&raw)?)))
            }
            RegType::REG_DWORD => Ok(Some(StoreValue::Number(u32::from_reg_value(&raw)?))),
            _ => Err(AppError::InvalidValue {
                name: name.to_string(),
            }),
        }
    }

    fn set(&self, key: &str, name: &str, value: StoreValue) -> Result<()> {
        // 键不存在时创建（Run 键在正常系统上总是存在）
        let (subkey, _) = self.root().create_subkey(key)?;
        match value {
            StoreValue::Text(text) => subkey.set_value(name, &text)?,
            StoreValue::Number(number) => subkey.set_value(name, &number)?,
        }
        Ok(())
    }

    fn delete(&self, key: &str, name: &str) -> Result<()> {
        let subkey = match self.root().open_subkey_with_flags(key, KEY_SET_VALUE) {
            Ok(k) => k,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        match subkey.delete_value(name) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
