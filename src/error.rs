//! 错误类型
//!
//! 所有模块共用一个错误枚举，托盘交互路径上的错误只记录日志，不弹窗。

use thiserror::Error;

/// 应用错误类型
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tauri error: {0}")]
    Tauri(#[from] tauri::Error),

    #[error("Windows error: {0}")]
    #[cfg(target_os = "windows")]
    Windows(#[from] windows::core::Error),

    #[error("托盘图标不存在: {0}")]
    TrayMissing(String),

    /// 当前存储后端不支持该键
    #[cfg_attr(target_os = "windows", allow(dead_code))] // 仅非 Windows 后端使用
    #[error("不支持的存储键: {key}")]
    Unsupported { key: String },

    /// 值存在但类型不符（例如期望字符串却是 DWORD）
    #[error("无效的存储值: {name}")]
    InvalidValue { name: String },

    /// 自启动插件读写失败
    #[cfg(not(target_os = "windows"))]
    #[error("自启动插件错误: {0}")]
    AutoLaunch(String),

    #[error("无法获取可执行文件路径: {0}")]
    Executable(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
