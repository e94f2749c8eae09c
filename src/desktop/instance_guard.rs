//! 单实例锁
//!
//! 进程启动时获取一个全局命名锁，已被其他进程持有时新进程提示后退出。
//! 锁以 `InstanceGuard` 值的形式存在，持有它就是持有锁，
//! drop 时释放；进程异常退出时由系统回收。
//!
//! ## 平台实现
//! - Windows: 命名互斥体（`CreateMutexW`），`ERROR_ALREADY_EXISTS` 表示已有实例
//! - 其他桌面平台: 运行时目录下锁文件上的内核咨询锁（flock），
//!   进程崩溃后由内核释放，遗留的文件不影响下次获取
//!
//! 获取过程中的任何系统错误都按"已有实例"处理，宁可不启动也不双开。

/// 单实例锁，持有期间其他进程无法获取同名锁
pub struct InstanceGuard {
    _lock: imp::Lock,
}

impl InstanceGuard {
    /// 尝试获取锁，已被持有或获取出错时返回 `None`
    pub fn acquire(name: &str) -> Option<Self> {
        match imp::Lock::try_acquire(name) {
            Ok(Some(lock)) => {
                tracing::info!("[Instance] 已获取单实例锁: {}", name);
                Some(Self { _lock: lock })
            }
            Ok(None) => {
                tracing::info!("[Instance] 已有实例在运行: {}", name);
                None
            }
            Err(e) => {
                tracing::error!("[Instance] 获取单实例锁失败，按已有实例处理: {}", e);
                None
            }
        }
    }
}

/// 提示用户已有实例在运行（阻塞直到用户关闭对话框）
pub fn notify_already_running(title: &str, message: &str) {
    let _ = rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Info)
        .set_title(title)
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

#[cfg(target_os = "windows")]
mod imp {
    use windows::Win32::Foundation::{CloseHandle, ERROR_ALREADY_EXISTS, GetLastError, HANDLE};
    use windows::Win32::System::Threading::CreateMutexW;
    use windows::core::{HSTRING, PCWSTR};

    use crate::error::Result;

    pub struct Lock {
        handle: HANDLE,
    }

    impl Lock {
        pub fn try_acquire(name: &str) -> Result<Option<Self>> {
            let wide = HSTRING::from(name);
            let handle = unsafe { CreateMutexW(None, false, PCWSTR(wide.as_ptr())) }?;

            // 必须紧接着读取，句柄已创建但互斥体可能早已存在
            if unsafe { GetLastError() } == ERROR_ALREADY_EXISTS {
                unsafe {
                    let _ = CloseHandle(handle);
                }
                return Ok(None);
            }

            Ok(Some(Self { handle }))
        }
    }

    impl Drop for Lock {
        fn drop(&mut self) {
            unsafe {
                let _ = CloseHandle(self.handle);
            }
        }
    }
}

#[cfg(not(target_os = "windows"))]
mod imp {
    use std::fs::{self, File, OpenOptions, TryLockError};
    use std::io::Write;
    use std::path::{Path, PathBuf};

    use crate::error::Result;

    /// 锁文件句柄，持有期间保持打开
    ///
    /// 锁是内核的文件咨询锁，句柄关闭（包括进程崩溃）时自动释放。
    /// 文件本身从不删除，否则已打开旧文件的进程和新建文件的进程会同时持锁。
    pub struct Lock {
        _file: File,
    }

    /// 锁文件目录：优先运行时目录，其次临时目录
    fn lock_dir() -> PathBuf {
        dirs::runtime_dir().unwrap_or_else(std::env::temp_dir)
    }

    impl Lock {
        pub fn try_acquire(name: &str) -> Result<Option<Self>> {
            Self::try_acquire_in(&lock_dir(), name)
        }

        pub fn try_acquire_in(dir: &Path, name: &str) -> Result<Option<Self>> {
            fs::create_dir_all(dir)?;
            let path = dir.join(format!("{}.lock", name));

            // 不截断，持有者的内容在拿到锁之前不能动
            let mut file = OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(false)
                .open(&path)?;

            match file.try_lock() {
                Ok(()) => {}
                Err(TryLockError::WouldBlock) => return Ok(None),
                Err(TryLockError::Error(e)) => return Err(e.into()),
            }

            // PID 仅供排查，不参与判断
            file.set_len(0)?;
            write!(file, "{}", std::process::id())?;
            Ok(Some(Self { _file: file }))
        }
    }

}
