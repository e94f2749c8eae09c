//! 托盘控制器
//!
//! 托盘的全部行为集中在这里，平台相关的部分（托盘句柄、菜单项）
//! 通过 `TraySurface` 注入，测试时换成记录调用的假实现。
//!
//! ## 状态机
//!
//! ```text
//! Uninitialized --start()--> Running --Exit--> Terminated
//!                              |  ^
//!                              +--+ Refresh / MenuOpening / AutoStartToggled
//! ```
//!
//! 所有消息都在主线程上串行处理，一次刷新会整体重算周数、主题与图标，
//! 并通过一次 `present` 同时更新图标和提示文字。

use image::RgbaImage;

use crate::autostart::AutoStartStore;
use crate::config::AppConfig;
use crate::error::Result;
use crate::icon::{IconPalette, render_glyph};
use crate::theme::ThemeProbe;
use crate::week::{Clock, week_number};

/// 刷新来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// 定时器到期（每小时）
    TimerElapsed,
    /// 系统主题偏好变化
    ThemePreferenceChanged,
}

/// 发送给控制器的消息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayMessage {
    Refresh(RefreshTrigger),
    /// 右键菜单即将弹出
    MenuOpening,
    /// "Auto start" 勾选状态变化，携带新的勾选值
    AutoStartToggled(bool),
    Exit,
}

/// 消息处理后的去向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Uninitialized,
    Running,
    Terminated,
}

/// 托盘当前显示的内容，每次刷新整体重算
#[derive(Debug, Clone)]
pub struct TrayIconState {
    pub week_number: u32,
    pub is_dark_mode: bool,
    pub tooltip: String,
    pub glyph: RgbaImage,
}

/// 托盘的可见部分
pub trait TraySurface: Send {
    /// 一次性更新图标与提示文字
    fn present(&mut self, state: &TrayIconState) -> Result<()>;
    fn set_auto_start_checked(&mut self, checked: bool) -> Result<()>;
    fn hide(&mut self) -> Result<()>;
}

pub struct TrayController<S: TraySurface> {
    state: ControllerState,
    surface: S,
    autostart: AutoStartStore,
    theme: ThemeProbe,
    clock: Box<dyn Clock>,
    config: AppConfig,
    current: Option<TrayIconState>,
}

impl<S: TraySurface> TrayController<S> {
    pub fn new(
        surface: S,
        autostart: AutoStartStore,
        theme: ThemeProbe,
        clock: Box<dyn Clock>,
        config: AppConfig,
    ) -> Self {
        Self {
            state: ControllerState::Uninitialized,
            surface,
            autostart,
            theme,
            clock,
            config,
            current: None,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// 最近一次计算出的托盘内容
    #[cfg(test)]
    pub fn current(&self) -> Option<&TrayIconState> {
        self.current.as_ref()
    }

    #[cfg(test)]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// 进入运行状态：同步自启动勾选并绘制首个图标
    pub fn start(&mut self) {
        if self.state != ControllerState::Uninitialized {
            return;
        }
        self.sync_auto_start();
        self.refresh();
        self.state = ControllerState::Running;
        tracing::info!("[Tray] 托盘已启动");
    }

    /// 处理一条消息
    pub fn handle(&mut self, message: TrayMessage) -> Flow {
        if self.state != ControllerState::Running {
            tracing::debug!("[Tray] 非运行状态，忽略消息: {:?}", message);
            return match message {
                TrayMessage::Exit => Flow::Exit,
                _ => Flow::Continue,
            };
        }

        match message {
            TrayMessage::Refresh(trigger) => {
                tracing::debug!("[Tray] 刷新: {:?}", trigger);
                // 部分平台没有菜单弹出事件，定时刷新时顺带同步勾选状态
                if trigger == RefreshTrigger::TimerElapsed {
                    self.sync_auto_start();
                }
                self.refresh();
                Flow::Continue
            }
            TrayMessage::MenuOpening => {
                self.sync_auto_start();
                Flow::Continue
            }
            TrayMessage::AutoStartToggled(checked) => {
                self.apply_auto_start(checked);
                Flow::Continue
            }
            TrayMessage::Exit => {
                // 先隐藏图标再退出，避免通知区残留
                if let Err(e) = self.surface.hide() {
                    tracing::warn!("[Tray] 隐藏托盘图标失败: {}", e);
                }
                self.state = ControllerState::Terminated;
                tracing::info!("[Tray] 退出");
                Flow::Exit
            }
        }
    }

    fn compute(&self) -> TrayIconState {
        let week = week_number(self.clock.today());
        let dark = self.theme.is_dark_mode();
        let glyph = render_glyph(
            &week.to_string(),
            IconPalette::for_theme(dark),
            self.config.icon_size,
        );

        TrayIconState {
            week_number: week,
            is_dark_mode: dark,
            tooltip: self.config.tooltip(week),
            glyph,
        }
    }

    fn refresh(&mut self) {
        let next = self.compute();
        if self.current.as_ref().map(|c| c.week_number) != Some(next.week_number) {
            tracing::info!("[Tray] 当前周数: {}", next.week_number);
        }
        if let Err(e) = self.surface.present(&next) {
            tracing::warn!("[Tray] 更新托盘图标失败: {}", e);
        }
        self.current = Some(next);
    }

    fn sync_auto_start(&mut self) {
        let enabled = self.autostart.is_enabled();
        if let Err(e) = self.surface.set_auto_start_checked(enabled) {
            tracing::warn!("[Tray] 同步自启动勾选失败: {}", e);
        }
    }

    fn apply_auto_start(&mut self, checked: bool) {
        let result = if checked {
            self.autostart.enable(self.autostart.executable())
        } else {
            self.autostart.disable()
        };

        // 写入失败不回滚勾选状态，下次打开菜单时会重新同步
        if let Err(e) = result {
            tracing::warn!("[AutoStart] 写入自启动设置失败: {}", e);
        }
    }
}
