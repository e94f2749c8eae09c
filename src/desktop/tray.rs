//! 系统托盘模块
//!
//! 托盘图标显示当前周数，右键菜单两项：
//! - Auto start：勾选框，切换开机自启动
//! - Exit：隐藏托盘图标并退出
//!
//! 菜单事件、托盘事件本身就在主线程回调，直接交给控制器处理；
//! 后台任务（定时器、主题监听）通过 `post` 切回主线程后再处理，
//! 保证所有消息串行执行。
//!
//! Linux（appindicator）不产生托盘点击事件，打开菜单前无法同步勾选状态，
//! 由每小时刷新顺带同步。
//!
//! ## Tauri 2.x API
//! - `TrayIconBuilder`：创建托盘图标
//! - `CheckMenuItem`/`MenuItem`：创建托盘菜单
//! - `on_menu_event`：处理菜单点击事件
//! - `on_tray_icon_event`：右键按下时同步勾选状态

use parking_lot::Mutex;
use tauri::{
    App, AppHandle, Manager, Wry,
    image::Image,
    menu::{CheckMenuItem, Menu, MenuItem},
    tray::{MouseButton, MouseButtonState, TrayIcon, TrayIconBuilder, TrayIconEvent},
};

use crate::autostart::AutoStartStore;
use crate::config::{AppConfig, MENU_AUTOSTART_ID, MENU_EXIT_ID, TRAY_ID};
use crate::controller::{Flow, TrayController, TrayIconState, TrayMessage, TraySurface};
use crate::error::{AppError, Result};
use crate::store;
use crate::theme::ThemeProbe;
use crate::week::LocalClock;

/// 基于 Tauri 托盘句柄的 `TraySurface`
pub struct TauriSurface {
    app: AppHandle,
    autostart_item: CheckMenuItem<Wry>,
}

impl TauriSurface {
    fn tray(&self) -> Result<TrayIcon> {
        self.app
            .tray_by_id(TRAY_ID)
            .ok_or_else(|| AppError::TrayMissing(TRAY_ID.to_string()))
    }
}

impl TraySurface for TauriSurface {
    fn present(&mut self, state: &TrayIconState) -> Result<()> {
        let tray = self.tray()?;
        let (width, height) = state.glyph.dimensions();
        let icon = Image::new_owned(state.glyph.as_raw().clone(), width, height);

        // 同一次主线程回调内连续设置，中间不会处理其他消息
        tray.set_icon(Some(icon))?;
        tray.set_tooltip(Some(&state.tooltip))?;
        Ok(())
    }

    fn set_auto_start_checked(&mut self, checked: bool) -> Result<()> {
        self.autostart_item.set_checked(checked)?;
        Ok(())
    }

    fn hide(&mut self) -> Result<()> {
        self.tray()?.set_visible(false)?;
        Ok(())
    }
}

/// 托盘运行时状态（由 Tauri 托管）
pub struct TrayRuntime {
    controller: Mutex<TrayController<TauriSurface>>,
}

/// 在当前（主）线程处理一条消息
pub fn dispatch(app: &AppHandle, message: TrayMessage) {
    let Some(runtime) = app.try_state::<TrayRuntime>() else {
        tracing::debug!("[Tray] 托盘尚未初始化，丢弃消息: {:?}", message);
        return;
    };

    let flow = runtime.controller.lock().handle(message);
    if flow == Flow::Exit {
        app.exit(0);
    }
}

/// 从任意线程投递消息，切换到主线程处理
pub fn post(app: &AppHandle, message: TrayMessage) {
    let handle = app.clone();
    if let Err(e) = app.run_on_main_thread(move || dispatch(&handle, message)) {
        tracing::warn!("[Tray] 投递消息失败: {:?}: {}", message, e);
    }
}

/// 初始化系统托盘
///
/// 创建菜单和托盘图标，构建控制器并完成首次绘制
pub fn setup_tray(
    app: &App,
    config: &AppConfig,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let app_handle = app.handle();

    let autostart = AutoStartStore::from_config(store::autostart_backend(app_handle)?, config)?;
    let theme = ThemeProbe::from_config(store::preference_backend(), config);

    // 创建托盘菜单项
    let autostart_item = CheckMenuItem::with_id(
        app_handle,
        MENU_AUTOSTART_ID,
        &config.autostart_label,
        true,
        autostart.is_enabled(),
        None::<&str>,
    )?;
    let exit_item = MenuItem::with_id(
        app_handle,
        MENU_EXIT_ID,
        &config.exit_label,
        true,
        None::<&str>,
    )?;

    let menu = Menu::with_items(app_handle, &[&autostart_item, &exit_item])?;

    let toggle_item = autostart_item.clone();
    let mut builder = TrayIconBuilder::with_id(TRAY_ID)
        .menu(&menu)
        .tooltip(&config.app_name)
        .show_menu_on_left_click(false)
        .on_tray_icon_event(|tray, event| {
            // 右键按下时菜单尚未弹出，先同步勾选状态
            if let TrayIconEvent::Click {
                button: MouseButton::Right,
                button_state: MouseButtonState::Down,
                ..
            } = event
            {
                dispatch(tray.app_handle(), TrayMessage::MenuOpening);
            }
        })
        .on_menu_event(move |app, event| match event.id().as_ref() {
            MENU_AUTOSTART_ID => {
                // 勾选框点击后已自动切换，读取的是新状态
                match toggle_item.is_checked() {
                    Ok(checked) => dispatch(app, TrayMessage::AutoStartToggled(checked)),
                    Err(e) => tracing::warn!("[Tray] 读取勾选状态失败: {}", e),
                }
            }
            MENU_EXIT_ID => dispatch(app, TrayMessage::Exit),
            _ => {}
        });

    // 首次绘制前先用应用图标占位
    if let Some(icon) = app_handle.default_window_icon().cloned() {
        builder = builder.icon(icon);
    }
    builder.build(app_handle)?;

    let surface = TauriSurface {
        app: app_handle.clone(),
        autostart_item,
    };
    let mut controller = TrayController::new(
        surface,
        autostart,
        theme,
        Box::new(LocalClock),
        config.clone(),
    );
    controller.start();

    app.manage(TrayRuntime {
        controller: Mutex::new(controller),
    });

    Ok(())
}
