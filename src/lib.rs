//! WeekNumberTray Tauri 应用
//!
//! 在系统托盘中以图标显示当前周数（周一为一周开始，1 月 1 日所在周为第 1 周），
//! 每小时或系统深浅色切换时刷新。
//!
//! ## 功能模块
//! - 单实例：命名锁保证同一会话只运行一个实例，重复启动时提示并退出
//! - 周数计算：纯函数，按本地日期计算
//! - 图标绘制：内置点阵字体，按主题调整背景
//! - 自启动：Run 注册表项（Linux / macOS 为 autostart 插件）
//! - 主题检测：AppsUseLightTheme（Linux 为 gsettings）
//! - 系统托盘：右键菜单 Auto start / Exit
//!
//! ## 平台支持
//! - Windows: 完整功能
//! - Linux / macOS: 托盘、周数与自启动可用；主题检测仅 Linux（gsettings）
//!
//! ## 更新日志
//! - 2026-10-19: 由聊天客户端后端改写为托盘周数工具，移除全部 WebView 命令

mod autostart;
mod config;
mod controller;
mod desktop;
mod error;
mod icon;
mod logging;
mod store;
mod theme;
mod week;

use config::AppConfig;
use desktop::InstanceGuard;
use theme::ThemeProbe;

pub fn run() {
    logging::init();
    let config = AppConfig::default();

    // 单实例检查必须在任何初始化之前
    let Some(guard) = InstanceGuard::acquire(&config.mutex_name) else {
        desktop::notify_already_running(&config.app_name, &config.already_running_message);
        std::process::exit(0);
    };

    let setup_config = config.clone();
    let builder = tauri::Builder::default();

    // Windows 直接写 Run 注册表，其他平台交给 autostart 插件
    #[cfg(not(target_os = "windows"))]
    let builder = builder.plugin(tauri_plugin_autostart::init(
        tauri_plugin_autostart::MacosLauncher::LaunchAgent,
        None,
    ));

    let app = builder
        .setup(move |app| {
            // macOS：纯托盘应用，不显示 Dock 图标
            #[cfg(target_os = "macos")]
            app.set_activation_policy(tauri::ActivationPolicy::Accessory);

            desktop::setup_tray(app, &setup_config)?;

            // 托盘与首次绘制完成后才开始接收刷新
            let handle = app.handle().clone();
            desktop::spawn_refresh_timer(handle.clone(), setup_config.refresh_interval);
            desktop::spawn_theme_watcher(
                handle,
                ThemeProbe::from_config(store::preference_backend(), &setup_config),
                setup_config.theme_poll_interval,
            );

            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    let mut guard = Some(guard);
    app.run(move |_app, event| match event {
        // 没有窗口，只有显式 exit 才真正退出
        tauri::RunEvent::ExitRequested { api, code, .. } => {
            if code.is_none() {
                api.prevent_exit();
            }
        }
        tauri::RunEvent::Exit => {
            drop(guard.take());
            tracing::info!("[App] 已退出，单实例锁已释放");
        }
        _ => {}
    });
}
