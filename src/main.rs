//! DistRender Build Settings - 图形 API 偏好设置编辑器
//!
//! 为每个构建目标维护一份有序的图形 API 列表。编辑器自身的图形设备
//! 跟随主机对应目标的列表首项，首项变化时会确认后重建设备。
//!
//! # 使用方法
//!
//! ```bash
//! # 使用配置文件
//! cargo run
//!
//! # 指定项目设置文件和主机平台
//! cargo run -- --project MyGame/ProjectSettings.toml --host windows
//! ```
//!
//! # 命令行参数
//!
//! - `--project <path>`: 项目设置文件
//! - `--host <windows|macos|linux>`: 主机平台
//! - `--width <value>`: 设置窗口宽度
//! - `--height <value>`: 设置窗口高度

use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, error, info};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use dist_build_settings::core::{log, Config};
use dist_build_settings::gfx::wgpu::backends_for;
use dist_build_settings::gfx::WgpuContext;
use dist_build_settings::gui::{FrameOutcome, GuiManager, GuiState};
use dist_build_settings::settings::ProjectSettingsStore;

/// 应用程序入口点
///
/// # 初始化流程
///
/// 1. 加载配置文件（config.toml）并应用命令行参数
/// 2. 初始化日志系统
/// 3. 打开项目设置
/// 4. 创建窗口、图形设备和 GUI
/// 5. 启动主循环
fn main() -> anyhow::Result<()> {
    // 1. 加载配置（在初始化日志之前）
    let mut config = Config::from_file_or_default("config.toml");
    config.apply_args(std::env::args());
    config.validate().context("Invalid configuration")?;

    // 2. 初始化日志系统
    let log_file = if config.logging.file_output {
        Some(config.logging.log_file.as_str())
    } else {
        None
    };
    log::init_logger(config.logging.level, config.logging.file_output, log_file);
    info!(version = env!("CARGO_PKG_VERSION"), "DistRender Build Settings starting...");

    // 3. 打开项目设置
    let store = ProjectSettingsStore::open(&config.editor.project_settings)
        .with_context(|| format!("Failed to open project settings {}", config.editor.project_settings))?;
    let mut gui_state = GuiState::new(&config, store);
    info!(
        host = gui_state.host_platform.map_or("unknown", |host| host.name()),
        project = %config.editor.project_settings,
        "Project settings loaded"
    );

    // 4. 创建窗口和图形设备
    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.window.width as f64,
                config.window.height as f64,
            ))
            .with_resizable(config.window.resizable)
            .build(&event_loop)
            .context("Failed to create window")?,
    );

    let vsync = config.graphics.vsync;
    let context = WgpuContext::new(window.clone(), backends_for(gui_state.editor_graphics_api()), vsync)?;
    set_title(&window, &config.window.title, &context);

    let mut gui = GuiManager::new(&context, &window, gui_state);
    let mut gfx = Some(context);

    info!("Entering main loop...");

    // 5. 启动事件循环
    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Wait);

        let Event::WindowEvent { event, .. } = event else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            WindowEvent::Resized(size) => {
                debug!(width = size.width, height = size.height, "Window resized");
                if let Some(context) = gfx.as_mut() {
                    context.reconfigure_surface(size.width, size.height);
                }
                gui.handle_event(&window, &WindowEvent::Resized(size));
                window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                let outcome = match gfx.as_ref() {
                    Some(context) => gui.frame(context, &window),
                    None => return,
                };

                match outcome {
                    Ok(FrameOutcome::Presented) => {}
                    Ok(FrameOutcome::Aborted { recreate_device }) => {
                        if recreate_device {
                            // 先释放旧表面再创建新设备
                            gfx = None;
                            let api = gui.state_mut().editor_graphics_api();
                            info!(api = ?api, "Recreating editor graphics device");
                            match WgpuContext::new(window.clone(), backends_for(api), vsync) {
                                Ok(context) => {
                                    set_title(&window, &config.window.title, &context);
                                    gui.rebuild(&context, &window);
                                    gfx = Some(context);
                                }
                                Err(e) => {
                                    error!("Failed to recreate graphics device: {}", e);
                                    elwt.exit();
                                    return;
                                }
                            }
                        }
                        window.request_redraw();
                    }
                    Err(e) => {
                        error!("Draw failed: {}", e);
                        elwt.exit();
                    }
                }
            }
            other => {
                gui.handle_event(&window, &other);
                window.request_redraw();
            }
        }
    })?;

    Ok(())
}

fn set_title(window: &Window, title: &str, context: &WgpuContext) {
    window.set_title(&format!("{} ({:?})", title, context.adapter_info.backend));
}
