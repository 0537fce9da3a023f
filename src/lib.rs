//! DistRender Build Settings - 图形 API 偏好设置编辑器
//!
//! 为每个构建目标维护一份有序、无重复、非空的图形 API 列表，
//! 并在编辑器自身使用的 API 发生变化时安全地重建图形设备。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（日志、配置、错误处理）
//! - `gfx`: 图形 API、构建目标与平台能力，以及编辑器窗口的 wgpu 设备
//! - `settings`: 项目设置、偏好列表和编辑操作
//! - `gui`: 基于 egui 的设置窗口
//!
//! # 使用示例
//!
//! ```no_run
//! use dist_build_settings::gfx::{BuildTarget, GraphicsApi, HostPlatform, StaticCapabilities};
//! use dist_build_settings::settings::{EditorHost, GraphicsApiEditor, ProjectSettingsStore, SaveDecision, SettingsStore};
//!
//! struct AlwaysApply;
//!
//! impl EditorHost for AlwaysApply {
//!     fn confirm_device_reload(&mut self, _: BuildTarget) -> bool { true }
//!     fn offer_save_modified_work(&mut self, _: &mut dyn SettingsStore) -> SaveDecision { SaveDecision::Proceed }
//!     fn recreate_graphics_device(&mut self) {}
//!     fn abort_current_ui_frame(&mut self) {}
//!     fn alert(&mut self, message: &str) { eprintln!("{}", message); }
//! }
//!
//! let store = ProjectSettingsStore::open("ProjectSettings.toml")?;
//! let mut editor = GraphicsApiEditor::new(store, StaticCapabilities::new(Some(HostPlatform::Linux)));
//! editor.set_use_auto_apis(BuildTarget::Android, false)?;
//! editor.add(&mut AlwaysApply, BuildTarget::Android, GraphicsApi::Vulkan)?;
//! # Ok::<(), dist_build_settings::core::BuildSettingsError>(())
//! ```

pub mod core;
pub mod gfx;
pub mod settings;
pub mod gui;
