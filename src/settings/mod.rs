//! 构建设置模块
//!
//! 按构建目标维护图形 API 偏好列表，以及与之相关的播放器设置规则。
//!
//! - `project`：项目设置文件与 `SettingsStore` 接口
//! - `list`：图形 API 偏好列表
//! - `host`：编辑器宿主接口（确认对话框、设备重建等）
//! - `editor`：添加 / 删除 / 排序，以及首项变更的确认流程
//! - `rules`：依赖 API 列表的平台规则

pub mod project;
pub mod list;
pub mod host;
pub mod editor;
pub mod rules;

pub use editor::{AddCandidate, ApiSelectionMode, EditOutcome, GraphicsApiEditor};
pub use host::{EditorHost, SaveDecision};
pub use list::GraphicsApiList;
pub use project::{save_player_settings, PlayerSettings, ProjectSettings, ProjectSettingsStore, SettingsStore};
