//! GUI 系统模块
//!
//! 基于 egui + wgpu 实现的构建设置窗口。

mod manager;
mod state;
pub mod dialogs;
pub mod panels;

pub use dialogs::DialogHost;
pub use manager::{FrameOutcome, GuiManager};
pub use state::{DraftResolution, GuiState, SettingsEditor};
