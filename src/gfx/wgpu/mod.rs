//! 编辑器窗口的 wgpu 图形设备
//!
//! 编辑器自身使用 wgpu 渲染界面。设备后端由主机目标列表的首项决定，
//! 首项变更后重建设备。

mod context;

pub use context::{backends_for, WgpuContext};
