//! 图形模块
//!
//! - `api`：图形 API 标识
//! - `platform`：构建目标、主机平台与平台能力表
//! - `wgpu`：编辑器窗口自身的 wgpu 设备

pub mod api;
pub mod platform;
pub mod wgpu;

pub use api::GraphicsApi;
pub use platform::{BuildTarget, CapabilityProvider, HostPlatform, StaticCapabilities, TargetGroup};
pub use self::wgpu::WgpuContext;
