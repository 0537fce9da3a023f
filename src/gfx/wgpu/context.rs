//! 编辑器窗口的 wgpu 设备
//!
//! 本模块负责编辑器自身图形设备的初始化和重建，包括：
//! - 按图形 API 偏好选择 wgpu 后端
//! - 创建窗口表面
//! - 选择适配器，创建逻辑设备和命令队列
//! - 配置交换链

use std::sync::Arc;
use tracing::{info, debug, warn};
use winit::window::Window;
use wgpu;

use crate::core::error::{Result, GraphicsError};
use crate::gfx::GraphicsApi;

/// 图形 API 对应的 wgpu 后端
///
/// 没有首选 API（自动模式或主机不跟随任何目标）时允许所有后端。
pub fn backends_for(api: Option<GraphicsApi>) -> wgpu::Backends {
    match api {
        Some(GraphicsApi::Direct3D9 | GraphicsApi::Direct3D11 | GraphicsApi::Direct3D12) => {
            wgpu::Backends::DX12
        }
        Some(GraphicsApi::OpenGLCore | GraphicsApi::OpenGLES2 | GraphicsApi::OpenGLES3) => {
            wgpu::Backends::GL
        }
        Some(GraphicsApi::Metal) => wgpu::Backends::METAL,
        Some(GraphicsApi::Vulkan) => wgpu::Backends::VULKAN,
        None => wgpu::Backends::all(),
    }
}

/// 编辑器窗口的图形设备
pub struct WgpuContext {
    /// 窗口表面
    pub surface: wgpu::Surface<'static>,
    /// 逻辑设备
    pub device: wgpu::Device,
    /// 命令队列
    pub queue: wgpu::Queue,
    /// 表面配置
    pub surface_config: wgpu::SurfaceConfiguration,
    /// 实际使用的适配器信息
    pub adapter_info: wgpu::AdapterInfo,
}

impl WgpuContext {
    /// 为窗口创建图形设备
    ///
    /// # 参数
    ///
    /// * `window` - 编辑器窗口
    /// * `backends` - 允许使用的 wgpu 后端
    /// * `vsync` - 是否垂直同步
    ///
    /// 指定后端找不到可用适配器时退回到所有后端。
    pub fn new(window: Arc<Window>, backends: wgpu::Backends, vsync: bool) -> Result<Self> {
        info!(?backends, "Initializing editor graphics device");

        match Self::create(window.clone(), backends, vsync) {
            Ok(context) => Ok(context),
            Err(e) if backends != wgpu::Backends::all() => {
                warn!("Preferred backend unavailable ({}), falling back to any backend", e);
                Self::create(window, wgpu::Backends::all(), vsync)
            }
            Err(e) => Err(e),
        }
    }

    fn create(window: Arc<Window>, backends: wgpu::Backends, vsync: bool) -> Result<Self> {
        // 1. 创建 wgpu 实例
        debug!("Creating wgpu instance");
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends,
            dx12_shader_compiler: Default::default(),
            flags: wgpu::InstanceFlags::default(),
            gles_minor_version: wgpu::Gles3MinorVersion::Automatic,
        });

        // 2. 创建表面
        debug!("Creating surface");
        let surface = instance.create_surface(window.clone())
            .map_err(|e| GraphicsError::DeviceCreation(format!("Failed to create surface: {}", e)))?;

        // 3. 请求适配器
        debug!("Requesting adapter");
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| GraphicsError::DeviceCreation("Failed to find suitable adapter".to_string()))?;

        let adapter_info = adapter.get_info();
        info!("Selected adapter: {:?}", adapter_info);

        // 4. 请求设备和队列
        debug!("Requesting device and queue");
        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Editor Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
            },
            None,
        ))
        .map_err(|e| GraphicsError::DeviceCreation(format!("Failed to create device: {}", e)))?;

        // 5. 配置表面
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| matches!(f, wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb))  // 优先选择 sRGB 格式
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| GraphicsError::DeviceCreation("Surface reports no formats".to_string()))?;

        debug!("Surface format: {:?}", surface_format);

        let present_mode = if vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };

        let size = window.inner_size();
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: surface_caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &surface_config);

        info!(backend = ?adapter_info.backend, "Editor graphics device ready");

        Ok(Self {
            surface,
            device,
            queue,
            surface_config,
            adapter_info,
        })
    }

    /// 重新配置表面（用于窗口调整）
    pub fn reconfigure_surface(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// 表面格式
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backends_for_api() {
        assert_eq!(backends_for(Some(GraphicsApi::Direct3D11)), wgpu::Backends::DX12);
        assert_eq!(backends_for(Some(GraphicsApi::OpenGLES3)), wgpu::Backends::GL);
        assert_eq!(backends_for(Some(GraphicsApi::Metal)), wgpu::Backends::METAL);
        assert_eq!(backends_for(Some(GraphicsApi::Vulkan)), wgpu::Backends::VULKAN);
        assert_eq!(backends_for(None), wgpu::Backends::all());
    }
}
