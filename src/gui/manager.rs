//! GUI 管理器
//!
//! GuiManager 是 GUI 系统的核心，负责集成 egui 和 wgpu，
//! 处理输入事件，更新 UI 状态，并渲染 GUI。
//!
//! 图形 API 列表首项变更后，当前帧不再绘制，由调用方重建图形设备，
//! 随后调用 [`GuiManager::rebuild`] 让 egui 在新设备上重新上传纹理。

use egui;
use egui_wgpu::Renderer as EguiRenderer;
use egui_winit::State as EguiState;
use winit::window::Window;

use crate::core::error::{GraphicsError, Result};
use crate::gfx::WgpuContext;
use crate::gui::dialogs::DialogHost;
use crate::gui::panels;
use crate::gui::state::GuiState;

/// 一帧的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// 正常绘制并提交
    Presented,
    /// 本帧被放弃
    Aborted {
        /// 是否需要重建图形设备
        recreate_device: bool,
    },
}

/// GUI 管理器（使用 egui + wgpu）
pub struct GuiManager {
    // egui 核心组件
    context: egui::Context,
    state: EguiState,
    renderer: EguiRenderer,

    gui_state: GuiState,
}

impl GuiManager {
    /// 创建 GUI 管理器
    pub fn new(gfx: &WgpuContext, window: &Window, gui_state: GuiState) -> Self {
        let (context, state, renderer) = Self::create_egui(gfx, window);
        Self {
            context,
            state,
            renderer,
            gui_state,
        }
    }

    fn create_egui(gfx: &WgpuContext, window: &Window) -> (egui::Context, EguiState, EguiRenderer) {
        // 创建 egui context
        let context = egui::Context::default();

        // 创建 egui-winit state
        let viewport_id = context.viewport_id();
        let state = EguiState::new(context.clone(), viewport_id, window, None, None);

        // 创建 egui-wgpu renderer
        let renderer = EguiRenderer::new(&gfx.device, gfx.surface_format(), None, 1);

        (context, state, renderer)
    }

    /// 图形设备重建后重新创建 egui 的渲染资源
    ///
    /// 旧设备上的纹理全部失效，新的 context 会在下一帧重新发送字体纹理。
    pub fn rebuild(&mut self, gfx: &WgpuContext, window: &Window) {
        let (context, state, renderer) = Self::create_egui(gfx, window);
        self.context = context;
        self.state = state;
        self.renderer = renderer;
        tracing::debug!("GUI resources rebuilt for new graphics device");
    }

    /// 处理输入事件
    /// 返回 true 如果事件被 GUI 消费
    pub fn handle_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        let response = self.state.on_window_event(window, event);
        response.consumed
    }

    /// 构建并绘制一帧
    pub fn frame(&mut self, gfx: &WgpuContext, window: &Window) -> Result<FrameOutcome> {
        let mut host = DialogHost::new();

        // 开始新帧
        let raw_input = self.state.take_egui_input(window);
        self.context.begin_frame(raw_input);

        let gui_state = &mut self.gui_state;
        egui::CentralPanel::default().show(&self.context, |ui| {
            panels::render(ui, gui_state, &mut host);
        });

        // 结束帧，获取输出
        let full_output = self.context.end_frame();

        // 处理平台输出（光标、复制粘贴等）
        self.state.handle_platform_output(window, full_output.platform_output);

        if host.frame_aborted() && host.recreate_requested() {
            tracing::info!("UI frame aborted, graphics device will be recreated");
            return Ok(FrameOutcome::Aborted { recreate_device: true });
        }

        let paint_jobs = self.context.tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = screen_descriptor(&gfx.surface_config, full_output.pixels_per_point);

        let frame = match gfx.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // 表面失效，重新配置后跳过本帧
                gfx.surface.configure(&gfx.device, &gfx.surface_config);
                return Ok(FrameOutcome::Presented);
            }
            Err(e) => return Err(GraphicsError::SurfaceError(e.to_string()).into()),
        };
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gfx.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("GUI Encoder"),
        });

        // 更新纹理和缓冲
        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer.update_texture(&gfx.device, &gfx.queue, *id, image_delta);
        }

        let user_buffers = self.renderer.update_buffers(
            &gfx.device,
            &gfx.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        // 渲染
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("GUI Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.1,
                            g: 0.1,
                            b: 0.1,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        gfx.queue.submit(user_buffers.into_iter().chain(std::iter::once(encoder.finish())));
        frame.present();

        // 清理释放的纹理
        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }

        if host.frame_aborted() {
            return Ok(FrameOutcome::Aborted { recreate_device: false });
        }
        Ok(FrameOutcome::Presented)
    }

    /// 获取 GUI 状态可变引用
    pub fn state_mut(&mut self) -> &mut GuiState {
        &mut self.gui_state
    }
}

// 绘制区域与交换链大小一致
fn screen_descriptor(config: &wgpu::SurfaceConfiguration, pixels_per_point: f32) -> egui_wgpu::ScreenDescriptor {
    egui_wgpu::ScreenDescriptor {
        size_in_pixels: [config.width, config.height],
        pixels_per_point,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_descriptor_follows_surface() {
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: wgpu::TextureFormat::Bgra8UnormSrgb,
            width: 960,
            height: 1440,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let descriptor = screen_descriptor(&config, 2.0);
        assert_eq!(descriptor.size_in_pixels, [960, 1440]);
        assert_eq!(descriptor.pixels_per_point, 2.0);
    }
}
