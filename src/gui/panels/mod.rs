//! GUI 面板模块
//!
//! 包含设置窗口的各个面板。

pub mod graphics_apis;
pub mod player;

use egui;

use crate::gfx::TargetGroup;
use crate::gui::dialogs::DialogHost;
use crate::gui::state::GuiState;

/// 渲染整个设置面板
///
/// 首项变更触发设备重建时立即返回，不再绘制剩余部分。
pub fn render(ui: &mut egui::Ui, state: &mut GuiState, host: &mut DialogHost) {
    platform_tabs(ui, state);
    ui.separator();

    if let Some(alert) = &state.last_alert {
        let mut dismissed = false;
        ui.horizontal(|ui| {
            ui.colored_label(egui::Color32::YELLOW, format!("⚠ {}", alert));
            dismissed = ui.small_button("✖").clicked();
        });
        if dismissed {
            state.last_alert = None;
        }
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        player::render(ui, state);
        ui.separator();

        graphics_apis::render(ui, state, host);
    });
}

fn platform_tabs(ui: &mut egui::Ui, state: &mut GuiState) {
    ui.horizontal_wrapped(|ui| {
        for group in TargetGroup::ALL {
            ui.selectable_value(&mut state.group, group, group.name());
        }
    });
}
