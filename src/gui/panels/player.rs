//! 播放器渲染设置面板
//!
//! 编辑播放器设置草稿：颜色空间、D3D9 全屏模式、后台可见、iOS / Android 最低版本。
//! 线性颜色空间的兼容性提示根据当前各目标的图形 API 列表计算。

use egui;

use crate::gfx::TargetGroup;
use crate::gui::state::GuiState;
use crate::settings::project::{ColorSpace, D3D9FullscreenMode};
use crate::settings::{rules, SettingsStore};

/// 渲染播放器设置面板
pub fn render(ui: &mut egui::Ui, state: &mut GuiState) {
    ui.heading("Rendering");

    egui::ComboBox::from_label("Color Space*")
        .selected_text(match state.player_draft.color_space {
            ColorSpace::Gamma => "Gamma",
            ColorSpace::Linear => "Linear",
        })
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut state.player_draft.color_space, ColorSpace::Gamma, "Gamma");
            ui.selectable_value(&mut state.player_draft.color_space, ColorSpace::Linear, "Linear");
        });

    for (target, _) in state.group.targets() {
        let apis = state.editor.store().graphics_apis(target);
        if let Some(warning) = rules::color_space_warning(target, &apis, &state.player_draft) {
            let color = match warning.severity {
                rules::Severity::Warning => egui::Color32::YELLOW,
                rules::Severity::Error => egui::Color32::RED,
            };
            ui.colored_label(color, warning.message);
        }
    }

    match state.group {
        TargetGroup::Standalone => standalone_options(ui, state),
        TargetGroup::Ios => {
            ui.horizontal(|ui| {
                ui.label("Target minimum iOS Version");
                ui.text_edit_singleline(&mut state.player_draft.ios_target_os_version);
            });
        }
        TargetGroup::Android => {
            ui.horizontal(|ui| {
                ui.label("Minimum API Level");
                ui.add(egui::DragValue::new(&mut state.player_draft.android_min_sdk_version).clamp_range(9..=30));
            });
        }
        _ => {}
    }

    ui.horizontal(|ui| {
        let dirty = state.has_unsaved_player_changes();
        if ui.add_enabled(dirty, egui::Button::new("Save")).clicked() {
            state.save_player_draft();
        }
        if ui.add_enabled(dirty, egui::Button::new("Revert")).clicked() {
            state.discard_player_draft();
        }
    });
}

fn standalone_options(ui: &mut egui::Ui, state: &mut GuiState) {
    egui::ComboBox::from_label("D3D9 Fullscreen Mode")
        .selected_text(match state.player_draft.d3d9_fullscreen_mode {
            D3D9FullscreenMode::Exclusive => "Exclusive Mode",
            D3D9FullscreenMode::Windowed => "Fullscreen Window",
        })
        .show_ui(ui, |ui| {
            ui.selectable_value(
                &mut state.player_draft.d3d9_fullscreen_mode,
                D3D9FullscreenMode::Exclusive,
                "Exclusive Mode",
            );
            ui.selectable_value(
                &mut state.player_draft.d3d9_fullscreen_mode,
                D3D9FullscreenMode::Windowed,
                "Fullscreen Window",
            );
        });

    // 锁定时只禁用并显示为未勾选，草稿在保存时修正
    if state.visible_in_background_locked() {
        let mut shown = false;
        ui.add_enabled(false, egui::Checkbox::new(&mut shown, "Visible In Background"))
            .on_disabled_hover_text("Not available with D3D9 exclusive fullscreen");
    } else {
        ui.checkbox(&mut state.player_draft.visible_in_background, "Visible In Background");
    }
}
