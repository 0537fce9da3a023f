//! 图形 API 面板
//!
//! 每个目标一个自动模式开关和一个可排序列表。列表支持上下移动、删除，
//! 以及从下拉菜单添加（已在列表中的 API 显示为禁用）。

use egui;

use crate::core::error::{BuildSettingsError, GraphicsApiError, Result};
use crate::editor_error;
use crate::gfx::{BuildTarget, GraphicsApi};
use crate::gui::dialogs::DialogHost;
use crate::gui::state::GuiState;
use crate::settings::{rules, ApiSelectionMode, EditOutcome};

enum ListAction {
    Add(GraphicsApi),
    Remove(usize),
    Move { from: usize, to: usize },
}

/// 渲染当前页签下所有目标的图形 API 设置
pub fn render(ui: &mut egui::Ui, state: &mut GuiState, host: &mut DialogHost) {
    ui.heading("Graphics APIs");

    for (target, title) in state.group.targets() {
        render_target(ui, state, host, target, title.unwrap_or(""));
        if host.frame_aborted() {
            return;
        }
    }
}

fn render_target(
    ui: &mut egui::Ui,
    state: &mut GuiState,
    host: &mut DialogHost,
    target: BuildTarget,
    title: &str,
) {
    if !state.editor.is_list_ui_available(target) {
        return;
    }

    let mut use_auto = state.editor.mode(target) == ApiSelectionMode::Auto;
    if ui.checkbox(&mut use_auto, format!("Auto Graphics API{}", title)).changed() {
        if let Err(e) = state.editor.set_use_auto_apis(target, use_auto) {
            tracing::error!("Failed to change graphics API mode: {}", e);
            state.last_alert = Some(e.to_string());
        }
    }
    if use_auto {
        return;
    }

    if state.editor.is_host_running(target) {
        ui.colored_label(egui::Color32::LIGHT_BLUE, format!("ℹ {}", rules::REORDER_HINT));
    }

    let entries = state.editor.list(target).entries().to_vec();
    let candidates = state.editor.addable_candidates(target);
    let mut action = None;

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.label(egui::RichText::new(format!("Graphics APIs{}", title)).strong());

        for (index, api) in entries.iter().enumerate() {
            ui.horizontal(|ui| {
                if ui.add_enabled(index > 0, egui::Button::new("▲").small()).clicked() {
                    action = Some(ListAction::Move { from: index, to: index - 1 });
                }
                if ui.add_enabled(index + 1 < entries.len(), egui::Button::new("▼").small()).clicked() {
                    action = Some(ListAction::Move { from: index, to: index + 1 });
                }
                ui.label(api.display_label(target));
                if ui.small_button("➖").on_hover_text("Remove").clicked() {
                    action = Some(ListAction::Remove(index));
                }
            });
        }

        ui.menu_button("➕", |ui| {
            for candidate in &candidates {
                let button = egui::Button::new(candidate.api.display_label(target));
                if ui.add_enabled(candidate.enabled, button).clicked() {
                    action = Some(ListAction::Add(candidate.api));
                    ui.close_menu();
                }
            }
        });
    });

    if rules::es31_options_visible(target, &entries) {
        ui.checkbox(&mut state.player_draft.require_es31, "Require ES3.1");
        ui.checkbox(&mut state.player_draft.require_es31_aep, "Require ES3.1+AEP");
    }

    let Some(action) = action else {
        return;
    };

    let unsaved = state.has_unsaved_player_changes().then(|| state.player_draft.clone());
    host.track_unsaved_player(unsaved);

    let result = match action {
        ListAction::Add(api) => state.editor.add(host, target, api),
        ListAction::Remove(index) => state.editor.remove(host, target, index),
        ListAction::Move { from, to } => {
            let order = state.editor.list(target).swapped(from, to);
            state.editor.reorder(host, target, &order)
        }
    };
    finish_edit(state, host, result);
}

// 把一次编辑的副作用同步回面板状态
fn finish_edit(state: &mut GuiState, host: &mut DialogHost, result: Result<EditOutcome>) {
    state.resolve_draft(host.take_draft_resolution());

    if let Some(alert) = host.take_alert() {
        state.last_alert = Some(alert);
    }

    match result {
        Ok(EditOutcome::Applied) => {}
        Ok(EditOutcome::AppliedWithDeviceReload) => {
            tracing::info!("Graphics device reload requested by settings panel");
        }
        Err(BuildSettingsError::GraphicsApi(GraphicsApiError::UserCancelledHeadChange { .. })) => {}
        Err(BuildSettingsError::GraphicsApi(GraphicsApiError::BelowMinimumSize { .. })) => {}
        Err(e) => {
            editor_error!("Graphics API edit failed: {}", e);
            state.last_alert = Some(e.to_string());
        }
    }
}
