//! 原生对话框实现的编辑器宿主
//!
//! 对话框是模态的，调用会阻塞界面线程直到用户选择。
//! 设备重建和放弃当前帧只做标记，由 GuiManager 在帧结束后处理。

use crate::gfx::BuildTarget;
use crate::gui::state::DraftResolution;
use crate::settings::{save_player_settings, EditorHost, PlayerSettings, SaveDecision, SettingsStore};

const RELOAD_TITLE: &str = "Changing editor graphics device";
const RELOAD_DESCRIPTION: &str =
    "Changing active graphics API requires reloading all graphics objects, it might take a while";

/// 基于 rfd 对话框的宿主（每帧创建一个）
#[derive(Default)]
pub struct DialogHost {
    // 尚未保存的播放器设置草稿
    unsaved_player: Option<PlayerSettings>,
    draft_resolution: Option<DraftResolution>,
    alert: Option<String>,
    recreate_requested: bool,
    frame_aborted: bool,
}

impl DialogHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录当前的未保存草稿，`None` 表示没有未保存的修改
    pub fn track_unsaved_player(&mut self, draft: Option<PlayerSettings>) {
        self.unsaved_player = draft;
    }

    /// 取出用户对草稿的选择
    pub fn take_draft_resolution(&mut self) -> Option<DraftResolution> {
        self.draft_resolution.take()
    }

    /// 取出最近的提示
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    pub fn recreate_requested(&self) -> bool {
        self.recreate_requested
    }

    pub fn frame_aborted(&self) -> bool {
        self.frame_aborted
    }

    /// 保存草稿，失败时提示并取消
    fn save_unsaved_player(&mut self, store: &mut dyn SettingsStore) -> SaveDecision {
        let Some(mut player) = self.unsaved_player.take() else {
            return SaveDecision::Proceed;
        };

        match save_player_settings(store, &mut player) {
            Ok(()) => {
                tracing::info!("Player settings saved before graphics device reload");
                self.draft_resolution = Some(DraftResolution::Save);
                SaveDecision::Proceed
            }
            Err(e) => {
                tracing::error!("Failed to save player settings: {}", e);
                self.unsaved_player = Some(player);
                self.alert = Some(format!("Failed to save player settings: {}", e));
                SaveDecision::Cancel
            }
        }
    }
}

impl EditorHost for DialogHost {
    fn confirm_device_reload(&mut self, target: BuildTarget) -> bool {
        tracing::debug!(build_target = %target, "Asking to reload editor graphics device");
        let result = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Warning)
            .set_title(RELOAD_TITLE)
            .set_description(RELOAD_DESCRIPTION)
            .set_buttons(rfd::MessageButtons::OkCancelCustom(
                "Apply".to_string(),
                "Cancel".to_string(),
            ))
            .show();

        match result {
            rfd::MessageDialogResult::Ok => true,
            rfd::MessageDialogResult::Custom(label) => label == "Apply",
            _ => false,
        }
    }

    fn offer_save_modified_work(&mut self, store: &mut dyn SettingsStore) -> SaveDecision {
        if self.unsaved_player.is_none() {
            return SaveDecision::Proceed;
        }

        let result = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Warning)
            .set_title("Unsaved player settings")
            .set_description("Player settings have been modified. Save them before reloading the graphics device?")
            .set_buttons(rfd::MessageButtons::YesNoCancel)
            .show();

        match result {
            rfd::MessageDialogResult::Yes => self.save_unsaved_player(store),
            rfd::MessageDialogResult::No => {
                self.unsaved_player = None;
                self.draft_resolution = Some(DraftResolution::Discard);
                SaveDecision::Proceed
            }
            _ => SaveDecision::Cancel,
        }
    }

    fn recreate_graphics_device(&mut self) {
        self.recreate_requested = true;
    }

    fn abort_current_ui_frame(&mut self) {
        self.frame_aborted = true;
    }

    fn alert(&mut self, message: &str) {
        self.alert = Some(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::project::{ColorSpace, ProjectSettings};
    use crate::settings::ProjectSettingsStore;
    use tempfile::tempdir;

    fn linear() -> PlayerSettings {
        PlayerSettings { color_space: ColorSpace::Linear, ..Default::default() }
    }

    #[test]
    fn test_nothing_to_save_proceeds_without_dialog() {
        let mut host = DialogHost::new();
        let mut store = ProjectSettingsStore::in_memory(ProjectSettings::default());
        assert_eq!(host.offer_save_modified_work(&mut store), SaveDecision::Proceed);
        assert_eq!(host.take_draft_resolution(), None);
    }

    #[test]
    fn test_device_requests_are_recorded() {
        let mut host = DialogHost::new();
        assert!(!host.frame_aborted());
        host.recreate_graphics_device();
        host.abort_current_ui_frame();
        host.alert("Android needs at least one graphics API");
        assert!(host.recreate_requested());
        assert!(host.frame_aborted());
        assert_eq!(host.take_alert().as_deref(), Some("Android needs at least one graphics API"));
        assert_eq!(host.take_alert(), None);
    }

    #[test]
    fn test_saving_unsaved_player_writes_store() {
        let mut host = DialogHost::new();
        host.track_unsaved_player(Some(linear()));
        let mut store = ProjectSettingsStore::in_memory(ProjectSettings::default());

        assert_eq!(host.save_unsaved_player(&mut store), SaveDecision::Proceed);
        assert_eq!(store.player_settings().color_space, ColorSpace::Linear);
        assert_eq!(host.take_draft_resolution(), Some(DraftResolution::Save));
    }

    #[test]
    fn test_failed_player_save_cancels() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("ProjectSettings.toml");
        let mut store = ProjectSettingsStore::open(&path).unwrap();

        let mut host = DialogHost::new();
        host.track_unsaved_player(Some(linear()));

        assert_eq!(host.save_unsaved_player(&mut store), SaveDecision::Cancel);
        assert_eq!(store.player_settings(), PlayerSettings::default());
        assert_eq!(host.take_draft_resolution(), None);
        assert!(host.take_alert().is_some());
    }
}
