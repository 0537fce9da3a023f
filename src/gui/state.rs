//! GUI 状态管理
//!
//! GuiState 保存设置面板的全部状态：图形 API 编辑器、当前页签、
//! 播放器设置草稿以及最近一次提示。

use crate::core::Config;
use crate::gfx::{BuildTarget, GraphicsApi, HostPlatform, StaticCapabilities, TargetGroup};
use crate::settings::{
    save_player_settings, ApiSelectionMode, GraphicsApiEditor, PlayerSettings, ProjectSettingsStore, SettingsStore,
};
use crate::settings::rules;

/// 面板使用的编辑器类型
pub type SettingsEditor = GraphicsApiEditor<ProjectSettingsStore, StaticCapabilities>;

/// 草稿的处理方式（由未保存修改提示决定）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftResolution {
    Save,
    Discard,
}

/// GUI 状态
pub struct GuiState {
    pub editor: SettingsEditor,

    // 当前页签
    pub group: TargetGroup,

    // 播放器设置草稿，点击保存后写入项目设置
    pub player_draft: PlayerSettings,

    // 最近一次提示
    pub last_alert: Option<String>,

    pub host_platform: Option<HostPlatform>,
}

impl GuiState {
    /// 从配置和项目设置创建 GUI 状态
    pub fn new(config: &Config, store: ProjectSettingsStore) -> Self {
        let host_platform = config.host_platform();
        let player_draft = store.settings().player.clone();
        let editor = GraphicsApiEditor::new(store, StaticCapabilities::new(host_platform));

        Self {
            editor,
            group: TargetGroup::Standalone,
            player_draft,
            last_alert: None,
            host_platform,
        }
    }

    /// 编辑器自身应使用的图形 API
    ///
    /// 主机不跟随任何目标，或该目标处于自动模式时返回 `None`。
    pub fn editor_graphics_api(&mut self) -> Option<GraphicsApi> {
        let target = self.editor.capabilities().editor_target()?;
        if self.editor.mode(target) == ApiSelectionMode::Auto {
            return None;
        }
        self.editor.list(target).head()
    }

    /// 草稿是否与已保存的播放器设置不同
    pub fn has_unsaved_player_changes(&self) -> bool {
        self.player_draft != self.editor.store().settings().player
    }

    /// 保存草稿
    pub fn save_player_draft(&mut self) {
        match save_player_settings(self.editor.store_mut(), &mut self.player_draft) {
            Ok(()) => tracing::info!("Player settings saved"),
            Err(e) => {
                tracing::error!("Failed to save player settings: {}", e);
                self.last_alert = Some(format!("Failed to save player settings: {}", e));
            }
        }
    }

    /// 放弃草稿
    pub fn discard_player_draft(&mut self) {
        self.player_draft = self.editor.store().settings().player.clone();
    }

    /// 同步未保存修改提示的结果
    ///
    /// 保存已由宿主在提示中完成，这里只让草稿与存储一致。
    pub fn resolve_draft(&mut self, resolution: Option<DraftResolution>) {
        match resolution {
            Some(DraftResolution::Save) | Some(DraftResolution::Discard) => self.discard_player_draft(),
            None => {}
        }
    }

    /// 当前是否禁止后台可见（Windows 首项为 D3D9 且独占全屏）
    ///
    /// 只用于界面禁用，草稿本身在保存时修正。
    pub fn visible_in_background_locked(&self) -> bool {
        let windows_apis = self.editor.store().graphics_apis(BuildTarget::StandaloneWindows);
        rules::visible_in_background_locked(&windows_apis, &self.player_draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::project::{ColorSpace, D3D9FullscreenMode, ProjectSettings};
    use tempfile::tempdir;

    fn state_for(host: HostPlatform) -> GuiState {
        let mut config = Config::default();
        config.editor.host_platform = Some(host);
        GuiState::new(&config, ProjectSettingsStore::in_memory(ProjectSettings::default()))
    }

    #[test]
    fn test_editor_api_follows_host_target_head() {
        let mut state = state_for(HostPlatform::Windows);
        // 默认自动模式
        assert_eq!(state.editor_graphics_api(), None);

        state.editor.set_use_auto_apis(BuildTarget::StandaloneWindows, false).unwrap();
        assert_eq!(state.editor_graphics_api(), Some(GraphicsApi::Direct3D11));

        let mut linux = state_for(HostPlatform::Linux);
        assert_eq!(linux.editor_graphics_api(), None);
    }

    #[test]
    fn test_player_draft_resolution() {
        let mut state = state_for(HostPlatform::Linux);
        assert!(!state.has_unsaved_player_changes());

        state.player_draft.color_space = ColorSpace::Linear;
        assert!(state.has_unsaved_player_changes());
        state.resolve_draft(Some(DraftResolution::Discard));
        assert_eq!(state.player_draft.color_space, ColorSpace::Gamma);

        state.player_draft.color_space = ColorSpace::Linear;
        state.save_player_draft();
        assert!(!state.has_unsaved_player_changes());
        assert_eq!(state.editor.store().settings().player.color_space, ColorSpace::Linear);
    }

    #[test]
    fn test_failed_save_keeps_draft_dirty() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("ProjectSettings.toml");
        let mut config = Config::default();
        config.editor.host_platform = Some(HostPlatform::Windows);
        let mut state = GuiState::new(&config, ProjectSettingsStore::open(&path).unwrap());

        state.player_draft.color_space = ColorSpace::Linear;
        state.save_player_draft();

        assert!(state.has_unsaved_player_changes());
        assert!(state.last_alert.is_some());
        assert_eq!(state.editor.store().settings().player.color_space, ColorSpace::Gamma);
    }

    #[test]
    fn test_d3d9_lock_does_not_dirty_draft() {
        let mut settings = ProjectSettings::default();
        settings.player.d3d9_fullscreen_mode = D3D9FullscreenMode::Exclusive;
        settings.player.visible_in_background = true;
        let mut store = ProjectSettingsStore::in_memory(settings);
        store
            .set_graphics_apis(BuildTarget::StandaloneWindows, &[GraphicsApi::Direct3D9, GraphicsApi::Direct3D11])
            .unwrap();

        let mut config = Config::default();
        config.editor.host_platform = Some(HostPlatform::Windows);
        let mut state = GuiState::new(&config, store);

        assert!(state.visible_in_background_locked());
        assert!(!state.has_unsaved_player_changes());

        // 保存时才修正
        state.save_player_draft();
        assert!(!state.editor.store().settings().player.visible_in_background);
        assert!(!state.has_unsaved_player_changes());
    }
}
