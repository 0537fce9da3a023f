//! 项目设置的持久化
//!
//! 项目设置保存在 TOML 文件中（默认 `ProjectSettings.toml`）：
//!
//! ```toml
//! [player]
//! color_space = "linear"
//! d3d9_fullscreen_mode = "exclusive"
//! visible_in_background = true
//! require_es31 = false
//! require_es31_aep = false
//! ios_target_os_version = "8.0"
//! android_min_sdk_version = 16
//!
//! [graphics.standalone_windows]
//! use_auto_apis = false
//! apis = ["Direct3D11", "Direct3D9"]
//! ```
//!
//! 没有 `[graphics.<target>]` 表的目标使用自动模式和默认 API 顺序。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::error::{ConfigError, Result};
use crate::gfx::{BuildTarget, GraphicsApi};

use super::rules;

/// 项目设置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// 播放器设置
    #[serde(default)]
    pub player: PlayerSettings,

    /// 各构建目标的图形 API 设置，键为 `BuildTarget::key()`
    #[serde(default)]
    pub graphics: BTreeMap<String, TargetGraphicsSettings>,
}

/// 单个构建目标的图形 API 设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetGraphicsSettings {
    /// 由引擎自动选择 API
    #[serde(default = "default_use_auto_apis")]
    pub use_auto_apis: bool,

    /// 手动指定的 API 顺序；为空时使用默认顺序
    #[serde(default)]
    pub apis: Vec<GraphicsApi>,
}

/// 颜色空间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    Gamma,
    Linear,
}

/// D3D9 全屏模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum D3D9FullscreenMode {
    /// 独占全屏
    Exclusive,
    /// 全屏窗口
    Windowed,
}

/// 与图形 API 相关的播放器设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSettings {
    /// 颜色空间
    #[serde(default = "default_color_space")]
    pub color_space: ColorSpace,

    /// D3D9 全屏模式
    #[serde(default = "default_d3d9_fullscreen_mode")]
    pub d3d9_fullscreen_mode: D3D9FullscreenMode,

    /// 失去焦点后是否继续显示
    #[serde(default = "default_visible_in_background")]
    pub visible_in_background: bool,

    /// 要求 OpenGL ES 3.1
    #[serde(default)]
    pub require_es31: bool,

    /// 要求 OpenGL ES 3.1 AEP
    #[serde(default)]
    pub require_es31_aep: bool,

    /// iOS 最低系统版本
    #[serde(default = "default_ios_target_os_version")]
    pub ios_target_os_version: String,

    /// Android 最低 SDK 版本
    #[serde(default = "default_android_min_sdk_version")]
    pub android_min_sdk_version: u32,
}

// 默认值函数
fn default_use_auto_apis() -> bool { true }
fn default_color_space() -> ColorSpace { ColorSpace::Gamma }
fn default_d3d9_fullscreen_mode() -> D3D9FullscreenMode { D3D9FullscreenMode::Windowed }
fn default_visible_in_background() -> bool { false }
fn default_ios_target_os_version() -> String { "7.0".to_string() }
fn default_android_min_sdk_version() -> u32 { 9 }

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            color_space: default_color_space(),
            d3d9_fullscreen_mode: default_d3d9_fullscreen_mode(),
            visible_in_background: default_visible_in_background(),
            require_es31: false,
            require_es31_aep: false,
            ios_target_os_version: default_ios_target_os_version(),
            android_min_sdk_version: default_android_min_sdk_version(),
        }
    }
}

impl Default for TargetGraphicsSettings {
    fn default() -> Self {
        Self {
            use_auto_apis: default_use_auto_apis(),
            apis: Vec::new(),
        }
    }
}

impl ProjectSettings {
    /// 从文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 保存到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    fn target(&self, target: BuildTarget) -> Option<&TargetGraphicsSettings> {
        self.graphics.get(target.key())
    }

    fn target_mut(&mut self, target: BuildTarget) -> &mut TargetGraphicsSettings {
        self.graphics.entry(target.key().to_string()).or_default()
    }
}

/// 图形 API 设置的读写接口
///
/// 每次写入都立即持久化，没有批量提交。写入失败时已有内容保持不变。
pub trait SettingsStore {
    /// 读取 API 顺序；未配置或为空时返回目标的默认顺序
    fn graphics_apis(&self, target: BuildTarget) -> Vec<GraphicsApi>;

    /// 写入 API 顺序
    fn set_graphics_apis(&mut self, target: BuildTarget, apis: &[GraphicsApi]) -> Result<()>;

    /// 是否使用自动模式
    fn use_auto_graphics_apis(&self, target: BuildTarget) -> bool;

    /// 设置自动模式
    fn set_use_auto_graphics_apis(&mut self, target: BuildTarget, use_auto: bool) -> Result<()>;

    /// 已保存的播放器设置
    fn player_settings(&self) -> PlayerSettings;

    /// 写入播放器设置
    fn set_player_settings(&mut self, player: PlayerSettings) -> Result<()>;
}

/// 按平台规则修正播放器设置后写入存储
///
/// 写入成功时 `player` 与存储中的内容一致。
pub fn save_player_settings(store: &mut dyn SettingsStore, player: &mut PlayerSettings) -> Result<()> {
    let windows_apis = store.graphics_apis(BuildTarget::StandaloneWindows);
    if rules::enforce_player_rules(&windows_apis, player) {
        tracing::debug!("Visible in background disabled by D3D9 exclusive fullscreen");
    }
    store.set_player_settings(player.clone())
}

/// 写透到 TOML 文件的项目设置存储
#[derive(Debug)]
pub struct ProjectSettingsStore {
    settings: ProjectSettings,
    path: Option<PathBuf>,
}

impl ProjectSettingsStore {
    /// 打开项目设置文件，文件不存在时使用默认设置
    ///
    /// 文件存在但无法解析时返回错误，避免覆盖用户的设置。
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let settings = if path.exists() {
            ProjectSettings::from_file(&path)?
        } else {
            tracing::info!(path = %path.display(), "Project settings not found, using defaults");
            ProjectSettings::default()
        };
        Ok(Self { settings, path: Some(path) })
    }

    /// 仅保存在内存中的存储
    pub fn in_memory(settings: ProjectSettings) -> Self {
        Self { settings, path: None }
    }

    /// 当前设置
    pub fn settings(&self) -> &ProjectSettings {
        &self.settings
    }

    // 在副本上修改并写盘，写入成功后才替换内存中的设置
    fn update(&mut self, change: impl FnOnce(&mut ProjectSettings)) -> Result<()> {
        let mut next = self.settings.clone();
        change(&mut next);
        if let Some(path) = &self.path {
            next.save_to_file(path)?;
            tracing::debug!(path = %path.display(), "Project settings saved");
        }
        self.settings = next;
        Ok(())
    }
}

impl SettingsStore for ProjectSettingsStore {
    fn graphics_apis(&self, target: BuildTarget) -> Vec<GraphicsApi> {
        match self.settings.target(target) {
            Some(entry) if !entry.apis.is_empty() => entry.apis.clone(),
            _ => target.capabilities().default_apis.to_vec(),
        }
    }

    fn set_graphics_apis(&mut self, target: BuildTarget, apis: &[GraphicsApi]) -> Result<()> {
        self.update(|settings| settings.target_mut(target).apis = apis.to_vec())
    }

    fn use_auto_graphics_apis(&self, target: BuildTarget) -> bool {
        self.settings
            .target(target)
            .map_or_else(default_use_auto_apis, |entry| entry.use_auto_apis)
    }

    fn set_use_auto_graphics_apis(&mut self, target: BuildTarget, use_auto: bool) -> Result<()> {
        self.update(|settings| settings.target_mut(target).use_auto_apis = use_auto)
    }

    fn player_settings(&self) -> PlayerSettings {
        self.settings.player.clone()
    }

    fn set_player_settings(&mut self, player: PlayerSettings) -> Result<()> {
        self.update(|settings| settings.player = player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_target_uses_defaults() {
        let store = ProjectSettingsStore::in_memory(ProjectSettings::default());
        assert!(store.use_auto_graphics_apis(BuildTarget::Android));
        assert_eq!(
            store.graphics_apis(BuildTarget::StandaloneWindows),
            vec![GraphicsApi::Direct3D11, GraphicsApi::Direct3D9]
        );
    }

    #[test]
    fn test_parse_project_settings() {
        let text = r#"
            [player]
            color_space = "linear"
            android_min_sdk_version = 18

            [graphics.android]
            use_auto_apis = false
            apis = ["OpenGLES3", "Vulkan"]
        "#;
        let settings: ProjectSettings = toml::from_str(text).unwrap();
        assert_eq!(settings.player.color_space, ColorSpace::Linear);
        assert_eq!(settings.player.android_min_sdk_version, 18);
        assert_eq!(settings.player.ios_target_os_version, "7.0");

        let store = ProjectSettingsStore::in_memory(settings);
        assert!(!store.use_auto_graphics_apis(BuildTarget::Android));
        assert_eq!(
            store.graphics_apis(BuildTarget::Android),
            vec![GraphicsApi::OpenGLES3, GraphicsApi::Vulkan]
        );
    }

    #[test]
    fn test_writes_go_through_to_disk() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("ProjectSettings.toml");

        let mut store = ProjectSettingsStore::open(&path).unwrap();
        assert!(!path.exists());

        store
            .set_graphics_apis(BuildTarget::WebGl, &[GraphicsApi::OpenGLES3, GraphicsApi::OpenGLES2])
            .unwrap();
        store.set_use_auto_graphics_apis(BuildTarget::WebGl, false).unwrap();

        let reopened = ProjectSettingsStore::open(&path).unwrap();
        assert!(!reopened.use_auto_graphics_apis(BuildTarget::WebGl));
        assert_eq!(
            reopened.graphics_apis(BuildTarget::WebGl),
            vec![GraphicsApi::OpenGLES3, GraphicsApi::OpenGLES2]
        );
        assert_eq!(reopened.settings(), store.settings());
    }

    #[test]
    fn test_unparsable_file_is_not_overwritten() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("ProjectSettings.toml");
        std::fs::write(&path, "graphics = [").unwrap();
        assert!(ProjectSettingsStore::open(&path).is_err());
    }

    #[test]
    fn test_failed_write_leaves_settings_untouched() {
        let dir = tempdir().expect("tempdir");
        let project_dir = dir.path().join("proj");
        std::fs::create_dir(&project_dir).unwrap();
        let path = project_dir.join("ProjectSettings.toml");

        let mut store = ProjectSettingsStore::open(&path).unwrap();
        store
            .set_graphics_apis(BuildTarget::StandaloneWindows, &[GraphicsApi::Direct3D11, GraphicsApi::Direct3D9])
            .unwrap();
        let before = store.settings().clone();

        // 项目目录被替换成文件后写入必然失败
        std::fs::remove_dir_all(&project_dir).unwrap();
        std::fs::write(&project_dir, "not a directory").unwrap();

        assert!(store
            .set_graphics_apis(BuildTarget::StandaloneWindows, &[GraphicsApi::Direct3D9, GraphicsApi::Direct3D11])
            .is_err());
        assert!(store.set_use_auto_graphics_apis(BuildTarget::Android, false).is_err());
        let player = PlayerSettings { color_space: ColorSpace::Linear, ..Default::default() };
        assert!(store.set_player_settings(player).is_err());

        assert_eq!(store.settings(), &before);
        assert_eq!(
            store.graphics_apis(BuildTarget::StandaloneWindows),
            vec![GraphicsApi::Direct3D11, GraphicsApi::Direct3D9]
        );
    }

    #[test]
    fn test_save_player_settings_applies_d3d9_lock() {
        let mut store = ProjectSettingsStore::in_memory(ProjectSettings::default());
        store
            .set_graphics_apis(BuildTarget::StandaloneWindows, &[GraphicsApi::Direct3D9, GraphicsApi::Direct3D11])
            .unwrap();

        let mut player = PlayerSettings {
            d3d9_fullscreen_mode: D3D9FullscreenMode::Exclusive,
            visible_in_background: true,
            ..Default::default()
        };
        save_player_settings(&mut store, &mut player).unwrap();

        assert!(!player.visible_in_background);
        assert_eq!(store.player_settings(), player);
    }
}
