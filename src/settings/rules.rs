//! 依赖图形 API 列表的平台规则
//!
//! 播放器设置中有几项的可见性或合法性取决于某个目标当前的 API 列表。

use crate::gfx::{BuildTarget, GraphicsApi};

use super::project::{ColorSpace, D3D9FullscreenMode, PlayerSettings};

/// 首项变更会切换编辑器设备时显示的提示
pub const REORDER_HINT: &str = "Reordering the list will switch editor to the first available platform";

/// 线性颜色空间下的提示等级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// 线性颜色空间提示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSpaceWarning {
    pub severity: Severity,
    pub message: &'static str,
}

const IOS_LINEAR_WARNING: &str =
    "Linear colorspace requires Metal API only and iOS 8.0 or newer.";
const TVOS_LINEAR_WARNING: &str = "Linear colorspace requires Metal API only.";
const ANDROID_LINEAR_WARNING: &str =
    "Linear colorspace requires OpenGL ES 3.0 only (remove OpenGL ES 2 from the list) and Android API level 18 or newer.";
const WEBGL_LINEAR_ERROR: &str = "Linear colorspace is not supported on WebGL.";

/// Android 上 ES 3.1 选项是否可见：列表含 ES3 且不含 ES2
pub fn es31_options_visible(target: BuildTarget, apis: &[GraphicsApi]) -> bool {
    target == BuildTarget::Android
        && apis.contains(&GraphicsApi::OpenGLES3)
        && !apis.contains(&GraphicsApi::OpenGLES2)
}

/// 线性颜色空间的兼容性提示
///
/// 伽马颜色空间下没有提示。
pub fn color_space_warning(
    target: BuildTarget,
    apis: &[GraphicsApi],
    player: &PlayerSettings,
) -> Option<ColorSpaceWarning> {
    if player.color_space != ColorSpace::Linear {
        return None;
    }

    let has_gles = apis.iter().any(GraphicsApi::is_gles);
    let warning = |message| Some(ColorSpaceWarning { severity: Severity::Warning, message });

    match target {
        BuildTarget::Ios => {
            let metal_only = !has_gles;
            let os_ok = version_at_least(&player.ios_target_os_version, (8, 0), (6, 0));
            if !metal_only || !os_ok {
                warning(IOS_LINEAR_WARNING)
            } else {
                None
            }
        }
        BuildTarget::Tvos if has_gles => warning(TVOS_LINEAR_WARNING),
        BuildTarget::Android => {
            let es3_only = es31_options_visible(target, apis);
            if !es3_only || player.android_min_sdk_version < 18 {
                warning(ANDROID_LINEAR_WARNING)
            } else {
                None
            }
        }
        BuildTarget::WebGl => Some(ColorSpaceWarning {
            severity: Severity::Error,
            message: WEBGL_LINEAR_ERROR,
        }),
        _ => None,
    }
}

/// Windows 列表首项为 D3D9 且使用独占全屏时，不允许后台可见
pub fn visible_in_background_locked(windows_apis: &[GraphicsApi], player: &PlayerSettings) -> bool {
    windows_apis.first() == Some(&GraphicsApi::Direct3D9)
        && player.d3d9_fullscreen_mode == D3D9FullscreenMode::Exclusive
}

/// 按规则修正播放器设置，返回是否有改动
pub fn enforce_player_rules(windows_apis: &[GraphicsApi], player: &mut PlayerSettings) -> bool {
    if visible_in_background_locked(windows_apis, player) && player.visible_in_background {
        player.visible_in_background = false;
        return true;
    }
    false
}

// 解析 "主版本.次版本"，空字符串使用 fallback
fn version_at_least(version: &str, minimum: (u32, u32), fallback: (u32, u32)) -> bool {
    let parsed = if version.trim().is_empty() {
        fallback
    } else {
        let mut parts = version.trim().split('.').map(|p| p.parse::<u32>().unwrap_or(0));
        (parts.next().unwrap_or(0), parts.next().unwrap_or(0))
    };
    parsed >= minimum
}
