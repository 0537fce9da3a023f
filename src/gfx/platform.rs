//! 构建目标与平台能力表
//!
//! 每个构建目标都有一份静态的能力记录：可选的图形 API 以及默认的 API 顺序。
//! 平台相关的判断统一查表，不在各处写条件分支。

use serde::{Deserialize, Serialize};
use std::fmt;

use super::api::GraphicsApi;

/// 构建目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildTarget {
    StandaloneWindows,
    StandaloneMac,
    StandaloneLinux,
    Ios,
    Tvos,
    Android,
    WebGl,
    WindowsStore,
    XboxOne,
}

/// 平台分组（设置面板中的一个页签）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetGroup {
    Standalone,
    Ios,
    Tvos,
    Android,
    WebGl,
    WindowsStore,
    XboxOne,
}

/// 编辑器自身运行的主机平台
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostPlatform {
    Windows,
    MacOs,
    Linux,
}

/// 单个构建目标的能力记录
#[derive(Debug)]
pub struct TargetCapabilities {
    /// 可选的图形 API
    pub supported_apis: &'static [GraphicsApi],
    /// 未配置时使用的默认顺序
    pub default_apis: &'static [GraphicsApi],
}

use super::api::GraphicsApi::*;

static WINDOWS: TargetCapabilities = TargetCapabilities {
    supported_apis: &[Direct3D11, Direct3D9, Direct3D12, OpenGLCore, Vulkan],
    default_apis: &[Direct3D11, Direct3D9],
};

static MAC: TargetCapabilities = TargetCapabilities {
    supported_apis: &[OpenGLCore, Metal],
    default_apis: &[OpenGLCore],
};

static LINUX: TargetCapabilities = TargetCapabilities {
    supported_apis: &[OpenGLCore, Vulkan],
    default_apis: &[OpenGLCore],
};

static IOS: TargetCapabilities = TargetCapabilities {
    supported_apis: &[Metal, OpenGLES3, OpenGLES2],
    default_apis: &[Metal, OpenGLES2],
};

static TVOS: TargetCapabilities = TargetCapabilities {
    supported_apis: &[Metal, OpenGLES3, OpenGLES2],
    default_apis: &[Metal],
};

static ANDROID: TargetCapabilities = TargetCapabilities {
    supported_apis: &[OpenGLES3, OpenGLES2, Vulkan],
    default_apis: &[OpenGLES3, OpenGLES2],
};

static WEBGL: TargetCapabilities = TargetCapabilities {
    supported_apis: &[OpenGLES3, OpenGLES2],
    default_apis: &[OpenGLES2],
};

static DIRECT3D11_ONLY: TargetCapabilities = TargetCapabilities {
    supported_apis: &[Direct3D11],
    default_apis: &[Direct3D11],
};

impl BuildTarget {
    /// 所有构建目标
    pub const ALL: [BuildTarget; 9] = [
        BuildTarget::StandaloneWindows,
        BuildTarget::StandaloneMac,
        BuildTarget::StandaloneLinux,
        BuildTarget::Ios,
        BuildTarget::Tvos,
        BuildTarget::Android,
        BuildTarget::WebGl,
        BuildTarget::WindowsStore,
        BuildTarget::XboxOne,
    ];

    /// 获取目标名称
    pub fn name(&self) -> &'static str {
        match self {
            BuildTarget::StandaloneWindows => "Windows",
            BuildTarget::StandaloneMac => "Mac",
            BuildTarget::StandaloneLinux => "Linux",
            BuildTarget::Ios => "iOS",
            BuildTarget::Tvos => "tvOS",
            BuildTarget::Android => "Android",
            BuildTarget::WebGl => "WebGL",
            BuildTarget::WindowsStore => "Windows Store",
            BuildTarget::XboxOne => "Xbox One",
        }
    }

    /// 配置文件中使用的键名
    pub fn key(&self) -> &'static str {
        match self {
            BuildTarget::StandaloneWindows => "standalone_windows",
            BuildTarget::StandaloneMac => "standalone_mac",
            BuildTarget::StandaloneLinux => "standalone_linux",
            BuildTarget::Ios => "ios",
            BuildTarget::Tvos => "tvos",
            BuildTarget::Android => "android",
            BuildTarget::WebGl => "web_gl",
            BuildTarget::WindowsStore => "windows_store",
            BuildTarget::XboxOne => "xbox_one",
        }
    }

    /// 查询能力表
    pub fn capabilities(&self) -> &'static TargetCapabilities {
        match self {
            BuildTarget::StandaloneWindows => &WINDOWS,
            BuildTarget::StandaloneMac => &MAC,
            BuildTarget::StandaloneLinux => &LINUX,
            BuildTarget::Ios => &IOS,
            BuildTarget::Tvos => &TVOS,
            BuildTarget::Android => &ANDROID,
            BuildTarget::WebGl => &WEBGL,
            BuildTarget::WindowsStore | BuildTarget::XboxOne => &DIRECT3D11_ONLY,
        }
    }

    /// 所属的平台分组
    pub fn group(&self) -> TargetGroup {
        match self {
            BuildTarget::StandaloneWindows
            | BuildTarget::StandaloneMac
            | BuildTarget::StandaloneLinux => TargetGroup::Standalone,
            BuildTarget::Ios => TargetGroup::Ios,
            BuildTarget::Tvos => TargetGroup::Tvos,
            BuildTarget::Android => TargetGroup::Android,
            BuildTarget::WebGl => TargetGroup::WebGl,
            BuildTarget::WindowsStore => TargetGroup::WindowsStore,
            BuildTarget::XboxOne => TargetGroup::XboxOne,
        }
    }
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TargetGroup {
    /// 所有平台分组，按页签顺序排列
    pub const ALL: [TargetGroup; 7] = [
        TargetGroup::Standalone,
        TargetGroup::Ios,
        TargetGroup::Tvos,
        TargetGroup::Android,
        TargetGroup::WebGl,
        TargetGroup::WindowsStore,
        TargetGroup::XboxOne,
    ];

    /// 获取分组名称
    pub fn name(&self) -> &'static str {
        match self {
            TargetGroup::Standalone => "PC, Mac & Linux",
            TargetGroup::Ios => "iOS",
            TargetGroup::Tvos => "tvOS",
            TargetGroup::Android => "Android",
            TargetGroup::WebGl => "WebGL",
            TargetGroup::WindowsStore => "Windows Store",
            TargetGroup::XboxOne => "Xbox One",
        }
    }

    /// 分组下需要单独编辑的目标及其标题后缀
    ///
    /// 桌面分组同时编辑 Windows、Mac、Linux 三个目标，其他分组只有一个目标。
    pub fn targets(&self) -> Vec<(BuildTarget, Option<&'static str>)> {
        match self {
            TargetGroup::Standalone => vec![
                (BuildTarget::StandaloneWindows, Some(" for Windows")),
                (BuildTarget::StandaloneMac, Some(" for Mac")),
                (BuildTarget::StandaloneLinux, Some(" for Linux")),
            ],
            TargetGroup::Ios => vec![(BuildTarget::Ios, None)],
            TargetGroup::Tvos => vec![(BuildTarget::Tvos, None)],
            TargetGroup::Android => vec![(BuildTarget::Android, None)],
            TargetGroup::WebGl => vec![(BuildTarget::WebGl, None)],
            TargetGroup::WindowsStore => vec![(BuildTarget::WindowsStore, None)],
            TargetGroup::XboxOne => vec![(BuildTarget::XboxOne, None)],
        }
    }
}

impl HostPlatform {
    /// 检测当前进程运行的平台
    ///
    /// 不属于三种桌面平台时返回 `None`。
    pub fn current() -> Option<Self> {
        if cfg!(target_os = "windows") {
            Some(HostPlatform::Windows)
        } else if cfg!(target_os = "macos") {
            Some(HostPlatform::MacOs)
        } else if cfg!(target_os = "linux") {
            Some(HostPlatform::Linux)
        } else {
            None
        }
    }

    /// 获取平台名称
    pub fn name(&self) -> &'static str {
        match self {
            HostPlatform::Windows => "Windows",
            HostPlatform::MacOs => "macOS",
            HostPlatform::Linux => "Linux",
        }
    }

    /// 编辑器在此平台上使用哪个构建目标的图形 API 列表首项
    ///
    /// Linux 编辑器不跟随任何目标的列表。
    pub fn editor_target(&self) -> Option<BuildTarget> {
        match self {
            HostPlatform::Windows => Some(BuildTarget::StandaloneWindows),
            HostPlatform::MacOs => Some(BuildTarget::StandaloneMac),
            HostPlatform::Linux => None,
        }
    }

    /// 从命令行参数解析
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "windows" => Some(HostPlatform::Windows),
            "macos" | "mac" => Some(HostPlatform::MacOs),
            "linux" => Some(HostPlatform::Linux),
            _ => None,
        }
    }
}

/// 平台能力查询接口
pub trait CapabilityProvider {
    /// 构建目标可选的图形 API（有序）
    fn supported_apis(&self, target: BuildTarget) -> Vec<GraphicsApi>;

    /// 编辑器自身当前是否使用该目标列表的首项进行渲染
    fn is_host_running(&self, target: BuildTarget) -> bool;
}

/// 基于静态能力表的实现
#[derive(Debug, Clone, Copy)]
pub struct StaticCapabilities {
    host: Option<HostPlatform>,
}

impl StaticCapabilities {
    /// 指定主机平台
    pub fn new(host: Option<HostPlatform>) -> Self {
        Self { host }
    }

    /// 编辑器跟随的构建目标
    pub fn editor_target(&self) -> Option<BuildTarget> {
        self.host.and_then(|host| host.editor_target())
    }
}

impl CapabilityProvider for StaticCapabilities {
    fn supported_apis(&self, target: BuildTarget) -> Vec<GraphicsApi> {
        target.capabilities().supported_apis.to_vec()
    }

    fn is_host_running(&self, target: BuildTarget) -> bool {
        self.editor_target() == Some(target)
    }
}
