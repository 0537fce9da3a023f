//! 图形 API 标识
//!
//! 构建目标在运行时可以选择的图形 API。列表中的顺序即偏好顺序，
//! 第一项是默认启用的 API。

use serde::{Deserialize, Serialize};
use std::fmt;

use super::platform::BuildTarget;

/// 图形 API 类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GraphicsApi {
    /// Direct3D 9
    Direct3D9,
    /// Direct3D 11
    Direct3D11,
    /// Direct3D 12
    Direct3D12,
    /// OpenGL 核心模式
    OpenGLCore,
    /// OpenGL ES 2.0
    OpenGLES2,
    /// OpenGL ES 3.x
    OpenGLES3,
    /// Metal
    Metal,
    /// Vulkan
    Vulkan,
}

impl GraphicsApi {
    /// 获取 API 名称（与配置文件中的写法一致）
    pub fn name(&self) -> &'static str {
        match self {
            GraphicsApi::Direct3D9 => "Direct3D9",
            GraphicsApi::Direct3D11 => "Direct3D11",
            GraphicsApi::Direct3D12 => "Direct3D12",
            GraphicsApi::OpenGLCore => "OpenGLCore",
            GraphicsApi::OpenGLES2 => "OpenGLES2",
            GraphicsApi::OpenGLES3 => "OpenGLES3",
            GraphicsApi::Metal => "Metal",
            GraphicsApi::Vulkan => "Vulkan",
        }
    }

    /// 是否为 OpenGL ES 系列
    pub fn is_gles(&self) -> bool {
        matches!(self, GraphicsApi::OpenGLES2 | GraphicsApi::OpenGLES3)
    }

    /// 列表中显示的名称
    ///
    /// 部分 API 在特定平台上有不同的叫法或带有实验性标记。
    pub fn display_label(&self, target: BuildTarget) -> String {
        match (self, target) {
            (GraphicsApi::OpenGLES3, BuildTarget::WebGl) => "WebGL 2.0".to_string(),
            (GraphicsApi::OpenGLES2, BuildTarget::WebGl) => "WebGL 1.0".to_string(),
            (GraphicsApi::Metal, BuildTarget::StandaloneMac) => {
                "Metal (Experimental, Player Only)".to_string()
            }
            (GraphicsApi::Direct3D12, _) | (GraphicsApi::Vulkan, _) => {
                format!("{} (Experimental)", self.name())
            }
            _ => self.name().to_string(),
        }
    }
}

impl fmt::Display for GraphicsApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_labels() {
        assert_eq!(GraphicsApi::OpenGLES3.display_label(BuildTarget::WebGl), "WebGL 2.0");
        assert_eq!(GraphicsApi::OpenGLES3.display_label(BuildTarget::Android), "OpenGLES3");
        assert_eq!(
            GraphicsApi::Vulkan.display_label(BuildTarget::Android),
            "Vulkan (Experimental)"
        );
        assert_eq!(
            GraphicsApi::Metal.display_label(BuildTarget::StandaloneMac),
            "Metal (Experimental, Player Only)"
        );
        assert_eq!(GraphicsApi::Metal.display_label(BuildTarget::Ios), "Metal");
    }

    #[test]
    fn test_serialized_name_matches_name() {
        #[derive(Serialize)]
        struct Wrapper {
            api: GraphicsApi,
        }
        let text = toml::to_string(&Wrapper { api: GraphicsApi::OpenGLES3 }).unwrap();
        assert_eq!(text.trim(), "api = \"OpenGLES3\"");
    }
}
