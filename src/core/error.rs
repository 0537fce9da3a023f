//! 错误处理模块
//!
//! 定义了编辑器中使用的统一错误类型。
//!
//! # 设计原则
//!
//! - 为每种错误类型提供清晰的上下文信息
//! - 支持错误链（error source）
//! - 易于模式匹配和错误处理
//!
//! 图形 API 列表编辑产生的错误都不是致命的：调用方记录日志并在面板中提示，
//! 不会中断编辑器进程。

use std::fmt;

use crate::gfx::{BuildTarget, GraphicsApi};

/// 编辑器统一的 Result 类型
pub type Result<T> = std::result::Result<T, BuildSettingsError>;

/// 编辑器的错误类型
#[derive(Debug)]
pub enum BuildSettingsError {
    /// 配置错误
    Config(ConfigError),

    /// 图形设备错误
    Graphics(GraphicsError),

    /// 图形 API 列表编辑错误
    GraphicsApi(GraphicsApiError),

    /// IO 错误
    Io(std::io::Error),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置项缺失
    MissingField(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 图形设备相关的错误
#[derive(Debug)]
pub enum GraphicsError {
    /// 设备创建失败
    DeviceCreation(String),

    /// 表面获取或呈现失败
    SurfaceError(String),
}

/// 图形 API 列表编辑的错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphicsApiError {
    /// 候选 API 不受该平台支持，或已在列表中
    InvalidCandidate { target: BuildTarget, api: GraphicsApi },

    /// 删除后列表将为空
    BelowMinimumSize { target: BuildTarget },

    /// 索引越界
    IndexOutOfRange { target: BuildTarget, index: usize, len: usize },

    /// 新顺序不是当前列表的排列
    NotAPermutation { target: BuildTarget },

    /// 用户取消了首项变更（设备重载确认或未保存修改提示）
    UserCancelledHeadChange { target: BuildTarget },
}

impl fmt::Display for BuildSettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildSettingsError::Config(e) => write!(f, "Configuration error: {}", e),
            BuildSettingsError::Graphics(e) => write!(f, "Graphics error: {}", e),
            BuildSettingsError::GraphicsApi(e) => write!(f, "Graphics API list error: {}", e),
            BuildSettingsError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::MissingField(field) => write!(f, "Missing required field: {}", field),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphicsError::DeviceCreation(msg) => write!(f, "Device creation failed: {}", msg),
            GraphicsError::SurfaceError(msg) => write!(f, "Surface error: {}", msg),
        }
    }
}

impl fmt::Display for GraphicsApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphicsApiError::InvalidCandidate { target, api } => {
                write!(f, "{} cannot be added to {}", api.name(), target.name())
            }
            GraphicsApiError::BelowMinimumSize { target } => {
                write!(f, "{} needs at least one graphics API", target.name())
            }
            GraphicsApiError::IndexOutOfRange { target, index, len } => {
                write!(f, "Index {} out of range for {} ({} entries)", index, target.name(), len)
            }
            GraphicsApiError::NotAPermutation { target } => {
                write!(f, "New order for {} does not match the current entries", target.name())
            }
            GraphicsApiError::UserCancelledHeadChange { target } => {
                write!(f, "Change of the active graphics API for {} was cancelled", target.name())
            }
        }
    }
}

impl std::error::Error for BuildSettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildSettingsError::Io(e) => Some(e),
            BuildSettingsError::Config(e) => Some(e),
            BuildSettingsError::Graphics(e) => Some(e),
            BuildSettingsError::GraphicsApi(e) => Some(e),
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for GraphicsError {}
impl std::error::Error for GraphicsApiError {}

// 实现 From trait 以便于错误转换
impl From<std::io::Error> for BuildSettingsError {
    fn from(err: std::io::Error) -> Self {
        BuildSettingsError::Io(err)
    }
}

impl From<ConfigError> for BuildSettingsError {
    fn from(err: ConfigError) -> Self {
        BuildSettingsError::Config(err)
    }
}

impl From<GraphicsError> for BuildSettingsError {
    fn from(err: GraphicsError) -> Self {
        BuildSettingsError::Graphics(err)
    }
}

impl From<GraphicsApiError> for BuildSettingsError {
    fn from(err: GraphicsApiError) -> Self {
        BuildSettingsError::GraphicsApi(err)
    }
}

impl BuildSettingsError {
    /// 如果是图形 API 列表编辑错误，返回其引用
    pub fn as_graphics_api(&self) -> Option<&GraphicsApiError> {
        match self {
            BuildSettingsError::GraphicsApi(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphics_api_error_message() {
        let err: BuildSettingsError = GraphicsApiError::BelowMinimumSize {
            target: BuildTarget::Android,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Graphics API list error: Android needs at least one graphics API"
        );
        assert!(err.as_graphics_api().is_some());
    }
}
