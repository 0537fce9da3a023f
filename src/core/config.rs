//! 配置管理模块
//!
//! 提供编辑器配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [window]
//! width = 480
//! height = 720
//! title = "DistRender Build Settings"
//! resizable = true
//!
//! [graphics]
//! vsync = true
//!
//! [editor]
//! project_settings = "ProjectSettings.toml"
//! # host_platform = "windows"   # 覆盖自动检测的主机平台
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};
use crate::gfx::HostPlatform;

/// 编辑器配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 窗口配置
    #[serde(default)]
    pub window: WindowConfig,

    /// 图形配置
    #[serde(default)]
    pub graphics: GraphicsConfig,

    /// 编辑器配置
    #[serde(default)]
    pub editor: EditorConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 窗口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// 窗口宽度
    #[serde(default = "default_width")]
    pub width: u32,

    /// 窗口高度
    #[serde(default = "default_height")]
    pub height: u32,

    /// 窗口标题
    #[serde(default = "default_title")]
    pub title: String,

    /// 是否可调整大小
    #[serde(default = "default_resizable")]
    pub resizable: bool,
}

/// 图形配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphicsConfig {
    /// 垂直同步
    #[serde(default = "default_vsync")]
    pub vsync: bool,
}

/// 编辑器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// 项目设置文件路径
    #[serde(default = "default_project_settings")]
    pub project_settings: String,

    /// 主机平台；为空时自动检测
    #[serde(default)]
    pub host_platform: Option<HostPlatform>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_width() -> u32 { 480 }
fn default_height() -> u32 { 720 }
fn default_title() -> String { "DistRender Build Settings".to_string() }
fn default_resizable() -> bool { true }
fn default_vsync() -> bool { true }
fn default_project_settings() -> String { "ProjectSettings.toml".to_string() }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "build_settings.log".to_string() }

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: default_title(),
            resizable: default_resizable(),
        }
    }
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            vsync: default_vsync(),
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            project_settings: default_project_settings(),
            host_platform: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 参数
    ///
    /// * `path` - 配置文件路径
    ///
    /// # 返回值
    ///
    /// 成功返回 `Config` 实例，失败返回错误
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--project <path>`: 项目设置文件
    /// - `--host <windows|macos|linux>`: 主机平台
    /// - `--width <value>`: 设置窗口宽度
    /// - `--height <value>`: 设置窗口高度
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        let value_of = |flag: &str| {
            args.iter()
                .position(|a| a == flag)
                .and_then(|idx| args.get(idx + 1))
                .cloned()
        };

        if let Some(path) = value_of("--project") {
            self.editor.project_settings = path;
        }

        if let Some(host) = value_of("--host") {
            match HostPlatform::parse(&host) {
                Some(platform) => self.editor.host_platform = Some(platform),
                None => tracing::warn!(value = %host, "Unknown host platform, ignoring --host"),
            }
        }

        if let Some(width) = value_of("--width").and_then(|w| w.parse().ok()) {
            self.window.width = width;
        }

        if let Some(height) = value_of("--height").and_then(|h| h.parse().ok()) {
            self.window.height = height;
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "window.width/height".to_string(),
                reason: "Window dimensions must be greater than 0".to_string(),
            }.into());
        }

        if self.editor.project_settings.trim().is_empty() {
            return Err(ConfigError::MissingField("editor.project_settings".to_string()).into());
        }

        Ok(())
    }

    /// 实际使用的主机平台
    pub fn host_platform(&self) -> Option<HostPlatform> {
        self.editor.host_platform.or_else(HostPlatform::current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.window.width, 480);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.editor.project_settings, "ProjectSettings.toml");
        assert!(config.editor.host_platform.is_none());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.window.width = 0;
        assert!(config.validate().is_err());

        config.window.width = 100;
        config.editor.project_settings = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        config.apply_args(["app", "--project", "demo/Settings.toml", "--host", "macos", "--width", "640"]);
        assert_eq!(config.editor.project_settings, "demo/Settings.toml");
        assert_eq!(config.editor.host_platform, Some(HostPlatform::MacOs));
        assert_eq!(config.host_platform(), Some(HostPlatform::MacOs));
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 720);

        config.apply_args(["app", "--host", "amiga", "--height", "tall"]);
        assert_eq!(config.editor.host_platform, Some(HostPlatform::MacOs));
        assert_eq!(config.window.height, 720);
    }

    #[test]
    fn test_partial_file_and_round_trip() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[editor]\nhost_platform = \"windows\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.editor.host_platform, Some(HostPlatform::Windows));
        assert_eq!(config.window.title, "DistRender Build Settings");

        config.save_to_file(&path).unwrap();
        let reloaded = Config::from_file(&path).unwrap();
        assert_eq!(reloaded.editor.host_platform, Some(HostPlatform::Windows));
        assert_eq!(reloaded.logging.level, LogLevel::Info);
    }
}
