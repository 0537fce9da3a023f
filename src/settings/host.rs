//! 编辑器宿主接口
//!
//! 图形 API 列表编辑需要宿主提供的能力：模态确认、未保存修改的处理、
//! 图形设备重建以及提示音/提示信息。GUI 使用原生对话框实现，测试中使用脚本化的实现。

use crate::gfx::BuildTarget;

use super::project::SettingsStore;

/// 未保存修改提示的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveDecision {
    /// 已保存或放弃修改，可以继续
    Proceed,
    /// 用户取消
    Cancel,
}

/// 编辑器宿主
pub trait EditorHost {
    /// 询问用户是否重载图形设备（阻塞直到用户选择）
    ///
    /// 返回 `true` 表示确认。
    fn confirm_device_reload(&mut self, target: BuildTarget) -> bool;

    /// 按宿主的标准流程处理未保存的修改（保存 / 放弃 / 取消）
    ///
    /// 选择保存时应在返回前通过 `store` 写入；写入失败必须返回 `Cancel`。
    fn offer_save_modified_work(&mut self, store: &mut dyn SettingsStore) -> SaveDecision;

    /// 请求重建图形设备，不等待完成
    fn recreate_graphics_device(&mut self);

    /// 放弃当前界面帧的剩余部分
    fn abort_current_ui_frame(&mut self);

    /// 非致命提示
    fn alert(&mut self, message: &str);
}
