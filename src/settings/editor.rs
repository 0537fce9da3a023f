//! 图形 API 列表编辑器
//!
//! `GraphicsApiEditor` 按构建目标维护图形 API 偏好列表，负责添加、删除和重新排序。
//! 每次修改都会立即写回设置存储。
//!
//! # 首项变更
//!
//! 当修改会改变列表首项，并且编辑器自身正使用该目标的首项 API 渲染时，
//! 修改需要重建图形设备：
//!
//! 1. 询问用户是否重载图形设备
//! 2. 确认后按宿主流程处理未保存的修改
//! 3. 两步都通过才写入设置，然后请求重建设备并放弃当前界面帧
//!
//! 任意一步取消时，修改被完全丢弃，缓存的列表也被丢弃，下次访问时从存储重新读取。

use std::collections::HashMap;

use crate::core::error::{GraphicsApiError, Result};
use crate::gfx::{BuildTarget, CapabilityProvider, GraphicsApi};
use crate::{editor_info, editor_warn};

use super::host::{EditorHost, SaveDecision};
use super::list::GraphicsApiList;
use super::project::SettingsStore;

/// API 选择模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiSelectionMode {
    /// 由引擎决定 API 顺序，列表不可编辑
    Auto,
    /// 使用手动维护的列表
    Manual,
}

/// 一次成功修改的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// 已写入设置
    Applied,
    /// 已写入设置，并请求了图形设备重建
    AppliedWithDeviceReload,
}

/// 添加菜单中的一项
///
/// 已在列表中的 API 仍然显示，但不可选择。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddCandidate {
    pub api: GraphicsApi,
    pub enabled: bool,
}

/// 图形 API 列表编辑器
pub struct GraphicsApiEditor<S, C> {
    store: S,
    capabilities: C,
    // 列表控件使用的列表，首次访问时从存储加载
    lists: HashMap<BuildTarget, GraphicsApiList>,
}

impl<S: SettingsStore, C: CapabilityProvider> GraphicsApiEditor<S, C> {
    /// 创建编辑器
    pub fn new(store: S, capabilities: C) -> Self {
        Self {
            store,
            capabilities,
            lists: HashMap::new(),
        }
    }

    /// 设置存储
    pub fn store(&self) -> &S {
        &self.store
    }

    /// 设置存储（可变）
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// 平台能力
    pub fn capabilities(&self) -> &C {
        &self.capabilities
    }

    /// 获取目标的列表，首次访问时从存储加载
    pub fn list(&mut self, target: BuildTarget) -> &GraphicsApiList {
        let store = &self.store;
        self.lists
            .entry(target)
            .or_insert_with(|| GraphicsApiList::from_stored(target, &store.graphics_apis(target)))
    }

    /// 丢弃缓存的列表
    pub fn forget(&mut self, target: BuildTarget) {
        self.lists.remove(&target);
    }

    /// 是否显示列表编辑界面
    ///
    /// 只有一个或没有可选 API 的目标不提供编辑。
    pub fn is_list_ui_available(&self, target: BuildTarget) -> bool {
        self.capabilities.supported_apis(target).len() >= 2
    }

    /// 当前选择模式
    pub fn mode(&self, target: BuildTarget) -> ApiSelectionMode {
        if self.store.use_auto_graphics_apis(target) {
            ApiSelectionMode::Auto
        } else {
            ApiSelectionMode::Manual
        }
    }

    /// 切换自动模式
    ///
    /// 只改变标志，不修改列表内容。
    pub fn set_use_auto_apis(&mut self, target: BuildTarget, use_auto: bool) -> Result<()> {
        self.store.set_use_auto_graphics_apis(target, use_auto)?;
        editor_info!(build_target = %target, use_auto, "Graphics API selection mode changed");
        Ok(())
    }

    /// 编辑器是否正使用该目标的列表首项渲染
    pub fn is_host_running(&self, target: BuildTarget) -> bool {
        self.capabilities.is_host_running(target)
    }

    /// 添加菜单内容
    pub fn addable_candidates(&mut self, target: BuildTarget) -> Vec<AddCandidate> {
        let supported = self.capabilities.supported_apis(target);
        let list = self.list(target);
        supported
            .into_iter()
            .map(|api| AddCandidate { api, enabled: !list.contains(api) })
            .collect()
    }

    /// 在列表末尾添加一个 API
    pub fn add(
        &mut self,
        host: &mut dyn EditorHost,
        target: BuildTarget,
        candidate: GraphicsApi,
    ) -> Result<EditOutcome> {
        if !self.capabilities.supported_apis(target).contains(&candidate) {
            return Err(GraphicsApiError::InvalidCandidate { target, api: candidate }.into());
        }

        let stored = self.stored_list(target);
        let updated = stored.with_appended(candidate)?;
        editor_info!(build_target = %target, api = %candidate, "Adding graphics API");
        self.apply_changed_list(host, updated, stored.is_empty())
    }

    /// 删除指定位置的 API
    ///
    /// 列表只剩一项时拒绝删除并提示。
    pub fn remove(
        &mut self,
        host: &mut dyn EditorHost,
        target: BuildTarget,
        index: usize,
    ) -> Result<EditOutcome> {
        let stored = self.stored_list(target);
        if stored.len() < 2 {
            editor_warn!(build_target = %target, "Refusing to remove the last graphics API");
            host.alert(&format!("{} needs at least one graphics API", target.name()));
            return Err(GraphicsApiError::BelowMinimumSize { target }.into());
        }

        let updated = stored.without(index)?;
        editor_info!(build_target = %target, index, "Removing graphics API");
        self.apply_changed_list(host, updated, index == 0)
    }

    /// 以新的顺序替换列表
    pub fn reorder(
        &mut self,
        host: &mut dyn EditorHost,
        target: BuildTarget,
        new_order: &[GraphicsApi],
    ) -> Result<EditOutcome> {
        let stored = self.stored_list(target);
        let updated = stored.reordered(new_order)?;
        let first_entry_changed = stored.head() != updated.head();
        editor_info!(build_target = %target, order = ?updated.entries(), "Reordering graphics APIs");
        self.apply_changed_list(host, updated, first_entry_changed)
    }

    fn stored_list(&self, target: BuildTarget) -> GraphicsApiList {
        GraphicsApiList::from_stored(target, &self.store.graphics_apis(target))
    }

    fn apply_changed_list(
        &mut self,
        host: &mut dyn EditorHost,
        updated: GraphicsApiList,
        first_entry_changed: bool,
    ) -> Result<EditOutcome> {
        let target = updated.target();
        let mut apply = true;
        let mut reload_device = false;

        if first_entry_changed && self.capabilities.is_host_running(target) {
            apply = false;
            if host.confirm_device_reload(target)
                && host.offer_save_modified_work(&mut self.store) == SaveDecision::Proceed
            {
                apply = true;
                reload_device = true;
            }
        }

        if !apply {
            editor_info!(build_target = %target, "Graphics API change cancelled");
            self.forget(target);
            return Err(GraphicsApiError::UserCancelledHeadChange { target }.into());
        }

        self.store.set_graphics_apis(target, updated.entries())?;
        self.lists.insert(target, updated);

        if reload_device {
            editor_info!(build_target = %target, "Recreating editor graphics device");
            host.recreate_graphics_device();
            host.abort_current_ui_frame();
            return Ok(EditOutcome::AppliedWithDeviceReload);
        }

        Ok(EditOutcome::Applied)
    }
}
