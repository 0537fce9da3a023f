//! 图形 API 偏好列表
//!
//! `GraphicsApiList` 保存某个构建目标的 API 偏好顺序。所有修改都返回新的列表，
//! 构造时保证没有重复项。

use crate::core::error::{GraphicsApiError, Result};
use crate::gfx::{BuildTarget, GraphicsApi};
use crate::editor_warn;

/// 单个构建目标的图形 API 偏好列表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphicsApiList {
    target: BuildTarget,
    entries: Vec<GraphicsApi>,
}

impl GraphicsApiList {
    /// 从持久化数据构建
    ///
    /// 重复项只保留第一次出现的位置。
    pub fn from_stored(target: BuildTarget, stored: &[GraphicsApi]) -> Self {
        let mut entries = Vec::with_capacity(stored.len());
        for api in stored {
            if entries.contains(api) {
                editor_warn!(build_target = %target, api = %api, "Dropping duplicate graphics API entry");
                continue;
            }
            entries.push(*api);
        }
        Self { target, entries }
    }

    /// 构建目标
    pub fn target(&self) -> BuildTarget {
        self.target
    }

    /// 按偏好排序的 API
    pub fn entries(&self) -> &[GraphicsApi] {
        &self.entries
    }

    /// 首项，即默认启用的 API
    pub fn head(&self) -> Option<GraphicsApi> {
        self.entries.first().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, api: GraphicsApi) -> bool {
        self.entries.contains(&api)
    }

    /// 在末尾追加一项
    pub fn with_appended(&self, api: GraphicsApi) -> Result<Self> {
        if self.contains(api) {
            return Err(GraphicsApiError::InvalidCandidate { target: self.target, api }.into());
        }
        let mut entries = self.entries.clone();
        entries.push(api);
        Ok(Self { target: self.target, entries })
    }

    /// 删除指定位置的项
    ///
    /// 列表至少保留一项。
    pub fn without(&self, index: usize) -> Result<Self> {
        if self.entries.len() < 2 {
            return Err(GraphicsApiError::BelowMinimumSize { target: self.target }.into());
        }
        if index >= self.entries.len() {
            return Err(GraphicsApiError::IndexOutOfRange {
                target: self.target,
                index,
                len: self.entries.len(),
            }
            .into());
        }
        let mut entries = self.entries.clone();
        entries.remove(index);
        Ok(Self { target: self.target, entries })
    }

    /// 替换为新的顺序
    ///
    /// `order` 必须恰好是当前各项的一个排列。
    pub fn reordered(&self, order: &[GraphicsApi]) -> Result<Self> {
        let reordered = Self::from_stored(self.target, order);
        let is_permutation = reordered.len() == order.len()
            && reordered.len() == self.entries.len()
            && self.entries.iter().all(|api| reordered.contains(*api));
        if !is_permutation {
            return Err(GraphicsApiError::NotAPermutation { target: self.target }.into());
        }
        Ok(reordered)
    }

    /// 交换两项的位置，返回新的顺序（供列表控件拖动/上下移动使用）
    pub fn swapped(&self, a: usize, b: usize) -> Vec<GraphicsApi> {
        let mut order = self.entries.clone();
        if a < order.len() && b < order.len() {
            order.swap(a, b);
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::GraphicsApi::*;

    #[test]
    fn test_duplicates_dropped_on_load() {
        let list = GraphicsApiList::from_stored(
            BuildTarget::Android,
            &[OpenGLES3, OpenGLES2, OpenGLES3, Vulkan, OpenGLES2],
        );
        assert_eq!(list.entries(), &[OpenGLES3, OpenGLES2, Vulkan]);
    }

    #[test]
    fn test_append_rejects_duplicate() {
        let list = GraphicsApiList::from_stored(BuildTarget::Android, &[OpenGLES3]);
        assert!(list.with_appended(OpenGLES3).is_err());
        let list = list.with_appended(Vulkan).unwrap();
        assert_eq!(list.entries(), &[OpenGLES3, Vulkan]);
    }

    #[test]
    fn test_remove_keeps_at_least_one() {
        let list = GraphicsApiList::from_stored(BuildTarget::Android, &[OpenGLES3]);
        let err = list.without(0).unwrap_err();
        assert_eq!(
            err.as_graphics_api(),
            Some(&GraphicsApiError::BelowMinimumSize { target: BuildTarget::Android })
        );

        let list = GraphicsApiList::from_stored(BuildTarget::Android, &[OpenGLES3, OpenGLES2]);
        assert!(list.without(2).is_err());
        assert_eq!(list.without(0).unwrap().entries(), &[OpenGLES2]);
    }

    #[test]
    fn test_reorder_requires_permutation() {
        let list = GraphicsApiList::from_stored(BuildTarget::StandaloneWindows, &[Direct3D11, Direct3D9]);
        assert!(list.reordered(&[Direct3D9]).is_err());
        assert!(list.reordered(&[Direct3D9, Direct3D9]).is_err());
        assert!(list.reordered(&[Direct3D9, Vulkan]).is_err());
        assert_eq!(
            list.reordered(&[Direct3D9, Direct3D11]).unwrap().entries(),
            &[Direct3D9, Direct3D11]
        );
    }

    #[test]
    fn test_swapped_ignores_out_of_range() {
        let list = GraphicsApiList::from_stored(BuildTarget::StandaloneWindows, &[Direct3D11, Direct3D9]);
        assert_eq!(list.swapped(0, 1), vec![Direct3D9, Direct3D11]);
        assert_eq!(list.swapped(0, 5), vec![Direct3D11, Direct3D9]);
    }
}
