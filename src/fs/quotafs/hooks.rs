//! Inode 生命周期钩子
//!
//! 在文件系统实例构造时注入，用于独立于容量账本的记录/审计。
//! 钩子不参与容量记账，也不保证与删除路径的退还有任何先后顺序。

use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use crate::sync::SpinLock;
use crate::vfs::{InodeMetadata, InodeType};

/// 生命周期钩子
pub trait InodeHooks: Send + Sync {
    /// 新 inode 完全初始化之后调用，每个 inode 恰好一次
    fn on_create(&self, _meta: &InodeMetadata) {}

    /// inode 对象最终被回收之前调用
    fn on_reclaim(&self, _meta: &InodeMetadata) {}
}

/// 什么都不做的默认钩子
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHooks;

impl InodeHooks for NoopHooks {}

/// 审计日志中的一条记录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// 新 inode 完成初始化
    Created {
        /// inode 编号
        ino: usize,
        /// inode 类型
        inode_type: InodeType,
    },
    /// inode 对象被回收
    Reclaimed {
        /// inode 编号
        ino: usize,
        /// inode 类型
        inode_type: InodeType,
    },
}

/// 记录所有生命周期事件的审计日志
#[derive(Default)]
pub struct AuditLog {
    events: SpinLock<Vec<LifecycleEvent>>,
    created: AtomicUsize,
    reclaimed: AtomicUsize,
}

impl AuditLog {
    /// 空的审计日志
    pub fn new() -> Self {
        Self::default()
    }

    /// 按发生顺序返回全部事件
    pub fn events(&self) -> Vec<LifecycleEvent> {
        self.events.lock().clone()
    }

    /// 累计触发的 `on_create` 次数
    pub fn created_count(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }

    /// 累计触发的 `on_reclaim` 次数
    pub fn reclaimed_count(&self) -> usize {
        self.reclaimed.load(Ordering::Relaxed)
    }

    /// 已创建但尚未回收的 inode 数
    pub fn live_inodes(&self) -> usize {
        self.created_count().saturating_sub(self.reclaimed_count())
    }

    /// `ino` 是否已经被回收
    pub fn is_reclaimed(&self, ino: usize) -> bool {
        self.events
            .lock()
            .iter()
            .any(|e| matches!(e, LifecycleEvent::Reclaimed { ino: i, .. } if *i == ino))
    }
}

impl InodeHooks for AuditLog {
    fn on_create(&self, meta: &InodeMetadata) {
        self.events.lock().push(LifecycleEvent::Created {
            ino: meta.inode_no,
            inode_type: meta.inode_type,
        });
        self.created.fetch_add(1, Ordering::Relaxed);
    }

    fn on_reclaim(&self, meta: &InodeMetadata) {
        self.events.lock().push(LifecycleEvent::Reclaimed {
            ino: meta.inode_no,
            inode_type: meta.inode_type,
        });
        self.reclaimed.fetch_add(1, Ordering::Relaxed);
    }
}
