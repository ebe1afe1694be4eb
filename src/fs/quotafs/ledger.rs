//! 容量账本
//!
//! 一个文件系统实例一个账本：已记账块数是唯一的跨 inode 共享可变状态，
//! 只通过原子加减修改，写路径上从不加锁。

use core::sync::atomic::{AtomicIsize, Ordering};

use crate::pr_warn;
use crate::vfs::FsError;

/// 容量账本
///
/// `used` 统计当前处于 dirty 状态、尚未退还的页数。准入检查 [`admit`](Self::admit)
/// 与记账 [`charge`](Self::charge) 不是一个原子步骤：并发写者可以同时通过检查再各自记账，
/// 因此 `used` 可能短暂超过 `max_blocks`（软配额）。
#[derive(Debug)]
pub struct CapacityLedger {
    /// 已记账块数；只有记账错误才可能变为负数
    used: AtomicIsize,
    /// 挂载时确定的块上限
    max_blocks: usize,
    /// 块大小（字节）
    block_size: usize,
}

/// 对外报告用的容量快照，字段均已截断到合法范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerUsage {
    /// 块上限
    pub total: usize,
    /// 已用块数，截断到 `[0, total]`
    pub used: usize,
    /// 剩余块数，不会为负
    pub available: usize,
}

impl CapacityLedger {
    /// 按容量上限（字节）和块大小创建账本
    pub fn new(max_size: usize, block_size: usize) -> Self {
        Self {
            used: AtomicIsize::new(0),
            max_blocks: max_size / block_size,
            block_size,
        }
    }

    /// 挂载时确定的块上限
    pub fn max_blocks(&self) -> usize {
        self.max_blocks
    }

    /// 块大小（字节）
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// 已记账块数的快照（Relaxed，不与任何写操作同步）
    pub fn used_blocks(&self) -> isize {
        self.used.load(Ordering::Relaxed)
    }

    /// `max_blocks - used_blocks`，超额时为负
    pub fn remaining_blocks(&self) -> isize {
        self.max_blocks as isize - self.used_blocks()
    }

    /// 写入前的准入检查
    ///
    /// 已用块数达到上限时拒绝，返回 `NoMemory`。
    pub fn admit(&self) -> Result<(), FsError> {
        let used = self.used_blocks();
        if used >= self.max_blocks as isize {
            return Err(FsError::NoMemory);
        }
        Ok(())
    }

    /// 记账 `n` 块
    pub fn charge(&self, n: usize) {
        self.used.fetch_add(n as isize, Ordering::Relaxed);
    }

    /// 退还 `n` 块
    pub fn refund(&self, n: usize) {
        if n == 0 {
            return;
        }
        let prev = self.used.fetch_sub(n as isize, Ordering::Relaxed);
        if prev < n as isize {
            pr_warn!(
                "quotafs: ledger refund of {} blocks exceeds charged {}",
                n,
                prev
            );
        }
    }

    /// 硬配额式预留：准入和记账在一次 CAS 中完成，不会超额
    ///
    /// 写路径默认使用 [`admit`](Self::admit) + [`charge`](Self::charge) 的软配额语义；
    /// 需要严格上限的调用者可以改用这个方法。
    pub fn try_reserve(&self, n: usize) -> Result<(), FsError> {
        let max = self.max_blocks as isize;
        let n = n as isize;
        self.used
            .fetch_update(Ordering::AcqRel, Ordering::Relaxed, |used| {
                (used + n <= max).then_some(used + n)
            })
            .map(|_| ())
            .map_err(|_| FsError::NoMemory)
    }

    /// 计算对外可见的容量统计，可用块数永不为负
    pub fn usage(&self) -> LedgerUsage {
        let total = self.max_blocks;
        let used = self.used_blocks().clamp(0, total as isize) as usize;
        LedgerUsage {
            total,
            used,
            available: total.saturating_sub(used),
        }
    }
}
