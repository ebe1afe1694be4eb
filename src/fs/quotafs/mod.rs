//! quotafs - 按页计量容量的内存文件系统
//!
//! 文件数据完全驻留在内存页中。每个实例在挂载时得到固定的块上限，
//! 容量只在两个时刻变化：
//!
//! - **记账**：页第一次由 clean 变为 dirty 时记一块，重复写同一页不再记账
//! - **退还**：文件最后一个链接被删除时，退还该文件全部 dirty 页
//!
//! 写入前的准入检查与记账不是原子的，并发写者可以短暂超出上限（软配额）；
//! 对外报告的可用块数始终截断为非负。

mod hooks;
mod inode;
mod ledger;
mod options;
mod page_cache;
#[allow(clippy::module_inception)]
mod quotafs;

pub use hooks::{AuditLog, InodeHooks, LifecycleEvent, NoopHooks};
pub use inode::{InodeCaps, InodeKind, QuotaInode, WriteContext};
pub use ledger::{CapacityLedger, LedgerUsage};
pub use options::MountOptions;
pub use page_cache::{DirtyTransition, PageCache, PageGuard, PageState};
pub use quotafs::{QuotaFs, SuperBlock};
