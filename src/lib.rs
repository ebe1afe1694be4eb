//! quotafs - 按页计量容量的内存文件系统
//!
//! 文件数据驻留在内存页中，文件系统在挂载时得到一个固定的块上限，
//! 并且只通过观察页面从 clean 变为 dirty（第一次写入）来记账，
//! 在文件最后一个链接被删除时一次性退还该文件所有已记账的页。
//!
//! # 模块
//!
//! - [`sync`] - 自旋锁原语
//! - [`log`] - 内核风格的日志系统（`pr_*` 宏）
//! - [`vfs`] - 通用 VFS 接口：Inode/FileSystem trait、错误码、挂载表
//! - [`fs`] - quotafs 文件系统实现

extern crate alloc;


#[macro_use]
pub mod log;

pub mod config;
pub mod fs;
pub mod sync;
pub mod vfs;

pub use fs::quotafs::{
    AuditLog, CapacityLedger, InodeHooks, LedgerUsage, LifecycleEvent, MountOptions, NoopHooks,
    QuotaFs, QuotaInode,
};
pub use fs::{mount_quotafs, umount_quotafs};
pub use vfs::{FileMode, FileSystem, FsError, Inode, InodeMetadata, InodeType, StatFs};
