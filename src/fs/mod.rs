//! 文件系统模块
//!
//! 目前只包含 quotafs，以及把它挂到全局挂载表上的辅助函数。
pub mod quotafs;

use alloc::string::String;
use alloc::sync::Arc;

use crate::fs::quotafs::{MountOptions, QuotaFs};
use crate::pr_info;
use crate::vfs::{FsError, MOUNT_TABLE, MountFlags};

/// 按挂载数据创建一个 quotafs 实例并挂载到 `path`
pub fn mount_quotafs(path: &str, data: &str) -> Result<Arc<QuotaFs>, FsError> {
    let options = MountOptions::parse(data)?;
    let fs = QuotaFs::new(options)?;

    MOUNT_TABLE.mount(
        fs.clone(),
        path,
        MountFlags::empty(),
        Some(String::from("quotafs")),
    )?;

    pr_info!("quotafs: mounted at {} ({})", path, data);
    Ok(fs)
}

/// 卸载 `path` 上的 quotafs
pub fn umount_quotafs(path: &str) -> Result<(), FsError> {
    MOUNT_TABLE.umount(path)?;
    pr_info!("quotafs: unmounted {}", path);
    Ok(())
}
