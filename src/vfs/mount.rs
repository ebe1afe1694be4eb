//! 挂载表
//!
//! 路径先规范化再作为键；查找按路径组件取最长前缀，`/data` 不会匹配 `/database`。

use crate::vfs::path::{is_path_prefix, normalize_path};
use crate::vfs::{FileSystem, FsError};
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use spin::RwLock;

bitflags::bitflags! {
    /// 挂载标志
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MountFlags: u32 {
        /// 只读
        const READ_ONLY  = 1 << 0;
        /// 禁止执行
        const NO_EXEC    = 1 << 1;
        /// 忽略 set-ID 位
        const NO_SUID    = 1 << 2;
        /// 禁止设备文件
        const NO_DEV     = 1 << 4;
    }
}

impl MountFlags {
    /// `/proc/mounts` 风格的标志串，例如 `ro,nosuid`
    pub fn to_option_string(self) -> String {
        let mut parts = vec![if self.contains(Self::READ_ONLY) { "ro" } else { "rw" }];
        for (flag, name) in [
            (Self::NO_SUID, "nosuid"),
            (Self::NO_DEV, "nodev"),
            (Self::NO_EXEC, "noexec"),
        ] {
            if self.contains(flag) {
                parts.push(name);
            }
        }
        parts.join(",")
    }
}

/// 一个挂载点
pub struct MountPoint {
    /// 挂载的文件系统
    pub fs: Arc<dyn FileSystem>,
    /// 挂载标志
    pub flags: MountFlags,
    /// 来源设备名，内存文件系统通常填类型名
    pub device: Option<String>,
    /// 规范化后的挂载路径
    pub mount_path: String,
}

/// `list_mounts` 的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountInfo {
    /// 挂载路径
    pub path: String,
    /// 文件系统类型
    pub fs_type: &'static str,
    /// 来源设备
    pub source: String,
    /// 挂载标志加上文件系统自己的选项
    pub options: String,
}

/// 路径到挂载点的映射
pub struct MountTable {
    mounts: RwLock<BTreeMap<String, Arc<MountPoint>>>,
}

impl MountTable {
    /// 空挂载表
    pub const fn new() -> Self {
        Self {
            mounts: RwLock::new(BTreeMap::new()),
        }
    }

    /// 挂载到 `path`，该路径已有挂载时返回 `Busy`
    pub fn mount(
        &self,
        fs: Arc<dyn FileSystem>,
        path: &str,
        flags: MountFlags,
        device: Option<String>,
    ) -> Result<(), FsError> {
        let mount_path = normalize_path(path);
        let mut mounts = self.mounts.write();
        if mounts.contains_key(&mount_path) {
            return Err(FsError::Busy);
        }
        mounts.insert(
            mount_path.clone(),
            Arc::new(MountPoint {
                fs,
                flags,
                device,
                mount_path,
            }),
        );
        Ok(())
    }

    /// 摘下挂载点，并依次调用文件系统的 `sync` 和 `umount`
    ///
    /// 挂载点先从表中移除，回调失败时也不会恢复。
    pub fn umount(&self, path: &str) -> Result<Arc<MountPoint>, FsError> {
        let removed = self.mounts.write().remove(&normalize_path(path));
        let mp = removed.ok_or(FsError::NotFound)?;
        mp.fs.sync()?;
        mp.fs.umount()?;
        Ok(mp)
    }

    /// 覆盖 `path` 的最深挂载点
    pub fn find_mount(&self, path: &str) -> Option<Arc<MountPoint>> {
        let path = normalize_path(path);
        self.mounts
            .read()
            .iter()
            .filter(|(mount_path, _)| is_path_prefix(mount_path, &path))
            .max_by_key(|(mount_path, _)| mount_path.len())
            .map(|(_, mp)| mp.clone())
    }

    /// 按路径排序的全部挂载
    pub fn list_mounts(&self) -> Vec<MountInfo> {
        self.mounts
            .read()
            .values()
            .map(|mp| {
                let fs_options = mp.fs.show_options();
                let mut options = mp.flags.to_option_string();
                if !fs_options.is_empty() {
                    options.push(',');
                    options.push_str(&fs_options);
                }
                MountInfo {
                    path: mp.mount_path.clone(),
                    fs_type: mp.fs.fs_type(),
                    source: mp.device.clone().unwrap_or_else(|| String::from("none")),
                    options,
                }
            })
            .collect()
    }
}

impl Default for MountTable {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static::lazy_static! {
    /// 全局挂载表
    pub static ref MOUNT_TABLE: MountTable = MountTable::new();
}
