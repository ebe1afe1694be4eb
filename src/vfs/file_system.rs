//! 文件系统实例接口

use crate::vfs::{FsError, Inode};
use alloc::string::String;
use alloc::sync::Arc;

/// 一个已创建的文件系统实例
pub trait FileSystem: Send + Sync {
    /// 类型名，挂载表里显示的就是它
    fn fs_type(&self) -> &'static str;

    /// 根目录
    fn root_inode(&self) -> Arc<dyn Inode>;

    /// 把缓存的数据写回后备存储；纯内存的实现直接返回
    fn sync(&self) -> Result<(), FsError>;

    /// 容量与 inode 统计
    fn statfs(&self) -> Result<StatFs, FsError>;

    /// 从挂载表摘下之前调用，默认只做一次 sync
    fn umount(&self) -> Result<(), FsError> {
        self.sync()
    }

    /// 挂载选项字符串，格式与挂载时接受的一致
    fn show_options(&self) -> String {
        String::new()
    }
}

/// `statfs(2)` 的结果，块数以 `block_size` 为单位
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatFs {
    /// 文件系统魔数
    pub magic: u64,
    /// 块大小（字节）
    pub block_size: usize,
    /// 总块数
    pub total_blocks: usize,
    /// 空闲块数
    pub free_blocks: usize,
    /// 非特权用户可用的块数
    pub available_blocks: usize,
    /// 0 表示不限制 inode 数
    pub total_inodes: usize,
    /// 空闲 inode 数
    pub free_inodes: usize,
    /// 实例标识
    pub fsid: u64,
    /// 文件名最大长度
    pub max_filename_len: usize,
}

impl StatFs {
    /// 已用块数，由 total 与 free 推出
    pub fn used_blocks(&self) -> usize {
        self.total_blocks - self.free_blocks
    }
}
