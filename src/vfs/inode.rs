//! Inode 接口与元数据类型

use crate::vfs::error::FsError;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// inode 类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InodeType {
    /// 普通文件
    File,
    /// 目录
    Directory,
    /// 符号链接
    Symlink,
    /// 字符设备
    CharDevice,
    /// 块设备
    BlockDevice,
    /// 命名管道
    Fifo,
    /// 套接字
    Socket,
}

/// 类型与 `S_IFMT` 取值的对照
const TYPE_BITS: [(InodeType, FileMode); 7] = [
    (InodeType::File, FileMode::S_IFREG),
    (InodeType::Directory, FileMode::S_IFDIR),
    (InodeType::Symlink, FileMode::S_IFLNK),
    (InodeType::CharDevice, FileMode::S_IFCHR),
    (InodeType::BlockDevice, FileMode::S_IFBLK),
    (InodeType::Fifo, FileMode::S_IFIFO),
    (InodeType::Socket, FileMode::S_IFSOCK),
];

impl InodeType {
    /// 按 mode 的 `S_IFMT` 部分解析；没有类型位时返回 `None`
    pub fn from_mode(mode: FileMode) -> Option<Self> {
        let fmt = mode & FileMode::S_IFMT;
        TYPE_BITS
            .iter()
            .find(|(_, bits)| *bits == fmt)
            .map(|(ty, _)| *ty)
    }

    /// 类型对应的 `S_IFMT` 取值
    pub fn type_bits(self) -> FileMode {
        TYPE_BITS
            .iter()
            .find(|(ty, _)| *ty == self)
            .map(|(_, bits)| *bits)
            .unwrap_or(FileMode::S_IFREG)
    }

    /// 设备、管道和套接字：没有数据页，只保存 rdev
    pub fn is_special(self) -> bool {
        matches!(
            self,
            InodeType::CharDevice | InodeType::BlockDevice | InodeType::Fifo | InodeType::Socket
        )
    }
}

/// 秒加纳秒的时间戳
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct TimeSpec {
    /// 秒
    pub sec: i64,
    /// 纳秒
    pub nsec: i64,
}

impl TimeSpec {
    /// 墙钟时间；时钟早于纪元时取 0
    pub fn now() -> Self {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(Self::from)
            .unwrap_or_default()
    }
}

impl From<Duration> for TimeSpec {
    fn from(d: Duration) -> Self {
        Self {
            sec: d.as_secs() as i64,
            nsec: i64::from(d.subsec_nanos()),
        }
    }
}

bitflags::bitflags! {
    /// POSIX `st_mode`：高位是类型，低 12 位是权限与特殊位
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FileMode: u32 {
        /// 类型位掩码
        const S_IFMT   = 0o170000;
        /// 套接字
        const S_IFSOCK = 0o140000;
        /// 符号链接
        const S_IFLNK  = 0o120000;
        /// 普通文件
        const S_IFREG  = 0o100000;
        /// 块设备
        const S_IFBLK  = 0o060000;
        /// 目录
        const S_IFDIR  = 0o040000;
        /// 字符设备
        const S_IFCHR  = 0o020000;
        /// 命名管道
        const S_IFIFO  = 0o010000;

        /// set-user-ID
        const S_ISUID  = 0o4000;
        /// set-group-ID；目录上表示新建项继承属组
        const S_ISGID  = 0o2000;
        /// sticky 位
        const S_ISVTX  = 0o1000;

        /// 属主读
        const S_IRUSR  = 0o400;
        /// 属主写
        const S_IWUSR  = 0o200;
        /// 属主执行
        const S_IXUSR  = 0o100;
        /// 属组读
        const S_IRGRP  = 0o040;
        /// 属组写
        const S_IWGRP  = 0o020;
        /// 属组执行
        const S_IXGRP  = 0o010;
        /// 其他用户读
        const S_IROTH  = 0o004;
        /// 其他用户写
        const S_IWOTH  = 0o002;
        /// 其他用户执行
        const S_IXOTH  = 0o001;
    }
}

impl FileMode {
    /// 去掉类型位
    pub fn permissions(self) -> FileMode {
        self - FileMode::S_IFMT
    }
}

/// `readdir` 返回的一项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// 名字
    pub name: String,
    /// inode 编号
    pub inode_no: usize,
    /// 类型
    pub inode_type: InodeType,
}

/// `stat` 能看到的全部属性
#[derive(Debug, Clone)]
pub struct InodeMetadata {
    /// inode 编号
    pub inode_no: usize,
    /// 类型
    pub inode_type: InodeType,
    /// 类型位加权限位
    pub mode: FileMode,
    /// 属主
    pub uid: u32,
    /// 属组
    pub gid: u32,
    /// 字节数
    pub size: usize,
    /// 最后访问时间
    pub atime: TimeSpec,
    /// 最后修改时间
    pub mtime: TimeSpec,
    /// 最后状态变化时间
    pub ctime: TimeSpec,
    /// 硬链接数
    pub nlinks: usize,
    /// 已记账的块数
    pub blocks: usize,
    /// 设备号，只对特殊文件有意义
    pub rdev: u64,
}

/// Inode trait - 所有文件系统必须实现
///
/// 目录类方法在非目录上返回 `NotDirectory`，数据类方法在不支持的类型上
/// 返回 `IsDirectory` 或 `InvalidArgument`。
pub trait Inode: Send + Sync {
    /// 获取 inode 元数据
    fn metadata(&self) -> Result<InodeMetadata, FsError>;

    /// 从指定偏移量读取数据
    fn read_at(&self, offset: usize, buf: &mut [u8]) -> Result<usize, FsError>;

    /// 从指定偏移量写入数据
    fn write_at(&self, offset: usize, buf: &[u8]) -> Result<usize, FsError>;

    /// 在目录中查找子项
    fn lookup(&self, name: &str) -> Result<Arc<dyn Inode>, FsError>;

    /// 在目录中创建普通文件
    fn create(&self, name: &str, mode: FileMode) -> Result<Arc<dyn Inode>, FsError>;

    /// 在目录中创建子目录
    fn mkdir(&self, name: &str, mode: FileMode) -> Result<Arc<dyn Inode>, FsError>;

    /// 创建特殊文件（设备、管道、套接字）
    fn mknod(&self, name: &str, mode: FileMode, dev: u64) -> Result<Arc<dyn Inode>, FsError>;

    /// 创建符号链接
    fn symlink(&self, name: &str, target: &str) -> Result<Arc<dyn Inode>, FsError>;

    /// 创建指向 `target` 的硬链接
    fn link(&self, name: &str, target: &Arc<dyn Inode>) -> Result<(), FsError>;

    /// 删除目录项
    fn unlink(&self, name: &str) -> Result<(), FsError>;

    /// 删除空目录
    fn rmdir(&self, name: &str) -> Result<(), FsError>;

    /// 把 `old_name` 移动到 `new_parent` 下的 `new_name`
    fn rename(
        &self,
        old_name: &str,
        new_parent: &Arc<dyn Inode>,
        new_name: &str,
    ) -> Result<(), FsError>;

    /// 列出目录内容
    fn readdir(&self) -> Result<Vec<DirEntry>, FsError>;

    /// 读取符号链接目标
    fn readlink(&self) -> Result<String, FsError>;

    /// 截断文件到指定大小
    fn truncate(&self, size: usize) -> Result<(), FsError>;

    /// 设置访问/修改时间
    fn set_times(&self, atime: Option<TimeSpec>, mtime: Option<TimeSpec>)
    -> Result<(), FsError>;

    /// 修改权限位
    fn chmod(&self, mode: FileMode) -> Result<(), FsError>;

    /// 同步文件数据到存储设备
    fn sync(&self) -> Result<(), FsError>;

    /// 用于向下转型到具体实现
    fn as_any(&self) -> &dyn core::any::Any;
}
