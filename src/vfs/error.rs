//! VFS 错误类型
//!
//! 每个变体对应一个 POSIX errno，见 [`FsError::to_errno()`]。宿主程序需要
//! `std::io::Error` 时可以直接 `?` 转换，原始 errno 会被保留。

use core::fmt;

/// VFS 操作的错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    /// 目录项不存在
    NotFound,
    /// 目录项已存在
    AlreadyExists,
    /// 需要目录但不是目录
    NotDirectory,
    /// 对目录执行了文件操作
    IsDirectory,
    /// 目录非空
    DirectoryNotEmpty,
    /// 权限不足
    PermissionDenied,
    /// 打开方式不允许该操作
    BadFileDescriptor,
    /// 参数无效
    InvalidArgument,
    /// 名字超过 `NAME_MAX`
    NameTooLong,
    /// 容量账本已满，或者页面分配失败
    NoMemory,
    /// inode 数达到 `nr_inodes` 上限
    NoSpace,
    /// 只读文件系统
    ReadOnlyFs,
    /// I/O 错误
    IoError,
    /// 挂载点已被占用
    Busy,
    /// 不支持的操作
    NotSupported,
    /// 链接数过多
    TooManyLinks,
}

impl FsError {
    /// (errno, strerror)
    const fn describe(self) -> (i32, &'static str) {
        match self {
            FsError::NotFound => (2, "no such file or directory"),
            FsError::IoError => (5, "input/output error"),
            FsError::BadFileDescriptor => (9, "bad file descriptor"),
            FsError::NoMemory => (12, "out of memory"),
            FsError::PermissionDenied => (13, "permission denied"),
            FsError::Busy => (16, "device or resource busy"),
            FsError::AlreadyExists => (17, "file exists"),
            FsError::NotDirectory => (20, "not a directory"),
            FsError::IsDirectory => (21, "is a directory"),
            FsError::InvalidArgument => (22, "invalid argument"),
            FsError::NoSpace => (28, "no space left on device"),
            FsError::ReadOnlyFs => (30, "read-only file system"),
            FsError::TooManyLinks => (31, "too many links"),
            FsError::NameTooLong => (36, "file name too long"),
            FsError::DirectoryNotEmpty => (39, "directory not empty"),
            FsError::NotSupported => (95, "operation not supported"),
        }
    }

    /// 系统调用约定的负 errno
    pub fn to_errno(self) -> isize {
        -(self.describe().0 as isize)
    }

    /// 空间释放后可以重试的错误
    pub fn is_resource_exhausted(self) -> bool {
        matches!(self, FsError::NoMemory | FsError::NoSpace)
    }
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe().1)
    }
}

impl core::error::Error for FsError {}

impl From<FsError> for std::io::Error {
    fn from(err: FsError) -> Self {
        std::io::Error::from_raw_os_error(err.describe().0)
    }
}
