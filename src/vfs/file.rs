//! 打开文件的会话层
//!
//! [`Inode`](crate::vfs::Inode) 只提供按偏移的随机访问；偏移量和打开方式属于
//! 一次打开会话，由 [`File`] 的实现者维护。

use alloc::vec::Vec;
use std::io::SeekFrom;

use crate::vfs::{FsError, InodeMetadata};

/// 一次打开会话
pub trait File: Send + Sync {
    /// 打开时的标志
    fn flags(&self) -> OpenFlags;

    /// 从当前偏移读取并推进偏移
    fn read(&self, buf: &mut [u8]) -> Result<usize, FsError>;

    /// 在当前偏移写入并推进偏移，`O_APPEND` 时先移到文件末尾
    ///
    /// 容量不足时可能只写入一部分。
    fn write(&self, buf: &[u8]) -> Result<usize, FsError>;

    /// 底层 inode 的元数据
    fn metadata(&self) -> Result<InodeMetadata, FsError>;

    /// 移动偏移，返回新的偏移。结果为负时返回 `InvalidArgument`
    fn seek(&self, pos: SeekFrom) -> Result<usize, FsError>;

    /// 当前偏移
    fn position(&self) -> usize;

    /// 打开方式是否允许读
    fn readable(&self) -> bool {
        self.flags().access().can_read()
    }

    /// 打开方式是否允许写
    fn writable(&self) -> bool {
        self.flags().access().can_write()
    }

    /// 写完整个 `buf`，中途的错误原样返回
    ///
    /// 已经写入的部分不会回滚，它们占用的块仍然记账。
    fn write_all(&self, mut buf: &[u8]) -> Result<(), FsError> {
        while !buf.is_empty() {
            match self.write(buf)? {
                0 => return Err(FsError::IoError),
                n => buf = &buf[n..],
            }
        }
        Ok(())
    }

    /// 从当前偏移读到文件末尾
    fn read_to_end(&self) -> Result<Vec<u8>, FsError> {
        let mut out = Vec::new();
        let mut chunk = [0u8; 512];
        loop {
            let n = self.read(&mut chunk)?;
            if n == 0 {
                return Ok(out);
            }
            out.extend_from_slice(&chunk[..n]);
        }
    }
}

/// 由 `O_ACCMODE` 位决定的访问方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// 只读
    ReadOnly,
    /// 只写
    WriteOnly,
    /// 读写
    ReadWrite,
}

impl AccessMode {
    /// 是否允许读
    pub fn can_read(self) -> bool {
        matches!(self, AccessMode::ReadOnly | AccessMode::ReadWrite)
    }

    /// 是否允许写
    pub fn can_write(self) -> bool {
        matches!(self, AccessMode::WriteOnly | AccessMode::ReadWrite)
    }
}

bitflags::bitflags! {
    /// 打开标志，数值与 Linux 一致
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OpenFlags: u32 {
        /// 只读
        const O_RDONLY    = 0o0;
        /// 只写
        const O_WRONLY    = 0o1;
        /// 读写
        const O_RDWR      = 0o2;
        /// 访问方式掩码
        const O_ACCMODE   = 0o3;
        /// 不存在时创建
        const O_CREAT     = 0o100;
        /// 与 `O_CREAT` 合用，已存在时失败
        const O_EXCL      = 0o200;
        /// 打开时截断为 0
        const O_TRUNC     = 0o1000;
        /// 每次写入前移到文件末尾
        const O_APPEND    = 0o2000;
    }
}

impl OpenFlags {
    /// 访问方式；`O_ACCMODE` 的保留值 3 按只读处理
    pub fn access(self) -> AccessMode {
        match self.bits() & Self::O_ACCMODE.bits() {
            1 => AccessMode::WriteOnly,
            2 => AccessMode::ReadWrite,
            _ => AccessMode::ReadOnly,
        }
    }
}
