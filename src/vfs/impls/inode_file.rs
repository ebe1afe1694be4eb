use std::io::SeekFrom;

use crate::sync::SpinLock;
use crate::vfs::{File, FsError, Inode, InodeMetadata, InodeType, OpenFlags};
use alloc::sync::Arc;

/// 对一个 inode 的一次打开
///
/// 把带偏移的会话调用翻译成 inode 的 `read_at`/`write_at`。
/// 同一个 `InodeFile` 可以被多个线程共享，偏移量由锁保护。
pub struct InodeFile {
    inode: Arc<dyn Inode>,
    pos: SpinLock<usize>,
    flags: OpenFlags,
}

impl InodeFile {
    /// 目录只能只读打开；可写且带 `O_TRUNC` 的打开把普通文件截断为 0
    pub fn open(inode: Arc<dyn Inode>, flags: OpenFlags) -> Result<Arc<Self>, FsError> {
        let access = flags.access();
        let inode_type = inode.metadata()?.inode_type;
        match inode_type {
            InodeType::Directory if access.can_write() => return Err(FsError::IsDirectory),
            InodeType::File if access.can_write() && flags.contains(OpenFlags::O_TRUNC) => {
                inode.truncate(0)?
            }
            _ => {}
        }

        Ok(Arc::new(Self {
            inode,
            pos: SpinLock::new(0),
            flags,
        }))
    }

    /// 底层 inode
    pub fn inode(&self) -> Arc<dyn Inode> {
        self.inode.clone()
    }
}

impl File for InodeFile {
    fn flags(&self) -> OpenFlags {
        self.flags
    }

    fn read(&self, buf: &mut [u8]) -> Result<usize, FsError> {
        if !self.readable() {
            return Err(FsError::BadFileDescriptor);
        }
        let mut pos = self.pos.lock();
        let n = self.inode.read_at(*pos, buf)?;
        *pos += n;
        Ok(n)
    }

    fn write(&self, buf: &[u8]) -> Result<usize, FsError> {
        if !self.writable() {
            return Err(FsError::BadFileDescriptor);
        }
        let mut pos = self.pos.lock();
        if self.flags.contains(OpenFlags::O_APPEND) {
            *pos = self.inode.metadata()?.size;
        }
        let n = self.inode.write_at(*pos, buf)?;
        *pos += n;
        Ok(n)
    }

    fn metadata(&self) -> Result<InodeMetadata, FsError> {
        self.inode.metadata()
    }

    fn seek(&self, target: SeekFrom) -> Result<usize, FsError> {
        let mut pos = self.pos.lock();
        let (base, delta) = match target {
            SeekFrom::Start(off) => {
                *pos = usize::try_from(off).map_err(|_| FsError::InvalidArgument)?;
                return Ok(*pos);
            }
            SeekFrom::Current(delta) => (*pos, delta),
            SeekFrom::End(delta) => (self.inode.metadata()?.size, delta),
        };
        let base = i64::try_from(base).map_err(|_| FsError::InvalidArgument)?;
        let next = base
            .checked_add(delta)
            .filter(|n| *n >= 0)
            .ok_or(FsError::InvalidArgument)?;
        *pos = usize::try_from(next).map_err(|_| FsError::InvalidArgument)?;
        Ok(*pos)
    }

    fn position(&self) -> usize {
        *self.pos.lock()
    }
}
