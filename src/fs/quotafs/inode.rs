//! quotafs Inode 实现
//!
//! Inode 的类型由 [`InodeKind`] 标签区分，每种类型的可用操作由能力表
//! [`InodeCaps`] 决定。普通文件和符号链接的数据放在各自的页缓存中。
//!
//! # 容量记账
//!
//! - 写路径 ([`QuotaInode::write_begin`] / [`QuotaInode::write_end`])：
//!   准入检查只读一次账本快照；页第一次变为 dirty 时记账一块。
//! - 删除路径：链接数降到 0 时，一次性摘除该 inode 的全部页并退还其中 dirty 的页数，
//!   每个 inode 最多执行一次。

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::sync::{Arc, Weak};
use alloc::vec::Vec;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::page_cache::{DirtyTransition, PageCache, PageGuard};
use super::quotafs::SuperBlock;
use crate::config::{NAME_MAX, PAGE_MASK, PAGE_SIZE};
use crate::sync::{Mutex, SpinLock};
use crate::{pr_debug, pr_info, pr_warn};
use crate::vfs::{DirEntry, FileMode, FsError, Inode, InodeMetadata, InodeType, TimeSpec};

bitflags::bitflags! {
    /// 每种 inode 类型支持的操作集合
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct InodeCaps: u8 {
        /// read_at
        const READ     = 1 << 0;
        /// write_at
        const WRITE    = 1 << 1;
        /// truncate
        const TRUNCATE = 1 << 2;
        /// lookup/create/mkdir/mknod/symlink/link/unlink/rmdir/rename/readdir
        const DIR_OPS  = 1 << 3;
        /// readlink
        const READLINK = 1 << 4;
    }
}

type Children = SpinLock<BTreeMap<String, Arc<QuotaInode>>>;

/// Inode 的类型及其类型相关状态
pub enum InodeKind {
    /// 普通文件
    Regular,
    /// 目录及其子项表
    Directory(Children),
    /// 符号链接，目标存放在数据页中
    Symlink,
    /// 设备、管道或套接字
    Special {
        /// 设备号
        rdev: u64,
    },
}

impl InodeKind {
    pub(super) fn for_type(inode_type: InodeType, rdev: u64) -> Self {
        match inode_type {
            InodeType::File => InodeKind::Regular,
            InodeType::Directory => InodeKind::Directory(SpinLock::new(BTreeMap::new())),
            InodeType::Symlink => InodeKind::Symlink,
            _ => InodeKind::Special { rdev },
        }
    }

    /// 能力表
    pub fn caps(&self) -> InodeCaps {
        match self {
            InodeKind::Regular => InodeCaps::READ | InodeCaps::WRITE | InodeCaps::TRUNCATE,
            InodeKind::Directory(_) => InodeCaps::DIR_OPS,
            InodeKind::Symlink => InodeCaps::READLINK,
            InodeKind::Special { .. } => InodeCaps::empty(),
        }
    }

    /// 是否拥有数据页
    fn has_mapping(&self) -> bool {
        matches!(self, InodeKind::Regular | InodeKind::Symlink)
    }
}

/// quotafs Inode
pub struct QuotaInode {
    /// Inode 元数据
    metadata: SpinLock<InodeMetadata>,

    /// 类型相关状态
    kind: InodeKind,

    /// 数据页
    mapping: PageCache,

    /// 当前记账在本 inode 名下的页数
    charged: AtomicUsize,

    /// 串行化同一 inode 上的 write_at 与 truncate
    io_lock: Mutex<()>,

    /// 删除路径是否已经执行过
    released: AtomicBool,

    /// 父目录（弱引用，避免循环引用）
    parent: SpinLock<Weak<QuotaInode>>,

    /// 指向自身的弱引用
    self_ref: Weak<QuotaInode>,

    /// 所属文件系统实例
    sb: Arc<SuperBlock>,
}

/// 一次单页写入的上下文，持有已加锁的目标页
///
/// 由 [`QuotaInode::write_begin`] 创建，交给 [`QuotaInode::write_end`] 消费；
/// 中途丢弃也会释放页锁。
pub struct WriteContext {
    pos: usize,
    len: usize,
    page: PageGuard,
}

impl WriteContext {
    /// 写入的文件偏移
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// 计划写入的字节数
    pub fn write_len(&self) -> usize {
        self.len
    }

    /// 目标页索引
    pub fn page_index(&self) -> usize {
        self.page.index()
    }

    /// 把 `src` 拷贝到页中的写入区域，最多 `write_len` 字节，返回拷贝的字节数
    pub fn copy_from(&mut self, src: &[u8]) -> usize {
        let n = src.len().min(self.len);
        self.page.write_bytes(self.pos & PAGE_MASK, &src[..n])
    }
}

fn validate_name(name: &str) -> Result<(), FsError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\0']) {
        return Err(FsError::InvalidArgument);
    }
    if name.len() > NAME_MAX {
        return Err(FsError::NameTooLong);
    }
    Ok(())
}

impl QuotaInode {
    pub(super) fn new(
        sb: Arc<SuperBlock>,
        metadata: InodeMetadata,
        kind: InodeKind,
    ) -> Arc<Self> {
        Arc::new_cyclic(|self_ref| Self {
            metadata: SpinLock::new(metadata),
            kind,
            mapping: PageCache::new(),
            charged: AtomicUsize::new(0),
            io_lock: Mutex::new(()),
            released: AtomicBool::new(false),
            parent: SpinLock::new(Weak::new()),
            self_ref: self_ref.clone(),
            sb,
        })
    }

    /// Inode 编号
    pub fn ino(&self) -> usize {
        self.metadata.lock().inode_no
    }

    /// 类型
    pub fn kind(&self) -> &InodeKind {
        &self.kind
    }

    /// 当前链接数
    pub fn nlinks(&self) -> usize {
        self.metadata.lock().nlinks
    }

    /// 当前记账在本 inode 名下的页数
    pub fn charged_pages(&self) -> usize {
        self.charged.load(Ordering::Relaxed)
    }

    /// 驻留的页数，包括尚未记账的页
    pub fn resident_pages(&self) -> usize {
        self.mapping.nr_pages()
    }

    fn is_dir(&self) -> bool {
        matches!(self.kind, InodeKind::Directory(_))
    }

    fn self_arc(&self) -> Result<Arc<QuotaInode>, FsError> {
        self.self_ref.upgrade().ok_or(FsError::IoError)
    }

    fn children(&self) -> Result<&Children, FsError> {
        match &self.kind {
            InodeKind::Directory(children) => Ok(children),
            _ => Err(FsError::NotDirectory),
        }
    }

    /// 检查能力表，缺失时给出对应的错误码
    fn require(&self, cap: InodeCaps) -> Result<(), FsError> {
        if self.kind.caps().contains(cap) {
            return Ok(());
        }
        Err(if cap == InodeCaps::DIR_OPS {
            FsError::NotDirectory
        } else if self.is_dir() {
            FsError::IsDirectory
        } else {
            FsError::InvalidArgument
        })
    }

    fn update_atime(&self) {
        self.metadata.lock().atime = TimeSpec::now();
    }

    fn update_mtime(&self) {
        let mut meta = self.metadata.lock();
        let now = TimeSpec::now();
        meta.mtime = now;
        meta.ctime = now;
    }

    fn inc_nlink(&self) {
        let mut meta = self.metadata.lock();
        meta.nlinks += 1;
        meta.ctime = TimeSpec::now();
    }

    // ========== 写路径 ==========

    /// 单页写入的第一步：准入检查并取得目标页
    ///
    /// `[pos, pos + len)` 必须落在同一页内。账本已满时返回 `NoMemory`，
    /// 此时不会触碰任何页。页尚未填充且本次不是整页写入时，
    /// 写入区域之外的部分先被清零。
    pub fn write_begin(&self, pos: usize, len: usize) -> Result<WriteContext, FsError> {
        if !self.kind.has_mapping() {
            self.require(InodeCaps::WRITE)?;
        }
        let from = pos & PAGE_MASK;
        if len == 0 || from + len > PAGE_SIZE {
            return Err(FsError::InvalidArgument);
        }

        let ledger = &self.sb.ledger;
        pr_debug!(
            "quotafs: write_begin - maxblks = {}, usedblks = {}",
            ledger.max_blocks(),
            ledger.used_blocks()
        );
        if let Err(e) = ledger.admit() {
            pr_info!(
                "quotafs: write_begin[ino {}] - insufficient space",
                self.ino()
            );
            return Err(e);
        }

        let mut page = self.mapping.grab_page(pos / PAGE_SIZE)?;
        if !page.is_uptodate() && len != PAGE_SIZE {
            page.zero_segments(0, from, from + len, PAGE_SIZE);
        }

        Ok(WriteContext { pos, len, page })
    }

    /// 单页写入的第二步：收尾并记账
    ///
    /// 调用者已向页中拷贝了 `copied` 字节。短拷贝留下的空隙被清零，
    /// 文件大小按需扩展；页第一次变为 dirty 时记账一块。返回 `copied`。
    pub fn write_end(&self, ctx: WriteContext, copied: usize) -> usize {
        let WriteContext { pos, len, mut page } = ctx;
        let copied = copied.min(len);
        let from = pos & PAGE_MASK;

        if copied < len {
            page.zero_range(from + copied, len - copied);
        }

        if !page.is_uptodate() {
            page.set_uptodate();
        }

        let last_pos = pos + copied;
        {
            let mut meta = self.metadata.lock();
            if last_pos > meta.size {
                meta.size = last_pos;
            }
        }

        match page.mark_dirty() {
            DirtyTransition::NewlyDirty => {
                self.sb.ledger.charge(1);
                self.charged.fetch_add(1, Ordering::Relaxed);
                pr_debug!(
                    "quotafs: write_end[ino {}] - page {} set to dirty",
                    self.ino(),
                    page.index()
                );
            }
            DirtyTransition::AlreadyDirty => {}
            DirtyTransition::Failed => {
                pr_debug!(
                    "quotafs: write_end[ino {}] - page {} detached, not charged",
                    self.ino(),
                    page.index()
                );
            }
        }

        drop(page);
        copied
    }

    /// 逐页执行 write_begin/拷贝/write_end
    ///
    /// 后续页被拒绝时返回已写入的字节数；第一页就被拒绝时返回错误。
    fn perform_write(&self, offset: usize, buf: &[u8]) -> Result<usize, FsError> {
        offset
            .checked_add(buf.len())
            .ok_or(FsError::InvalidArgument)?;

        let mut written = 0;
        while written < buf.len() {
            let pos = offset + written;
            let len = (PAGE_SIZE - (pos & PAGE_MASK)).min(buf.len() - written);

            let mut ctx = match self.write_begin(pos, len) {
                Ok(ctx) => ctx,
                Err(e) if written == 0 => return Err(e),
                Err(_) => break,
            };
            let copied = ctx.copy_from(&buf[written..written + len]);
            written += self.write_end(ctx, copied);
        }

        Ok(written)
    }

    // ========== 删除路径 ==========

    /// 减少一个链接；降到 0 时执行删除记账
    fn drop_link(&self) {
        let remaining = {
            let mut meta = self.metadata.lock();
            meta.ctime = TimeSpec::now();
            if meta.nlinks == 0 {
                pr_warn!(
                    "quotafs: drop_nlink on inode {} whose link count is already zero",
                    meta.inode_no
                );
                return;
            }
            meta.nlinks -= 1;
            meta.nlinks
        };

        if remaining == 0 {
            self.release_pages();
        }
    }

    /// 摘除全部页并退还其中已记账的块，每个 inode 只执行一次
    fn release_pages(&self) {
        if self.released.swap(true, Ordering::AcqRel) {
            return;
        }
        let dropped = self.mapping.discard_all();
        self.charged.fetch_sub(dropped, Ordering::Relaxed);
        self.sb.ledger.refund(dropped);
        pr_info!(
            "quotafs: unlink[ino {}] - final delete, {} blocks refunded",
            self.ino(),
            dropped
        );
    }

    /// 在目录中创建一个子 inode 并挂到 `name` 下
    fn create_child(
        &self,
        name: &str,
        mode: FileMode,
        dev: u64,
    ) -> Result<Arc<QuotaInode>, FsError> {
        let children = self.children()?;
        validate_name(name)?;

        let _ns = self.sb.dir_lock.lock();
        let mut children = children.lock();
        if children.contains_key(name) {
            return Err(FsError::AlreadyExists);
        }

        let inode = self.sb.new_inode(Some(self), mode, dev)?;
        *inode.parent.lock() = self.self_ref.clone();
        children.insert(name.to_string(), inode.clone());
        drop(children);

        if inode.is_dir() {
            self.inc_nlink();
        }
        self.update_mtime();
        Ok(inode)
    }

    /// `self` 是否位于 `ancestor` 之下（含自身）
    fn is_descendant_of(&self, ancestor: &QuotaInode) -> bool {
        if core::ptr::eq(self, ancestor) {
            return true;
        }
        let mut cur = self.parent.lock().upgrade();
        while let Some(inode) = cur {
            if core::ptr::eq(Arc::as_ptr(&inode), ancestor) {
                return true;
            }
            cur = inode.parent.lock().upgrade();
        }
        false
    }

    #[cfg(test)]
    pub(crate) fn force_nlinks(&self, nlinks: usize) {
        self.metadata.lock().nlinks = nlinks;
    }
}

impl Drop for QuotaInode {
    fn drop(&mut self) {
        // 最终删除后仍被打开写入的页，或卸载时仍有链接的文件的页
        let leftover = self.mapping.discard_all();
        if leftover > 0 {
            self.sb.ledger.refund(leftover);
        }

        let meta = self.metadata.get_mut().clone();
        self.sb.hooks.on_reclaim(&meta);
        self.sb.inode_released();
    }
}

impl Inode for QuotaInode {
    fn metadata(&self) -> Result<InodeMetadata, FsError> {
        let mut meta = self.metadata.lock().clone();
        meta.blocks = self.charged_pages();
        Ok(meta)
    }

    fn read_at(&self, offset: usize, buf: &mut [u8]) -> Result<usize, FsError> {
        self.require(InodeCaps::READ)?;

        let size = self.metadata.lock().size;
        if offset >= size {
            return Ok(0);
        }
        let read_size = buf.len().min(size - offset);

        let mut bytes_read = 0;
        while bytes_read < read_size {
            let pos = offset + bytes_read;
            let len = (PAGE_SIZE - (pos & PAGE_MASK)).min(read_size - bytes_read);
            bytes_read += self.mapping.read_page(
                pos / PAGE_SIZE,
                pos & PAGE_MASK,
                &mut buf[bytes_read..bytes_read + len],
            );
        }

        self.update_atime();
        Ok(bytes_read)
    }

    fn write_at(&self, offset: usize, buf: &[u8]) -> Result<usize, FsError> {
        self.require(InodeCaps::WRITE)?;

        let _io = self.io_lock.lock();
        let written = self.perform_write(offset, buf)?;
        if written > 0 {
            self.update_mtime();
        }
        Ok(written)
    }

    fn lookup(&self, name: &str) -> Result<Arc<dyn Inode>, FsError> {
        let children = self.children()?;

        match name {
            "." => Ok(self.self_arc()? as Arc<dyn Inode>),
            ".." => {
                // 根目录的 ".." 指向自己
                let parent = self.parent.lock().upgrade();
                match parent {
                    Some(parent) => Ok(parent as Arc<dyn Inode>),
                    None => Ok(self.self_arc()? as Arc<dyn Inode>),
                }
            }
            _ => children
                .lock()
                .get(name)
                .cloned()
                .map(|inode| inode as Arc<dyn Inode>)
                .ok_or(FsError::NotFound),
        }
    }

    fn create(&self, name: &str, mode: FileMode) -> Result<Arc<dyn Inode>, FsError> {
        let inode = self.create_child(name, FileMode::S_IFREG | mode.permissions(), 0)?;
        Ok(inode as Arc<dyn Inode>)
    }

    fn mkdir(&self, name: &str, mode: FileMode) -> Result<Arc<dyn Inode>, FsError> {
        let inode = self.create_child(name, FileMode::S_IFDIR | mode.permissions(), 0)?;
        Ok(inode as Arc<dyn Inode>)
    }

    fn mknod(&self, name: &str, mode: FileMode, dev: u64) -> Result<Arc<dyn Inode>, FsError> {
        // 没有类型位时按普通文件处理
        let inode_type = InodeType::from_mode(mode).unwrap_or(InodeType::File);
        if matches!(inode_type, InodeType::Directory | InodeType::Symlink) {
            return Err(FsError::InvalidArgument);
        }
        let dev = if inode_type.is_special() { dev } else { 0 };
        let inode = self.create_child(name, inode_type.type_bits() | mode.permissions(), dev)?;
        Ok(inode as Arc<dyn Inode>)
    }

    fn symlink(&self, name: &str, target: &str) -> Result<Arc<dyn Inode>, FsError> {
        let children = self.children()?;
        validate_name(name)?;
        if target.is_empty() {
            return Err(FsError::NotFound);
        }
        if target.len() >= PAGE_SIZE {
            return Err(FsError::NameTooLong);
        }

        let _ns = self.sb.dir_lock.lock();
        let mut children = children.lock();
        if children.contains_key(name) {
            return Err(FsError::AlreadyExists);
        }

        let inode = self.sb.new_inode(
            Some(self),
            FileMode::S_IFLNK | FileMode::from_bits_truncate(0o777),
            0,
        )?;
        // 目标路径经由写路径存入第 0 页，和文件数据一样记账；
        // 写入被拒绝时 inode 随之被丢弃
        inode.perform_write(0, target.as_bytes())?;

        *inode.parent.lock() = self.self_ref.clone();
        children.insert(name.to_string(), inode.clone());
        drop(children);

        self.update_mtime();
        Ok(inode as Arc<dyn Inode>)
    }

    fn link(&self, name: &str, target: &Arc<dyn Inode>) -> Result<(), FsError> {
        let children = self.children()?;
        validate_name(name)?;

        let target = target
            .as_any()
            .downcast_ref::<QuotaInode>()
            .ok_or(FsError::InvalidArgument)?;
        if !Arc::ptr_eq(&target.sb, &self.sb) {
            return Err(FsError::InvalidArgument);
        }
        if target.is_dir() {
            return Err(FsError::IsDirectory);
        }
        let target = target.self_arc()?;

        let _ns = self.sb.dir_lock.lock();
        let mut children = children.lock();
        if children.contains_key(name) {
            return Err(FsError::AlreadyExists);
        }
        {
            let mut meta = target.metadata.lock();
            if meta.nlinks == 0 {
                return Err(FsError::NotFound);
            }
            meta.nlinks += 1;
            meta.ctime = TimeSpec::now();
        }
        children.insert(name.to_string(), target);
        drop(children);

        self.update_mtime();
        Ok(())
    }

    fn unlink(&self, name: &str) -> Result<(), FsError> {
        let children = self.children()?;

        let child = {
            let _ns = self.sb.dir_lock.lock();
            let mut children = children.lock();
            let child = children.get(name).ok_or(FsError::NotFound)?;
            if child.is_dir() {
                return Err(FsError::IsDirectory);
            }
            children.remove(name).ok_or(FsError::NotFound)?
        };

        self.update_mtime();
        child.drop_link();
        Ok(())
    }

    fn rmdir(&self, name: &str) -> Result<(), FsError> {
        let children = self.children()?;

        let child = {
            let _ns = self.sb.dir_lock.lock();
            let mut children = children.lock();
            let child = children.get(name).cloned().ok_or(FsError::NotFound)?;
            if !child.children()?.lock().is_empty() {
                return Err(FsError::DirectoryNotEmpty);
            }
            children.remove(name);
            child
        };

        // 目录项本身和 "."，以及子目录的 ".." 对父目录的引用
        child.drop_link();
        child.drop_link();
        self.drop_link();
        self.update_mtime();
        Ok(())
    }

    fn rename(
        &self,
        old_name: &str,
        new_parent: &Arc<dyn Inode>,
        new_name: &str,
    ) -> Result<(), FsError> {
        let old_children = self.children()?;
        let new_dir = new_parent
            .as_any()
            .downcast_ref::<QuotaInode>()
            .ok_or(FsError::InvalidArgument)?;
        if !Arc::ptr_eq(&new_dir.sb, &self.sb) {
            return Err(FsError::InvalidArgument);
        }
        let new_children = new_dir.children()?;
        validate_name(old_name)?;
        validate_name(new_name)?;

        let same_dir = core::ptr::eq(self, new_dir);

        let (src, replaced) = {
            let _ns = self.sb.dir_lock.lock();

            let src = old_children
                .lock()
                .get(old_name)
                .cloned()
                .ok_or(FsError::NotFound)?;
            let existing = new_children.lock().get(new_name).cloned();

            if let Some(target) = &existing {
                if Arc::ptr_eq(target, &src) {
                    return Ok(());
                }
                match (src.is_dir(), target.is_dir()) {
                    (true, false) => return Err(FsError::NotDirectory),
                    (false, true) => return Err(FsError::IsDirectory),
                    (true, true) => {
                        if !target.children()?.lock().is_empty() {
                            return Err(FsError::DirectoryNotEmpty);
                        }
                    }
                    (false, false) => {}
                }
            }

            // 目录不能移动到自己的子树中
            if src.is_dir() && new_dir.is_descendant_of(&src) {
                return Err(FsError::InvalidArgument);
            }

            old_children.lock().remove(old_name);
            new_children.lock().insert(new_name.to_string(), src.clone());

            if src.is_dir() && !same_dir {
                *src.parent.lock() = new_dir.self_ref.clone();
                self.metadata.lock().nlinks -= 1;
                new_dir.inc_nlink();
            }
            (src, existing)
        };

        src.metadata.lock().ctime = TimeSpec::now();
        self.update_mtime();
        if !same_dir {
            new_dir.update_mtime();
        }

        // 被覆盖的目标走删除路径
        if let Some(victim) = replaced {
            if victim.is_dir() {
                victim.drop_link();
                victim.drop_link();
                new_dir.drop_link();
            } else {
                victim.drop_link();
            }
        }
        Ok(())
    }

    fn readdir(&self) -> Result<Vec<DirEntry>, FsError> {
        let children = self.children()?;
        let inode_no = self.ino();

        let parent_inode_no = match self.parent.lock().upgrade() {
            Some(parent) => parent.ino(),
            None => inode_no, // 根目录的 ".." 指向自己
        };

        let mut entries = Vec::new();
        entries.push(DirEntry {
            name: String::from("."),
            inode_no,
            inode_type: InodeType::Directory,
        });
        entries.push(DirEntry {
            name: String::from(".."),
            inode_no: parent_inode_no,
            inode_type: InodeType::Directory,
        });

        for (name, child) in children.lock().iter() {
            let child_meta = child.metadata.lock();
            entries.push(DirEntry {
                name: name.clone(),
                inode_no: child_meta.inode_no,
                inode_type: child_meta.inode_type,
            });
        }

        Ok(entries)
    }

    fn readlink(&self) -> Result<String, FsError> {
        self.require(InodeCaps::READLINK)?;

        let size = self.metadata.lock().size;
        let mut buf = alloc::vec![0u8; size];
        let mut read = 0;
        while read < size {
            read += self
                .mapping
                .read_page(read / PAGE_SIZE, read & PAGE_MASK, &mut buf[read..]);
        }

        self.update_atime();
        String::from_utf8(buf).map_err(|_| FsError::InvalidArgument)
    }

    fn truncate(&self, new_size: usize) -> Result<(), FsError> {
        self.require(InodeCaps::TRUNCATE)?;

        let _io = self.io_lock.lock();
        let old_size = {
            let mut meta = self.metadata.lock();
            let old_size = meta.size;
            meta.size = new_size;
            old_size
        };

        if new_size < old_size {
            // 丢弃的页如果已记账则退还
            let first_dropped = new_size.div_ceil(PAGE_SIZE);
            let dropped = self.mapping.discard_from(first_dropped);
            self.charged.fetch_sub(dropped, Ordering::Relaxed);
            self.sb.ledger.refund(dropped);

            if new_size & PAGE_MASK != 0 {
                self.mapping
                    .zero_page_tail(new_size / PAGE_SIZE, new_size & PAGE_MASK);
            }
        }

        self.update_mtime();
        Ok(())
    }

    fn set_times(&self, atime: Option<TimeSpec>, mtime: Option<TimeSpec>) -> Result<(), FsError> {
        let mut metadata = self.metadata.lock();
        if let Some(atime) = atime {
            metadata.atime = atime;
        }
        if let Some(mtime) = mtime {
            metadata.mtime = mtime;
        }
        metadata.ctime = TimeSpec::now();
        Ok(())
    }

    fn chmod(&self, mode: FileMode) -> Result<(), FsError> {
        let mut metadata = self.metadata.lock();
        metadata.mode = (metadata.mode & FileMode::S_IFMT) | mode.permissions();
        metadata.ctime = TimeSpec::now();
        Ok(())
    }

    fn sync(&self) -> Result<(), FsError> {
        // 内存文件系统，无需同步
        Ok(())
    }

    fn as_any(&self) -> &dyn core::any::Any {
        self
    }
}
