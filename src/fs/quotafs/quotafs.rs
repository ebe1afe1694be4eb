//! quotafs 文件系统实例

use alloc::string::String;
use alloc::sync::Arc;
use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use super::hooks::{InodeHooks, NoopHooks};
use super::inode::{InodeKind, QuotaInode};
use super::ledger::{CapacityLedger, LedgerUsage};
use super::options::MountOptions;
use crate::config::{NAME_MAX, PAGE_SIZE, QUOTAFS_MAGIC};
use crate::sync::Mutex;
use crate::{pr_debug, pr_info};
use crate::vfs::{FileMode, FileSystem, FsError, Inode, InodeMetadata, InodeType, StatFs, TimeSpec};

static NEXT_FSID: AtomicU64 = AtomicU64::new(1);

/// 一个文件系统实例的共享状态，所有 inode 都持有它的引用
pub struct SuperBlock {
    /// 容量账本
    pub(super) ledger: CapacityLedger,

    /// 生命周期钩子
    pub(super) hooks: Arc<dyn InodeHooks>,

    /// 挂载选项
    pub(super) options: MountOptions,

    /// 串行化目录树的修改（create/link/unlink/rmdir/rename）
    pub(super) dir_lock: Mutex<()>,

    /// 下一个 inode 编号
    next_ino: AtomicUsize,

    /// 尚未回收的 inode 数
    live_inodes: AtomicUsize,

    fsid: u64,
}

impl SuperBlock {
    fn new(options: MountOptions, hooks: Arc<dyn InodeHooks>) -> Self {
        Self {
            ledger: CapacityLedger::new(options.max_size, PAGE_SIZE),
            hooks,
            options,
            dir_lock: Mutex::new(()),
            next_ino: AtomicUsize::new(1),
            live_inodes: AtomicUsize::new(0),
            fsid: NEXT_FSID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// 占用一个 inode 名额，达到 `nr_inodes` 上限时返回 `NoSpace`
    fn reserve_inode(&self) -> Result<(), FsError> {
        let limit = self.options.nr_inodes;
        if limit == 0 {
            self.live_inodes.fetch_add(1, Ordering::AcqRel);
            return Ok(());
        }
        self.live_inodes
            .fetch_update(Ordering::AcqRel, Ordering::Relaxed, |live| {
                (live < limit).then_some(live + 1)
            })
            .map(|_| ())
            .map_err(|_| FsError::NoSpace)
    }

    /// inode 被回收时归还名额
    pub(super) fn inode_released(&self) {
        self.live_inodes.fetch_sub(1, Ordering::AcqRel);
    }

    /// 分配并初始化一个新 inode
    ///
    /// 属主取挂载选项中的 uid/gid；父目录带 setgid 位时继承父目录的组，
    /// 新目录同时继承 setgid 位。初始化完成后触发 `on_create`。
    pub(super) fn new_inode(
        self: &Arc<Self>,
        dir: Option<&QuotaInode>,
        mode: FileMode,
        dev: u64,
    ) -> Result<Arc<QuotaInode>, FsError> {
        let inode_type = InodeType::from_mode(mode).ok_or(FsError::InvalidArgument)?;
        self.reserve_inode()?;

        let mut mode = mode;
        let mut gid = self.options.gid;
        if let Some(dir) = dir {
            let dir_meta = dir.metadata()?;
            if dir_meta.mode.contains(FileMode::S_ISGID) {
                gid = dir_meta.gid;
                if inode_type == InodeType::Directory {
                    mode |= FileMode::S_ISGID;
                }
            }
        }

        let ino = self.next_ino.fetch_add(1, Ordering::Relaxed);
        let now = TimeSpec::now();
        let metadata = InodeMetadata {
            inode_no: ino,
            inode_type,
            mode,
            uid: self.options.uid,
            gid,
            size: 0,
            atime: now,
            mtime: now,
            ctime: now,
            nlinks: if inode_type == InodeType::Directory { 2 } else { 1 },
            blocks: 0,
            rdev: if inode_type.is_special() { dev } else { 0 },
        };

        let inode = QuotaInode::new(
            self.clone(),
            metadata.clone(),
            InodeKind::for_type(inode_type, dev),
        );
        pr_debug!("quotafs: new inode {} ({:?})", ino, inode_type);
        self.hooks.on_create(&metadata);
        Ok(inode)
    }
}

/// quotafs 文件系统
pub struct QuotaFs {
    sb: Arc<SuperBlock>,
    root: Arc<QuotaInode>,
}

impl QuotaFs {
    /// 使用默认（空）钩子创建文件系统
    pub fn new(options: MountOptions) -> Result<Arc<Self>, FsError> {
        Self::with_hooks(options, Arc::new(NoopHooks))
    }

    /// 创建文件系统并注入生命周期钩子
    pub fn with_hooks(
        options: MountOptions,
        hooks: Arc<dyn InodeHooks>,
    ) -> Result<Arc<Self>, FsError> {
        let root_mode = FileMode::S_IFDIR | options.mode.permissions();
        let sb = Arc::new(SuperBlock::new(options, hooks));
        let root = sb.new_inode(None, root_mode, 0)?;

        pr_info!(
            "quotafs: created instance {} with {} blocks of {} bytes",
            sb.fsid,
            sb.ledger.max_blocks(),
            sb.ledger.block_size()
        );
        Ok(Arc::new(Self { sb, root }))
    }

    /// 解析挂载数据并创建文件系统
    pub fn from_data(data: &str) -> Result<Arc<Self>, FsError> {
        Self::new(MountOptions::parse(data)?)
    }

    /// 根目录
    pub fn root(&self) -> Arc<QuotaInode> {
        self.root.clone()
    }

    /// 容量账本
    pub fn ledger(&self) -> &CapacityLedger {
        &self.sb.ledger
    }

    /// 截断后的容量快照
    pub fn usage(&self) -> LedgerUsage {
        self.sb.ledger.usage()
    }

    /// 挂载选项
    pub fn options(&self) -> &MountOptions {
        &self.sb.options
    }

    /// 尚未回收的 inode 数（包括根目录）
    pub fn live_inodes(&self) -> usize {
        self.sb.live_inodes.load(Ordering::Acquire)
    }
}

impl FileSystem for QuotaFs {
    fn fs_type(&self) -> &'static str {
        "quotafs"
    }

    fn root_inode(&self) -> Arc<dyn Inode> {
        self.root.clone() as Arc<dyn Inode>
    }

    fn sync(&self) -> Result<(), FsError> {
        // 完全在内存中，无需同步
        Ok(())
    }

    fn statfs(&self) -> Result<StatFs, FsError> {
        let usage = self.sb.ledger.usage();
        pr_debug!(
            "quotafs: statfs - maxblks = {}, freeblks = {}",
            usage.total,
            usage.available
        );

        let limit = self.sb.options.nr_inodes;
        let (total_inodes, free_inodes) = if limit == 0 {
            (0, 0)
        } else {
            (limit, limit.saturating_sub(self.live_inodes()))
        };

        Ok(StatFs {
            magic: QUOTAFS_MAGIC,
            block_size: self.sb.ledger.block_size(),
            total_blocks: usage.total,
            free_blocks: usage.available,
            available_blocks: usage.available,
            total_inodes,
            free_inodes,
            fsid: self.sb.fsid,
            max_filename_len: NAME_MAX,
        })
    }

    fn umount(&self) -> Result<(), FsError> {
        // 页和 inode 随最后一个引用释放，在 Drop 中退还
        pr_info!(
            "quotafs: unmounting instance {}, {} blocks still charged",
            self.sb.fsid,
            self.sb.ledger.used_blocks()
        );
        Ok(())
    }

    fn show_options(&self) -> String {
        self.sb.options.to_option_string()
    }
}
