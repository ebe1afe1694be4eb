//! 每个 inode 的页缓存
//!
//! 页按索引稀疏存放，不存在的页即“absent”状态。每一页有自己的锁，
//! `grab_page` 返回已加锁的 [`PageGuard`]，守卫 drop 时自动解锁。
//! 页在整个生命周期内只会 Clean → Dirty 单向变化，直到被 `discard_*` 摘除。

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::config::PAGE_SIZE;
use crate::sync::{ArcSpinLockGuard, SpinLock};
use crate::vfs::FsError;

/// 页的记账状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    /// 已分配但尚未记账
    Clean,
    /// 已记账（恰好一次）
    Dirty,
}

/// `mark_dirty` 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirtyTransition {
    /// 页原本就是 dirty，不应再次记账
    AlreadyDirty,
    /// 页第一次变为 dirty，调用者应记账一块
    NewlyDirty,
    /// 页已经从所属 inode 上摘除，状态未改变
    Failed,
}

/// 一个物理页
pub struct PageFrame {
    data: Box<[u8]>,
    uptodate: bool,
    state: PageState,
    /// 已被 discard 摘除；持有旧引用的写者必须重新查找
    detached: bool,
}

impl PageFrame {
    fn alloc() -> Result<Self, FsError> {
        let mut data = Vec::new();
        data.try_reserve_exact(PAGE_SIZE)
            .map_err(|_| FsError::NoMemory)?;
        data.resize(PAGE_SIZE, 0);
        Ok(Self {
            data: data.into_boxed_slice(),
            uptodate: false,
            state: PageState::Clean,
            detached: false,
        })
    }
}

type Page = SpinLock<PageFrame>;

/// 已加锁的页
pub struct PageGuard {
    index: usize,
    frame: ArcSpinLockGuard<PageFrame>,
}

impl PageGuard {
    /// 页索引
    pub fn index(&self) -> usize {
        self.index
    }

    /// 页内容是否已完整填充
    pub fn is_uptodate(&self) -> bool {
        self.frame.uptodate
    }

    /// 标记页内容已完整填充
    pub fn set_uptodate(&mut self) {
        self.frame.uptodate = true;
    }

    /// 当前记账状态
    pub fn state(&self) -> PageState {
        self.frame.state
    }

    /// 把 `[start1, end1)` 和 `[start2, end2)` 清零
    pub fn zero_segments(&mut self, start1: usize, end1: usize, start2: usize, end2: usize) {
        self.frame.data[start1..end1].fill(0);
        self.frame.data[start2..end2].fill(0);
    }

    /// 把从 `from` 开始的 `len` 字节清零
    pub fn zero_range(&mut self, from: usize, len: usize) {
        self.frame.data[from..from + len].fill(0);
    }

    /// 从页内 `offset` 处写入，返回写入的字节数
    pub fn write_bytes(&mut self, offset: usize, src: &[u8]) -> usize {
        let len = src.len().min(PAGE_SIZE - offset);
        self.frame.data[offset..offset + len].copy_from_slice(&src[..len]);
        len
    }

    /// 从页内 `offset` 处读出，返回读出的字节数
    pub fn read_bytes(&self, offset: usize, dst: &mut [u8]) -> usize {
        let len = dst.len().min(PAGE_SIZE - offset);
        dst[..len].copy_from_slice(&self.frame.data[offset..offset + len]);
        len
    }

    /// 尝试把页标记为 dirty，并报告之前的状态
    pub fn mark_dirty(&mut self) -> DirtyTransition {
        if self.frame.detached {
            return DirtyTransition::Failed;
        }
        match self.frame.state {
            PageState::Dirty => DirtyTransition::AlreadyDirty,
            PageState::Clean => {
                self.frame.state = PageState::Dirty;
                DirtyTransition::NewlyDirty
            }
        }
    }
}

/// 一个 inode 的全部数据页
pub struct PageCache {
    pages: SpinLock<HashMap<usize, Arc<Page>>>,
}

impl PageCache {
    /// 空页缓存
    pub fn new() -> Self {
        Self {
            pages: SpinLock::new(HashMap::new()),
        }
    }

    /// 查找或分配第 `index` 页，返回加锁后的页
    ///
    /// 如果拿到的页在加锁前被并发的 discard 摘除，则重新查找。
    pub fn grab_page(&self, index: usize) -> Result<PageGuard, FsError> {
        loop {
            let page = {
                let mut pages = self.pages.lock();
                match pages.get(&index) {
                    Some(page) => page.clone(),
                    None => {
                        let page = Arc::new(SpinLock::new(PageFrame::alloc()?));
                        pages.insert(index, page.clone());
                        page
                    }
                }
            };

            let frame = page.lock_arc();
            if frame.detached {
                continue;
            }
            return Ok(PageGuard { index, frame });
        }
    }

    /// 读取第 `index` 页中从 `offset` 开始的数据
    ///
    /// 页不存在时按空洞处理，填充 0。
    pub fn read_page(&self, index: usize, offset: usize, buf: &mut [u8]) -> usize {
        let page = self.pages.lock().get(&index).cloned();
        let len = buf.len().min(PAGE_SIZE - offset);
        match page {
            Some(page) => {
                let frame = page.lock();
                if frame.detached {
                    buf[..len].fill(0);
                } else {
                    buf[..len].copy_from_slice(&frame.data[offset..offset + len]);
                }
            }
            None => buf[..len].fill(0),
        }
        len
    }

    /// 把已存在的第 `index` 页从 `from` 到页尾清零（截断时使用）
    pub fn zero_page_tail(&self, index: usize, from: usize) {
        let page = self.pages.lock().get(&index).cloned();
        if let Some(page) = page {
            let mut frame = page.lock();
            if !frame.detached {
                frame.data[from..].fill(0);
            }
        }
    }

    /// 当前驻留的页数（包括尚未记账的页）
    pub fn nr_pages(&self) -> usize {
        self.pages.lock().len()
    }

    /// 当前 dirty 的页数
    pub fn nr_dirty(&self) -> usize {
        let pages: Vec<Arc<Page>> = self.pages.lock().values().cloned().collect();
        pages
            .iter()
            .filter(|page| page.lock().state == PageState::Dirty)
            .count()
    }

    /// 摘除全部页，返回其中 dirty 的页数
    pub fn discard_all(&self) -> usize {
        self.discard_from(0)
    }

    /// 摘除索引不小于 `first_index` 的页，返回其中 dirty 的页数
    ///
    /// 整个过程持有页表锁：统计与摘除对其他查找者是一个不可分的动作。
    /// 正在 write_begin 与 write_end 之间的写者会先完成记账，然后被统计到。
    pub fn discard_from(&self, first_index: usize) -> usize {
        let mut pages = self.pages.lock();
        let victims: Vec<usize> = pages
            .keys()
            .copied()
            .filter(|&idx| idx >= first_index)
            .collect();

        let mut dirty = 0;
        for idx in victims {
            if let Some(page) = pages.remove(&idx) {
                let mut frame = page.lock();
                frame.detached = true;
                if frame.state == PageState::Dirty {
                    dirty += 1;
                }
            }
        }
        dirty
    }
}

impl Default for PageCache {
    fn default() -> Self {
        Self::new()
    }
}
