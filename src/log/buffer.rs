//! 日志环形缓冲区
//!
//! 固定容量，写满后丢弃最旧的条目并计数。

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use super::config::LOG_BUFFER_CAPACITY;
use super::entry::LogEntry;
use crate::sync::SpinLock;

struct Ring {
    entries: VecDeque<LogEntry>,
    next_seq: usize,
    dropped: usize,
}

/// 定长环形缓冲区，满时覆盖最旧的条目
pub struct LogBuffer {
    ring: SpinLock<Ring>,
}

impl LogBuffer {
    /// 空缓冲区，可用于 `static`
    pub const fn new() -> Self {
        Self {
            ring: SpinLock::new(Ring {
                entries: VecDeque::new(),
                next_seq: 0,
                dropped: 0,
            }),
        }
    }

    /// 追加一条记录并分配序列号
    pub fn push(&self, mut entry: LogEntry) {
        let mut ring = self.ring.lock();
        entry.set_seq(ring.next_seq);
        ring.next_seq += 1;
        if ring.entries.len() == LOG_BUFFER_CAPACITY {
            ring.entries.pop_front();
            ring.dropped += 1;
        }
        ring.entries.push_back(entry);
    }

    /// 取出最旧的一条
    pub fn pop(&self) -> Option<LogEntry> {
        self.ring.lock().entries.pop_front()
    }

    /// 按序列号查找，不取出
    pub fn peek(&self, seq: usize) -> Option<LogEntry> {
        let ring = self.ring.lock();
        let first = ring.entries.front()?.seq();
        ring.entries.get(seq.checked_sub(first)?).cloned()
    }

    /// 复制出满足条件的条目，不取出
    pub fn collect<F>(&self, mut keep: F) -> Vec<LogEntry>
    where
        F: FnMut(&LogEntry) -> bool,
    {
        self.ring
            .lock()
            .entries
            .iter()
            .filter(|e| keep(e))
            .cloned()
            .collect()
    }

    /// 缓冲区中的条目数
    pub fn len(&self) -> usize {
        self.ring.lock().entries.len()
    }

    /// 缓冲区是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 因写满而被覆盖的条目数
    pub fn dropped(&self) -> usize {
        self.ring.lock().dropped
    }

    /// 下一条记录将得到的序列号
    pub fn next_seq(&self) -> usize {
        self.ring.lock().next_seq
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}
