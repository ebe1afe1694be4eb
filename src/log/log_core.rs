//! 日志核心
//!
//! 环形缓冲区加两级过滤。全局实例由 `pr_*` 宏使用，测试可以各自构造独立实例。

use super::buffer::LogBuffer;
use super::config::{DEFAULT_CONSOLE_LEVEL, DEFAULT_LOG_LEVEL};
use super::context;
use super::entry::LogEntry;
use super::level::LogLevel;
use alloc::vec::Vec;
use core::fmt;
use core::sync::atomic::{AtomicU8, Ordering};

/// 日志系统的全部状态：缓冲区与两级过滤阈值
pub struct LogCore {
    ring: LogBuffer,
    /// 达到此级别才进入缓冲区
    record_level: AtomicU8,
    /// 达到此级别同时打印到 stderr
    console_level: AtomicU8,
}

impl LogCore {
    /// 默认级别的实例，可用于 `static`
    pub const fn with_defaults() -> Self {
        Self::with_levels(DEFAULT_LOG_LEVEL, DEFAULT_CONSOLE_LEVEL)
    }

    /// 指定记录级别和控制台级别
    pub const fn with_levels(record: LogLevel, console: LogLevel) -> Self {
        Self {
            ring: LogBuffer::new(),
            record_level: AtomicU8::new(record as u8),
            console_level: AtomicU8::new(console as u8),
        }
    }

    /// 记录一条日志，`target` 通常是调用处的 `module_path!()`
    pub fn record(&self, level: LogLevel, target: &'static str, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        let entry = LogEntry::capture(level, target, context::current(), args);
        if level as u8 <= self.console_level.load(Ordering::Relaxed) {
            print_to_console(&entry);
        }
        self.ring.push(entry);
    }

    /// `level` 是否达到记录级别
    #[inline(always)]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level as u8 <= self.record_level.load(Ordering::Relaxed)
    }

    /// 取出最旧的一条
    pub fn pop(&self) -> Option<LogEntry> {
        self.ring.pop()
    }

    /// 按序列号查找，不取出
    pub fn peek(&self, seq: usize) -> Option<LogEntry> {
        self.ring.peek(seq)
    }

    /// 缓冲区中全部条目，不取出
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.ring.collect(|_| true)
    }

    /// 来自 `prefix` 模块（含子模块）的条目，不取出
    pub fn entries_from(&self, prefix: &str) -> Vec<LogEntry> {
        self.ring.collect(|e| target_matches(e.target(), prefix))
    }

    /// 缓冲区中的条目数
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// 缓冲区是否为空
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// 下一条记录将得到的序列号
    pub fn next_seq(&self) -> usize {
        self.ring.next_seq()
    }

    /// 因缓冲区满而丢弃的条目数
    pub fn dropped(&self) -> usize {
        self.ring.dropped()
    }

    /// 当前记录级别
    pub fn record_level(&self) -> LogLevel {
        LogLevel::from_u8(self.record_level.load(Ordering::Acquire))
    }

    /// 设置记录级别
    pub fn set_record_level(&self, level: LogLevel) {
        self.record_level.store(level as u8, Ordering::Release);
    }

    /// 按名称或数字设置记录级别；无法解析时保持不变并返回 `None`
    pub fn set_record_level_by_name(&self, name: &str) -> Option<LogLevel> {
        let level = LogLevel::from_name(name)?;
        self.set_record_level(level);
        Some(level)
    }

    /// 当前控制台级别
    pub fn console_level(&self) -> LogLevel {
        LogLevel::from_u8(self.console_level.load(Ordering::Acquire))
    }

    /// 设置控制台级别
    pub fn set_console_level(&self, level: LogLevel) {
        self.console_level.store(level as u8, Ordering::Release);
    }
}

impl Default for LogCore {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// `a::b` 匹配 `a::b` 与 `a::b::c`，不匹配 `a::bc`
fn target_matches(target: &str, prefix: &str) -> bool {
    match target.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with("::"),
        None => false,
    }
}

fn print_to_console(entry: &LogEntry) {
    use std::io::Write;

    // 整行一次写出
    let mut stderr = std::io::stderr().lock();
    let _ = writeln!(stderr, "{}{}\x1b[0m", entry.level().ansi(), entry);
}
