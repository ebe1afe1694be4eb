//! 单条日志记录
//!
//! 消息写入定长数组，超长时在字符边界截断，记录本身不做堆分配。

use super::config::MAX_LOG_MESSAGE_LENGTH;
use super::context::LogContext;
use super::level::LogLevel;
use core::fmt::{self, Write};

/// 一条已格式化的日志
#[derive(Debug, Clone)]
pub struct LogEntry {
    seq: usize,
    level: LogLevel,
    /// 产生日志的模块路径
    target: &'static str,
    thread: u32,
    /// Unix 纪元以来的微秒数
    timestamp_us: u64,
    len: usize,
    text: [u8; MAX_LOG_MESSAGE_LENGTH],
}

impl LogEntry {
    pub(super) fn capture(
        level: LogLevel,
        target: &'static str,
        ctx: LogContext,
        args: fmt::Arguments<'_>,
    ) -> Self {
        let mut text = [0u8; MAX_LOG_MESSAGE_LENGTH];
        let mut sink = TruncatingSink {
            buf: &mut text,
            used: 0,
        };
        let _ = sink.write_fmt(args);
        let len = sink.used;

        Self {
            seq: 0,
            level,
            target,
            thread: ctx.thread,
            timestamp_us: ctx.timestamp_us,
            len,
            text,
        }
    }

    /// 消息文本，可能已被截断
    pub fn message(&self) -> &str {
        core::str::from_utf8(&self.text[..self.len]).unwrap_or("")
    }

    /// 日志级别
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// 产生日志的模块路径
    pub fn target(&self) -> &'static str {
        self.target
    }

    /// 写入缓冲区时分配的序列号
    pub fn seq(&self) -> usize {
        self.seq
    }

    /// 产生日志的线程编号
    pub fn thread(&self) -> u32 {
        self.thread
    }

    /// Unix 纪元以来的微秒数
    pub fn timestamp_us(&self) -> u64 {
        self.timestamp_us
    }

    pub(super) fn set_seq(&mut self, seq: usize) {
        self.seq = seq;
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:>6}.{:06}] {:<6} T{} {}: {}",
            self.timestamp_us / 1_000_000,
            self.timestamp_us % 1_000_000,
            self.level,
            self.thread,
            self.target,
            self.message()
        )
    }
}

/// 写满后静默丢弃剩余内容
struct TruncatingSink<'a> {
    buf: &'a mut [u8],
    used: usize,
}

impl Write for TruncatingSink<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = self.buf.len() - self.used;
        let mut n = s.len().min(room);
        while !s.is_char_boundary(n) {
            n -= 1;
        }
        self.buf[self.used..self.used + n].copy_from_slice(&s.as_bytes()[..n]);
        self.used += n;
        Ok(())
    }
}
