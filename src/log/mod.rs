//! 日志系统
//!
//! `pr_*` 宏写入全局 [`LogCore`]，每条记录带上调用处的模块路径。
//! 达到记录级别的条目进入环形缓冲区，达到控制台级别的同时打印到 stderr。
//! 记录级别可以由环境变量 [`LOG_LEVEL_ENV`](config::LOG_LEVEL_ENV) 覆盖，见 [`init_from_env`]。
pub mod buffer;
pub mod config;
mod context;
pub mod entry;
pub mod level;
pub mod log_core;
pub mod macros;


pub use entry::LogEntry;
pub use level::LogLevel;
pub use log_core::LogCore;

use alloc::vec::Vec;

static GLOBAL_LOG: LogCore = LogCore::with_defaults();

#[doc(hidden)]
pub fn log_impl(level: LogLevel, target: &'static str, args: core::fmt::Arguments<'_>) {
    GLOBAL_LOG.record(level, target, args);
}

#[doc(hidden)]
#[inline(always)]
pub fn is_level_enabled(level: LogLevel) -> bool {
    GLOBAL_LOG.enabled(level)
}

/// 读取环境变量设置记录级别，返回生效的级别
///
/// 变量未设置或无法解析时保持原级别。
pub fn init_from_env() -> LogLevel {
    if let Ok(value) = std::env::var(config::LOG_LEVEL_ENV) {
        if GLOBAL_LOG.set_record_level_by_name(&value).is_none() {
            crate::pr_warn!("ignoring {}={:?}", config::LOG_LEVEL_ENV, value);
        }
    }
    GLOBAL_LOG.record_level()
}

/// 设置全局记录级别
pub fn set_global_level(level: LogLevel) {
    GLOBAL_LOG.set_record_level(level);
}

/// 全局记录级别
pub fn get_global_level() -> LogLevel {
    GLOBAL_LOG.record_level()
}

/// 设置控制台级别
pub fn set_console_level(level: LogLevel) {
    GLOBAL_LOG.set_console_level(level);
}

/// 控制台级别
pub fn get_console_level() -> LogLevel {
    GLOBAL_LOG.console_level()
}

/// 取出最旧的一条
pub fn read_log() -> Option<LogEntry> {
    GLOBAL_LOG.pop()
}

/// 缓冲区中的全部条目，不取出
pub fn recent_entries() -> Vec<LogEntry> {
    GLOBAL_LOG.snapshot()
}

/// 某个模块（含子模块）产生的条目，例如 `"quotafs::fs::quotafs"`
pub fn entries_from(module: &str) -> Vec<LogEntry> {
    GLOBAL_LOG.entries_from(module)
}

/// 缓冲区中的条目数
pub fn log_len() -> usize {
    GLOBAL_LOG.len()
}

/// 因缓冲区满而丢弃的条目数
pub fn log_dropped_count() -> usize {
    GLOBAL_LOG.dropped()
}
