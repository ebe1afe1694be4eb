//! 日志级别，数值与内核 `KERN_*` 一致，越小越严重

use core::fmt;

/// 日志级别
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// 系统不可用
    Emergency = 0,
    /// 必须立即处理
    Alert = 1,
    /// 严重错误
    Critical = 2,
    /// 错误
    Error = 3,
    /// 警告
    Warning = 4,
    /// 正常但值得注意
    Notice = 5,
    /// 一般信息
    Info = 6,
    /// 调试信息
    Debug = 7,
}

const ALL_LEVELS: [LogLevel; 8] = [
    LogLevel::Emergency,
    LogLevel::Alert,
    LogLevel::Critical,
    LogLevel::Error,
    LogLevel::Warning,
    LogLevel::Notice,
    LogLevel::Info,
    LogLevel::Debug,
];

impl LogLevel {
    /// 短名称，也是 [`from_name`](Self::from_name) 接受的写法
    pub const fn name(self) -> &'static str {
        match self {
            LogLevel::Emergency => "emerg",
            LogLevel::Alert => "alert",
            LogLevel::Critical => "crit",
            LogLevel::Error => "err",
            LogLevel::Warning => "warn",
            LogLevel::Notice => "notice",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    /// 控制台着色
    pub(super) const fn ansi(self) -> &'static str {
        match self {
            LogLevel::Emergency | LogLevel::Alert | LogLevel::Critical => "\x1b[1;31m",
            LogLevel::Error => "\x1b[31m",
            LogLevel::Warning => "\x1b[33m",
            LogLevel::Notice => "\x1b[1;37m",
            LogLevel::Info => "\x1b[37m",
            LogLevel::Debug => "\x1b[90m",
        }
    }

    /// 按名称或数字解析，不区分大小写
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if let Ok(n) = name.parse::<u8>() {
            return ALL_LEVELS.get(n as usize).copied();
        }
        ALL_LEVELS
            .iter()
            .copied()
            .find(|level| level.name().eq_ignore_ascii_case(name))
    }

    /// 超出范围的值按 Debug 处理
    pub(super) const fn from_u8(raw: u8) -> Self {
        if (raw as usize) < ALL_LEVELS.len() {
            ALL_LEVELS[raw as usize]
        } else {
            LogLevel::Debug
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
