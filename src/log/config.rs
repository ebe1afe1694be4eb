//! 日志配置

use super::level::LogLevel;

/// 环形缓冲区容量（条）
pub const LOG_BUFFER_CAPACITY: usize = 256;

/// 单条消息的最大字节数
pub const MAX_LOG_MESSAGE_LENGTH: usize = 256;

/// 默认记录级别
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

/// 默认控制台级别
pub const DEFAULT_CONSOLE_LEVEL: LogLevel = LogLevel::Warning;

/// 覆盖记录级别的环境变量，例如 `QUOTAFS_LOG=debug`
pub const LOG_LEVEL_ENV: &str = "QUOTAFS_LOG";
