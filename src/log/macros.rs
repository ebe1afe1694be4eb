//! 内核风格的 `pr_*` 日志宏
//!
//! ```ignore
//! pr_info!("quotafs: created instance {}", fsid);
//! pr_warn!("quotafs: unlink of inode {} with zero link count", ino);
//! ```
//!
//! 级别未启用时不会求值格式化参数。每条记录的 target 是调用处的 `module_path!()`。

#[doc(hidden)]
#[macro_export]
macro_rules! __pr {
    ($level:ident, $($arg:tt)*) => {{
        let level = $crate::log::LogLevel::$level;
        if $crate::log::is_level_enabled(level) {
            $crate::log::log_impl(level, module_path!(), format_args!($($arg)*));
        }
    }};
}

/// EMERG 级别日志
#[macro_export]
macro_rules! pr_emerg {
    ($($arg:tt)*) => { $crate::__pr!(Emergency, $($arg)*) };
}

/// ALERT 级别日志
#[macro_export]
macro_rules! pr_alert {
    ($($arg:tt)*) => { $crate::__pr!(Alert, $($arg)*) };
}

/// CRIT 级别日志
#[macro_export]
macro_rules! pr_crit {
    ($($arg:tt)*) => { $crate::__pr!(Critical, $($arg)*) };
}

/// ERR 级别日志
#[macro_export]
macro_rules! pr_err {
    ($($arg:tt)*) => { $crate::__pr!(Error, $($arg)*) };
}

/// 用于说明别处存在 bug、但不应中断当前操作的情况，例如链接数减到零以下
#[macro_export]
macro_rules! pr_warn {
    ($($arg:tt)*) => { $crate::__pr!(Warning, $($arg)*) };
}

/// NOTICE 级别日志
#[macro_export]
macro_rules! pr_notice {
    ($($arg:tt)*) => { $crate::__pr!(Notice, $($arg)*) };
}

/// INFO 级别日志
#[macro_export]
macro_rules! pr_info {
    ($($arg:tt)*) => { $crate::__pr!(Info, $($arg)*) };
}

/// DEBUG 级别日志
#[macro_export]
macro_rules! pr_debug {
    ($($arg:tt)*) => { $crate::__pr!(Debug, $($arg)*) };
}
