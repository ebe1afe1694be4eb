//! 每条日志附带的上下文：线程编号与时间戳

use core::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub(super) struct LogContext {
    pub(super) thread: u32,
    pub(super) timestamp_us: u64,
}

static NEXT_THREAD: AtomicU32 = AtomicU32::new(1);

std::thread_local! {
    static THREAD: u32 = NEXT_THREAD.fetch_add(1, Ordering::Relaxed);
}

pub(super) fn current() -> LogContext {
    let timestamp_us = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0);
    LogContext {
        thread: THREAD.with(|id| *id),
        timestamp_us,
    }
}
