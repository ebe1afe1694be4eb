//! 同步原语
//!
//! 向其它模块提供基本的锁原语。
//! 所有锁都是 `lock_api` 在 [`RawSpinLock`] 之上的包装。
mod raw_spin_lock;

pub use raw_spin_lock::*;

/// 自旋锁，保护短临界区
pub type SpinLock<T> = lock_api::Mutex<RawSpinLock, T>;

/// 自旋锁守卫
pub type SpinLockGuard<'a, T> = lock_api::MutexGuard<'a, RawSpinLock, T>;

/// 持有 `Arc` 的自旋锁守卫，可以脱离锁所在的借用作用域存活
pub type ArcSpinLockGuard<T> = lock_api::ArcMutexGuard<RawSpinLock, T>;

/// 互斥锁
///
/// 宿主环境下与 [`SpinLock`] 相同；保留单独的名字以区分语义上可能较长的临界区。
pub type Mutex<T> = lock_api::Mutex<RawSpinLock, T>;
