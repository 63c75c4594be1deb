//! 自旋锁
//!
//! 获取锁前先关闭本地中断，释放锁后再恢复，
//! 因此同一 CPU 上的中断处理程序不会在持锁期间重入同一把锁。

use core::cell::UnsafeCell;
use core::hint;
use core::ops::{Deref, DerefMut};
use core::sync::atomic::{AtomicBool, Ordering};

use crate::intr_guard::IntrGuard;

/// 关中断的自旋锁
///
/// 不可重入：持锁时再次 `lock` 会死锁。临界区内不应执行耗时操作。
///
/// # 示例
/// ```ignore
/// let lock = SpinLock::new(0);
/// *lock.lock() += 1;
/// ```
#[derive(Debug)]
pub struct SpinLock<T> {
    locked: AtomicBool,
    data: UnsafeCell<T>,
}

// SAFETY: 对 data 的访问被 locked 串行化
unsafe impl<T: Send> Send for SpinLock<T> {}
unsafe impl<T: Send> Sync for SpinLock<T> {}

impl<T> SpinLock<T> {
    /// 创建自旋锁
    pub const fn new(data: T) -> Self {
        Self {
            locked: AtomicBool::new(false),
            data: UnsafeCell::new(data),
        }
    }

    /// 获取锁
    pub fn lock(&self) -> SpinLockGuard<'_, T> {
        let intr = IntrGuard::new();
        loop {
            if self.acquire() {
                return SpinLockGuard { lock: self, _intr: intr };
            }
            // 只读等待，避免在竞争时反复写缓存行
            while self.locked.load(Ordering::Relaxed) {
                hint::spin_loop();
            }
        }
    }

    /// 尝试获取锁，失败时立即返回 `None` 并恢复中断状态
    pub fn try_lock(&self) -> Option<SpinLockGuard<'_, T>> {
        let intr = IntrGuard::new();
        self.acquire()
            .then(|| SpinLockGuard { lock: self, _intr: intr })
    }

    /// 锁当前是否被占用（只用于诊断，结果可能立即过时）
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }

    /// 独占访问时直接取得内部数据
    pub fn get_mut(&mut self) -> &mut T {
        self.data.get_mut()
    }

    /// 消耗锁并返回内部数据
    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }

    fn acquire(&self) -> bool {
        self.locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }
}

impl<T: Default> Default for SpinLock<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// 自旋锁保护器
///
/// 析构时先释放锁，再由 `_intr` 恢复中断状态。
pub struct SpinLockGuard<'a, T> {
    lock: &'a SpinLock<T>,
    _intr: IntrGuard,
}

impl<T> Deref for SpinLockGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: 持有保护器即持有锁
        unsafe { &*self.lock.data.get() }
    }
}

impl<T> DerefMut for SpinLockGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: 持有保护器即持有锁
        unsafe { &mut *self.lock.data.get() }
    }
}

impl<T> Drop for SpinLockGuard<'_, T> {
    fn drop(&mut self) {
        self.lock.locked.store(false, Ordering::Release);
    }
}
