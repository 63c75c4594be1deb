//! 内核锁原语
//!
//! - [`SpinLock`]：持锁期间关闭本地中断的自旋锁
//! - [`RwLock`]：基于 `lock_api` 的自旋读写锁，不关中断
//! - [`IntrGuard`]：关中断的 RAII 守卫
//!
//! 中断控制经由注册的 [`ArchOps`] 完成；宿主机测试中不注册，
//! 守卫退化为空操作。

#![no_std]

mod intr_guard;
mod rwlock;
mod spin_lock;

pub use intr_guard::IntrGuard;
pub use rwlock::{RawRwSpinLock, RwLock, RwLockReadGuard, RwLockWriteGuard};
pub use spin_lock::{SpinLock, SpinLockGuard};

use core::sync::atomic::{AtomicUsize, Ordering};

/// 架构层提供的本地中断控制
pub trait ArchOps: Send + Sync {
    /// 关闭本地中断，返回关闭前的状态字
    ///
    /// # Safety
    /// 返回值必须原样交给 [`restore_irq`](ArchOps::restore_irq)
    unsafe fn save_and_disable_irq(&self) -> usize;

    /// 恢复 `save_and_disable_irq` 保存的状态
    ///
    /// # Safety
    /// `flags` 必须来自同一 CPU 上配对的 `save_and_disable_irq`
    unsafe fn restore_irq(&self, flags: usize);

    /// 状态字中中断是否处于打开
    fn irq_enabled_in(&self, flags: usize) -> bool;
}

static ARCH_OPS: [AtomicUsize; 2] = [AtomicUsize::new(0), AtomicUsize::new(0)];

/// 注册架构操作
///
/// # Safety
/// 须在启动早期单线程阶段调用一次
pub unsafe fn register_arch_ops(ops: &'static dyn ArchOps) {
    // SAFETY: trait object 指针布局为 (data, vtable)
    let ptr = ops as *const dyn ArchOps;
    let [data, vtable] = unsafe { core::mem::transmute::<*const dyn ArchOps, [usize; 2]>(ptr) };
    ARCH_OPS[1].store(vtable, Ordering::Release);
    ARCH_OPS[0].store(data, Ordering::Release);
}

#[inline]
pub(crate) fn arch_ops() -> Option<&'static dyn ArchOps> {
    let data = ARCH_OPS[0].load(Ordering::Acquire);
    if data == 0 {
        return None;
    }
    let vtable = ARCH_OPS[1].load(Ordering::Acquire);
    // SAFETY: 两部分由 register_arch_ops 写入，指向 'static 对象
    Some(unsafe { &*core::mem::transmute::<[usize; 2], *const dyn ArchOps>([data, vtable]) })
}
