//! procfs 取数所依赖的宿主服务
//!
//! 宿主在启动时注册一个 [`FsOps`] 实现；meminfo 的数字全部来自这里。

use core::sync::atomic::{AtomicUsize, Ordering};
use uapi::time::TimeSpec;

/// 宿主为 procfs 提供的服务
pub trait FsOps: Send + Sync {
    /// 页大小（字节），用于把页帧数换算成 kB
    fn page_size(&self) -> usize;

    /// 墙上时间，作为节点的创建时间
    fn timespec_now(&self) -> TimeSpec;

    /// 物理页帧总数
    fn get_total_frames(&self) -> usize;

    /// 空闲物理页帧数
    fn get_free_frames(&self) -> usize;
}

static FS_OPS: [AtomicUsize; 2] = [AtomicUsize::new(0), AtomicUsize::new(0)];

/// 注册宿主服务
///
/// # Safety
/// 启动早期单线程阶段调用；重复注册必须传入同一对象
pub unsafe fn register_fs_ops(ops: &'static dyn FsOps) {
    // SAFETY: (data, vtable) 布局
    let [data, vtable] =
        unsafe { core::mem::transmute::<*const dyn FsOps, [usize; 2]>(ops as *const dyn FsOps) };
    FS_OPS[1].store(vtable, Ordering::Release);
    FS_OPS[0].store(data, Ordering::Release);
}

/// 已注册的宿主服务
///
/// # Panics
/// 未注册时 panic，procfs 在注册前不可使用
#[inline]
pub fn fs_ops() -> &'static dyn FsOps {
    let data = FS_OPS[0].load(Ordering::Acquire);
    assert!(data != 0, "fs: FsOps not registered");
    let vtable = FS_OPS[1].load(Ordering::Acquire);
    // SAFETY: 由 register_fs_ops 写入
    unsafe { &*core::mem::transmute::<[usize; 2], *const dyn FsOps>([data, vtable]) }
}
